// In-memory employee record store

use crate::error::{AddError, NotFound, ValidationError};
use crate::filter::SearchCriteria;
use crate::models::{Employee, EmployeeId, EmployeePatch, Field, NewEmployee, non_blank};
use crate::validate;
use tracing::{debug, info, warn};

/// Outcome of a `modify` call
///
/// Lists the fields that changed, in prompt order, and the fields whose new
/// value was rejected along with the reason.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifyReport {
    pub updated: Vec<Field>,
    pub rejected: Vec<ValidationError>,
}

impl ModifyReport {
    pub fn is_unchanged(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Ordered collection of employee records plus the id counter
///
/// Records keep insertion order. Ids are never reused within a session.
#[derive(Debug, Clone)]
pub struct Store {
    employees: Vec<Employee>,
    next_id: Option<EmployeeId>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create an empty store; the first id handed out is 1
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Build a store from records loaded from disk
    ///
    /// The next id is one past the id of the *last* record in sequence order,
    /// not the largest id present.
    pub fn from_records(employees: Vec<Employee>) -> Self {
        let next_id = employees.last().map_or(Some(1), |last| last.id.checked_add(1));
        info!(count = employees.len(), next_id = ?next_id, "Store initialized from records");
        Self { employees, next_id }
    }

    /// The id the next successful `add` will receive, barring collisions
    ///
    /// `None` once the counter has passed the largest representable id.
    pub fn next_id(&self) -> Option<EmployeeId> {
        self.next_id
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Validate and append a new record, returning its id
    ///
    /// Nothing changes when validation fails or no id is left to assign.
    pub fn add(&mut self, fields: NewEmployee) -> Result<EmployeeId, AddError> {
        validate::new_employee(&fields)?;

        let id = self.claim_id()?;
        self.employees.push(fields.into_employee(id));

        debug!(id, count = self.employees.len(), "Employee added");
        Ok(id)
    }

    /// Remove the record with the given id, keeping the others in order
    pub fn delete(&mut self, id: EmployeeId) -> Result<(), NotFound> {
        let index = self.position(id).ok_or(NotFound(id))?;
        self.employees.remove(index);

        debug!(id, count = self.employees.len(), "Employee deleted");
        Ok(())
    }

    /// Apply the non-blank values of `patch`, each validated on its own
    ///
    /// A rejected value leaves that field untouched but does not stop the
    /// other fields from being applied.
    pub fn modify(&mut self, id: EmployeeId, patch: EmployeePatch) -> Result<ModifyReport, NotFound> {
        let index = self.position(id).ok_or(NotFound(id))?;
        let employee = &mut self.employees[index];
        let mut report = ModifyReport::default();

        apply_text(&mut report, Field::FirstName, &patch.first_name, &mut employee.first_name, |v| {
            validate::non_empty(Field::FirstName, v)
        });
        apply_text(&mut report, Field::LastName, &patch.last_name, &mut employee.last_name, |v| {
            validate::non_empty(Field::LastName, v)
        });
        if let Some(age) = patch.age {
            apply(&mut report, Field::Age, validate::age(age), || employee.age = age);
        }
        if let Some(salary) = patch.basic_salary {
            apply(&mut report, Field::BasicSalary, validate::salary(salary), || {
                employee.basic_salary = salary
            });
        }
        apply_text(&mut report, Field::Department, &patch.department, &mut employee.department, |v| {
            validate::non_empty(Field::Department, v)
        });
        apply_text(
            &mut report,
            Field::DateOfJoining,
            &patch.date_of_joining,
            &mut employee.date_of_joining,
            validate::date_of_joining,
        );
        apply_text(&mut report, Field::Address, &patch.address, &mut employee.address, |v| {
            validate::non_empty(Field::Address, v)
        });
        apply_text(&mut report, Field::City, &patch.city, &mut employee.city, |v| {
            validate::non_empty(Field::City, v)
        });
        apply_text(
            &mut report,
            Field::PhoneNumber,
            &patch.phone_number,
            &mut employee.phone_number,
            validate::phone_number,
        );

        debug!(
            id,
            updated = report.updated.len(),
            rejected = report.rejected.len(),
            "Employee modified"
        );
        Ok(report)
    }

    /// Look up a record by id
    pub fn find_by_id(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    /// All records matching the criteria, in insertion order
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|employee| criteria.matches(employee))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.employees.len()
    }

    /// Every record, in insertion order
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.employees.iter().position(|employee| employee.id == id)
    }

    fn claim_id(&mut self) -> Result<EmployeeId, AddError> {
        // A reordered file can leave the counter pointing at a live id
        loop {
            let id = self.next_id.ok_or(AddError::IdsExhausted)?;
            self.next_id = id.checked_add(1);
            if self.position(id).is_none() {
                return Ok(id);
            }
            warn!(id, "Next employee number already taken, skipping");
        }
    }
}

fn apply(report: &mut ModifyReport, field: Field, check: Result<(), ValidationError>, set: impl FnOnce()) {
    match check {
        Ok(()) => {
            set();
            report.updated.push(field);
        }
        Err(e) => {
            debug!(%field, error = %e, "Field update rejected");
            report.rejected.push(e);
        }
    }
}

fn apply_text(
    report: &mut ModifyReport,
    field: Field,
    value: &Option<String>,
    target: &mut String,
    check: impl FnOnce(&str) -> Result<(), ValidationError>,
) {
    if let Some(value) = non_blank(value) {
        apply(report, field, check(value), || *target = value.to_string());
    }
}
