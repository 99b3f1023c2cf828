// Search criteria for employee records

use crate::models::Employee;

/// Optional exact-match criteria, combined with AND
///
/// A blank (empty or all-whitespace) criterion matches every record. A
/// non-blank one must equal the record's field ignoring case, surrounding
/// whitespace included; partial matches do not count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
}

impl SearchCriteria {
    /// Build criteria from raw input, treating blank strings as absent
    ///
    /// Non-blank values are kept as typed.
    pub fn new(first_name: &str, last_name: &str, department: &str) -> Self {
        Self {
            first_name: criterion(first_name),
            last_name: criterion(last_name),
            department: criterion(department),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.department.is_none()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        field_matches(self.first_name.as_deref(), &employee.first_name)
            && field_matches(self.last_name.as_deref(), &employee.last_name)
            && field_matches(self.department.as_deref(), &employee.department)
    }
}

fn criterion(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.filter(|s| !s.trim().is_empty()) {
        None => true,
        Some(wanted) => wanted.to_lowercase() == actual.to_lowercase(),
    }
}
