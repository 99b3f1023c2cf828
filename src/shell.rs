// Interactive menu over a record store

use crate::error::{AddError, ParseError};
use crate::filter::SearchCriteria;
use crate::gateway::Gateway;
use crate::input::{optional, parse_age, parse_employee_id, parse_salary};
use crate::models::{Employee, EmployeePatch, NewEmployee};
use crate::store::Store;
use colored::Colorize;
use eyre::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{error, info};

const MENU: &str = "\
1. ADD Employee
2. DELETE Employee
3. MODIFY Employee
4. SEARCH Employee
5. Display All Records
6. COUNT Records
7. Exit";

const ADD_PROMPTS: [&str; 9] = [
    "Enter First Name: ",
    "Enter Last Name: ",
    "Enter Age: ",
    "Enter Basic Salary: ",
    "Enter Department: ",
    "Enter Date of Joining (DD-MMM-YYYY): ",
    "Enter Address: ",
    "Enter City: ",
    "Enter Phone Number: ",
];

const MODIFY_PROMPTS: [&str; 9] = [
    "Enter new First Name: ",
    "Enter new Last Name: ",
    "Enter new Age: ",
    "Enter new Basic Salary: ",
    "Enter new Department: ",
    "Enter new Date of Joining (DD-MMM-YYYY): ",
    "Enter new Address: ",
    "Enter new City: ",
    "Enter new Phone Number: ",
];

const SEARCH_PROMPTS: [&str; 3] = [
    "Enter First Name (or leave blank): ",
    "Enter Last Name (or leave blank): ",
    "Enter Department (or leave blank): ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven front end
///
/// Reads choices and field values line by line from `input`, calls into the
/// store, and writes results to `output`. Choosing exit, or reaching the end
/// of input, saves the store through the gateway.
pub struct Shell<'a, R, W> {
    store: &'a mut Store,
    gateway: &'a Gateway,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut Store, gateway: &'a Gateway, input: R, output: W) -> Self {
        Self {
            store,
            gateway,
            input,
            output,
        }
    }

    /// Run the menu loop until exit, then save
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{}", "Employee Record System".bold())?;
            writeln!(self.output, "{}", MENU)?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add()?,
                "2" => self.delete()?,
                "3" => self.modify()?,
                "4" => self.search()?,
                "5" => self.display_all()?,
                "6" => self.count()?,
                "7" => Flow::Exit,
                _ => {
                    self.fail("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.save()?;
        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        Ok(())
    }

    // ========================================================================
    // Menu actions
    // ========================================================================

    fn add(&mut self) -> Result<Flow> {
        let Some(values) = self.prompt_all(&ADD_PROMPTS)? else {
            return Ok(Flow::Exit);
        };
        let [first_name, last_name, age, salary, department, date_of_joining, address, city, phone_number] = values;

        let parsed = parse_age(&age).and_then(|age| Ok((age, parse_salary(&salary)?)));
        let (age, basic_salary) = match parsed {
            Ok(numbers) => numbers,
            Err(e) => {
                self.parse_failed(&e, "Employee not added.")?;
                return Ok(Flow::Continue);
            }
        };

        let fields = NewEmployee {
            first_name,
            last_name,
            age,
            basic_salary,
            department,
            date_of_joining,
            address,
            city,
            phone_number,
        };

        match self.store.add(fields) {
            Ok(id) => {
                info!(id, "Employee added from shell");
                self.succeed(&format!("Employee added successfully with Emp No {}.", id))?;
            }
            Err(AddError::Invalid(e)) => self.fail(&format!("Invalid input: {}. Employee not added.", e))?,
            Err(e @ AddError::IdsExhausted) => {
                error!(error = %e, "Employee not added");
                self.fail(&format!("{}. Employee not added.", capitalize(&e.to_string())))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Enter Employee Number to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let id = match parse_employee_id(&raw) {
            Ok(id) => id,
            Err(e) => {
                self.parse_failed(&e, "Nothing deleted.")?;
                return Ok(Flow::Continue);
            }
        };

        match self.store.delete(id) {
            Ok(()) => self.succeed("Employee deleted successfully.")?,
            Err(_) => self.fail("Employee not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn modify(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Enter Employee Number to modify: ")? else {
            return Ok(Flow::Exit);
        };
        let id = match parse_employee_id(&raw) {
            Ok(id) => id,
            Err(e) => {
                self.parse_failed(&e, "Nothing modified.")?;
                return Ok(Flow::Continue);
            }
        };
        if self.store.find_by_id(id).is_none() {
            self.fail("Employee not found.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "Leave fields blank to keep existing values.")?;
        let Some(values) = self.prompt_all(&MODIFY_PROMPTS)? else {
            return Ok(Flow::Exit);
        };
        let [first_name, last_name, age, salary, department, date_of_joining, address, city, phone_number] = values;

        let parsed = optional(&age, parse_age).and_then(|age| Ok((age, optional(&salary, parse_salary)?)));
        let (age, basic_salary) = match parsed {
            Ok(numbers) => numbers,
            Err(e) => {
                self.parse_failed(&e, "Employee not modified.")?;
                return Ok(Flow::Continue);
            }
        };

        let patch = EmployeePatch {
            first_name: Some(first_name),
            last_name: Some(last_name),
            age,
            basic_salary,
            department: Some(department),
            date_of_joining: Some(date_of_joining),
            address: Some(address),
            city: Some(city),
            phone_number: Some(phone_number),
        };
        if patch.is_empty() {
            writeln!(self.output, "No changes entered.")?;
            return Ok(Flow::Continue);
        }

        let report = match self.store.modify(id, patch) {
            Ok(report) => report,
            Err(_) => {
                self.fail("Employee not found.")?;
                return Ok(Flow::Continue);
            }
        };

        for rejected in &report.rejected {
            let field = capitalize(&rejected.field().to_string());
            self.fail(&format!("{}. {} not updated.", capitalize(&rejected.to_string()), field))?;
        }
        if report.is_unchanged() {
            self.fail("No fields were updated.")?;
        } else {
            let fields: Vec<String> = report.updated.iter().map(ToString::to_string).collect();
            self.succeed(&format!("Employee modified successfully ({}).", fields.join(", ")))?;
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some([first_name, last_name, department]) = self.prompt_all(&SEARCH_PROMPTS)? else {
            return Ok(Flow::Exit);
        };

        let criteria = SearchCriteria::new(&first_name, &last_name, &department);
        let results = self.store.search(&criteria);
        if results.is_empty() {
            writeln!(self.output, "No matching records found.")?;
        } else {
            writeln!(self.output, "{}", "Search Results:".bold())?;
            write!(self.output, "{}", format_table(&results))?;
        }
        Ok(Flow::Continue)
    }

    fn display_all(&mut self) -> Result<Flow> {
        let records: Vec<&Employee> = self.store.all().iter().collect();
        if records.is_empty() {
            writeln!(self.output, "No records found.")?;
        } else {
            writeln!(self.output, "{}", "All Employee Records:".bold())?;
            write!(self.output, "{}", format_table(&records))?;
        }
        Ok(Flow::Continue)
    }

    fn count(&mut self) -> Result<Flow> {
        writeln!(self.output, "Total number of records: {}", self.store.count())?;
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<()> {
        match self.gateway.save(self.store.all()) {
            Ok(()) => writeln!(self.output, "Saved {} record(s).", self.store.count())?,
            Err(e) => {
                // Exit anyway; the session's changes are lost
                error!(error = %e, "Failed to save employee records");
                self.fail(&format!("Failed to save records: {}", e))?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Print `label` and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_all<const N: usize>(&mut self, labels: &[&str; N]) -> Result<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(line) => *value = line,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn succeed(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.green())?;
        Ok(())
    }

    fn fail(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.red())?;
        Ok(())
    }

    fn parse_failed(&mut self, e: &ParseError, outcome: &str) -> Result<()> {
        self.fail(&format!("{}. {}", capitalize(&e.to_string()), outcome))
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render records as a fixed-width table with a header row
pub fn format_table(records: &[&Employee]) -> String {
    let mut table = format!(
        "{:<10} {:<15} {:<15} {:<5} {:<10} {:<15} {:<15} {:<20} {:<15} {:<15}\n",
        "Emp No", "First Name", "Last Name", "Age", "Salary", "Department", "DOJ", "Address", "City", "Phone"
    );
    for e in records {
        table.push_str(&format!(
            "{:<10} {:<15} {:<15} {:<5} {:<10.2} {:<15} {:<15} {:<20} {:<15} {:<15}\n",
            e.id,
            e.first_name,
            e.last_name,
            e.age,
            e.basic_salary,
            e.department,
            e.date_of_joining,
            e.address,
            e.city,
            e.phone_number
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;
    use std::io::Cursor;
    use tempfile::TempDir;

    const ANNA: &str = "Anna\nLee\n30\n50000\nEng\n01-Jan-2020\n1 Main St\nMetropolis\n1234567890\n";
    const BOB: &str = "Bob\nKim\n45\n62000.5\nSales\n15-Mar-2018\n2 Side Rd\nGotham\n5550001111\n";

    /// Run a scripted session and return the output and the reloaded store
    fn run_session(temp: &TempDir, store: &mut Store, script: &str) -> (String, Store) {
        let gateway = Gateway::new(temp.path().join("employees.jsonl"));
        let mut output = Vec::new();
        Shell::new(store, &gateway, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        (String::from_utf8(output).unwrap(), gateway.load_store())
    }

    #[test]
    fn test_add_and_exit_saves() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let script = format!("1\n{}1\n{}7\n", ANNA, BOB);
        let (output, reloaded) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Employee added successfully with Emp No 1."));
        assert!(output.contains("Employee added successfully with Emp No 2."));
        assert!(output.contains("Exiting..."));
        assert_eq!(store.count(), 2);
        assert_eq!(reloaded.all(), store.all());
    }

    #[test]
    fn test_add_invalid_age_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let young = ANNA.replacen("30", "17", 1);
        let script = format!("1\n{}1\n{}6\n7\n", ANNA, young);
        let (output, _) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Invalid input: invalid age 17"));
        assert!(output.contains("Total number of records: 1"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_add_non_numeric_age_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let script = format!("1\n{}7\n", ANNA.replacen("30", "thirty", 1));
        let (output, _) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Invalid age: \"thirty\" is not a whole number. Employee not added."));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let script = format!("1\n{}2\n1\n2\n1\n2\nabc\n7\n", ANNA);
        let (output, _) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Employee deleted successfully."));
        assert!(output.contains("Employee not found."));
        assert!(output.contains("Invalid employee number: \"abc\""));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_modify_applies_valid_and_reports_rejected() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        // New last name and city, bad phone, everything else blank
        let script = format!("1\n{}3\n1\n\nPark\n\n\n\n\n\nStar City\n12ab\n7\n", ANNA);
        let (output, _) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Leave fields blank to keep existing values."));
        assert!(output.contains("Phone number not updated."));
        assert!(output.contains("Employee modified successfully (last name, city)."));

        let employee = store.find_by_id(1).unwrap();
        assert_eq!(employee.first_name, "Anna");
        assert_eq!(employee.last_name, "Park");
        assert_eq!(employee.city, "Star City");
        assert_eq!(employee.phone_number, "1234567890");
    }

    #[test]
    fn test_modify_parse_error_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let script = format!("1\n{}3\n1\nAnne\n\n\nlots\n\n\n\n\n\n7\n", ANNA);
        let (output, _) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Employee not modified."));
        assert_eq!(store.find_by_id(1).unwrap().first_name, "Anna");
    }

    #[test]
    fn test_modify_unknown_employee() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let (output, _) = run_session(&temp, &mut store, "3\n9\n7\n");
        assert!(output.contains("Employee not found."));
        assert!(!output.contains("Leave fields blank"));
    }

    #[test]
    fn test_search_and_display() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let script = format!("5\n1\n{}1\n{}4\n\n\nsales\n4\nzed\n\n\n5\n7\n", ANNA, BOB);
        let (output, _) = run_session(&temp, &mut store, &script);

        assert!(output.contains("No records found."));
        assert!(output.contains("Search Results:"));
        assert!(output.contains("No matching records found."));
        assert!(output.contains("All Employee Records:"));
        assert!(output.contains("62000.50"));
    }

    #[test]
    fn test_invalid_choice_and_end_of_input_saves() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        // No explicit exit: end of input mid-menu still saves
        let script = format!("9\n1\n{}", ANNA);
        let (output, reloaded) = run_session(&temp, &mut store, &script);

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Saved 1 record(s)."));
        assert_eq!(reloaded.count(), 1);
    }

    #[test]
    fn test_end_of_input_mid_add_adds_nothing() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::new();

        let (_, reloaded) = run_session(&temp, &mut store, "1\nAnna\nLee\n");
        assert_eq!(store.count(), 0);
        assert_eq!(reloaded.count(), 0);
    }

    fn employee(id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: "Anna".to_string(),
            last_name: "Lee".to_string(),
            age: 30,
            basic_salary: 50000.0,
            department: "Eng".to_string(),
            date_of_joining: "01-Jan-2020".to_string(),
            address: "1 Main St".to_string(),
            city: "Metropolis".to_string(),
            phone_number: "1234567890".to_string(),
        }
    }

    #[test]
    fn test_add_with_no_ids_left() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::from_records(vec![employee(EmployeeId::MAX)]);

        let script = format!("1\n{}7\n", BOB);
        let (output, reloaded) = run_session(&temp, &mut store, &script);

        assert!(output.contains("No employee numbers left to assign. Employee not added."));
        assert_eq!(store.count(), 1);
        assert_eq!(reloaded.count(), 1);
    }

    #[test]
    fn test_format_table() {
        let first = employee(3);
        let mut second = employee(12);
        second.first_name = "Bob".to_string();

        let table = format_table(&[&first, &second]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(table.ends_with('\n'));
        assert!(lines[0].starts_with("Emp No     First Name"));
        assert!(lines[1].starts_with("3          Anna            Lee             30    50000.00   Eng"));
        assert!(lines[2].starts_with("12         Bob "));

        assert_eq!(format_table(&[]).lines().count(), 1);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("invalid age"), "Invalid age");
        assert_eq!(capitalize(""), "");
    }
}
