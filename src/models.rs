// Data models for employee records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee number, assigned by the store
pub type EmployeeId = u32;

/// A stored employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub basic_salary: f64,
    pub department: String,
    /// DD-MMM-YYYY, kept as entered
    pub date_of_joining: String,
    pub address: String,
    pub city: String,
    pub phone_number: String,
}

/// Field values for a record that does not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub basic_salary: f64,
    pub department: String,
    pub date_of_joining: String,
    pub address: String,
    pub city: String,
    pub phone_number: String,
}

impl NewEmployee {
    pub(crate) fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            basic_salary: self.basic_salary,
            department: self.department,
            date_of_joining: self.date_of_joining,
            address: self.address,
            city: self.city,
            phone_number: self.phone_number,
        }
    }
}

/// Partial update for an existing record
///
/// `None` and blank strings both mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub basic_salary: Option<f64>,
    pub department: Option<String>,
    pub date_of_joining: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.department,
            &self.date_of_joining,
            &self.address,
            &self.city,
            &self.phone_number,
        ]
        .iter()
        .all(|value| non_blank(value).is_none())
            && self.age.is_none()
            && self.basic_salary.is_none()
    }
}

/// Returns the value only when it holds something other than whitespace
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Editable fields of an employee record, in prompt order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Age,
    BasicSalary,
    Department,
    DateOfJoining,
    Address,
    City,
    PhoneNumber,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::Age,
        Field::BasicSalary,
        Field::Department,
        Field::DateOfJoining,
        Field::Address,
        Field::City,
        Field::PhoneNumber,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Age => "age",
            Field::BasicSalary => "basic salary",
            Field::Department => "department",
            Field::DateOfJoining => "date of joining",
            Field::Address => "address",
            Field::City => "city",
            Field::PhoneNumber => "phone number",
        };
        write!(f, "{}", name)
    }
}
