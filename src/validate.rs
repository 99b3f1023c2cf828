// Field validation for employee records

use crate::error::ValidationError;
use crate::models::{Field, NewEmployee};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 65;

// ASCII classes on purpose: `\d` would also accept non-ASCII digits
static DATE_OF_JOINING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[A-Za-z]{3}-[0-9]{4}$").expect("valid date regex"));
static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

pub fn non_empty(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn age(value: i32) -> Result<(), ValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&value) {
        return Err(ValidationError::AgeOutOfRange(value));
    }
    Ok(())
}

/// Rejects negative amounts, and NaN/infinity which cannot be persisted
pub fn salary(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidSalary(value));
    }
    Ok(())
}

/// Pattern check only; "99-Zzz-0000" passes
pub fn date_of_joining(value: &str) -> Result<(), ValidationError> {
    if !DATE_OF_JOINING_RE.is_match(value) {
        return Err(ValidationError::MalformedDate(value.to_string()));
    }
    Ok(())
}

pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    if !PHONE_NUMBER_RE.is_match(value) {
        return Err(ValidationError::MalformedPhone(value.to_string()));
    }
    Ok(())
}

/// Validate every field of a new record
///
/// Checks run in a fixed order and the first failure is returned:
/// required text fields, age, salary, date of joining, phone number.
pub fn new_employee(fields: &NewEmployee) -> Result<(), ValidationError> {
    non_empty(Field::FirstName, &fields.first_name)?;
    non_empty(Field::LastName, &fields.last_name)?;
    non_empty(Field::Department, &fields.department)?;
    non_empty(Field::Address, &fields.address)?;
    non_empty(Field::City, &fields.city)?;
    age(fields.age)?;
    salary(fields.basic_salary)?;
    date_of_joining(&fields.date_of_joining)?;
    phone_number(&fields.phone_number)?;
    Ok(())
}
