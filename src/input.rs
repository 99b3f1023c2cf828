// Parsing of raw text input into typed values
//
// Runs before any store call, so a bad number never reaches the store.

use crate::error::ParseError;
use crate::models::{EmployeeId, Field};

fn parse_error(what: impl ToString, input: &str, expected: &'static str) -> ParseError {
    ParseError {
        what: what.to_string(),
        input: input.to_string(),
        expected,
    }
}

/// Parse an age; range checking is left to the validator
pub fn parse_age(input: &str) -> Result<i32, ParseError> {
    input
        .trim()
        .parse()
        .map_err(|_| parse_error(Field::Age, input, "a whole number"))
}

/// Parse a salary amount; sign checking is left to the validator
pub fn parse_salary(input: &str) -> Result<f64, ParseError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| parse_error(Field::BasicSalary, input, "a number"))?;
    if !value.is_finite() {
        return Err(parse_error(Field::BasicSalary, input, "a finite number"));
    }
    Ok(value)
}

pub fn parse_employee_id(input: &str) -> Result<EmployeeId, ParseError> {
    input
        .trim()
        .parse()
        .map_err(|_| parse_error("employee number", input, "a positive whole number"))
}

/// Parse an optional value: blank input means "not provided"
pub fn optional<T>(
    input: &str,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<Option<T>, ParseError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse(input).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("30"), Ok(30));
        assert_eq!(parse_age(" 42 "), Ok(42));
        assert_eq!(parse_age("-3"), Ok(-3));
        assert!(parse_age("thirty").is_err());
        assert!(parse_age("30.5").is_err());
        assert!(parse_age("").is_err());
    }

    #[test]
    fn test_parse_salary() {
        assert_eq!(parse_salary("50000"), Ok(50000.0));
        assert_eq!(parse_salary("1234.5"), Ok(1234.5));
        assert_eq!(parse_salary("-1"), Ok(-1.0));
        assert!(parse_salary("lots").is_err());
        assert!(parse_salary("NaN").is_err());
        assert!(parse_salary("inf").is_err());
    }

    #[test]
    fn test_parse_employee_id() {
        assert_eq!(parse_employee_id("7"), Ok(7));
        assert!(parse_employee_id("-7").is_err());
        assert!(parse_employee_id("seven").is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional("", parse_age), Ok(None));
        assert_eq!(optional("  ", parse_salary), Ok(None));
        assert_eq!(optional("25", parse_age), Ok(Some(25)));

        let err = optional("abc", parse_age).unwrap_err();
        assert_eq!(err.what, "age");
        assert_eq!(err.input, "abc");
    }
}
