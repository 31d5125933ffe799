//! Reservation validation

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Errors that can occur during reservation validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReservationValidationError {
    #[error("Resource ID cannot be empty")]
    EmptyResourceId,

    #[error("Resource ID cannot exceed {0} characters")]
    ResourceIdTooLong(usize),

    #[error("Resource ID can only contain alphanumeric characters, hyphens and underscores")]
    InvalidResourceIdCharacters,

    #[error("Invalid reservation ID: {0}")]
    InvalidReservationId(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM or HH:MM:SS")]
    InvalidTime(String),

    #[error("Start time {start} must be before end time {end}")]
    EmptyInterval { start: NaiveTime, end: NaiveTime },

    #[error("Notes cannot exceed {0} characters")]
    NotesTooLong(usize),

    #[error("Unknown reservation status '{0}'")]
    UnknownStatus(String),
}

const MAX_RESOURCE_ID_LENGTH: usize = 64;
const MAX_NOTES_LENGTH: usize = 500;

/// Validate a resource identifier
pub fn validate_resource_id(id: &str) -> Result<(), ReservationValidationError> {
    if id.is_empty() {
        return Err(ReservationValidationError::EmptyResourceId);
    }

    if id.len() > MAX_RESOURCE_ID_LENGTH {
        return Err(ReservationValidationError::ResourceIdTooLong(
            MAX_RESOURCE_ID_LENGTH,
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ReservationValidationError::InvalidResourceIdCharacters);
    }

    Ok(())
}

/// Validate free-text notes attached to a reservation
pub fn validate_notes(notes: &str) -> Result<(), ReservationValidationError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(ReservationValidationError::NotesTooLong(MAX_NOTES_LENGTH));
    }

    Ok(())
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(value: &str) -> Result<NaiveDate, ReservationValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ReservationValidationError::InvalidDate(value.to_string()))
}

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form
pub fn parse_time(value: &str) -> Result<NaiveTime, ReservationValidationError> {
    let value = value.trim();

    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ReservationValidationError::InvalidTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_resource_ids() {
        assert!(validate_resource_id("court-1").is_ok());
        assert!(validate_resource_id("center_court").is_ok());
        assert!(validate_resource_id("7").is_ok());
    }

    #[test]
    fn test_empty_resource_id() {
        assert_eq!(
            validate_resource_id(""),
            Err(ReservationValidationError::EmptyResourceId)
        );
    }

    #[test]
    fn test_resource_id_too_long() {
        let long_id = "c".repeat(65);
        assert_eq!(
            validate_resource_id(&long_id),
            Err(ReservationValidationError::ResourceIdTooLong(64))
        );
    }

    #[test]
    fn test_resource_id_invalid_characters() {
        assert_eq!(
            validate_resource_id("court 1"),
            Err(ReservationValidationError::InvalidResourceIdCharacters)
        );
    }

    #[test]
    fn test_notes_length() {
        assert!(validate_notes("bring balls").is_ok());
        assert_eq!(
            validate_notes(&"x".repeat(501)),
            Err(ReservationValidationError::NotesTooLong(500))
        );
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-06-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        assert!(parse_date("01/06/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_time_both_forms() {
        let short = parse_time("09:30").unwrap();
        let long = parse_time("09:30:00").unwrap();
        assert_eq!(short, long);
        assert_eq!(short, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_time_invalid() {
        assert_eq!(
            parse_time("25:00"),
            Err(ReservationValidationError::InvalidTime("25:00".to_string()))
        );
        assert!(parse_time("nine").is_err());
    }
}
