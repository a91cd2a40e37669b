//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates a seat label of the form `<letters><digits>`, e.g. `A12`.
///
/// The leading letters identify the row, the trailing digits the column.
/// Anything else would make the stored coordinate ambiguous, so it is
/// rejected up front rather than guessed at.
pub fn validate_seat_label(label: &str) -> Result<(), ValidationError> {
    let digits_at = label.find(|c: char| c.is_ascii_digit());
    let Some(digits_at) = digits_at else {
        return Err(ValidationError::new("seat_label_missing_column"));
    };
    if digits_at == 0 {
        return Err(ValidationError::new("seat_label_missing_row"));
    }

    let (row, column) = label.split_at(digits_at);
    if !row.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("seat_label_invalid_row"));
    }
    if column.parse::<u32>().is_err() {
        return Err(ValidationError::new("seat_label_invalid_column"));
    }

    Ok(())
}

/// Validates a 24-hour `HH:MM` time-of-day string.
pub fn validate_hhmm(value: &str) -> Result<(), ValidationError> {
    let ok = chrono::NaiveTime::parse_from_str(value, "%H:%M").is_ok()
        && value.len() == 5
        && value.as_bytes()[2] == b':';
    if !ok {
        return Err(ValidationError::new("time_not_hhmm"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_label_accepts_letters_then_digits() {
        assert!(validate_seat_label("A1").is_ok());
        assert!(validate_seat_label("AA12").is_ok());
    }

    #[test]
    fn seat_label_rejects_missing_parts() {
        assert!(validate_seat_label("A").is_err());
        assert!(validate_seat_label("12").is_err());
        assert!(validate_seat_label("").is_err());
    }

    #[test]
    fn seat_label_rejects_mixed_segments() {
        assert!(validate_seat_label("A1B").is_err());
        assert!(validate_seat_label("A-1").is_err());
    }

    #[test]
    fn hhmm_accepts_24_hour_times() {
        assert!(validate_hhmm("00:00").is_ok());
        assert!(validate_hhmm("23:59").is_ok());
    }

    #[test]
    fn hhmm_rejects_other_shapes() {
        assert!(validate_hhmm("9:30").is_err());
        assert!(validate_hhmm("24:00").is_err());
        assert!(validate_hhmm("12:30:00").is_err());
        assert!(validate_hhmm("noon").is_err());
    }
}
