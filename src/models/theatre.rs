//! Theatre records and the seat-grid payloads exchanged with clients.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::types::{CinemaId, TheatreId};
use crate::validation::rules::validate_seat_label;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Theatre {
    pub id: TheatreId,
    pub theatre_number: i32,
    pub theatre_type: TheatreType,
    pub cinema_id: CinemaId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TheatreType {
    Standard,
    GoldClass,
    VMax,
    DriveIn,
}

impl TheatreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TheatreType::Standard => "standard",
            TheatreType::GoldClass => "gold_class",
            TheatreType::VMax => "v_max",
            TheatreType::DriveIn => "drive_in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One position in a submitted seat grid. `has_seat == false` marks a
/// structural gap (aisle); the label is still required so the position keeps
/// a stable coordinate.
pub struct SeatDescriptor {
    /// Display label, row letters then column digits, e.g. "A12".
    pub seat: String,
    pub has_seat: bool,
    pub is_disabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for creating or updating a theatre together with its full layout.
pub struct TheatrePayload {
    pub cinema_id: CinemaId,
    #[validate(range(min = 1))]
    pub number: i32,
    #[serde(rename = "type")]
    pub theatre_type: TheatreType,
    /// Ordered rows of ordered seat descriptors. The caller is the authority
    /// on row/column order at write time.
    #[validate(custom(function = "validate_seat_grid"))]
    pub seats: Vec<Vec<SeatDescriptor>>,
}

/// Every descriptor in the grid must carry a well-formed label.
fn validate_seat_grid(grid: &Vec<Vec<SeatDescriptor>>) -> Result<(), ValidationError> {
    if grid.is_empty() {
        return Err(ValidationError::new("seat_grid_empty"));
    }
    for row in grid {
        if row.is_empty() {
            return Err(ValidationError::new("seat_grid_empty_row"));
        }
        for descriptor in row {
            validate_seat_label(&descriptor.seat)?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
/// Theatre plus its reconstructed grid and the derived usable-seat count.
pub struct TheatreResponse {
    pub id: TheatreId,
    pub number: i32,
    #[serde(rename = "type")]
    pub theatre_type: TheatreType,
    pub cinema_id: CinemaId,
    pub seats: Vec<Vec<SeatDescriptor>>,
    pub seat_count: i64,
}

#[derive(Debug, Serialize)]
/// Listing entry for a cinema's theatres; the grid is omitted but the
/// aggregate count is included.
pub struct TheatreSummary {
    pub id: TheatreId,
    pub number: i32,
    #[serde(rename = "type")]
    pub theatre_type: TheatreType,
    pub seat_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(label: &str) -> SeatDescriptor {
        SeatDescriptor {
            seat: label.to_string(),
            has_seat: true,
            is_disabled: false,
        }
    }

    fn payload(grid: Vec<Vec<SeatDescriptor>>) -> TheatrePayload {
        TheatrePayload {
            cinema_id: CinemaId::new(1),
            number: 4,
            theatre_type: TheatreType::Standard,
            seats: grid,
        }
    }

    #[test]
    fn grid_with_valid_labels_passes() {
        let grid = vec![vec![descriptor("A1"), descriptor("A2")], vec![descriptor("B1")]];
        assert!(payload(grid).validate().is_ok());
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(payload(vec![]).validate().is_err());
        assert!(payload(vec![vec![]]).validate().is_err());
    }

    #[test]
    fn malformed_label_is_rejected() {
        let grid = vec![vec![descriptor("13")]];
        assert!(payload(grid).validate().is_err());
    }

    #[test]
    fn theatre_type_uses_snake_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&TheatreType::GoldClass).unwrap(),
            "\"gold_class\""
        );
        let parsed: TheatreType = serde_json::from_str("\"drive_in\"").unwrap();
        assert_eq!(parsed, TheatreType::DriveIn);
    }
}
