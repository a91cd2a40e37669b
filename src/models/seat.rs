//! Persisted seat slots.
//!
//! Seats are stored with an explicit `{row, column}` coordinate; the display
//! label ("A12") is derived from it, so the read path never parses strings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{SeatSlotId, TheatreId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SeatType {
    Standard,
    /// Accessible seating.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// One persisted position of a theatre's grid, usable seat or structural gap.
pub struct SeatSlot {
    pub id: SeatSlotId,
    pub theatre_id: TheatreId,
    pub seat_row: String,
    pub seat_column: i32,
    pub seat_type: SeatType,
    pub is_empty: bool,
}

impl SeatSlot {
    /// Derived display label: row letters followed by the column number.
    pub fn seat_number(&self) -> String {
        format!("{}{}", self.seat_row, self.seat_column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A slot that has not been persisted yet; produced by flattening a grid.
pub struct NewSeatSlot {
    pub seat_row: String,
    pub seat_column: i32,
    pub seat_type: SeatType,
    pub is_empty: bool,
}
