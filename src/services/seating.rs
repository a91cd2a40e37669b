//! Seat layout model.
//!
//! Bidirectional mapping between a theatre's 2-D grid of seat descriptors and
//! the flat set of persisted slots. Labels are parsed exactly once, at the
//! write boundary; the grid is rebuilt from stored `{row, column}`
//! coordinates, so the read path does no string parsing.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::seat::{NewSeatSlot, SeatSlot, SeatType};
use crate::models::theatre::SeatDescriptor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The label is not letters followed by digits, so its grid coordinate
    /// would be ambiguous.
    #[error("seat label {0:?} is not of the form <letters><digits>")]
    InvalidLabel(String),
}

/// Splits a display label into its row letters and column number.
///
/// The row key is the maximal leading run of non-digit characters; the rest
/// must be a plain decimal column index.
pub fn parse_seat_label(label: &str) -> Result<(String, i32), LayoutError> {
    let split_at = label
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| LayoutError::InvalidLabel(label.to_string()))?;
    if split_at == 0 {
        return Err(LayoutError::InvalidLabel(label.to_string()));
    }

    let (row, column) = label.split_at(split_at);
    if !row.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LayoutError::InvalidLabel(label.to_string()));
    }
    let column: i32 = column
        .parse()
        .map_err(|_| LayoutError::InvalidLabel(label.to_string()))?;

    Ok((row.to_string(), column))
}

/// Flattens a grid into unsaved slot records, one per descriptor.
///
/// Pure and total over well-formed labels: every descriptor becomes exactly
/// one record and the caller's ordering is preserved (the caller is the
/// authority on row/column order at write time).
pub fn flatten_grid(grid: &[Vec<SeatDescriptor>]) -> Result<Vec<NewSeatSlot>, LayoutError> {
    let mut slots = Vec::new();
    for row in grid {
        for descriptor in row {
            let (seat_row, seat_column) = parse_seat_label(&descriptor.seat)?;
            slots.push(NewSeatSlot {
                seat_row,
                seat_column,
                seat_type: if descriptor.is_disabled {
                    SeatType::Disabled
                } else {
                    SeatType::Standard
                },
                is_empty: !descriptor.has_seat,
            });
        }
    }
    Ok(slots)
}

/// Regroups stored slots into display order: rows sorted lexicographically by
/// row key, slots within a row sorted by column ascending.
pub fn group_slots(slots: Vec<SeatSlot>) -> Vec<Vec<SeatSlot>> {
    let mut rows: BTreeMap<String, Vec<SeatSlot>> = BTreeMap::new();
    for slot in slots {
        rows.entry(slot.seat_row.clone()).or_default().push(slot);
    }

    rows.into_values()
        .map(|mut row| {
            row.sort_by_key(|slot| slot.seat_column);
            row
        })
        .collect()
}

/// Grid shape sent back to clients, rebuilt from stored slots.
pub fn grid_of(slots: Vec<SeatSlot>) -> Vec<Vec<SeatDescriptor>> {
    group_slots(slots)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|slot| SeatDescriptor {
                    seat: slot.seat_number(),
                    has_seat: !slot.is_empty,
                    is_disabled: slot.seat_type == SeatType::Disabled,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SeatSlotId, TheatreId};

    fn descriptor(label: &str, has_seat: bool, is_disabled: bool) -> SeatDescriptor {
        SeatDescriptor {
            seat: label.to_string(),
            has_seat,
            is_disabled,
        }
    }

    fn stored(id: i64, row: &str, column: i32) -> SeatSlot {
        SeatSlot {
            id: SeatSlotId::new(id),
            theatre_id: TheatreId::new(1),
            seat_row: row.to_string(),
            seat_column: column,
            seat_type: SeatType::Standard,
            is_empty: false,
        }
    }

    #[test]
    fn parse_splits_row_letters_from_column_digits() {
        assert_eq!(parse_seat_label("A12").unwrap(), ("A".to_string(), 12));
        assert_eq!(parse_seat_label("AA3").unwrap(), ("AA".to_string(), 3));
    }

    #[test]
    fn parse_rejects_malformed_labels() {
        assert_eq!(
            parse_seat_label("12"),
            Err(LayoutError::InvalidLabel("12".to_string()))
        );
        assert!(parse_seat_label("A").is_err());
        assert!(parse_seat_label("A1B").is_err());
        assert!(parse_seat_label("").is_err());
    }

    #[test]
    fn flatten_maps_every_descriptor_to_one_slot() {
        let grid = vec![
            vec![
                descriptor("A1", true, false),
                descriptor("A2", false, false),
                descriptor("A3", true, true),
            ],
            vec![descriptor("B1", true, false)],
        ];

        let slots = flatten_grid(&grid).unwrap();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].seat_row, "A");
        assert_eq!(slots[0].seat_column, 1);
        assert!(!slots[0].is_empty);
        // Gaps keep their coordinate but are marked empty.
        assert!(slots[1].is_empty);
        assert_eq!(slots[2].seat_type, SeatType::Disabled);
        assert_eq!(slots[3].seat_row, "B");
    }

    #[test]
    fn group_orders_rows_alphabetically_and_columns_numerically() {
        let slots = vec![
            stored(1, "B", 2),
            stored(2, "A", 10),
            stored(3, "A", 2),
            stored(4, "B", 1),
        ];

        let grid = group_slots(slots);
        assert_eq!(grid.len(), 2);
        let labels: Vec<Vec<String>> = grid
            .iter()
            .map(|row| row.iter().map(SeatSlot::seat_number).collect())
            .collect();
        // Column 10 sorts after 2 numerically, not lexically.
        assert_eq!(labels, vec![vec!["A2", "A10"], vec!["B1", "B2"]]);
    }

    #[test]
    fn flatten_then_group_reproduces_the_row_partition() {
        let grid = vec![
            vec![descriptor("B1", true, false), descriptor("B2", true, false)],
            vec![descriptor("A1", true, false), descriptor("A2", false, false)],
        ];

        let slots = flatten_grid(&grid).unwrap();
        let restored: Vec<SeatSlot> = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| SeatSlot {
                id: SeatSlotId::new(i as i64 + 1),
                theatre_id: TheatreId::new(1),
                seat_row: slot.seat_row,
                seat_column: slot.seat_column,
                seat_type: slot.seat_type,
                is_empty: slot.is_empty,
            })
            .collect();

        let rebuilt = grid_of(restored);
        // Rows come back in alphabetical order regardless of input order.
        assert_eq!(rebuilt[0][0].seat, "A1");
        assert!(!rebuilt[0][1].has_seat);
        assert_eq!(rebuilt[1][1].seat, "B2");
    }

    #[test]
    fn regrouping_a_grouped_grid_is_idempotent() {
        let slots = vec![stored(1, "A", 1), stored(2, "A", 2), stored(3, "B", 1)];
        let once = group_slots(slots);
        let again = group_slots(once.clone().into_iter().flatten().collect());
        let shape =
            |g: &Vec<Vec<SeatSlot>>| -> Vec<Vec<i64>> {
                g.iter()
                    .map(|row| row.iter().map(|s| s.id.as_i64()).collect())
                    .collect()
            };
        assert_eq!(shape(&once), shape(&again));
    }
}
