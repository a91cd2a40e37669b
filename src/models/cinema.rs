//! Cinema records and the address assembly used when one is created.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::types::CinemaId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cinema {
    pub id: CinemaId,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for creating or updating a cinema. The address is stored as a
/// single assembled string; the parts are only used at the write boundary.
pub struct CinemaPayload {
    #[validate(length(min = 1))]
    pub name: String,
    /// Optional complex/site designator, e.g. "Westfield Level 3".
    pub designator: Option<String>,
    #[validate(length(min = 1))]
    pub street_address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(range(min = 1))]
    pub postcode: u32,
}

impl CinemaPayload {
    /// Assembles the single display address persisted with the cinema.
    pub fn build_address(&self) -> String {
        let mut address = String::new();
        if let Some(designator) = &self.designator {
            address.push_str(designator);
            address.push_str(", ");
        }
        address.push_str(&self.street_address);
        address.push_str(", ");
        address.push_str(&self.city);
        address.push_str(", ");
        address.push_str(&self.state);
        address.push(' ');
        address.push_str(&self.country);
        address.push(' ');
        address.push_str(&self.postcode.to_string());
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CinemaPayload {
        CinemaPayload {
            name: "Grand Central".to_string(),
            designator: None,
            street_address: "1 Flinders St".to_string(),
            city: "Melbourne".to_string(),
            state: "VIC".to_string(),
            country: "Australia".to_string(),
            postcode: 3000,
        }
    }

    #[test]
    fn address_includes_all_parts_in_order() {
        assert_eq!(
            payload().build_address(),
            "1 Flinders St, Melbourne, VIC Australia 3000"
        );
    }

    #[test]
    fn designator_prefixes_the_address_when_present() {
        let mut p = payload();
        p.designator = Some("Shop 4".to_string());
        assert!(p.build_address().starts_with("Shop 4, 1 Flinders St"));
    }
}
