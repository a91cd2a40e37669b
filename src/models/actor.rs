//! Actor records and the cast view embedded in movie responses.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::ActorId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// An actor as they appear in a movie's cast listing.
pub struct CastMember {
    pub id: ActorId,
    pub name: String,
    /// Billing order within the movie; 0 is the lead.
    pub cast_priority: i32,
}
