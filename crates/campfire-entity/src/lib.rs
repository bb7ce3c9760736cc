//! # campfire-entity
//!
//! Domain entity models for Campfire. Every struct in this crate represents a
//! database table row or the input for creating one. Row types derive
//! `sqlx::FromRow` in addition to the serde traits.

pub mod partner;
pub mod user;
