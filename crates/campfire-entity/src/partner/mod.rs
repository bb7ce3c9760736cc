//! Partner domain entities.

pub mod model;

pub use model::{CreatePartner, Partner, UpdatePartner};
