//! Domain layer containing business entities and their projections.

pub mod entities;

pub use entities::*;
