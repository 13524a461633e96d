//! Read-only board projections.
//!
//! # Responsibility
//! - Derive the three displayed lanes from store state (filter, group, sort).
//! - Compute aggregate board statistics.
//!
//! # Invariants
//! - Projections never write back to the store.
//! - Equal inputs always produce equal outputs.

pub mod ordering;
pub mod projection;
pub mod stats;
