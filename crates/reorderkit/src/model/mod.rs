//! The list model being reordered.
//!
//! [`ListModel`] is the only place the ordered sequence is mutated. During a
//! drag, mutation is limited to pairwise swaps issued by the reorder
//! controller; structural changes are rejected until the drag ends.

mod list_model;

pub use list_model::{ListModel, ListSignals, StructureLock};
