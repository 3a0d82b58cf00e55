//! lifelines_core - pure domain logic for the lifelines family timeline.
//!
//! Everything in this crate is free of I/O: record types, wire types for the
//! remote gateway, the spreadsheet header convention, filtering, date labels
//! and the status rules of the sync engine. The client and gateway crates
//! provide the imperative shells.

pub mod cache;
pub mod gateway;
pub mod serde;
pub mod sheet;
pub mod sync;
pub mod timeline;
