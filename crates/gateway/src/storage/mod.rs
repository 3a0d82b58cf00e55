//! In-memory record stores backing the gateway.

mod sheet;

pub use sheet::{cell_text, Sheet, SheetError};
