//! Spreadsheet row mapping.
//!
//! The record stores are header row + data rows. These pure functions convert
//! between rows and keyed records and stay independent of any storage I/O.

mod headers;

pub use headers::{
    column_of, header_keys, header_to_key, merge_into_row, record_to_row, row_to_record,
};
