//! In-memory record store shaped like a spreadsheet tab.

use lifelines_core::sheet::{column_of, merge_into_row, record_to_row, row_to_record};
use lifelines_core::timeline::CollectionKind;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Header row of the people tab.
pub const PEOPLE_HEADERS: [&str; 5] = ["Id", "Name", "Birth Date", "Color", "Avatar"];

/// Header row of the events tab.
pub const EVENTS_HEADERS: [&str; 7] = [
    "Id",
    "Person Id",
    "Title",
    "Type",
    "Start Date",
    "End Date",
    "Notes",
];

/// Errors that can occur during record store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Sheet has no identifier column")]
    MissingIdColumn,
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, SheetError>;

/// An ordered table: one header row plus data rows.
///
/// Records are addressed by the column whose header maps to `id`; lookups
/// scan the rows in order.
#[derive(Debug, Clone)]
pub struct Sheet {
    kind: CollectionKind,
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Sheet {
    pub fn new<S: AsRef<str>>(kind: CollectionKind, headers: &[S]) -> Self {
        Self {
            kind,
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Empty people tab.
    pub fn people() -> Self {
        Self::new(CollectionKind::People, &PEOPLE_HEADERS)
    }

    /// Empty events tab.
    pub fn events() -> Self {
        Self::new(CollectionKind::Events, &EVENTS_HEADERS)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn entity_type(&self) -> &'static str {
        match self.kind {
            CollectionKind::People => "Person",
            CollectionKind::Events => "Event",
        }
    }

    fn id_column(&self) -> Result<usize> {
        column_of(&self.headers, "id").ok_or(SheetError::MissingIdColumn)
    }

    fn position(&self, id: &str) -> Result<usize> {
        let column = self.id_column()?;
        self.rows
            .iter()
            .position(|row| row.get(column).is_some_and(|cell| cell_text(cell) == id))
            .ok_or_else(|| SheetError::NotFound {
                entity_type: self.entity_type(),
                id: id.to_string(),
            })
    }

    /// All rows mapped to records keyed by header.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| row_to_record(&self.headers, row))
            .collect()
    }

    /// Appends a row exactly as given, identifier included.
    pub fn insert(&mut self, fields: &Map<String, Value>) -> Map<String, Value> {
        let row = record_to_row(&self.headers, fields);
        let record = row_to_record(&self.headers, &row);
        self.rows.push(row);
        record
    }

    /// Appends a row under a fresh identifier. Any `id` in `fields` is
    /// ignored.
    pub fn append(&mut self, fields: &Map<String, Value>) -> Result<Map<String, Value>> {
        self.id_column()?;
        let mut fields = fields.clone();
        fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        Ok(self.insert(&fields))
    }

    fn merged_row(&self, id: &str, fields: &Map<String, Value>) -> Result<(usize, Vec<Value>)> {
        let index = self.position(id)?;
        let mut fields = fields.clone();
        fields.remove("id");
        let mut row = self.rows[index].clone();
        merge_into_row(&self.headers, &mut row, &fields);
        Ok((index, row))
    }

    /// The record the row with `id` would hold after [`Sheet::update`], without
    /// touching the sheet.
    pub fn merged(&self, id: &str, fields: &Map<String, Value>) -> Result<Map<String, Value>> {
        let (_, row) = self.merged_row(id, fields)?;
        Ok(row_to_record(&self.headers, &row))
    }

    /// Replaces the provided fields of the row with `id`. The identifier
    /// itself cannot be changed.
    pub fn update(&mut self, id: &str, fields: &Map<String, Value>) -> Result<Map<String, Value>> {
        let (index, row) = self.merged_row(id, fields)?;
        let record = row_to_record(&self.headers, &row);
        self.rows[index] = row;
        Ok(record)
    }

    /// Removes the row with `id`.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.rows.remove(index);
        Ok(())
    }
}

/// Text of a cell as used for identifier matching.
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
