use serde_json::{Map, Value};

/// Converts a spreadsheet header into a record field key.
///
/// The header is trimmed, every run of characters outside `[A-Za-z0-9]` is
/// dropped and the character after it is upper-cased, then the first
/// character is lower-cased: `"Birth Date"` becomes `"birthDate"`.
///
/// # Examples
///
/// ```
/// use lifelines_core::sheet::header_to_key;
///
/// assert_eq!(header_to_key("Person Id"), "personId");
/// assert_eq!(header_to_key("  start-date "), "startDate");
/// ```
pub fn header_to_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut upper_next = false;

    for c in header.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next {
                key.push(c.to_ascii_uppercase());
                upper_next = false;
            } else {
                key.push(c);
            }
        } else {
            upper_next = true;
        }
    }

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => key,
    }
}

/// Field keys for a header row, in column order.
pub fn header_keys<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers.iter().map(|h| header_to_key(h.as_ref())).collect()
}

/// Column index of the header whose key equals `key`.
pub fn column_of<S: AsRef<str>>(headers: &[S], key: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| header_to_key(h.as_ref()) == key)
}

/// Maps a data row to a record keyed by the converted headers.
///
/// Cells missing at the end of a short row map to empty strings.
pub fn row_to_record<S: AsRef<str>>(headers: &[S], row: &[Value]) -> Map<String, Value> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let cell = row
                .get(index)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            (header_to_key(header.as_ref()), cell)
        })
        .collect()
}

/// Builds a data row from record fields, one cell per header.
///
/// Headers with no matching field get an empty cell; fields with no
/// matching header are ignored.
pub fn record_to_row<S: AsRef<str>>(headers: &[S], fields: &Map<String, Value>) -> Vec<Value> {
    headers
        .iter()
        .map(|header| {
            fields
                .get(&header_to_key(header.as_ref()))
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()))
        })
        .collect()
}

/// Overwrites the cells of `row` for which `fields` has a value.
pub fn merge_into_row<S: AsRef<str>>(
    headers: &[S],
    row: &mut Vec<Value>,
    fields: &Map<String, Value>,
) {
    if row.len() < headers.len() {
        row.resize(headers.len(), Value::String(String::new()));
    }
    for (index, header) in headers.iter().enumerate() {
        if let Some(value) = fields.get(&header_to_key(header.as_ref())) {
            row[index] = value.clone();
        }
    }
}
