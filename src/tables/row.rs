use super::TableError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// Column layout shared by every row of a table.
#[derive(Debug)]
pub(super) struct Columns {
    table: String,
    names: Vec<String>,
    offsets: HashMap<String, usize>,
}

impl Columns {
    pub(super) fn new(table: &str, names: Vec<String>) -> Self {
        let mut offsets = HashMap::with_capacity(names.len());
        for (offset, name) in names.iter().enumerate() {
            // first occurrence wins when a header name repeats verbatim
            let _ = offsets.entry(name.clone()).or_insert(offset);
        }

        Self {
            table: table.to_string(),
            names,
            offsets,
        }
    }

    pub(super) fn table(&self) -> &str {
        &self.table
    }

    pub(super) fn names(&self) -> &[String] {
        &self.names
    }

    fn offset_of(&self, column: &str) -> Option<usize> {
        self.offsets.get(column).copied()
    }
}

/// One parsed record of a table.
///
/// Values are kept as the raw strings from the CSV. Numeric interpretation is
/// up to the caller, through [`Row::integer`].
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<Columns>,
    values: Box<[String]>,
}

impl Row {
    pub(super) const fn new(columns: Arc<Columns>, values: Box<[String]>) -> Self {
        Self { columns, values }
    }

    /// Name of the table this row was parsed from.
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.columns.table()
    }

    /// Returns the value of `column`, or `None` if the table has no such column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .offset_of(column)
            .and_then(|offset| self.values.get(offset))
            .map(String::as_str)
    }

    /// Like [`Row::get`], but a missing column is an error.
    pub fn field(&self, column: &str) -> Result<&str, TableError> {
        self.get(column).ok_or_else(|| TableError::ColumnNotFound {
            table: self.table_name().to_string(),
            column: column.to_string(),
        })
    }

    /// Interprets the value of `column` as a non-negative integer.
    pub fn integer(&self, column: &str) -> Result<u64, TableError> {
        let value = self.field(column)?;
        value.trim().parse::<u64>().map_err(|_parse_error| TableError::InvalidInteger {
            table: self.table_name().to_string(),
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.columns.names() == other.columns.names() && self.values == other.values
    }
}

impl Eq for Row {}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(names: &[&str], values: &[&str]) -> Row {
        let columns = Arc::new(Columns::new("Test", names.iter().map(ToString::to_string).collect()));
        Row::new(columns, values.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_get_by_column_name() {
        let row = make_row(&["Name", "Data[0]", "Data[1]"], &["Dodo", "4", "7"]);
        assert_eq!(row.get("Name"), Some("Dodo"));
        assert_eq!(row.get("Data[0]"), Some("4"));
        assert_eq!(row.get("Data[1]"), Some("7"));
        assert_eq!(row.get("Data"), None);
    }

    #[test]
    fn test_field_missing_column() {
        let row = make_row(&["Name"], &["Dodo"]);
        let err = row.field("Icon").unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound { ref table, ref column } if table == "Test" && column == "Icon"));
    }

    #[test]
    fn test_integer_parsing() {
        let row = make_row(&["Key", "Bad", "Negative", "Padded"], &["12", "abc", "-1", " 5 "]);
        assert_eq!(row.integer("Key").unwrap(), 12);
        assert_eq!(row.integer("Padded").unwrap(), 5);
        assert!(matches!(row.integer("Bad"), Err(TableError::InvalidInteger { .. })));
        assert!(matches!(row.integer("Negative"), Err(TableError::InvalidInteger { .. })));
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let row = make_row(&["Name", "Name"], &["first", "second"]);
        assert_eq!(row.get("Name"), Some("first"));
        assert_eq!(row.iter().count(), 2);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let row = make_row(&["Name", "Points"], &["Dodo", "10"]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Name":"Dodo","Points":"10"}"#);
    }
}
