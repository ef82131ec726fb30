//! Tabular export of redacted documents.
//!
//! Picks the item list out of a document, flattens every item, and lays the
//! records out under a sorted column set (the union of all record paths).
//! Records missing a column get an empty cell.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::ScrubError;
use crate::flatten::{flatten, FlatRecord};

/// Chooses which values of a document become table rows.
///
/// An array is used as-is. For an object, the first member whose value is a
/// non-empty array is used. Anything else becomes a single row.
pub fn select_items(document: &Value) -> Vec<&Value> {
    match document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(entries) => {
            let found = entries.iter().find_map(|(key, value)| match value {
                Value::Array(items) if !items.is_empty() => Some((key, items)),
                _ => None,
            });
            match found {
                Some((key, items)) => {
                    debug!("Exporting list under key '{}' with {} items", key, items.len());
                    items.iter().collect()
                }
                None => vec![document],
            }
        }
        _ => vec![document],
    }
}

/// Sorted union of every record's paths.
pub fn field_universe(records: &[FlatRecord]) -> Vec<String> {
    let fields: BTreeSet<&String> = records.iter().flat_map(|record| record.keys()).collect();
    fields.into_iter().cloned().collect()
}

/// Text of a scalar cell: strings verbatim, null empty, everything else as JSON.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// A header row plus one row per exported item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularExport {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularExport {
    /// Flattens `items` and aligns them under the shared column set.
    ///
    /// Fails with [`ScrubError::NoItems`] when there is nothing to export.
    pub fn from_items<'a, I>(items: I) -> Result<Self, ScrubError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let records: Vec<FlatRecord> = items.into_iter().map(|item| flatten(item, "")).collect();
        if records.is_empty() {
            return Err(ScrubError::NoItems);
        }

        let header = field_universe(&records);
        let rows = records
            .iter()
            .map(|record| {
                header
                    .iter()
                    .map(|field| record.get(field).map(render_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self { header, rows })
    }

    /// Applies [`select_items`] and exports the result.
    pub fn from_document(document: &Value) -> Result<Self, ScrubError> {
        Self::from_items(select_items(document))
    }

    /// Writes the header and rows as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ScrubError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.header)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Exports `document` to a CSV file at `csv_path`, returning the row count.
pub fn export_to_csv(document: &Value, csv_path: &Path) -> Result<usize, ScrubError> {
    let table = TabularExport::from_document(document)?;
    let file = File::create(csv_path).map_err(|source| ScrubError::Write {
        path: csv_path.to_path_buf(),
        source,
    })?;
    table.write_csv(file)?;

    info!(
        "CSV export saved as: {} ({} rows, {} columns)",
        csv_path.display(),
        table.rows.len(),
        table.header.len()
    );
    Ok(table.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_document_is_used_directly() {
        let doc = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(select_items(&doc).len(), 2);
    }

    #[test]
    fn first_non_empty_list_member_wins() {
        let doc = json!({"meta": {"n": 1}, "empty": [], "results": [{"id": 1}], "later": [{"id": 2}, {"id": 3}]});
        let items = select_items(&doc);
        assert_eq!(items, vec![&json!({"id": 1})]);
    }

    #[test]
    fn object_without_lists_is_one_item() {
        let doc = json!({"id": 1, "tags": []});
        assert_eq!(select_items(&doc), vec![&doc]);
    }

    #[test]
    fn scalar_document_is_one_item() {
        let doc = json!("only");
        assert_eq!(select_items(&doc), vec![&doc]);
    }

    #[test]
    fn disjoint_records_fill_gaps_with_empty_cells() {
        let items = [json!({"x": 1}), json!({"y": 2})];
        let table = TabularExport::from_items(&items).unwrap();

        assert_eq!(table.header, vec!["x", "y"]);
        assert_eq!(table.rows, vec![vec!["1", ""], vec!["", "2"]]);
    }

    #[test]
    fn empty_item_list_is_an_error() {
        let err = TabularExport::from_document(&json!([])).unwrap_err();
        assert!(matches!(err, ScrubError::NoItems));
    }

    #[test]
    fn cells_render_scalars() {
        assert_eq!(render_cell(&json!(null)), "");
        assert_eq!(render_cell(&json!(true)), "true");
        assert_eq!(render_cell(&json!(0.0)), "0.0");
        assert_eq!(render_cell(&json!(-3)), "-3");
        assert_eq!(render_cell(&json!("a,b")), "a,b");
    }

    #[test]
    fn csv_output_quotes_where_needed() {
        let items = [json!({"name": "a,b", "note": "say \"hi\"", "n": 1})];
        let table = TabularExport::from_items(&items).unwrap();

        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "n,name,note\n1,\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    // Booleans are written as JSON literals, not capitalised, so a CSV cell
    // reads the same as the value in the redacted JSON next to it.
    #[test]
    fn boolean_cells_use_json_literals() {
        let items = [json!({"open": true, "spam": false})];
        let table = TabularExport::from_items(&items).unwrap();

        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "open,spam\ntrue,false\n");
        assert!(!text.contains("True") && !text.contains("False"));
    }
}
