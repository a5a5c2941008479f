//! Format-neutral receipt documents.
//!
//! A [`Document`] is what the composer produces and a [`DocumentWriter`]
//! turns into bytes. Cells are already-formatted strings so every writer
//! prints identical values.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A titled table of string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Caption printed above the table.
    pub title: String,
    /// Column headings.
    pub columns: Vec<String>,
    /// Body rows, each as wide as `columns`.
    pub rows: Vec<Vec<String>>,
    /// Optional totals row, as wide as `columns`.
    #[serde(default)]
    pub footer_row: Option<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            footer_row: None,
        }
    }

    /// Appends a body row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Sets the totals row.
    pub fn set_footer(&mut self, row: Vec<String>) {
        self.footer_row = Some(row);
    }

    fn validate(&self) -> EngineResult<()> {
        let width = self.columns.len();
        let footer = self.footer_row.iter();
        for (index, row) in self.rows.iter().chain(footer).enumerate() {
            if row.len() != width {
                return Err(EngineError::Document {
                    message: format!(
                        "table '{}' row {} has {} cells, expected {}",
                        self.title,
                        index,
                        row.len(),
                        width
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A receipt ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title.
    pub title: String,
    /// Ordered key/value lines printed under the title.
    pub header: Vec<(String, String)>,
    /// Tables, in print order.
    pub tables: Vec<Table>,
}

impl Document {
    /// Creates a document with no header lines or tables.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            header: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Appends a header line.
    pub fn push_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.header.push((key.into(), value.into()));
    }

    /// Returns the value of the first header line with `key`.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Checks that every table row matches its column count.
    pub fn validate(&self) -> EngineResult<()> {
        if self.tables.is_empty() {
            return Err(EngineError::Document {
                message: format!("document '{}' has no tables", self.title),
            });
        }
        self.tables.iter().try_for_each(Table::validate)
    }
}

/// Turns a [`Document`] into a concrete output format.
pub trait DocumentWriter {
    /// What the writer produces.
    type Output;

    /// Writes the document.
    fn write(&self, document: &Document) -> EngineResult<Self::Output>;
}
