//! Document writers.

use std::fmt::Write as _;

use crate::error::{EngineError, EngineResult};

use super::document::{Document, DocumentWriter, Table};

/// Writes fixed-width plain text.
///
/// The first column is left aligned and every other column right aligned,
/// which keeps amounts lined up on the decimal point.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextWriter;

impl DocumentWriter for PlainTextWriter {
    type Output = Vec<u8>;

    fn write(&self, document: &Document) -> EngineResult<Vec<u8>> {
        document.validate()?;

        let mut out = String::new();
        push_line(&mut out, &document.title)?;
        push_line(&mut out, &"=".repeat(document.title.chars().count()))?;

        let key_width = document
            .header
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0);
        for (key, value) in &document.header {
            let label = format!("{}:", key);
            push_line(
                &mut out,
                &format!("{:<width$}  {}", label, value, width = key_width + 1),
            )?;
        }

        for table in &document.tables {
            push_line(&mut out, "")?;
            write_table(&mut out, table)?;
        }

        Ok(out.into_bytes())
    }
}

fn push_line(out: &mut String, line: &str) -> EngineResult<()> {
    writeln!(out, "{}", line.trim_end()).map_err(|e| EngineError::Document {
        message: e.to_string(),
    })
}

fn write_table(out: &mut String, table: &Table) -> EngineResult<()> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in table.rows.iter().chain(table.footer_row.iter()) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let rule = "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1));

    push_line(out, &table.title)?;
    push_line(out, &format_row(&table.columns, &widths))?;
    push_line(out, &rule)?;
    for row in &table.rows {
        push_line(out, &format_row(row, &widths))?;
    }
    if let Some(footer) = &table.footer_row {
        push_line(out, &rule)?;
        push_line(out, &format_row(footer, &widths))?;
    }
    Ok(())
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, width))| {
            if index == 0 {
                format!("{:<width$}", cell, width = *width)
            } else {
                format!("{:>width$}", cell, width = *width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Writes the document as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl DocumentWriter for JsonWriter {
    type Output = Vec<u8>;

    fn write(&self, document: &Document) -> EngineResult<Vec<u8>> {
        document.validate()?;
        serde_json::to_vec_pretty(document).map_err(|e| EngineError::Document {
            message: e.to_string(),
        })
    }
}
