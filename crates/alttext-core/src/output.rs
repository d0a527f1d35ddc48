//! Output formatting for rendered result tables.
//!
//! Rows can be printed as an aligned text table for people, or as JSON /
//! JSON Lines for scripts.

use serde::Serialize;
use std::io::{self, Write};

use crate::results::EXPORT_HEADER;
use crate::types::TableRow;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// A writer that prints table rows in the selected format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects the JSON format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write all rows.
    pub fn write_rows(&mut self, rows: &[TableRow]) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => self.writer.write_all(render_text_table(rows).as_bytes()),
            OutputFormat::Json => {
                self.write_json(rows)?;
                writeln!(self.writer)
            }
            OutputFormat::JsonLines => {
                for row in rows {
                    serde_json::to_writer(&mut self.writer, row).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                }
                Ok(())
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Render rows as a plain-text table with a header and column separators.
///
/// Widths are counted in chars; an empty row set still prints the header.
pub fn render_text_table(rows: &[TableRow]) -> String {
    let mut widths = EXPORT_HEADER.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let separator = format!(
        "|{}|\n",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    );

    let mut out = line(EXPORT_HEADER);
    out.push_str(&separator);
    for row in rows {
        out.push_str(&line(row.cells()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow {
                image_name: "cat.png".to_string(),
                alt_text: "a cat".to_string(),
                html_code: r#"<img src="cat.png" alt="a cat">"#.to_string(),
            },
            TableRow {
                image_name: "perché.jpg".to_string(),
                alt_text: "un gatto".to_string(),
                html_code: r#"<img src="perché.jpg" alt="un gatto">"#.to_string(),
            },
        ]
    }

    #[test]
    fn test_text_table_aligns_columns() {
        let table = render_text_table(&rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| Image Name"));
        assert!(lines[1].starts_with("|---"));
        // Every data line has the same char width as the header line
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_text_table_header_only_when_empty() {
        let table = render_text_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn test_write_json_array() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);
        writer.write_rows(&rows()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with('['));
        assert!(output.contains(r#""image_name":"cat.png""#));
    }

    #[test]
    fn test_write_jsonl() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, true);
        writer.write_rows(&rows()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.trim().lines().count(), 2);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("JSONL"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("xlsx"), None);
    }
}
