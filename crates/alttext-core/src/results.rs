//! Result aggregation and spreadsheet export.
//!
//! A [`ResultTable`] holds one [`GenerationResult`] per submitted image, in
//! submission order. Only successes become table rows; failures are reported
//! separately so the exported workbook contains usable alt text only.

use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::path::Path;

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::types::{GenerationResult, TableRow};

/// Header row of the rendered and exported table.
pub const EXPORT_HEADER: [&str; 3] = ["Image Name", "Alt Text", "HTML Code"];

/// Default file name of the exported workbook.
pub const EXPORT_FILE_NAME: &str = "alt_text_results.xlsx";

/// MIME type of the exported workbook.
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Ordered per-image outcomes of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    results: Vec<GenerationResult>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result after all previously appended ones.
    pub fn append(&mut self, result: GenerationResult) {
        self.results.push(result);
    }

    /// Number of results, successes and failures alike.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All results in submission order.
    pub fn results(&self) -> &[GenerationResult] {
        &self.results
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Failed results in submission order.
    pub fn failures(&self) -> impl Iterator<Item = &GenerationResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Table rows for the successful results, in submission order.
    pub fn render(&self) -> Vec<TableRow> {
        self.results.iter().filter_map(GenerationResult::to_row).collect()
    }

    /// Build the spreadsheet with default export settings.
    pub fn export(&self) -> Result<ExportArtifact, ExportError> {
        self.export_with(&ExportConfig::default())
    }

    /// Build the spreadsheet: one sheet, a bold header row, then one row per
    /// success in table order.
    pub fn export_with(&self, config: &ExportConfig) -> Result<ExportArtifact, ExportError> {
        let rows = self.render();

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&config.sheet_name)?;

        for (col, title) in (0u16..).zip(EXPORT_HEADER) {
            worksheet.write_string_with_format(0, col, title, &header_format)?;
        }
        for (row, entry) in (1u32..).zip(&rows) {
            for (col, cell) in (0u16..).zip(entry.cells()) {
                worksheet.write_string(row, col, cell)?;
            }
        }
        worksheet.autofit();

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(
            rows = rows.len(),
            bytes = bytes.len(),
            "Built spreadsheet export"
        );

        Ok(ExportArtifact {
            file_name: config.file_name.clone(),
            sheet_name: config.sheet_name.clone(),
            rows,
            bytes,
        })
    }
}

/// A serialized workbook plus the rows it was built from.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Suggested download file name
    pub file_name: String,
    /// Name of the single worksheet
    pub sheet_name: String,
    /// Data rows, excluding the header
    pub rows: Vec<TableRow>,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Header row written above the data rows.
    pub fn header(&self) -> [&'static str; 3] {
        EXPORT_HEADER
    }

    pub fn mime_type(&self) -> &'static str {
        XLSX_MIME_TYPE
    }

    /// The xlsx file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the workbook to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, &self.bytes)?;
        tracing::info!(
            "Exported {} row(s) to {}",
            self.rows.len(),
            path.display()
        );
        Ok(())
    }
}
