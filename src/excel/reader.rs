//! Excel reader - workbook sheets → header-addressed rows

use crate::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};

static EMPTY_CELL: Data = Data::Empty;

/// Reads every worksheet of a workbook (xlsx, xlsm, xls, ods).
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all sheets in workbook order.
    pub fn sheets(&self) -> ImportResult<Vec<Sheet>> {
        if !self.path.exists() {
            return Err(ImportError::SourceNotFound(self.path.clone()));
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            ImportError::Workbook(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let mut sheets = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name)?;
            sheets.push(Sheet::from_range(sheet_name, &range));
        }
        Ok(sheets)
    }

    /// Load only the first sheet.
    pub fn first_sheet(&self) -> ImportResult<Sheet> {
        self.sheets()?.into_iter().next().ok_or_else(|| {
            ImportError::Workbook(format!("{} contains no worksheets", self.path.display()))
        })
    }
}

/// One worksheet: a header row plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a sheet from a worksheet range; the first row is the header.
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let mut rows = range.rows();

        let headers = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        // Header text is kept verbatim: "Division " keeps its trailing space
                        Data::String(s) => s.clone(),
                        Data::Empty => format!("col_{}", col),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self::new(name, headers, rows.map(<[Data]>::to_vec).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows in sheet order, numbered from 1.
    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().enumerate().map(move |(idx, cells)| RawRow {
            sheet: &self.name,
            ordinal: idx + 1,
            headers: &self.headers,
            cells,
        })
    }
}

/// A data row whose cells are addressed by header label.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    sheet: &'a str,
    ordinal: usize,
    headers: &'a [String],
    cells: &'a [Data],
}

impl<'a> RawRow<'a> {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn sheet(&self) -> &str {
        self.sheet
    }

    /// Fail with SchemaMismatch on the first column the sheet does not have.
    pub fn require_columns(&self, columns: &[&str]) -> ImportResult<()> {
        columns.iter().try_for_each(|column| self.cell(column).map(|_| ()))
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    fn cell(&self, column: &str) -> ImportResult<&'a Data> {
        let idx = self
            .position(column)
            .ok_or_else(|| ImportError::SchemaMismatch {
                sheet: self.sheet.to_string(),
                column: column.to_string(),
                available: self.headers.to_vec(),
            })?;
        // Short rows: trailing empty cells are not stored
        Ok(self.cells.get(idx).unwrap_or(&EMPTY_CELL))
    }

    fn optional_cell(&self, column: &str) -> Option<&'a Data> {
        self.position(column)
            .map(|idx| self.cells.get(idx).unwrap_or(&EMPTY_CELL))
    }

    /// Trimmed text; an empty cell reads as "".
    pub fn text(&self, column: &str) -> ImportResult<String> {
        cell_text(self.cell(column)?, self.ordinal, column)
    }

    /// Numeric value; an empty cell reads as 0.
    pub fn number(&self, column: &str) -> ImportResult<f64> {
        cell_number(self.cell(column)?, self.ordinal, column)
    }

    /// Numeric value truncated toward zero.
    pub fn whole_number(&self, column: &str) -> ImportResult<i64> {
        Ok(self.number(column)?.trunc() as i64)
    }

    /// Text of a column the sheet may not have.
    pub fn optional_text(&self, column: &str) -> ImportResult<Option<String>> {
        self.optional_cell(column)
            .map(|cell| cell_text(cell, self.ordinal, column))
            .transpose()
    }

    /// Boolean of a column the sheet may not have.
    pub fn optional_flag(&self, column: &str) -> ImportResult<Option<bool>> {
        self.optional_cell(column)
            .map(|cell| cell_flag(cell, self.ordinal, column))
            .transpose()
    }
}

fn cell_text(cell: &Data, row: usize, column: &str) -> ImportResult<String> {
    match cell {
        Data::Empty => Ok(String::new()),
        Data::String(s) => Ok(s.trim().to_string()),
        Data::Error(e) => Err(ImportError::invalid(
            row,
            format!("'{}' holds a spreadsheet error ({})", column, e),
        )),
        other => Ok(other.to_string().trim().to_string()),
    }
}

fn cell_number(cell: &Data, row: usize, column: &str) -> ImportResult<f64> {
    let value = match cell {
        Data::Empty => return Ok(0.0),
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed.replace(',', "").parse::<f64>().map_err(|_| {
                ImportError::invalid(row, format!("'{}' is not a number: '{}'", column, trimmed))
            })?
        }
        other => {
            return Err(ImportError::invalid(
                row,
                format!("'{}' is not a number: '{}'", column, other),
            ))
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ImportError::invalid(
            row,
            format!("'{}' is not a finite number", column),
        ))
    }
}

fn cell_flag(cell: &Data, row: usize, column: &str) -> ImportResult<bool> {
    match cell {
        Data::Empty => Ok(false),
        Data::Bool(b) => Ok(*b),
        Data::Int(i) => Ok(*i != 0),
        Data::Float(f) => Ok(*f != 0.0),
        Data::String(s) => Ok(matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "x"
        )),
        other => Err(ImportError::invalid(
            row,
            format!("'{}' is not a yes/no value: '{}'", column, other),
        )),
    }
}
