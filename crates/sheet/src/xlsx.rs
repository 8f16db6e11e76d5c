use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;

/// Convert calamine Data to CellValue.
///
/// Excel stores all numbers as f64; whole-valued floats that fit in i64 are
/// normalized back to `Int` so a written `1` reads back as `1`, not `1.0`.
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => normalize_float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => normalize_float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

fn normalize_float(f: f64) -> CellValue {
    const I64_RANGE: f64 = 9_007_199_254_740_992.0; // 2^53, exact-int limit
    if f.is_finite() && f.fract() == 0.0 && f.abs() < I64_RANGE {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}

impl Sheet {
    /// Decode the first sheet of an xlsx byte buffer.
    ///
    /// Row 0 names the columns; sheets beyond the first are ignored. A
    /// workbook with no sheets decodes to an empty sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid xlsx workbook.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook: Xlsx<Cursor<&[u8]>> = Xlsx::new(Cursor::new(bytes))?;

        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Ok(Sheet::new());
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet = Sheet::with_name(&sheet_name);
        for row in range.rows() {
            let row_data: Vec<CellValue> = row.iter().map(data_to_cell_value).collect();
            sheet.data_mut().push(row_data);
        }

        if sheet.row_count() > 0 {
            sheet.name_columns_by_row(0);
        }

        Ok(sheet)
    }

    /// Encode the sheet as a single-sheet xlsx workbook in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet name is invalid or the grid exceeds
    /// Excel's row/column limits.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.name())?;

        for (row_idx, row) in self.data().iter().enumerate() {
            let row_num = u32::try_from(row_idx).map_err(|_| XlsxError::RowColumnLimitError)?;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;

                match cell {
                    CellValue::Null => {} // Leave empty
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col_num, *b)?;
                    }
                    CellValue::Int(i) => {
                        // Excel stores all numbers as f64; integers beyond
                        // 2^53 lose precision
                        worksheet.write_number(row_num, col_num, *i as f64)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number(row_num, col_num, *f)?;
                    }
                    CellValue::String(s) => {
                        worksheet.write_string(row_num, col_num, s)?;
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
