//! Spreadsheet codec for xlstore
//!
//! Models one worksheet as an ordered sequence of row records and converts
//! between that shape and xlsx byte buffers. Decoding reads only the first
//! sheet of a workbook; encoding always produces a single-sheet workbook.
//!
//! # Examples
//!
//! ## Records to xlsx and back
//!
//! ```
//! use xlstore_sheet::{CellValue, RowRecord, Sheet};
//!
//! let mut record = RowRecord::new();
//! record.insert("name".to_string(), CellValue::String("Alice".to_string()));
//! record.insert("age".to_string(), CellValue::Int(30));
//!
//! let bytes = Sheet::from_records(vec![record.clone()]).to_xlsx_bytes().unwrap();
//! let decoded = Sheet::from_xlsx_bytes(&bytes).unwrap();
//!
//! assert_eq!(decoded.to_records(), vec![record]);
//! ```
//!
//! `RowRecord` keys become the header row on encode; the header row becomes
//! the record keys on decode. Cell values are JSON scalars (`CellValue` is
//! untagged), so records serialize directly as `{"name": "Alice", "age": 30}`.

mod cell;
mod error;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export codec error types.
pub use error::{Result, SheetError};
/// Re-export sheet and record types.
pub use sheet::{RowRecord, Sheet};
