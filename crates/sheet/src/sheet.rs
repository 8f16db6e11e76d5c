use crate::cell::CellValue;
use indexmap::IndexMap;

/// One row, represented as an ordered mapping from column name to cell value.
pub type RowRecord = IndexMap<String, CellValue>;

/// A single worksheet: a named grid of cells with an optional header row
/// naming the columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    column_names: Option<Vec<String>>,
}

impl Sheet {
    /// Create an empty sheet named "Sheet1".
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create an empty sheet with the given name.
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
            column_names: None,
        }
    }

    /// Get the sheet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Number of rows, including the header row if present.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of columns in the widest row.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get internal data reference
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable internal data reference
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    /// Name columns from the values of the given row.
    ///
    /// The row stays in the grid; [`to_records`](Self::to_records) treats it
    /// as the header and skips it. Does nothing if the row does not exist.
    pub fn name_columns_by_row(&mut self, row: usize) {
        if let Some(header) = self.data.get(row) {
            self.column_names = Some(header.iter().map(CellValue::as_str).collect());
        }
    }

    /// Get the column names, if set.
    #[must_use]
    pub fn column_names(&self) -> Option<&[String]> {
        self.column_names.as_deref()
    }

    /// Convert to an ordered sequence of records.
    ///
    /// The header row (row 0, when columns are named) is not a record.
    /// Rows shorter than the header are padded with nulls; cells beyond the
    /// last named column are dropped. Duplicate column names collapse onto
    /// one key, last occurrence wins.
    ///
    /// Returns an empty vector when columns are not named.
    #[must_use]
    pub fn to_records(&self) -> Vec<RowRecord> {
        let Some(names) = self.column_names.as_ref() else {
            return Vec::new();
        };

        let mut records = Vec::with_capacity(self.data.len().saturating_sub(1));

        for row in self.data.iter().skip(1) {
            let mut record = RowRecord::new();
            for (i, name) in names.iter().enumerate() {
                let value = row.get(i).cloned().unwrap_or(CellValue::Null);
                record.insert(name.clone(), value);
            }
            records.push(record);
        }

        records
    }

    /// Create a sheet from an ordered sequence of records.
    ///
    /// The header row is the union of keys across all records, in first-seen
    /// order, so a record partway through the sequence can introduce a new
    /// column. Records missing a key get a null cell. An empty sequence
    /// yields an empty sheet.
    ///
    /// # Example
    /// ```
    /// use xlstore_sheet::{CellValue, RowRecord, Sheet};
    ///
    /// let mut record = RowRecord::new();
    /// record.insert("name".to_string(), CellValue::String("Alice".to_string()));
    /// record.insert("age".to_string(), CellValue::Int(30));
    ///
    /// let sheet = Sheet::from_records(vec![record]);
    /// assert_eq!(sheet.row_count(), 2); // header + 1 data row
    /// ```
    #[must_use]
    pub fn from_records(records: Vec<RowRecord>) -> Self {
        let mut sheet = Sheet::new();
        if records.is_empty() {
            return sheet;
        }

        let mut col_names: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !col_names.iter().any(|name| name == key) {
                    col_names.push(key.clone());
                }
            }
        }

        let header: Vec<CellValue> = col_names
            .iter()
            .map(|n| CellValue::String(n.clone()))
            .collect();
        sheet.data.push(header);

        for record in &records {
            let row: Vec<CellValue> = col_names
                .iter()
                .map(|name| record.get(name).cloned().unwrap_or(CellValue::Null))
                .collect();
            sheet.data.push(row);
        }

        sheet.name_columns_by_row(0);
        sheet
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
