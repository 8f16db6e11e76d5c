use thiserror::Error;

/// Errors that can occur while decoding or encoding a workbook
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Error decoding xlsx data: {0}")]
    Decode(#[from] calamine::XlsxError),

    #[error("Error encoding xlsx data: {0}")]
    Encode(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
