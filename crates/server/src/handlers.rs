//! The five file operations: read, write, append, delete, rename.
//!
//! Each handler resolves the client filename beneath the storage root,
//! performs its filesystem calls with `tokio::fs`, and runs xlsx
//! encode/decode on the blocking pool so codec work cannot stall the event
//! loop. Mutating handlers serialize on the per-path lock in [`AppState`].

use crate::error::ApiError;
use crate::json::Json;
use crate::paths;
use crate::state::AppState;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::task;
use xlstore_sheet::{RowRecord, Sheet};

/// Name of the single sheet a write operation produces.
const WRITE_SHEET_NAME: &str = "Sheet1";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQuery {
    pub file_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPayload {
    pub file_name: String,
    pub content: Vec<RowRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePayload {
    pub old_name: Option<String>,
    pub new_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResponse {
    pub file_name: String,
    pub data: Vec<RowRecord>,
}

#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// `GET /api/read?fileName=X` — decode the first sheet into records.
pub async fn read(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<ReadResponse>, ApiError> {
    let path = paths::resolve(state.storage_root(), &query.file_name);

    let bytes = fs::read(&path).await?;
    let sheet = task::spawn_blocking(move || Sheet::from_xlsx_bytes(&bytes))
        .await
        .map_err(|_| ApiError::Internal)??;

    Ok(Json(ReadResponse {
        file_name: query.file_name,
        data: sheet.to_records(),
    }))
}

/// `POST /api/write` — encode records as a single-sheet workbook, creating
/// the file or truncating an existing one.
pub async fn write(
    State(state): State<AppState>,
    Json(payload): Json<SheetPayload>,
) -> Result<Json<Message>, ApiError> {
    let SheetPayload { file_name, content } = payload;
    let path = paths::resolve(state.storage_root(), &file_name);
    let _guard = state.lock_path(&path).await;

    let bytes = task::spawn_blocking(move || {
        let mut sheet = Sheet::from_records(content);
        sheet.set_name(WRITE_SHEET_NAME);
        sheet.to_xlsx_bytes()
    })
    .await
    .map_err(|_| ApiError::Internal)??;

    fs::write(&path, bytes).await?;

    Ok(Json(Message {
        message: "File written successfully",
    }))
}

/// `POST /api/append` — add records after the existing ones.
///
/// Reads the existing first sheet, concatenates (existing first), and writes
/// the result back under the same sheet name. Never creates a file; a
/// missing target is a 500, like any other read failure.
pub async fn append(
    State(state): State<AppState>,
    Json(payload): Json<SheetPayload>,
) -> Result<Json<Message>, ApiError> {
    let SheetPayload { file_name, content } = payload;
    let path = paths::resolve(state.storage_root(), &file_name);
    let _guard = state.lock_path(&path).await;

    let bytes = fs::read(&path).await?;
    let bytes = task::spawn_blocking(move || {
        let existing = Sheet::from_xlsx_bytes(&bytes)?;

        let mut records = existing.to_records();
        records.extend(content);

        let mut sheet = Sheet::from_records(records);
        sheet.set_name(existing.name());
        sheet.to_xlsx_bytes()
    })
    .await
    .map_err(|_| ApiError::Internal)??;

    fs::write(&path, bytes).await?;

    Ok(Json(Message {
        message: "Content appended successfully",
    }))
}

/// `DELETE /api/delete?fileName=X` — remove the file.
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<Message>, ApiError> {
    let path = paths::resolve(state.storage_root(), &query.file_name);
    let _guard = state.lock_path(&path).await;

    fs::remove_file(&path).await?;

    Ok(Json(Message {
        message: "File deleted successfully",
    }))
}

/// `PUT /api/rename` — rename `oldName` to `newName`.
///
/// Both names are validated here, independent of the shared middleware,
/// which only inspects the first filename field it finds.
pub async fn rename(
    State(state): State<AppState>,
    Json(payload): Json<RenamePayload>,
) -> Result<Json<Message>, ApiError> {
    let (Some(old_name), Some(new_name)) = (payload.old_name, payload.new_name) else {
        return Err(ApiError::MissingRenameNames);
    };

    if !paths::is_xlsx(&old_name) || !paths::is_xlsx(&new_name) {
        return Err(ApiError::RenameExtension);
    }

    let old_path = paths::resolve(state.storage_root(), &old_name);
    let new_path = paths::resolve(state.storage_root(), &new_name);
    let _guard = state.lock_path(&old_path).await;

    // Explicit existence check so a missing source reports as a rename
    // failure rather than surfacing a bare filesystem error.
    match fs::try_exists(&old_path).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(ApiError::Rename("no such file or directory".to_string()));
        }
        Err(err) => return Err(ApiError::Rename(err.to_string())),
    }

    fs::rename(&old_path, &new_path)
        .await
        .map_err(|err| ApiError::Rename(err.to_string()))?;

    Ok(Json(Message {
        message: "File renamed successfully",
    }))
}
