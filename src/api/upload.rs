use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::ApiError;
use crate::ingest::{self, IngestError};
use crate::state::AppState;

/// Upload verdicts reported to the client rather than raised. Legacy
/// contract of this endpoint: every one of them goes back as HTTP 200
/// with an `{"error": ...}` body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid file format")]
    UnsupportedFormat,

    #[error("CSV columns do not match the expected structure.")]
    SchemaMismatch,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Accepted { message: String },
    Rejected { error: String },
}

enum UploadFailure {
    Rejected(UploadRejection),
    Error(ApiError),
}

impl From<UploadRejection> for UploadFailure {
    fn from(rejection: UploadRejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<ApiError> for UploadFailure {
    fn from(err: ApiError) -> Self {
        Self::Error(err)
    }
}

/// `POST /upload_csv`
///
/// Multipart upload of a single CSV file under the `file` field. The
/// file's rows are bulk-inserted into the movie collection after the
/// header passes the column-presence check.
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    match ingest_upload(&state, multipart).await {
        Ok(rows) => {
            info!("CSV upload ingested ({} rows)", rows);
            Ok(Json(UploadResponse::Accepted {
                message: "CSV data uploaded successfully!".to_string(),
            }))
        }
        Err(UploadFailure::Rejected(rejection)) => Ok(Json(UploadResponse::Rejected {
            error: rejection.to_string(),
        })),
        Err(UploadFailure::Error(err)) => Err(err),
    }
}

async fn ingest_upload(state: &AppState, mut multipart: Multipart) -> Result<u64, UploadFailure> {
    let mut upload: Option<(Option<String>, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("malformed multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().map(ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("failed to read upload: {e}")))?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(UploadRejection::MissingFile.into());
    };

    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or(UploadRejection::EmptyFilename)?;

    if !filename.ends_with(".csv") {
        return Err(UploadRejection::UnsupportedFormat.into());
    }

    let rows = ingest::decode(&bytes).map_err(|e| match e {
        IngestError::SchemaMismatch => UploadFailure::Rejected(UploadRejection::SchemaMismatch),
        IngestError::Malformed(err) => {
            UploadFailure::Error(ApiError::internal(format!("failed to parse {filename}: {err}")))
        }
    })?;

    let inserted = state
        .store()
        .insert_movies(rows)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(inserted)
}
