//! CSV-to-store ingestion.
//!
//! Decoding is deliberately shallow: the only validation is that the
//! header row carries every expected column. Cell values are decoded by
//! type (numbers for the numeric columns, text otherwise) with empty
//! cells becoming NULL, and anything beyond that is the uploader's
//! problem.

use sea_orm::Set;
use serde::Deserialize;
use thiserror::Error;

use crate::entities::movies;

/// Column set a CSV upload must provide. Matching is case-sensitive and
/// order-insensitive; extra columns are tolerated and ignored.
pub const EXPECTED_COLUMNS: [&str; 15] = [
    "budget",
    "homepage",
    "original_language",
    "original_title",
    "overview",
    "release_date",
    "revenue",
    "runtime",
    "status",
    "title",
    "vote_average",
    "vote_count",
    "production_company_id",
    "genre_id",
    "languages",
];

#[derive(Debug, Error)]
pub enum IngestError {
    /// The header row is missing at least one expected column.
    #[error("CSV columns do not match the expected structure")]
    SchemaMismatch,

    /// The file claimed to be CSV but a row would not decode (ragged
    /// record, non-numeric value in a numeric column, broken quoting).
    #[error("malformed CSV content: {0}")]
    Malformed(#[from] csv::Error),
}

/// One decoded CSV row. Field names double as the expected header names,
/// so the decoder maps columns by header regardless of their order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieRecord {
    pub budget: Option<f64>,
    pub homepage: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<f64>,
    pub runtime: Option<f64>,
    pub status: Option<String>,
    pub title: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub production_company_id: Option<i64>,
    pub genre_id: Option<i64>,
    pub languages: Option<String>,
}

impl MovieRecord {
    #[must_use]
    pub fn into_active_model(self) -> movies::ActiveModel {
        movies::ActiveModel {
            budget: Set(self.budget),
            homepage: Set(self.homepage),
            original_language: Set(self.original_language),
            original_title: Set(self.original_title),
            overview: Set(self.overview),
            release_date: Set(self.release_date),
            revenue: Set(self.revenue),
            runtime: Set(self.runtime),
            status: Set(self.status),
            title: Set(self.title),
            vote_average: Set(self.vote_average),
            vote_count: Set(self.vote_count),
            production_company_id: Set(self.production_company_id),
            genre_id: Set(self.genre_id),
            languages: Set(self.languages),
            ..Default::default()
        }
    }
}

/// Decodes an uploaded CSV into insertable rows.
///
/// Checks the header against [`EXPECTED_COLUMNS`] first so a rejected
/// upload never touches the store, then decodes every row. A file with
/// a valid header and no data rows decodes to an empty vec.
pub fn decode(bytes: &[u8]) -> Result<Vec<movies::ActiveModel>, IngestError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?.clone();
    if !has_expected_columns(&headers) {
        return Err(IngestError::SchemaMismatch);
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<MovieRecord>() {
        rows.push(record?.into_active_model());
    }

    Ok(rows)
}

fn has_expected_columns(headers: &csv::StringRecord) -> bool {
    EXPECTED_COLUMNS
        .iter()
        .all(|expected| headers.iter().any(|header| header == *expected))
}
