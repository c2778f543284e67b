use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, MovieDto, MoviePage};
use crate::db::{MovieFilter, SortDirection, sort_column};
use crate::entities::movies;
use crate::state::AppState;

/// Recognized query parameters of `GET /movies`. Anything absent falls
/// back to its default; anything out of domain is rejected with a 400
/// instead of silently coerced.
#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    /// 1 ascending, -1 descending.
    #[serde(default = "default_sort_order")]
    pub sort_order: i32,

    pub year: Option<String>,

    pub language: Option<String>,

    pub status: Option<String>,
}

const fn default_page() -> u64 {
    1
}

const fn default_per_page() -> u64 {
    10
}

fn default_sort_by() -> String {
    "release_date".to_string()
}

const fn default_sort_order() -> i32 {
    1
}

struct ListParams {
    page: u64,
    per_page: u64,
    sort_by: movies::Column,
    direction: SortDirection,
    filter: MovieFilter,
}

impl MoviesQuery {
    fn into_params(self) -> Result<ListParams, ApiError> {
        if self.page == 0 {
            return Err(ApiError::validation("page must be a positive integer"));
        }

        if self.per_page == 0 {
            return Err(ApiError::validation("per_page must be a positive integer"));
        }

        let direction = match self.sort_order {
            1 => SortDirection::Ascending,
            -1 => SortDirection::Descending,
            other => {
                return Err(ApiError::validation(format!(
                    "sort_order must be 1 or -1, got {other}"
                )));
            }
        };

        let sort_by = sort_column(&self.sort_by).ok_or_else(|| {
            ApiError::validation(format!("unknown sort field: {}", self.sort_by))
        })?;

        Ok(ListParams {
            page: self.page,
            per_page: self.per_page,
            sort_by,
            direction,
            filter: MovieFilter {
                year: self.year,
                language: self.language,
                status: self.status,
            },
        })
    }
}

/// `GET /movies`
///
/// Returns one sorted page of the filtered collection together with the
/// total match count. Pages past the end come back empty, not as errors.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoviesQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let params = query.into_params()?;

    let (models, total_movies) = state
        .store()
        .list_movies(
            params.page,
            params.per_page,
            params.sort_by,
            params.direction,
            &params.filter,
        )
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(MoviePage {
        movies: models.into_iter().map(MovieDto::from).collect(),
        total_movies,
        page: params.page,
        per_page: params.per_page,
    }))
}
