use serde::Serialize;

use crate::entities::movies;

/// Wire shape of every API-level failure: `{"error": "<reason>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MovieDto {
    pub id: i32,
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

impl From<movies::Model> for MovieDto {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            budget: model.budget,
            homepage: model.homepage,
            original_language: model.original_language,
            original_title: model.original_title,
            overview: model.overview,
            release_date: model.release_date,
            revenue: model.revenue,
            runtime: model.runtime,
            status: model.status,
            title: model.title,
            vote_average: model.vote_average,
            vote_count: model.vote_count,
            production_company_id: model.production_company_id,
            genre_id: model.genre_id,
            languages: model.languages,
        }
    }
}

/// One page of the movie collection. `total_movies` counts the whole
/// filtered set, not just this page.
#[derive(Debug, Serialize)]
pub struct MoviePage {
    pub movies: Vec<MovieDto>,
    pub total_movies: u64,
    pub page: u64,
    pub per_page: u64,
}
