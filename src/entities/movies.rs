use sea_orm::entity::prelude::*;

/// A single catalog entry. Every column except `id` comes straight from
/// an ingested CSV row; all of them are nullable because the source data
/// routinely has empty cells.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub budget: Option<f64>,

    pub homepage: Option<String>,

    pub original_language: Option<String>,

    pub original_title: Option<String>,

    pub overview: Option<String>,

    /// Stored as text in "YYYY-MM-DD" form so prefix filters and
    /// lexicographic ordering behave like date ordering.
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
