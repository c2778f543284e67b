use crate::entities::{movies, prelude::*};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::info;

/// Field-match constraints for a movie listing. Every field is optional;
/// the ones that are present are ANDed together.
#[derive(Debug, Default, Clone)]
pub struct MovieFilter {
    /// Prefix match on `release_date` ("1995" matches "1995-10-30").
    pub year: Option<String>,

    /// Exact match on `original_language`.
    pub language: Option<String>,

    /// Exact match on `status`.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Self::Asc,
            SortDirection::Descending => Self::Desc,
        }
    }
}

/// Resolves a client-supplied sort key to a movie column. Returns `None`
/// for anything that is not a column of the collection.
#[must_use]
pub fn sort_column(field: &str) -> Option<movies::Column> {
    use movies::Column;

    Some(match field {
        "id" => Column::Id,
        "budget" => Column::Budget,
        "homepage" => Column::Homepage,
        "original_language" => Column::OriginalLanguage,
        "original_title" => Column::OriginalTitle,
        "overview" => Column::Overview,
        "release_date" => Column::ReleaseDate,
        "revenue" => Column::Revenue,
        "runtime" => Column::Runtime,
        "status" => Column::Status,
        "title" => Column::Title,
        "vote_average" => Column::VoteAverage,
        "vote_count" => Column::VoteCount,
        "production_company_id" => Column::ProductionCompanyId,
        "genre_id" => Column::GenreId,
        "languages" => Column::Languages,
        _ => return None,
    })
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Bulk-inserts the given rows in a single statement. All-or-nothing
    /// at the store's discretion; there is no partial-success reporting.
    pub async fn insert_many(&self, rows: Vec<movies::ActiveModel>) -> Result<u64> {
        let count = rows.len() as u64;

        Movies::insert_many(rows)
            .on_empty_do_nothing()
            .exec(&self.conn)
            .await?;

        info!("Inserted {} movie rows", count);
        Ok(count)
    }

    /// Returns one page of the filtered collection plus the total number
    /// of matching rows (independent of pagination).
    ///
    /// `page` is 1-based. Pages past the end of the result set come back
    /// empty; NULL ordering is whatever SQLite does natively.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        sort_by: movies::Column,
        direction: SortDirection,
        filter: &MovieFilter,
    ) -> Result<(Vec<movies::Model>, u64)> {
        let mut query = Movies::find();

        if let Some(year) = &filter.year {
            query = query.filter(movies::Column::ReleaseDate.starts_with(year.as_str()));
        }

        if let Some(language) = &filter.language {
            query = query.filter(movies::Column::OriginalLanguage.eq(language.as_str()));
        }

        if let Some(status) = &filter.status {
            query = query.filter(movies::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by(sort_by, direction.into())
            .paginate(&self.conn, per_page);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok((items, total))
    }
}
