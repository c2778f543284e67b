use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Budget).double().null())
                    .col(ColumnDef::new(Movies::Homepage).string().null())
                    .col(ColumnDef::new(Movies::OriginalLanguage).string().null())
                    .col(ColumnDef::new(Movies::OriginalTitle).string().null())
                    .col(ColumnDef::new(Movies::Overview).string().null())
                    .col(ColumnDef::new(Movies::ReleaseDate).string().null())
                    .col(ColumnDef::new(Movies::Revenue).double().null())
                    .col(ColumnDef::new(Movies::Runtime).double().null())
                    .col(ColumnDef::new(Movies::Status).string().null())
                    .col(ColumnDef::new(Movies::Title).string().null())
                    .col(ColumnDef::new(Movies::VoteAverage).double().null())
                    .col(ColumnDef::new(Movies::VoteCount).big_integer().null())
                    .col(
                        ColumnDef::new(Movies::ProductionCompanyId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Movies::GenreId).big_integer().null())
                    .col(ColumnDef::new(Movies::Languages).string().null())
                    .to_owned(),
            )
            .await?;

        // Index on release_date: it is both the default sort key and the
        // target of the year prefix filter.
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_release_date")
                    .table(Movies::Table)
                    .col(Movies::ReleaseDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movies {
    Table,
    Id,
    Budget,
    Homepage,
    OriginalLanguage,
    OriginalTitle,
    Overview,
    ReleaseDate,
    Revenue,
    Runtime,
    Status,
    Title,
    VoteAverage,
    VoteCount,
    ProductionCompanyId,
    GenreId,
    Languages,
}
