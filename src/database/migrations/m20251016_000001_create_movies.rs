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
                        ColumnDef::new(Movies::ImdbId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(ColumnDef::new(Movies::Year).integer().not_null().default(0))
                    .col(ColumnDef::new(Movies::Rated).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Released).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Runtime).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Genres).text().not_null().default("[]"))
                    .col(ColumnDef::new(Movies::Director).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Writers).text().not_null().default("[]"))
                    .col(ColumnDef::new(Movies::Actors).text().not_null().default("[]"))
                    .col(ColumnDef::new(Movies::Plot).text().not_null().default(""))
                    .col(ColumnDef::new(Movies::Languages).text().not_null().default("[]"))
                    .col(ColumnDef::new(Movies::Countries).text().not_null().default("[]"))
                    .col(ColumnDef::new(Movies::Awards).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Poster).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Ratings).text().not_null().default("[]"))
                    .col(ColumnDef::new(Movies::Metascore).integer().not_null().default(0))
                    .col(ColumnDef::new(Movies::ImdbRating).float().not_null().default(0.0))
                    .col(ColumnDef::new(Movies::ImdbVotes).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::MediaType).string().not_null().default(""))
                    .col(ColumnDef::new(Movies::Dvd).string().not_null().default("N/A"))
                    .col(ColumnDef::new(Movies::BoxOffice).string().not_null().default("N/A"))
                    .col(ColumnDef::new(Movies::Production).string().not_null().default("N/A"))
                    .col(ColumnDef::new(Movies::Website).string().not_null().default("N/A"))
                    .col(ColumnDef::new(Movies::Response).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Movies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    ImdbId,
    Title,
    Year,
    Rated,
    Released,
    Runtime,
    Genres,
    Director,
    Writers,
    Actors,
    Plot,
    Languages,
    Countries,
    Awards,
    Poster,
    Ratings,
    Metascore,
    ImdbRating,
    ImdbVotes,
    MediaType,
    Dvd,
    BoxOffice,
    Production,
    Website,
    Response,
    CreatedAt,
    UpdatedAt,
}
