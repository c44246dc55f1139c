//! `movies` table. List-valued fields are JSON text.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    #[sea_orm(column_type = "Text")]
    pub genres: String,
    pub director: String,
    #[sea_orm(column_type = "Text")]
    pub writers: String,
    #[sea_orm(column_type = "Text")]
    pub actors: String,
    #[sea_orm(column_type = "Text")]
    pub plot: String,
    #[sea_orm(column_type = "Text")]
    pub languages: String,
    #[sea_orm(column_type = "Text")]
    pub countries: String,
    pub awards: String,
    pub poster: String,
    #[sea_orm(column_type = "Text")]
    pub ratings: String,
    pub metascore: i32,
    pub imdb_rating: f32,
    pub imdb_votes: String,
    pub media_type: String,
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
    pub response: String,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
