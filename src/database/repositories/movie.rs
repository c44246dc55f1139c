//! SeaORM-based movie repository
//!
//! Movies are keyed by IMDb id and written with insert-or-replace semantics.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::database::entities::{movies, prelude::Movies};
use crate::errors::RepositoryResult;
use crate::models::{Movie, Rating};

/// Columns overwritten when a movie with the same id is saved again
const REPLACED_COLUMNS: [movies::Column; 25] = [
    movies::Column::Title,
    movies::Column::Year,
    movies::Column::Rated,
    movies::Column::Released,
    movies::Column::Runtime,
    movies::Column::Genres,
    movies::Column::Director,
    movies::Column::Writers,
    movies::Column::Actors,
    movies::Column::Plot,
    movies::Column::Languages,
    movies::Column::Countries,
    movies::Column::Awards,
    movies::Column::Poster,
    movies::Column::Ratings,
    movies::Column::Metascore,
    movies::Column::ImdbRating,
    movies::Column::ImdbVotes,
    movies::Column::MediaType,
    movies::Column::Dvd,
    movies::Column::BoxOffice,
    movies::Column::Production,
    movies::Column::Website,
    movies::Column::Response,
    movies::Column::UpdatedAt,
];

pub struct MovieSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl MovieSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Insert, or replace every field of the stored movie with the same id
    pub async fn upsert(&self, movie: &Movie) -> RepositoryResult<()> {
        Self::upsert_on(&*self.connection, movie).await?;
        debug!("Saved movie {} ({})", movie.imdb_id, movie.title);
        Ok(())
    }

    /// Upsert a batch in one transaction. Returns the number written.
    pub async fn upsert_many(&self, movies: &[Movie]) -> RepositoryResult<usize> {
        let txn = self.connection.begin().await?;
        for movie in movies {
            Self::upsert_on(&txn, movie).await?;
        }
        txn.commit().await?;

        debug!("Saved {} movies", movies.len());
        Ok(movies.len())
    }

    pub async fn get(&self, imdb_id: &str) -> RepositoryResult<Option<Movie>> {
        let model = Movies::find_by_id(imdb_id.to_string())
            .one(&*self.connection)
            .await?;
        Ok(model.map(model_to_domain))
    }

    /// Movies whose actor list contains `name` anywhere, ignoring ASCII case
    pub async fn search_by_actor(&self, name: &str) -> RepositoryResult<Vec<Movie>> {
        let models = Movies::find()
            .filter(movies::Column::Actors.contains(name))
            .order_by_asc(movies::Column::Title)
            .all(&*self.connection)
            .await?;

        debug!("Actor search '{}' matched {} movies", name, models.len());
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    pub async fn list_all(&self) -> RepositoryResult<Vec<Movie>> {
        let models = Movies::find()
            .order_by_asc(movies::Column::Title)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    pub async fn count(&self) -> RepositoryResult<u64> {
        Ok(Movies::find().count(&*self.connection).await?)
    }

    async fn upsert_on<C: ConnectionTrait>(conn: &C, movie: &Movie) -> RepositoryResult<()> {
        let now = chrono::Utc::now();
        let active_model = movies::ActiveModel {
            imdb_id: Set(movie.imdb_id.clone()),
            title: Set(movie.title.clone()),
            year: Set(movie.year),
            rated: Set(movie.rated.clone()),
            released: Set(movie.released.clone()),
            runtime: Set(movie.runtime.clone()),
            genres: Set(encode_list(&movie.genres)?),
            director: Set(movie.director.clone()),
            writers: Set(encode_list(&movie.writers)?),
            actors: Set(encode_list(&movie.actors)?),
            plot: Set(movie.plot.clone()),
            languages: Set(encode_list(&movie.languages)?),
            countries: Set(encode_list(&movie.countries)?),
            awards: Set(movie.awards.clone()),
            poster: Set(movie.poster.clone()),
            ratings: Set(encode_list(&movie.ratings)?),
            metascore: Set(movie.metascore),
            imdb_rating: Set(movie.imdb_rating),
            imdb_votes: Set(movie.imdb_votes.clone()),
            media_type: Set(movie.media_type.clone()),
            dvd: Set(movie.dvd.clone()),
            box_office: Set(movie.box_office.clone()),
            production: Set(movie.production.clone()),
            website: Set(movie.website.clone()),
            response: Set(movie.response.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Movies::insert(active_model)
            .on_conflict(
                OnConflict::column(movies::Column::ImdbId)
                    .update_columns(REPLACED_COLUMNS)
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}

fn encode_list<T: Serialize>(items: &[T]) -> RepositoryResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Unreadable list text reads back as an empty list
fn decode_list<T: DeserializeOwned>(raw: &str, column: &str, imdb_id: &str) -> Vec<T> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        debug!("Ignoring unreadable {} for {}: {}", column, imdb_id, e);
        Vec::new()
    })
}

fn model_to_domain(model: movies::Model) -> Movie {
    let id = model.imdb_id.as_str();
    let ratings: Vec<Rating> = decode_list(&model.ratings, "ratings", id);

    Movie {
        genres: decode_list(&model.genres, "genres", id),
        writers: decode_list(&model.writers, "writers", id),
        actors: decode_list(&model.actors, "actors", id),
        languages: decode_list(&model.languages, "languages", id),
        countries: decode_list(&model.countries, "countries", id),
        ratings,
        imdb_id: model.imdb_id,
        title: model.title,
        year: model.year,
        rated: model.rated,
        released: model.released,
        runtime: model.runtime,
        director: model.director,
        plot: model.plot,
        awards: model.awards,
        poster: model.poster,
        metascore: model.metascore,
        imdb_rating: model.imdb_rating,
        imdb_votes: model.imdb_votes,
        media_type: model.media_type,
        dvd: model.dvd,
        box_office: model.box_office,
        production: model.production,
        website: model.website,
        response: model.response,
    }
}
