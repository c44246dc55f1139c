//! SeaORM entities

pub mod movies;

pub mod prelude {
    pub use super::movies::Entity as Movies;
}
