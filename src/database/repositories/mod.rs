//! SeaORM repository implementations

pub mod movie;

pub use movie::MovieSeaOrmRepository;
