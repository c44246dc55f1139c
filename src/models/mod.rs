//! Domain records shared by the OMDb client, the local store and the CLI

pub mod actor_filter;
pub mod movie;

pub use actor_filter::ActorSearchFilter;
pub use movie::{Movie, NOT_AVAILABLE, Rating};
