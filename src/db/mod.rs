pub mod postgres;
pub mod store;

pub use postgres::create_pool;
pub use store::{CatalogStore, PgCatalogStore};
