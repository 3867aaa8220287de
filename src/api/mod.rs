pub mod auth;
pub mod state;

pub use auth::{CurrentUser, MaybeUser};
pub use state::AppState;
