mod content;
mod lookup;
mod preferences;
mod recommendation;
mod watched;

pub use content::{Content, ContentResponse, ContentType};
pub use lookup::{Genre, Language, NamedRef, PlatformRef};
pub use preferences::UserPreferences;
pub use recommendation::{CatalogHit, ReconciledRecommendation, SuggestedItem, TasteProfile};
pub use watched::{WatchedItem, WatchedRow};
