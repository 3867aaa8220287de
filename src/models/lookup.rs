use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Genre lookup row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

/// Language lookup row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
}

/// An id/name pair used when lookup ids are resolved for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// Flattened platform association for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformRef {
    pub name: String,
    pub icon_url: Option<String>,
}
