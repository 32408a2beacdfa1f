use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Feature tag shared between listings (wifi, pool, parking...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
    /// Icon identifier, e.g. a font class. Empty when unset.
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAmenity {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl NewAmenity {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }
}
