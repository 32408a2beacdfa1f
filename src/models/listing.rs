use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct Listing {
    pub id: i64,
    #[serde(rename = "host")]
    pub host_id: i64,
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_night: f64,
    pub max_guests: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    /// Amenity ids, loaded from `listing_amenities`.
    #[sqlx(skip)]
    pub amenities: Vec<i64>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Body of `POST /listings/` and `PUT /listings/{id}/`. The host always comes
/// from the authenticated requester, so there is no field for it here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(custom = "positive_price")]
    pub price_per_night: f64,
    #[validate(range(min = 0))]
    pub max_guests: i64,
    #[validate(range(min = 0))]
    pub bedrooms: i64,
    #[validate(range(min = 0))]
    pub bathrooms: i64,
    #[serde(default)]
    pub amenities: Vec<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Body of `PATCH /listings/{id}/`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ListingChanges {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(custom = "positive_price")]
    pub price_per_night: Option<f64>,
    #[validate(range(min = 0))]
    pub max_guests: Option<i64>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i64>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i64>,
    pub amenities: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

/// Prices are money with two decimal places and at most ten digits in total,
/// so `nights * price_per_night` rounds to the same cents every time.
const MAX_PRICE: f64 = 100_000_000.0;

fn positive_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::new("price_per_night must be greater than zero"));
    }
    if price >= MAX_PRICE {
        return Err(ValidationError::new("price_per_night allows at most 10 digits"));
    }
    let cents = price * 100.0;
    if (cents - cents.round()).abs() > 1e-4 {
        return Err(ValidationError::new("price_per_night allows at most 2 decimal places"));
    }
    Ok(())
}

impl From<CreateListing> for ListingChanges {
    fn from(full: CreateListing) -> Self {
        Self {
            title: Some(full.title),
            description: Some(full.description),
            address: Some(full.address),
            price_per_night: Some(full.price_per_night),
            max_guests: Some(full.max_guests),
            bedrooms: Some(full.bedrooms),
            bathrooms: Some(full.bathrooms),
            amenities: Some(full.amenities),
            is_active: Some(full.is_active),
        }
    }
}

impl Listing {
    /// Merges the supplied fields into this listing. Amenity links are
    /// replaced separately by the repository.
    pub fn apply(&mut self, changes: &ListingChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(address) = &changes.address {
            self.address = address.clone();
        }
        if let Some(price) = changes.price_per_night {
            self.price_per_night = price;
        }
        if let Some(max_guests) = changes.max_guests {
            self.max_guests = max_guests;
        }
        if let Some(bedrooms) = changes.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = changes.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}

/// Query parameters of `GET /listings/`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingFilter {
    /// Exact nightly price.
    pub price_per_night: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    /// Case-insensitive substring matched against title, description and address.
    pub search: Option<String>,
    /// Comma separated `price_per_night` / `created_at`, `-` prefix for descending.
    pub ordering: Option<String>,
}

impl ListingFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Builds the ORDER BY clause from `ordering`. Unknown fields are ignored;
    /// `id` is always the final tie-breaker.
    pub fn order_clause(&self) -> String {
        let mut terms: Vec<&'static str> = Vec::new();
        for raw in self.ordering.as_deref().unwrap_or("").split(',') {
            let term = match raw.trim() {
                "price_per_night" => "price_per_night ASC",
                "-price_per_night" => "price_per_night DESC",
                "created_at" => "created_at ASC",
                "-created_at" => "created_at DESC",
                _ => continue,
            };
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        terms.push("id ASC");
        terms.join(", ")
    }
}
