use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i64,
    #[serde(rename = "user")]
    pub user_id: i64,
    #[serde(rename = "listing")]
    pub listing_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Always derived from the stay length and the listing's nightly price.
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: chrono::NaiveDateTime,
}

/// Body of `POST /bookings/` and `PUT /bookings/{id}/`. `user` and
/// `total_price` are never taken from the client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub listing: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: BookingStatus,
}

/// Body of `PATCH /bookings/{id}/`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookingChanges {
    pub listing: Option<i64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

impl From<CreateBooking> for BookingChanges {
    fn from(full: CreateBooking) -> Self {
        Self {
            listing: Some(full.listing),
            check_in: Some(full.check_in),
            check_out: Some(full.check_out),
            status: Some(full.status),
        }
    }
}

impl Booking {
    pub fn apply(&mut self, changes: &BookingChanges) {
        if let Some(listing) = changes.listing {
            self.listing_id = listing;
        }
        if let Some(check_in) = changes.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = changes.check_out {
            self.check_out = check_out;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }

    pub fn nights(&self) -> i64 {
        nights(self.check_in, self.check_out)
    }
}

/// Query parameters of `GET /bookings/`.
///
/// `start_date` and `end_date` bound the stay: a booking matches when
/// `check_in >= start_date` and `check_out <= end_date`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingFilter {
    pub listing: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// `nights × price_per_night`, rounded to cents.
pub fn total_price(check_in: NaiveDate, check_out: NaiveDate, price_per_night: f64) -> f64 {
    let total = nights(check_in, check_out) as f64 * price_per_night;
    (total * 100.0).round() / 100.0
}

/// A stay must last at least one night.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), AppError> {
    if check_out <= check_in {
        return Err(AppError::Validation(
            "check_out must be after check_in".to_string(),
        ));
    }
    Ok(())
}
