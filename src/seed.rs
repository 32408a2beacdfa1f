//! Randomized sample data for development databases.
//!
//! [`SampleGenerator`] only produces values; [`seed_database`] writes them
//! through the repositories. Both take their randomness and "today" from the
//! caller, so a fixed seed reproduces the same data set.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{BookingStatus, CreateBooking, CreateListing, CreateReview, NewAmenity, NewUser};

pub const DEFAULT_AMENITIES: [(&str, &str); 6] = [
    ("WiFi", "fa-wifi"),
    ("Pool", "fa-swimming-pool"),
    ("Kitchen", "fa-utensils"),
    ("Parking", "fa-parking"),
    ("Air Conditioning", "fa-snowflake"),
    ("TV", "fa-tv"),
];

const PROPERTY_TYPES: [&str; 5] = ["Apartment", "House", "Villa", "Cottage", "Loft"];

const FIRST_NAMES: [&str; 12] = [
    "Amara", "Bruno", "Chen", "Dalia", "Emeka", "Freya", "Goran", "Hana", "Ines", "Jonas", "Kofi",
    "Lena",
];

const LAST_NAMES: [&str; 10] = [
    "Okafor", "Silva", "Nakamura", "Berg", "Haddad", "Kowalski", "Moreau", "Patel", "Quinn",
    "Romero",
];

const CITIES: [&str; 10] = [
    "Lisbon", "Nairobi", "Kyoto", "Oslo", "Marrakesh", "Cusco", "Tbilisi", "Hobart", "Split",
    "Montreal",
];

const STREETS: [&str; 8] = [
    "Harbour Road",
    "Elm Street",
    "Rua das Flores",
    "Old Mill Lane",
    "Kings Avenue",
    "Cedar Close",
    "Market Square",
    "Riverside Drive",
];

const SENTENCES: [&str; 12] = [
    "Sunlight fills the living room all afternoon.",
    "A short walk brings you to the old town.",
    "The kitchen is fully equipped for longer stays.",
    "Quiet neighbours and a leafy courtyard.",
    "Public transport stops right outside the door.",
    "Fresh linen and towels are provided.",
    "The balcony looks out over the rooftops.",
    "Perfect base for exploring the coast.",
    "Check-in is flexible and self-service.",
    "Great cafes and bakeries nearby.",
    "The bedrooms are calm and well insulated.",
    "Host was responsive and helpful throughout.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub users: usize,
    pub listings: usize,
    pub bookings: usize,
    pub reviews: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            users: 5,
            listings: 10,
            bookings: 20,
            reviews: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub amenities_created: usize,
    pub users: usize,
    pub listings: usize,
    pub bookings: usize,
    pub reviews: usize,
}

pub struct SampleGenerator<R: Rng> {
    rng: R,
    today: NaiveDate,
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    pub fn user(&mut self) -> NewUser {
        let first_name = *pick(&mut self.rng, &FIRST_NAMES);
        let last_name = *pick(&mut self.rng, &LAST_NAMES);
        let tag: u32 = self.rng.gen_range(1000..10000);
        let username = format!(
            "{}.{}{}",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            tag
        );

        NewUser {
            email: format!("{}@example.com", username),
            username,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// A listing with a non-empty random subset of `amenity_ids`.
    pub fn listing(&mut self, amenity_ids: &[i64]) -> CreateListing {
        let kind = *pick(&mut self.rng, &PROPERTY_TYPES);
        let city = *pick(&mut self.rng, &CITIES);
        let street = *pick(&mut self.rng, &STREETS);
        let number: u32 = self.rng.gen_range(1..300);

        let amenities = if amenity_ids.is_empty() {
            Vec::new()
        } else {
            let k = self.rng.gen_range(1..=amenity_ids.len());
            amenity_ids
                .choose_multiple(&mut self.rng, k)
                .copied()
                .collect()
        };

        CreateListing {
            title: format!("{} in {}", kind, city),
            description: self.paragraph(5),
            address: format!("{} {}, {}", number, street, city),
            price_per_night: self.rng.gen_range(50..=500) as f64,
            max_guests: self.rng.gen_range(1..=10),
            bedrooms: self.rng.gen_range(1..=5),
            bathrooms: self.rng.gen_range(1..=3),
            amenities,
            is_active: self.rng.gen_bool(0.5),
        }
    }

    /// A stay starting 1–30 days after today and lasting 1–14 nights.
    pub fn booking(&mut self, listing: i64) -> CreateBooking {
        let check_in = self.today + Duration::days(self.rng.gen_range(1..=30));
        let check_out = check_in + Duration::days(self.rng.gen_range(1..=14));
        let status = *pick(&mut self.rng, &BookingStatus::ALL);

        CreateBooking {
            listing,
            check_in,
            check_out,
            status,
        }
    }

    pub fn review(&mut self) -> CreateReview {
        CreateReview {
            rating: self.rng.gen_range(1..=5),
            comment: self.paragraph(2),
        }
    }

    pub fn pick_id(&mut self, ids: &[i64]) -> Option<i64> {
        ids.choose(&mut self.rng).copied()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn paragraph(&mut self, sentences: usize) -> String {
        (0..sentences)
            .map(|_| *pick(&mut self.rng, &SENTENCES))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Populates the store. Amenities are get-or-created so repeated runs do not
/// duplicate them. Each (user, listing) pair is reviewed at most once, so
/// fewer reviews than requested are written when the pairs run out.
pub async fn seed_database<R: Rng>(
    pool: &SqlitePool,
    counts: SeedCounts,
    generator: &mut SampleGenerator<R>,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let mut amenity_ids = Vec::with_capacity(DEFAULT_AMENITIES.len());
    for (name, icon) in DEFAULT_AMENITIES {
        let (amenity, created) =
            db::amenities::get_or_create(pool, &NewAmenity::new(name, icon)).await?;
        if created {
            log::info!("Created amenity: {}", amenity.name);
            report.amenities_created += 1;
        }
        amenity_ids.push(amenity.id);
    }

    let mut user_ids = Vec::with_capacity(counts.users);
    for _ in 0..counts.users {
        let user = create_user(pool, generator).await?;
        log::info!("Created user: {}", user.1);
        user_ids.push(user.0);
    }
    report.users = user_ids.len();

    let mut listing_ids = Vec::with_capacity(counts.listings);
    if counts.listings > 0 && user_ids.is_empty() {
        log::warn!("no users available to host listings, skipping listings");
    }
    for _ in 0..counts.listings {
        let Some(host) = generator.pick_id(&user_ids) else {
            break;
        };
        let new = generator.listing(&amenity_ids);
        let listing = db::listings::create(pool, host, &new).await?;
        log::info!("Created listing: {}", listing.title);
        listing_ids.push(listing.id);
    }
    report.listings = listing_ids.len();

    for _ in 0..counts.bookings {
        let (Some(user), Some(listing)) =
            (generator.pick_id(&user_ids), generator.pick_id(&listing_ids))
        else {
            log::warn!("no users or listings available, skipping bookings");
            break;
        };
        let new = generator.booking(listing);
        let booking = db::bookings::create(pool, user, &new).await?;
        log::info!(
            "Created booking: user {} booked listing {} ({:.2})",
            user,
            listing,
            booking.total_price
        );
        report.bookings += 1;
    }

    let mut pairs: Vec<(i64, i64)> = user_ids
        .iter()
        .flat_map(|user| listing_ids.iter().map(move |listing| (*user, *listing)))
        .collect();
    generator.shuffle(&mut pairs);
    if counts.reviews > pairs.len() {
        log::warn!(
            "only {} distinct (user, listing) pairs, writing {} of {} reviews",
            pairs.len(),
            pairs.len(),
            counts.reviews
        );
    }
    for (user, listing) in pairs.into_iter().take(counts.reviews) {
        let new = generator.review();
        db::reviews::create(pool, user, listing, &new).await?;
        log::info!("Created review: user {} rated listing {} {}/5", user, listing, new.rating);
        report.reviews += 1;
    }

    Ok(report)
}

/// Generated usernames can collide with rows from an earlier run; a few
/// fresh draws are tried before giving up.
async fn create_user<R: Rng>(
    pool: &SqlitePool,
    generator: &mut SampleGenerator<R>,
) -> Result<(i64, String)> {
    let mut attempts = 0;
    loop {
        let new = generator.user();
        match db::users::create(pool, &new).await {
            Ok(user) => return Ok((user.id, user.username)),
            Err(AppError::Conflict(_)) if attempts < 5 => {
                log::debug!("username {} taken, drawing another", new.username);
                attempts += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
