pub mod amenities;
pub mod bookings;
pub mod listings;
pub mod reviews;
