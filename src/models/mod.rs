pub mod amenity;
pub mod booking;
pub mod listing;
pub mod review;
pub mod user;

pub use amenity::{Amenity, NewAmenity};
pub use booking::{Booking, BookingChanges, BookingFilter, BookingStatus, CreateBooking};
pub use listing::{CreateListing, Listing, ListingChanges, ListingFilter};
pub use review::{CreateReview, Review};
pub use user::{NewUser, User};
