// Main library file for the DubaiSpace reservation service

// Export the modules that make up the service
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod seed;
pub mod store;

// Re-export key types for convenience
pub use api::{router, AppState};
pub use config::Config;
pub use engine::{BookingEngine, BookingError, ConfirmationCodes};
pub use error::{ApiError, ErrorBody};
pub use models::{
    Accommodation, Booking, Credentials, Destination, InsertAccommodation, InsertBooking,
    InsertDestination, InsertPackage, InsertTravelTip, InsertUser, NewBooking, Package,
    PublicUser, TravelTip, User,
};
pub use store::{MemStore, Storage, StoreStats, StoreStatsReport};
