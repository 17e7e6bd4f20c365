// Booking engine: owns the pricing rule, booking validation, reference
// resolution and confirmation-code generation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::models::{
    Accommodation, Booking, Destination, InsertBooking, NewBooking, Package,
};
use crate::store::Storage;

// Error types for booking creation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookingError {
    #[error("returnDate must be after departureDate")]
    ReturnNotAfterDeparture,

    #[error("travelers must be at least 1")]
    TooFewTravelers,

    #[error("{0} not found")]
    MissingReference(&'static str),

    #[error("total price is out of range")]
    PriceOutOfRange,
}

// Whole nights between departure and return, rounded to the nearest day.
// Matches the wizard's preview arithmetic so both sides price identically.
pub fn nights_between(departure: DateTime<Utc>, return_date: DateTime<Utc>) -> i64 {
    let millis = (return_date - departure).num_milliseconds().abs();
    (millis as f64 / 86_400_000.0).round() as i64
}

// total = (basePrice + packagePrice + pricePerNight * nights) * travelers,
// with the accommodation term dropped when no accommodation is selected.
// Returns None when the total does not fit in i64.
pub fn compute_total_price(
    destination: &Destination,
    package: &Package,
    accommodation: Option<&Accommodation>,
    nights: i64,
    travelers: i32,
) -> Option<i64> {
    let accommodation_total = match accommodation {
        Some(accommodation) => accommodation.price_per_night.checked_mul(nights)?,
        None => 0,
    };
    destination
        .base_price
        .checked_add(package.price)?
        .checked_add(accommodation_total)?
        .checked_mul(i64::from(travelers))
}

// Generates DS-#####-LX confirmation codes. Codes are not checked for
// uniqueness; collisions are possible and unhandled.
pub struct ConfirmationCodes {
    rng: Mutex<StdRng>,
}

impl ConfirmationCodes {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    // Deterministic sequence for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_code(&self) -> String {
        let digits: u32 = self.rng.lock().gen_range(10_000..=99_999);
        format!("DS-{}-LX", digits)
    }
}

impl Default for ConfirmationCodes {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BookingEngine {
    store: Arc<dyn Storage>,
    codes: ConfirmationCodes,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self::with_codes(store, ConfirmationCodes::new())
    }

    pub fn with_codes(store: Arc<dyn Storage>, codes: ConfirmationCodes) -> Self {
        Self { store, codes }
    }

    // Validate a candidate booking, resolve its references, recompute the
    // authoritative price and persist the result. The client's totalPrice is a
    // display hint only; a disagreeing value is logged and ignored.
    pub async fn create_booking(&self, insert: InsertBooking) -> Result<Booking, BookingError> {
        if insert.travelers < 1 {
            return Err(BookingError::TooFewTravelers);
        }
        if insert.return_date <= insert.departure_date {
            return Err(BookingError::ReturnNotAfterDeparture);
        }

        let destination = self
            .store
            .get_destination(insert.destination_id)
            .await
            .ok_or(BookingError::MissingReference("Destination"))?;
        let package = self
            .store
            .get_package(insert.package_id)
            .await
            .ok_or(BookingError::MissingReference("Package"))?;
        let accommodation = match insert.accommodation_id {
            Some(id) => Some(
                self.store
                    .get_accommodation(id)
                    .await
                    .ok_or(BookingError::MissingReference("Accommodation"))?,
            ),
            None => None,
        };
        self.store
            .get_user(insert.user_id)
            .await
            .ok_or(BookingError::MissingReference("User"))?;

        let nights = nights_between(insert.departure_date, insert.return_date);
        let total_price = compute_total_price(
            &destination,
            &package,
            accommodation.as_ref(),
            nights,
            insert.travelers,
        )
        .ok_or(BookingError::PriceOutOfRange)?;

        if let Some(client_total) = insert.total_price {
            if client_total != total_price {
                tracing::warn!(
                    client_total,
                    computed_total = total_price,
                    destination_id = destination.id,
                    "client price preview disagrees with computed total, storing computed value"
                );
            }
        }

        let booking = self
            .store
            .create_booking(NewBooking {
                user_id: insert.user_id,
                destination_id: insert.destination_id,
                package_id: insert.package_id,
                accommodation_id: insert.accommodation_id,
                departure_date: insert.departure_date,
                return_date: insert.return_date,
                travelers: insert.travelers,
                total_price,
                confirmation_code: self.codes.next_code(),
                status: insert.status,
                created_at: Utc::now(),
            })
            .await;

        tracing::debug!(
            booking_id = booking.id,
            confirmation_code = %booking.confirmation_code,
            total_price = booking.total_price,
            "booking created"
        );

        Ok(booking)
    }

    pub async fn bookings_for_user(&self, user_id: i64) -> Vec<Booking> {
        self.store.get_user_bookings(user_id).await
    }

    pub async fn all_bookings(&self) -> Vec<Booking> {
        self.store.get_all_bookings().await
    }
}
