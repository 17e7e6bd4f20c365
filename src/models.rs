// Data model for the DubaiSpace booking service
// Wire format is camelCase JSON; ids are assigned by the store, never by clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Registered traveler account with loyalty stats
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub membership_level: String,
    pub journeys_completed: i32,
    pub destinations_visited: i32,
    pub total_days_in_space: i32,
    pub loyalty_points: i32,
}

// User shape that crosses the API boundary: everything except the password
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub membership_level: String,
    pub journeys_completed: i32,
    pub destinations_visited: i32,
    pub total_days_in_space: i32,
    pub loyalty_points: i32,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            membership_level: user.membership_level,
            journeys_completed: user.journeys_completed,
            destinations_visited: user.destinations_visited,
            total_days_in_space: user.total_days_in_space,
            loyalty_points: user.loyalty_points,
        }
    }
}

// Sign-up request; membership and stat fields are server defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub base_price: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDestination {
    pub name: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub base_price: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub is_premium: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPackage {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_premium: bool,
}

// `location` is a free-text display label; the cross-entity relation is the
// optional destination_id key
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub destination_id: Option<i64>,
    pub description: String,
    pub image_url: String,
    pub price_per_night: i64,
    pub capacity: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAccommodation {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub destination_id: Option<i64>,
    pub description: String,
    pub image_url: String,
    pub price_per_night: i64,
    pub capacity: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub destination_id: i64,
    pub package_id: i64,
    pub accommodation_id: Option<i64>,
    pub departure_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub travelers: i32,
    pub total_price: i64,
    pub confirmation_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// Booking candidate as submitted by the wizard. The totalPrice field is a
// client-side preview only; the stored value is always recomputed server-side.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertBooking {
    pub user_id: i64,
    pub destination_id: i64,
    pub package_id: i64,
    #[serde(default)]
    pub accommodation_id: Option<i64>,
    pub departure_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub travelers: i32,
    #[serde(default)]
    pub total_price: Option<i64>,
    #[serde(default = "default_booking_status")]
    pub status: String,
}

fn default_booking_status() -> String {
    "confirmed".to_string()
}

// Fully validated and priced booking candidate handed to the store;
// the id is assigned at insert time
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub destination_id: i64,
    pub package_id: i64,
    pub accommodation_id: Option<i64>,
    pub departure_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub travelers: i32,
    pub total_price: i64,
    pub confirmation_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTip {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTravelTip {
    pub title: String,
    pub content: String,
    pub category: String,
}

// Login request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
