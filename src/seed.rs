// Demo fixture loaded on every start: three destinations, packages,
// accommodations and tips, one demo user with loyalty stats, one booking

use anyhow::Result;
use chrono::{Duration, Utc};

use crate::engine::BookingEngine;
use crate::models::{
    InsertAccommodation, InsertBooking, InsertDestination, InsertPackage, InsertTravelTip,
    InsertUser,
};
use crate::store::Storage;

pub async fn seed(store: &dyn Storage, engine: &BookingEngine) -> Result<()> {
    let destinations = [
        InsertDestination {
            name: "Lunar Resort Alpha".to_string(),
            location: "Moon".to_string(),
            description: "Experience luxury in the first permanent lunar settlement with Earth views and low-gravity recreation.".to_string(),
            image_url: "https://images.unsplash.com/photo-1614728263952-84ea256f9679?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2069&q=80".to_string(),
            base_price: 250_000,
        },
        InsertDestination {
            name: "Mars Colony One".to_string(),
            location: "Mars".to_string(),
            description: "Visit the pioneering Mars habitat with guided tours of the red planet's most spectacular landscapes.".to_string(),
            image_url: "https://images.unsplash.com/photo-1545156521-77bd85671d30?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2080&q=80".to_string(),
            base_price: 450_000,
        },
        InsertDestination {
            name: "Orbital Hotel Zenith".to_string(),
            location: "Earth Orbit".to_string(),
            description: "The premier luxury orbital hotel with 360° Earth views, zero-gravity spa, and gourmet dining.".to_string(),
            image_url: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2072&q=80".to_string(),
            base_price: 175_000,
        },
    ];
    for destination in destinations {
        store.create_destination(destination).await;
    }

    let packages = [
        InsertPackage {
            name: "Economy Shuttle".to_string(),
            price: 120_000,
            description: "Affordable space travel experience".to_string(),
            features: vec![
                "Standard shuttle transport to orbit".to_string(),
                "3 nights in basic orbital accommodation".to_string(),
                "Standard space-food dining package".to_string(),
                "1 guided space walk experience".to_string(),
                "Digital photo package".to_string(),
            ],
            is_popular: true,
            is_premium: false,
        },
        InsertPackage {
            name: "Luxury Orbital Suite".to_string(),
            price: 350_000,
            description: "Premium space travel experience".to_string(),
            features: vec![
                "Private luxury spacecraft transport".to_string(),
                "7 nights in premium orbital suite".to_string(),
                "Gourmet dining with celebrity chef".to_string(),
                "3 guided space walks with expert".to_string(),
                "Zero-gravity spa and recreation".to_string(),
                "Professional photography & film".to_string(),
            ],
            is_popular: false,
            is_premium: true,
        },
        InsertPackage {
            name: "VIP Explorer".to_string(),
            price: 580_000,
            description: "Ultimate space travel experience".to_string(),
            features: vec![
                "Ultra-luxury private spacecraft".to_string(),
                "10 nights across multiple destinations".to_string(),
                "Personalized menu with private chef".to_string(),
                "Unlimited guided activities".to_string(),
                "Lunar surface expedition included".to_string(),
                "24/7 personal concierge service".to_string(),
            ],
            is_popular: false,
            is_premium: false,
        },
    ];
    for package in packages {
        store.create_package(package).await;
    }

    // Display locations stay free-text; the relation is the destination key
    let accommodations = [
        InsertAccommodation {
            name: "Lunar Dome Suite".to_string(),
            location: "LUNAR SURFACE".to_string(),
            destination_id: Some(1),
            description: "Luxurious transparent dome suites offering panoramic views of the lunar landscape and Earth.".to_string(),
            image_url: "https://images.unsplash.com/photo-1534224039826-c7a0eda0e6b3?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=1170&q=80".to_string(),
            price_per_night: 65_000,
            capacity: "2-4 guests".to_string(),
            amenities: vec![
                "Space-Fi".to_string(),
                "Dining".to_string(),
                "Earth-view windows".to_string(),
            ],
        },
        InsertAccommodation {
            name: "Orbital Luxury Pod".to_string(),
            location: "EARTH ORBIT".to_string(),
            destination_id: Some(3),
            description: "Premium orbital accommodations with rotating Earth views and zero-gravity sleeping chambers.".to_string(),
            image_url: "https://images.unsplash.com/photo-1594498653385-d5172c532c00?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80".to_string(),
            price_per_night: 45_000,
            capacity: "1-2 guests".to_string(),
            amenities: vec![
                "Space-Fi".to_string(),
                "Mini Bar".to_string(),
                "Zero-G sleeping".to_string(),
            ],
        },
        InsertAccommodation {
            name: "Mars Habitat Villa".to_string(),
            location: "MARS COLONY".to_string(),
            destination_id: Some(2),
            description: "Exclusive underground Martian villas with observation domes and private terraformed gardens.".to_string(),
            image_url: "https://images.unsplash.com/photo-1518365050014-70fe7232897f?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80".to_string(),
            price_per_night: 85_000,
            capacity: "2-6 guests".to_string(),
            amenities: vec![
                "Space-Fi".to_string(),
                "Private".to_string(),
                "Terraformed garden".to_string(),
            ],
        },
    ];
    for accommodation in accommodations {
        store.create_accommodation(accommodation).await;
    }

    let travel_tips = [
        InsertTravelTip {
            title: "Preparation for Lunar Gravity".to_string(),
            content: "For your upcoming lunar trip, I recommend daily leg strength exercises. Lunar gravity is 1/6 of Earth's, and strong legs will help you adapt to the unique gravitational environment.".to_string(),
            category: "preparation".to_string(),
        },
        InsertTravelTip {
            title: "Suggested Items for Lunar Resort".to_string(),
            content: "While most necessities are provided, consider bringing: a favorite small memento (under 100g), prescription medications, and specialized skincare for the controlled lunar environment.".to_string(),
            category: "packing".to_string(),
        },
        InsertTravelTip {
            title: "Photography on the Moon".to_string(),
            content: "The lunar resort provides specialized cameras, but if bringing your own, use settings for high contrast environments. The Earth-rise over Mare Imbrium is visible from your suite on days 2-3 of your stay.".to_string(),
            category: "activities".to_string(),
        },
    ];
    for tip in travel_tips {
        store.create_travel_tip(tip).await;
    }

    let mut demo_user = store
        .create_user(InsertUser {
            username: "demo".to_string(),
            password: "password".to_string(),
            full_name: Some("Space Explorer".to_string()),
            email: Some("demo@example.com".to_string()),
        })
        .await;

    demo_user.membership_level = "Platinum".to_string();
    demo_user.journeys_completed = 3;
    demo_user.destinations_visited = 5;
    demo_user.total_days_in_space = 22;
    demo_user.loyalty_points = 248_500;
    store.replace_user(demo_user.clone()).await;

    // Lunar trip for the demo user, priced by the engine like any other booking
    let departure = Utc::now() + Duration::days(25);
    engine
        .create_booking(InsertBooking {
            user_id: demo_user.id,
            destination_id: 1,
            package_id: 2,
            accommodation_id: Some(1),
            departure_date: departure,
            return_date: departure + Duration::days(5),
            travelers: 2,
            total_price: None,
            status: "confirmed".to_string(),
        })
        .await?;

    let report = store.stats();
    tracing::info!(
        destinations = report.destinations,
        packages = report.packages,
        accommodations = report.accommodations,
        travel_tips = report.travel_tips,
        users = report.users,
        bookings = report.bookings,
        "demo fixture seeded"
    );

    Ok(())
}
