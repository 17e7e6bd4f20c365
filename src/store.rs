// In-memory store backing the booking service
// Sharded concurrent maps with per-entity atomic id counters. Ids are assigned
// sequentially from 1, so ascending id equals insertion order.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::{
    Accommodation, Booking, Destination, InsertAccommodation, InsertDestination, InsertPackage,
    InsertTravelTip, InsertUser, NewBooking, Package, TravelTip, User,
};

// Operation counters kept on the live store
#[derive(Debug, Default)]
pub struct StoreStats {
    pub records_created: AtomicUsize,
    pub lookups: AtomicUsize,
    pub lookup_misses: AtomicUsize,
}

// Snapshot of the counters plus per-entity record counts
#[derive(Debug, Default, Clone)]
pub struct StoreStatsReport {
    pub records_created: usize,
    pub lookups: usize,
    pub lookup_misses: usize,
    pub users: usize,
    pub destinations: usize,
    pub packages: usize,
    pub accommodations: usize,
    pub travel_tips: usize,
    pub bookings: usize,
}

// Store trait the API layer and booking engine are written against
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    // Users
    async fn get_user(&self, id: i64) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, insert: InsertUser) -> User;
    // Wholesale overwrite, used by the seed routine to install demo stats
    async fn replace_user(&self, user: User);

    // Destinations
    async fn get_all_destinations(&self) -> Vec<Destination>;
    async fn get_destination(&self, id: i64) -> Option<Destination>;
    async fn create_destination(&self, insert: InsertDestination) -> Destination;

    // Packages
    async fn get_all_packages(&self) -> Vec<Package>;
    async fn get_package(&self, id: i64) -> Option<Package>;
    async fn create_package(&self, insert: InsertPackage) -> Package;

    // Accommodations
    async fn get_all_accommodations(&self) -> Vec<Accommodation>;
    async fn get_accommodation(&self, id: i64) -> Option<Accommodation>;
    async fn get_accommodations_for_destination(&self, destination_id: i64) -> Vec<Accommodation>;
    async fn create_accommodation(&self, insert: InsertAccommodation) -> Accommodation;

    // Travel tips
    async fn get_all_travel_tips(&self) -> Vec<TravelTip>;
    async fn get_travel_tip(&self, id: i64) -> Option<TravelTip>;
    async fn create_travel_tip(&self, insert: InsertTravelTip) -> TravelTip;

    // Bookings
    async fn get_all_bookings(&self) -> Vec<Booking>;
    async fn get_booking(&self, id: i64) -> Option<Booking>;
    async fn get_user_bookings(&self, user_id: i64) -> Vec<Booking>;
    async fn create_booking(&self, new: NewBooking) -> Booking;

    // Operation counters
    fn stats(&self) -> StoreStatsReport;
}

// One id sequence per entity type, all starting at 1
#[derive(Debug, Default)]
struct IdCounters {
    users: AtomicI64,
    destinations: AtomicI64,
    packages: AtomicI64,
    accommodations: AtomicI64,
    travel_tips: AtomicI64,
    bookings: AtomicI64,
}

fn next_id(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

// Collect a map snapshot in insertion order (ascending key)
fn sorted_by_id<T: Clone>(map: &DashMap<i64, T>) -> Vec<T> {
    let mut entries: Vec<(i64, T)> = map
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    entries.sort_unstable_by_key(|(id, _)| *id);
    entries.into_iter().map(|(_, value)| value).collect()
}

#[derive(Debug, Default)]
pub struct MemStore {
    users: DashMap<i64, User>,
    destinations: DashMap<i64, Destination>,
    packages: DashMap<i64, Package>,
    accommodations: DashMap<i64, Accommodation>,
    travel_tips: DashMap<i64, TravelTip>,
    bookings: DashMap<i64, Booking>,
    counters: IdCounters,
    stats: StoreStats,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_created(&self) {
        self.stats.records_created.fetch_add(1, Ordering::SeqCst);
    }

    fn record_lookup(&self, hit: bool) {
        self.stats.lookups.fetch_add(1, Ordering::SeqCst);
        if !hit {
            self.stats.lookup_misses.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl Storage for MemStore {
    async fn get_user(&self, id: i64) -> Option<User> {
        let user = self.users.get(&id).map(|entry| entry.clone());
        self.record_lookup(user.is_some());
        user
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        // Linear scan, first exact match; duplicate usernames are not enforced
        // at write time so the winner among duplicates is unspecified
        let user = sorted_by_id(&self.users)
            .into_iter()
            .find(|user| user.username == username);
        self.record_lookup(user.is_some());
        user
    }

    async fn create_user(&self, insert: InsertUser) -> User {
        let user = User {
            id: next_id(&self.counters.users),
            username: insert.username,
            password: insert.password,
            full_name: insert.full_name,
            email: insert.email,
            membership_level: "Standard".to_string(),
            journeys_completed: 0,
            destinations_visited: 0,
            total_days_in_space: 0,
            loyalty_points: 0,
        };
        self.users.insert(user.id, user.clone());
        self.record_created();
        user
    }

    async fn replace_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    async fn get_all_destinations(&self) -> Vec<Destination> {
        sorted_by_id(&self.destinations)
    }

    async fn get_destination(&self, id: i64) -> Option<Destination> {
        let destination = self.destinations.get(&id).map(|entry| entry.clone());
        self.record_lookup(destination.is_some());
        destination
    }

    async fn create_destination(&self, insert: InsertDestination) -> Destination {
        let destination = Destination {
            id: next_id(&self.counters.destinations),
            name: insert.name,
            location: insert.location,
            description: insert.description,
            image_url: insert.image_url,
            base_price: insert.base_price,
        };
        self.destinations
            .insert(destination.id, destination.clone());
        self.record_created();
        destination
    }

    async fn get_all_packages(&self) -> Vec<Package> {
        sorted_by_id(&self.packages)
    }

    async fn get_package(&self, id: i64) -> Option<Package> {
        let package = self.packages.get(&id).map(|entry| entry.clone());
        self.record_lookup(package.is_some());
        package
    }

    async fn create_package(&self, insert: InsertPackage) -> Package {
        let package = Package {
            id: next_id(&self.counters.packages),
            name: insert.name,
            price: insert.price,
            description: insert.description,
            features: insert.features,
            is_popular: insert.is_popular,
            is_premium: insert.is_premium,
        };
        self.packages.insert(package.id, package.clone());
        self.record_created();
        package
    }

    async fn get_all_accommodations(&self) -> Vec<Accommodation> {
        sorted_by_id(&self.accommodations)
    }

    async fn get_accommodation(&self, id: i64) -> Option<Accommodation> {
        let accommodation = self.accommodations.get(&id).map(|entry| entry.clone());
        self.record_lookup(accommodation.is_some());
        accommodation
    }

    async fn get_accommodations_for_destination(&self, destination_id: i64) -> Vec<Accommodation> {
        sorted_by_id(&self.accommodations)
            .into_iter()
            .filter(|accommodation| accommodation.destination_id == Some(destination_id))
            .collect()
    }

    async fn create_accommodation(&self, insert: InsertAccommodation) -> Accommodation {
        let accommodation = Accommodation {
            id: next_id(&self.counters.accommodations),
            name: insert.name,
            location: insert.location,
            destination_id: insert.destination_id,
            description: insert.description,
            image_url: insert.image_url,
            price_per_night: insert.price_per_night,
            capacity: insert.capacity,
            amenities: insert.amenities,
        };
        self.accommodations
            .insert(accommodation.id, accommodation.clone());
        self.record_created();
        accommodation
    }

    async fn get_all_travel_tips(&self) -> Vec<TravelTip> {
        sorted_by_id(&self.travel_tips)
    }

    async fn get_travel_tip(&self, id: i64) -> Option<TravelTip> {
        let tip = self.travel_tips.get(&id).map(|entry| entry.clone());
        self.record_lookup(tip.is_some());
        tip
    }

    async fn create_travel_tip(&self, insert: InsertTravelTip) -> TravelTip {
        let tip = TravelTip {
            id: next_id(&self.counters.travel_tips),
            title: insert.title,
            content: insert.content,
            category: insert.category,
        };
        self.travel_tips.insert(tip.id, tip.clone());
        self.record_created();
        tip
    }

    async fn get_all_bookings(&self) -> Vec<Booking> {
        sorted_by_id(&self.bookings)
    }

    async fn get_booking(&self, id: i64) -> Option<Booking> {
        let booking = self.bookings.get(&id).map(|entry| entry.clone());
        self.record_lookup(booking.is_some());
        booking
    }

    async fn get_user_bookings(&self, user_id: i64) -> Vec<Booking> {
        sorted_by_id(&self.bookings)
            .into_iter()
            .filter(|booking| booking.user_id == user_id)
            .collect()
    }

    async fn create_booking(&self, new: NewBooking) -> Booking {
        let booking = Booking {
            id: next_id(&self.counters.bookings),
            user_id: new.user_id,
            destination_id: new.destination_id,
            package_id: new.package_id,
            accommodation_id: new.accommodation_id,
            departure_date: new.departure_date,
            return_date: new.return_date,
            travelers: new.travelers,
            total_price: new.total_price,
            confirmation_code: new.confirmation_code,
            status: new.status,
            created_at: new.created_at,
        };
        self.bookings.insert(booking.id, booking.clone());
        self.record_created();
        booking
    }

    fn stats(&self) -> StoreStatsReport {
        StoreStatsReport {
            records_created: self.stats.records_created.load(Ordering::SeqCst),
            lookups: self.stats.lookups.load(Ordering::SeqCst),
            lookup_misses: self.stats.lookup_misses.load(Ordering::SeqCst),
            users: self.users.len(),
            destinations: self.destinations.len(),
            packages: self.packages.len(),
            accommodations: self.accommodations.len(),
            travel_tips: self.travel_tips.len(),
            bookings: self.bookings.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn insert_destination(name: &str, base_price: i64) -> InsertDestination {
        InsertDestination {
            name: name.to_string(),
            location: "Moon".to_string(),
            description: "Test destination".to_string(),
            image_url: "https://example.com/img.jpg".to_string(),
            base_price,
        }
    }

    fn insert_user(username: &str) -> InsertUser {
        InsertUser {
            username: username.to_string(),
            password: "secret".to_string(),
            full_name: None,
            email: None,
        }
    }

    fn new_booking(user_id: i64) -> NewBooking {
        let departure = Utc::now() + Duration::days(30);
        NewBooking {
            user_id,
            destination_id: 1,
            package_id: 1,
            accommodation_id: None,
            departure_date: departure,
            return_date: departure + Duration::days(5),
            travelers: 2,
            total_price: 740_000,
            confirmation_code: "DS-12345-LX".to_string(),
            status: "confirmed".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_consecutive_ids_from_one() {
        let store = MemStore::new();

        let first = store.create_destination(insert_destination("Alpha", 100)).await;
        let second = store.create_destination(insert_destination("Beta", 200)).await;
        let third = store.create_destination(insert_destination("Gamma", 300)).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_get_returns_created_record() {
        let store = MemStore::new();

        let created = store.create_destination(insert_destination("Alpha", 250_000)).await;
        let fetched = store.get_destination(created.id).await;

        assert_eq!(fetched, Some(created));
        assert_eq!(store.get_destination(999_999).await, None);
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order() {
        let store = MemStore::new();

        for name in ["Alpha", "Beta", "Gamma"] {
            store.create_destination(insert_destination(name, 100)).await;
        }

        let names: Vec<String> = store
            .get_all_destinations()
            .await
            .into_iter()
            .map(|destination| destination.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_user_defaults_filled_on_create() {
        let store = MemStore::new();

        let user = store
            .create_user(InsertUser {
                username: "traveler".to_string(),
                password: "secret".to_string(),
                full_name: Some("Test Traveler".to_string()),
                email: Some("traveler@example.com".to_string()),
            })
            .await;

        assert_eq!(user.id, 1);
        assert_eq!(user.membership_level, "Standard");
        assert_eq!(user.journeys_completed, 0);
        assert_eq!(user.destinations_visited, 0);
        assert_eq!(user.total_days_in_space, 0);
        assert_eq!(user.loyalty_points, 0);
    }

    #[tokio::test]
    async fn test_get_user_by_username_exact_match() {
        let store = MemStore::new();
        store.create_user(insert_user("alice")).await;
        store.create_user(insert_user("bob")).await;

        let found = store.get_user_by_username("bob").await.unwrap();
        assert_eq!(found.username, "bob");
        assert!(store.get_user_by_username("carol").await.is_none());
        assert!(store.get_user_by_username("BOB").await.is_none());
    }

    #[tokio::test]
    async fn test_replace_user_overwrites_record() {
        let store = MemStore::new();
        let mut user = store.create_user(insert_user("demo")).await;

        user.membership_level = "Platinum".to_string();
        user.loyalty_points = 248_500;
        store.replace_user(user.clone()).await;

        let fetched = store.get_user(user.id).await.unwrap();
        assert_eq!(fetched.membership_level, "Platinum");
        assert_eq!(fetched.loyalty_points, 248_500);
    }

    #[tokio::test]
    async fn test_accommodations_filter_by_destination_key() {
        let store = MemStore::new();

        for (name, destination_id) in [
            ("Lunar Dome Suite", Some(1)),
            ("Orbital Luxury Pod", Some(3)),
            ("Mars Habitat Villa", Some(2)),
            ("Unattached Capsule", None),
        ] {
            store
                .create_accommodation(InsertAccommodation {
                    name: name.to_string(),
                    location: "TEST".to_string(),
                    destination_id,
                    description: "Test accommodation".to_string(),
                    image_url: "https://example.com/img.jpg".to_string(),
                    price_per_night: 45_000,
                    capacity: "1-2 guests".to_string(),
                    amenities: vec!["Space-Fi".to_string()],
                })
                .await;
        }

        let matches = store.get_accommodations_for_destination(1).await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Lunar Dome Suite");
        assert!(store.get_accommodations_for_destination(99).await.is_empty());
    }

    #[tokio::test]
    async fn test_travel_tips_create_and_get() {
        let store = MemStore::new();

        let tip = store
            .create_travel_tip(InsertTravelTip {
                title: "Preparation for Lunar Gravity".to_string(),
                content: "Daily leg strength exercises help.".to_string(),
                category: "preparation".to_string(),
            })
            .await;

        assert_eq!(tip.id, 1);
        assert_eq!(store.get_travel_tip(1).await, Some(tip.clone()));
        assert_eq!(store.get_travel_tip(2).await, None);
        assert_eq!(store.get_all_travel_tips().await, vec![tip]);
    }

    #[tokio::test]
    async fn test_user_bookings_are_the_filtered_subset_in_order() {
        let store = MemStore::new();

        store.create_booking(new_booking(1)).await;
        store.create_booking(new_booking(2)).await;
        store.create_booking(new_booking(1)).await;

        let all = store.get_all_bookings().await;
        let for_user: Vec<Booking> = store.get_user_bookings(1).await;

        let expected: Vec<Booking> = all
            .into_iter()
            .filter(|booking| booking.user_id == 1)
            .collect();
        assert_eq!(for_user, expected);
        assert_eq!(for_user.len(), 2);
        assert!(for_user[0].id < for_user[1].id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_never_duplicate_ids() {
        let store = Arc::new(MemStore::new());
        let tasks: usize = 8;
        let creates_per_task: usize = 50;

        let mut handles = Vec::new();
        for task in 0..tasks {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for i in 0..creates_per_task {
                    let user = store
                        .create_user(insert_user(&format!("user-{}-{}", task, i)))
                        .await;
                    ids.push(user.id);
                }
                ids
            }));
        }

        let mut all_ids = Vec::new();
        for handle in handles {
            all_ids.extend(handle.await.unwrap());
        }

        all_ids.sort_unstable();
        all_ids.dedup();
        assert_eq!(all_ids.len(), tasks * creates_per_task);
        assert_eq!(all_ids[0], 1);
        assert_eq!(*all_ids.last().unwrap(), (tasks * creates_per_task) as i64);
    }

    #[tokio::test]
    async fn test_stats_track_creates_and_misses() {
        let store = MemStore::new();

        store.create_destination(insert_destination("Alpha", 100)).await;
        store.get_destination(1).await;
        store.get_destination(42).await;

        let report = store.stats();
        assert_eq!(report.records_created, 1);
        assert_eq!(report.lookups, 2);
        assert_eq!(report.lookup_misses, 1);
        assert_eq!(report.destinations, 1);
    }
}
