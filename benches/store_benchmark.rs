use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dubaispace::engine::compute_total_price;
use dubaispace::{
    Accommodation, BookingEngine, ConfirmationCodes, Destination, InsertBooking,
    InsertDestination, InsertPackage, InsertUser, MemStore, Package, Storage,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

// Benchmark for the in-memory booking store under concurrent mixed load
pub fn store_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("booking_store");

    // Benchmark with different traveler populations
    for users in [8usize, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(users), users, |b, &users| {
            b.iter(|| {
                runtime.block_on(async {
                    let store: Arc<dyn Storage> = Arc::new(MemStore::new());
                    store
                        .create_destination(InsertDestination {
                            name: "Lunar Resort Alpha".to_string(),
                            location: "Moon".to_string(),
                            description: "Bench destination".to_string(),
                            image_url: "https://example.com/moon.jpg".to_string(),
                            base_price: 250_000,
                        })
                        .await;
                    store
                        .create_package(InsertPackage {
                            name: "Economy Shuttle".to_string(),
                            price: 120_000,
                            description: "Bench package".to_string(),
                            features: vec!["Shared cabin".to_string()],
                            is_popular: true,
                            is_premium: false,
                        })
                        .await;
                    for i in 0..users {
                        store
                            .create_user(InsertUser {
                                username: format!("traveler{}", i),
                                password: "orbit".to_string(),
                                full_name: None,
                                email: None,
                            })
                            .await;
                    }

                    let engine = Arc::new(BookingEngine::with_codes(
                        store.clone(),
                        ConfirmationCodes::seeded(42),
                    ));

                    // Spawn multiple tasks to simulate concurrent access
                    let mut handles = vec![];
                    for task in 0..4u64 {
                        let store = Arc::clone(&store);
                        let engine = Arc::clone(&engine);

                        handles.push(tokio::spawn(async move {
                            let mut rng = StdRng::seed_from_u64(task);
                            let departure = Utc::now() + Duration::days(30);

                            // Perform a mix of reads and writes
                            for _ in 0..250 {
                                let user_id = rng.gen_range(1..=users as i64);

                                if rng.gen_bool(0.3) {
                                    // 30% writes
                                    let _ = engine
                                        .create_booking(InsertBooking {
                                            user_id,
                                            destination_id: 1,
                                            package_id: 1,
                                            accommodation_id: None,
                                            departure_date: departure,
                                            return_date: departure + Duration::days(5),
                                            travelers: 2,
                                            total_price: None,
                                            status: "confirmed".to_string(),
                                        })
                                        .await;
                                } else {
                                    // 70% reads
                                    let _ = store.get_user_bookings(user_id).await;
                                }
                            }
                        }));
                    }

                    // Wait for all tasks to complete
                    for handle in handles {
                        handle.await.unwrap();
                    }

                    // Return stats for verification
                    black_box(store.stats())
                })
            });
        });
    }

    group.finish();
}

// Pricing formula on its own, without the store
pub fn pricing_benchmark(c: &mut Criterion) {
    let destination = Destination {
        id: 1,
        name: "Lunar Resort Alpha".to_string(),
        location: "Moon".to_string(),
        description: "Bench destination".to_string(),
        image_url: "https://example.com/moon.jpg".to_string(),
        base_price: 250_000,
    };
    let package = Package {
        id: 2,
        name: "Luxury Orbital Suite".to_string(),
        price: 350_000,
        description: "Bench package".to_string(),
        features: vec!["Private suite".to_string()],
        is_popular: false,
        is_premium: true,
    };
    let accommodation = Accommodation {
        id: 1,
        name: "Lunar Dome Suite".to_string(),
        location: "LUNAR SURFACE".to_string(),
        destination_id: Some(1),
        description: "Bench accommodation".to_string(),
        image_url: "https://example.com/dome.jpg".to_string(),
        price_per_night: 65_000,
        capacity: "2-4 guests".to_string(),
        amenities: vec!["Space-Fi".to_string()],
    };

    c.bench_function("compute_total_price", |b| {
        b.iter(|| {
            black_box(compute_total_price(
                black_box(&destination),
                black_box(&package),
                Some(black_box(&accommodation)),
                black_box(5),
                black_box(2),
            ))
        })
    });
}

criterion_group!(benches, store_benchmark, pricing_benchmark);
criterion_main!(benches);
