//! Concurrent store access tests.
//!
//! Threads (or tasks on a multi-thread runtime) share one set of stores over
//! a single data directory and mutate the same blobs at once. No update may
//! be lost, checks must see the write they guard, and every blob must stay
//! readable.
//!
//! Run with: cargo test --test concurrent_cart -- --nocapture

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Barrier};
use std::thread;

use axum::http::StatusCode;
use boutique_core::{CartItem, NewTestimonial, ProductId, Rating, cart_count};
use boutique_integration_tests::TestApp;
use boutique_storefront::storage::{FileStore, KeyValueStore, SharedStorage};
use boutique_storefront::stores::{CART_KEY, CatalogLatency, Stores, seed};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Number of concurrent threads.
const THREAD_COUNT: usize = 8;

/// Number of mutations per thread.
const ITERATIONS_PER_THREAD: u32 = 10;

fn file_storage(dir: &TempDir) -> SharedStorage {
    Arc::new(FileStore::open(dir.path()).unwrap())
}

fn file_stores(dir: &TempDir) -> Arc<Stores> {
    Arc::new(Stores::new(&file_storage(dir), CatalogLatency::none()))
}

fn units(lines: &Value) -> u64 {
    lines
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["quantity"].as_u64().unwrap())
        .sum()
}

/// Every thread adds the same product one unit at a time; the merged line
/// must hold every unit.
#[test]
fn test_concurrent_adds_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let stores = file_stores(&dir);
    let product = seed::products().into_iter().next().unwrap();
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let stores = Arc::clone(&stores);
            let barrier = Arc::clone(&barrier);
            let product = product.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    stores.cart.add(product.clone(), 1).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let items = stores.cart.items().unwrap();
    assert_eq!(items.len(), 1);
    let expected = u32::try_from(THREAD_COUNT).unwrap() * ITERATIONS_PER_THREAD;
    assert_eq!(stores.cart.count().unwrap(), expected);
}

/// Threads work on different products; each ends with its own line.
#[test]
fn test_concurrent_adds_of_distinct_products() {
    let dir = TempDir::new().unwrap();
    let stores = file_stores(&dir);
    let products = seed::products();
    let barrier = Arc::new(Barrier::new(products.len()));

    let handles: Vec<_> = products
        .iter()
        .cloned()
        .map(|product| {
            let stores = Arc::clone(&stores);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    stores.cart.add(product.clone(), 1).unwrap();
                }
                stores.cart.set_quantity(&product.id, 2).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let items = stores.cart.items().unwrap();
    assert_eq!(items.len(), products.len());
    assert!(items.iter().all(|item| item.quantity == 2));

    stores.cart.remove(&ProductId::new("1")).unwrap();
    assert_eq!(stores.cart.items().unwrap().len(), products.len() - 1);
}

/// Concurrent testimonial submissions each get a distinct id and all appear.
#[test]
fn test_concurrent_testimonials() {
    let dir = TempDir::new().unwrap();
    let stores = file_stores(&dir);
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let stores = Arc::clone(&stores);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                stores
                    .testimonials
                    .add(NewTestimonial {
                        name: format!("Client {thread_id}"),
                        country: "Togo".to_string(),
                        comment: "Parfait.".to_string(),
                        rating: Rating::new(5).unwrap(),
                    })
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut created: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    created.sort();
    created.dedup();
    assert_eq!(created.len(), THREAD_COUNT);

    let listed = stores.testimonials.list().unwrap();
    assert_eq!(listed.len(), 5 + THREAD_COUNT);
    assert!(created.iter().all(|id| listed.iter().any(|t| &t.id == id)));
}

/// Lines taken for an order are exactly the lines removed from the cart;
/// units added meanwhile are either taken or still in the cart.
#[test]
fn test_take_races_with_adds() {
    let dir = TempDir::new().unwrap();
    let stores = file_stores(&dir);
    let product = seed::products().into_iter().next().unwrap();
    let barrier = Arc::new(Barrier::new(THREAD_COUNT + 1));

    let adders: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let stores = Arc::clone(&stores);
            let barrier = Arc::clone(&barrier);
            let product = product.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    stores.cart.add(product.clone(), 1).unwrap();
                }
            })
        })
        .collect();

    let taker = {
        let stores = Arc::clone(&stores);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let mut taken: Vec<CartItem> = Vec::new();
            for _ in 0..ITERATIONS_PER_THREAD {
                taken.extend(stores.cart.take().unwrap());
            }
            taken
        })
    };

    for handle in adders {
        handle.join().unwrap();
    }
    let taken = taker.join().unwrap();

    let expected = u32::try_from(THREAD_COUNT).unwrap() * ITERATIONS_PER_THREAD;
    assert_eq!(cart_count(&taken) + stores.cart.count().unwrap(), expected);
}

/// Migrating while the cart is being written loses none of the writes.
#[test]
fn test_migrate_races_with_adds() {
    let dir = TempDir::new().unwrap();
    let storage = file_storage(&dir);
    let product = seed::products().into_iter().next().unwrap();
    let legacy = serde_json::to_string(&vec![CartItem::new(product.clone(), 1)]).unwrap();
    storage.set(CART_KEY, &legacy).unwrap();

    let stores = Arc::new(Stores::new(&storage, CatalogLatency::none()));
    let barrier = Arc::new(Barrier::new(THREAD_COUNT + 1));

    let adders: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let stores = Arc::clone(&stores);
            let barrier = Arc::clone(&barrier);
            let product = product.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    stores.cart.add(product.clone(), 1).unwrap();
                }
            })
        })
        .collect();

    let migrator = {
        let stores = Arc::clone(&stores);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS_PER_THREAD {
                stores.migrate().unwrap();
            }
        })
    };

    for handle in adders {
        handle.join().unwrap();
    }
    migrator.join().unwrap();

    let expected = u32::try_from(THREAD_COUNT).unwrap() * ITERATIONS_PER_THREAD + 1;
    assert_eq!(stores.cart.count().unwrap(), expected);
}

/// Number of orders raced over HTTP.
const ORDER_COUNT: usize = 20;

/// Delivering and cancelling the same pending order at once: exactly one
/// request wins and the stored status is the winner's.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_terminal_transitions() {
    let dir = TempDir::new().unwrap();
    let app = TestApp::with_storage(file_storage(&dir));

    let mut ids = Vec::new();
    for _ in 0..ORDER_COUNT {
        app.post("/cart/add", &json!({"product_id": "6"})).await;
        let order = app
            .post(
                "/checkout",
                &json!({"name": "Ama", "email": "ama@example.tg", "phone": "90", "address": "Lomé"}),
            )
            .await
            .json();
        ids.push(order["id"].as_str().unwrap().to_string());
    }

    let mut races = Vec::new();
    for id in &ids {
        for status in ["delivered", "cancelled"] {
            let app = app.clone();
            let uri = format!("/admin/orders/{id}/status");
            races.push(tokio::spawn(async move {
                let response = app.post(&uri, &json!({"status": status})).await;
                (response.status, status)
            }));
        }
    }

    let mut results = Vec::new();
    for race in races {
        results.push(race.await.unwrap());
    }

    for (id, pair) in ids.iter().zip(results.chunks(2)) {
        let winners: Vec<_> = pair
            .iter()
            .filter(|(status, _)| *status == StatusCode::OK)
            .collect();
        assert_eq!(winners.len(), 1, "order {id}: {pair:?}");
        assert!(pair.iter().any(|(status, _)| *status == StatusCode::CONFLICT));

        let stored = app.get(&format!("/admin/orders/{id}")).await.json();
        assert_eq!(stored["status"], winners.first().unwrap().1);
        assert_eq!(stored["nextStatuses"], json!([]));
    }
}

/// Items added while checkouts run end up either in an order or in the cart.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_checkout_keeps_concurrent_adds() {
    let dir = TempDir::new().unwrap();
    let app = TestApp::with_storage(file_storage(&dir));
    let adds = THREAD_COUNT * 5;

    let mut tasks = Vec::new();
    for i in 0..adds {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let product_id = (i % 8 + 1).to_string();
            let response = app.post("/cart/add", &json!({"product_id": product_id})).await;
            assert_eq!(response.status, StatusCode::OK);
        }));
    }
    for _ in 0..THREAD_COUNT {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let response = app
                .post(
                    "/checkout",
                    &json!({"name": "Edem", "email": "edem@example.tg", "phone": "91", "address": "Kara"}),
                )
                .await;
            assert!(
                response.status == StatusCode::CREATED
                    || response.status == StatusCode::BAD_REQUEST,
                "{response:?}"
            );
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let orders = app.get("/admin/orders").await.json();
    let ordered: u64 = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|order| units(&order["items"]))
        .sum();
    let in_cart = app.get("/cart/count").await.json()["count"].as_u64().unwrap();
    assert_eq!(ordered + in_cart, u64::try_from(adds).unwrap());
}
