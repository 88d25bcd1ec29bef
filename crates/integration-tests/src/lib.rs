//! Integration tests for the bookstore page.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `bookstore_page` - Mounting, population, and user interactions
//! - `replay_scripts` - YAML interaction scripts driven against a store
//!
//! This crate only holds shared fixtures.

use bookstore_core::{BookDraft, Store};
use bookstore_storefront::config::StorefrontConfig;
use bookstore_storefront::view::BookstoreView;

/// A small store with three books, in the shape the hosting page supplies.
pub const STORE_JSON: &str = r#"{
    "name": "Easley's Technical Books",
    "location": "Seattle",
    "address": "333 st ave seattle",
    "hours": "Monday - Friday 9am - 6pm",
    "number": 9999999999,
    "inventory": [
        {
            "id": 1,
            "title": "Eloquent JavaScript: A Modern Introduction to Programming",
            "author": "Marjin Haverbeke",
            "price": 10.00,
            "reviews": [{"userID": 1, "content": "Good book, but not great for new coders"}],
            "inventory": 10,
            "imageUrl": "https://images-na.ssl-images-amazon.com/images/I/51IKycqTPUL._SX218_BO1,204,203,200_QL40_FMwebp_.jpg"
        },
        {
            "id": 2,
            "title": "JavaScript & JQuery: Interactive Front-End Web Development",
            "author": "Jon Duckett",
            "price": 29.96,
            "reviews": [],
            "inventory": 10,
            "imageUrl": "https://images-na.ssl-images-amazon.com/images/I/31SRWF+LkKL._SX398_BO1,204,203,200_.jpg"
        },
        {
            "id": 3,
            "title": "JavaScript: The Good Parts",
            "author": "Douglas Crockford",
            "price": "18.99",
            "reviews": [],
            "inventory": 2,
            "imageUrl": "https://images-na.ssl-images-amazon.com/images/I/5131OWtQRaL._SX381_BO1,204,203,200_.jpg"
        }
    ]
}"#;

/// The fixture store.
///
/// # Panics
///
/// Panics if [`STORE_JSON`] stops parsing.
#[must_use]
pub fn sample_store() -> Store {
    serde_json::from_str(STORE_JSON).expect("fixture store parses")
}

/// Configuration with an empty book form on mount.
#[must_use]
pub fn empty_form_config() -> StorefrontConfig {
    StorefrontConfig {
        prefill_form: false,
        ..StorefrontConfig::default()
    }
}

/// The fixture store mounted and populated with default configuration.
///
/// # Panics
///
/// Panics if the view cannot be built from the fixture.
#[must_use]
pub fn sample_view() -> BookstoreView {
    BookstoreView::from_store(&sample_store(), &StorefrontConfig::default())
        .expect("fixture view builds")
}

/// A complete draft for "Dune".
#[must_use]
pub fn dune_draft() -> BookDraft {
    BookDraft {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        price: "15".to_string(),
        image_url: "http://x/y.jpg".to_string(),
        inventory: "3".to_string(),
    }
}

/// Titles of the rendered items, in list order.
///
/// # Panics
///
/// Panics if the list container is gone.
#[must_use]
pub fn titles(view: &BookstoreView) -> Vec<String> {
    view.cards()
        .expect("list is mounted")
        .into_iter()
        .map(|card| card.title)
        .collect()
}
