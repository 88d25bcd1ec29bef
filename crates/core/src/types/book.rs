//! Book records.

use serde::{Deserialize, Serialize};

use super::de;
use super::draft::BookDraft;
use super::id::ReviewerId;
use super::price::Price;
use crate::coerce::{parse_integer, parse_price};

/// A book listing.
///
/// Books have no identity; two records with equal fields are the same book
/// as far as rendering is concerned. An `id` present in source data is
/// ignored. Absent fields deserialize to empty text, a not-a-number price,
/// and a missing inventory count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, deserialize_with = "de::text")]
    pub title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub author: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, deserialize_with = "de::text")]
    pub image_url: String,
    /// Copies in stock. `None` when the source value was not an integer.
    #[serde(default, deserialize_with = "de::count")]
    pub inventory: Option<i64>,
    /// Carried with the record, never rendered.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A reader review attached to a book.
///
/// Reviews are never rendered, so a malformed one must not fail the load:
/// every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "userID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ReviewerId>,
    #[serde(default, deserialize_with = "de::text")]
    pub content: String,
}

impl Book {
    /// Build a book from form text, coercing price and inventory.
    ///
    /// Reviews always start empty. Coercion never fails; see
    /// [`crate::coerce`] for the rules.
    #[must_use]
    pub fn from_draft(draft: &BookDraft) -> Self {
        Self {
            title: draft.title.clone(),
            author: draft.author.clone(),
            price: parse_price(&draft.price),
            image_url: draft.image_url.clone(),
            inventory: parse_integer(&draft.inventory),
            reviews: Vec::new(),
        }
    }

    /// Alternative text for the cover image.
    #[must_use]
    pub fn cover_alt(&self) -> String {
        format!("{} cover", self.title)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_source_record() {
        let book: Book = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Eloquent JavaScript",
                "author": "Marjin Haverbeke",
                "price": 10.00,
                "reviews": [{"userID": 1, "content": "Good book, but not great for new coders"}],
                "inventory": 10,
                "imageUrl": "https://example.com/eloquent.jpg"
            }"#,
        )
        .unwrap();

        assert_eq!(book.title, "Eloquent JavaScript");
        assert_eq!(book.price.to_string(), "10.00");
        assert_eq!(book.inventory, Some(10));
        assert_eq!(book.image_url, "https://example.com/eloquent.jpg");
        assert_eq!(book.reviews.len(), 1);
        assert_eq!(book.reviews[0].user_id, Some(ReviewerId::new("1")));
    }

    #[test]
    fn test_deserialize_missing_fields_silently() {
        let book: Book = serde_json::from_str(r#"{"title": "Untitled"}"#).unwrap();
        assert_eq!(book.author, "");
        assert!(book.price.is_nan());
        assert_eq!(book.inventory, None);
        assert!(book.reviews.is_empty());
    }

    #[test]
    fn test_deserialize_loose_reviews() {
        let book: Book = serde_json::from_str(
            r#"{"reviews": [{"content": "x"}, {"userID": "u-9"}, {"userID": null, "content": 5}]}"#,
        )
        .unwrap();

        assert_eq!(
            book.reviews,
            vec![
                Review {
                    user_id: None,
                    content: "x".to_string(),
                },
                Review {
                    user_id: Some(ReviewerId::new("u-9")),
                    content: String::new(),
                },
                Review {
                    user_id: None,
                    content: "5".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_deserialize_lenient_inventory() {
        let book: Book = serde_json::from_str(r#"{"inventory": "4 left"}"#).unwrap();
        assert_eq!(book.inventory, Some(4));

        let book: Book = serde_json::from_str(r#"{"inventory": "none"}"#).unwrap();
        assert_eq!(book.inventory, None);
    }

    #[test]
    fn test_from_draft_coerces_numbers() {
        let draft = BookDraft {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            price: "15".to_string(),
            image_url: "http://x/y.jpg".to_string(),
            inventory: "3".to_string(),
        };

        let book = Book::from_draft(&draft);
        assert_eq!(book.price, Price::from(15));
        assert_eq!(book.inventory, Some(3));
        assert!(book.reviews.is_empty());
        assert_eq!(book.cover_alt(), "Dune cover");
    }

    #[test]
    fn test_from_draft_keeps_not_a_number() {
        let draft = BookDraft {
            price: "cheap".to_string(),
            inventory: "lots".to_string(),
            ..BookDraft::default()
        };

        let book = Book::from_draft(&draft);
        assert!(book.price.is_nan());
        assert_eq!(book.inventory, None);
    }
}
