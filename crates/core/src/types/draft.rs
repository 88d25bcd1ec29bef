//! Book form drafts.
//!
//! A [`BookDraft`] holds the text of the book form's five fields exactly as
//! they appear in the controls. It is what gets written into the form and
//! what gets read back out before coercion into a [`Book`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::book::Book;
use super::de;

/// A named control of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Author,
    Price,
    ImageUrl,
    Inventory,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Author,
        Self::Price,
        Self::ImageUrl,
        Self::Inventory,
    ];

    /// The control's `name` attribute.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Price => "price",
            Self::ImageUrl => "imageUrl",
            Self::Inventory => "inventory",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text values of the book form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(default, deserialize_with = "de::text")]
    pub title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub author: String,
    #[serde(default, deserialize_with = "de::text")]
    pub price: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image_url: String,
    #[serde(default, deserialize_with = "de::text")]
    pub inventory: String,
}

impl BookDraft {
    /// The draft the form is prefilled with when the page mounts.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            title: "Designing Data-Intensive Applications".to_string(),
            author: "Martin Kleppmann".to_string(),
            price: "22.20".to_string(),
            image_url:
                "https://m.media-amazon.com/images/I/51ZSpMl1-LL._SX379_BO1,204,203,200_.jpg"
                    .to_string(),
            inventory: "1".to_string(),
        }
    }

    /// The text for one field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Price => &self.price,
            FormField::ImageUrl => &self.image_url,
            FormField::Inventory => &self.inventory,
        }
    }

    /// Replace the text for one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
            FormField::Price => &mut self.price,
            FormField::ImageUrl => &mut self.image_url,
            FormField::Inventory => &mut self.inventory,
        };
        *slot = value.into();
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price.to_input_value(),
            image_url: book.image_url.clone(),
            inventory: book
                .inventory
                .map_or_else(|| "NaN".to_string(), |count| count.to_string()),
        }
    }
}
