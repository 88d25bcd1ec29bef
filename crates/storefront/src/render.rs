//! Rendering records into the document.
//!
//! Each book becomes a list item shaped like:
//!
//! ```html
//! <li class="list-li">
//!   <h3>Eloquent JavaScript</h3>
//!   <p>Marjin Haverbeke</p>
//!   <p>$10.00</p>
//!   <img src="..." alt="Eloquent JavaScript cover" title="Eloquent JavaScript cover">
//!   <button>Delete</button>
//! </li>
//! ```
//!
//! The delete button gets its own click listener that captures the item's
//! node handle, so a click removes exactly that item no matter how many
//! others were removed before it.

use bookstore_core::{Book, CurrencyCode, Store, format_price_in};

use crate::dom::{Document, DomError, EventKind, NodeId};
use crate::page::Anchors;

/// Class carried by every rendered book item.
pub const ITEM_CLASS: &str = "list-li";

/// Label of each item's delete control.
pub const DELETE_LABEL: &str = "Delete";

/// Renders books into a list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    list: NodeId,
    currency: CurrencyCode,
}

impl Renderer {
    #[must_use]
    pub const fn new(list: NodeId, currency: CurrencyCode) -> Self {
        Self { list, currency }
    }

    /// The container new items are appended to.
    #[must_use]
    pub const fn list(&self) -> NodeId {
        self.list
    }

    /// Build a list item for `book`, append it to the list, and wire its
    /// delete control.
    ///
    /// Returns the new item's handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the list container is no longer in the document.
    pub fn render_book(&self, document: &mut Document, book: &Book) -> Result<NodeId, DomError> {
        let item = document.create_element("li");
        document.set_attribute(item, "class", ITEM_CLASS)?;

        append_text(document, item, "h3", &book.title)?;
        append_text(document, item, "p", &book.author)?;
        append_text(
            document,
            item,
            "p",
            &format_price_in(book.price, self.currency),
        )?;

        let cover = document.create_element("img");
        let alt = book.cover_alt();
        document.set_attribute(cover, "src", &book.image_url)?;
        document.set_attribute(cover, "alt", &alt)?;
        document.set_attribute(cover, "title", &alt)?;
        document.append(item, cover)?;

        let delete = append_text(document, item, "button", DELETE_LABEL)?;
        document.add_event_listener(delete, EventKind::Click, move |document, _| {
            tracing::debug!(item = %item, "Deleting book");
            document.remove(item)
        })?;

        document.append(self.list, item)?;
        tracing::debug!(item = %item, title = %book.title, "Rendered book");
        Ok(item)
    }
}

/// Write the store name into the header.
///
/// # Errors
///
/// Returns an error if the header anchor was removed.
pub fn render_header(
    document: &mut Document,
    anchors: &Anchors,
    store: &Store,
) -> Result<(), DomError> {
    document.set_text_content(anchors.store_name, &store.name)
}

/// Write location, phone number, address, and hours into the footer.
///
/// # Errors
///
/// Returns an error if a footer anchor was removed.
pub fn render_footer(
    document: &mut Document,
    anchors: &Anchors,
    store: &Store,
) -> Result<(), DomError> {
    document.set_text_content(anchors.location, &store.location)?;
    document.set_text_content(anchors.number, &store.number)?;
    document.set_text_content(anchors.address, &store.address)?;
    document.set_text_content(anchors.hours, &store.hours)
}

/// What a rendered item displays, read back from the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookCard {
    pub title: String,
    pub author: String,
    /// The formatted price, currency symbol included.
    pub price: String,
    pub image_src: String,
}

/// Read the heading, paragraphs, and image source of a rendered item.
///
/// Parts the item lacks read as empty text.
///
/// # Errors
///
/// Returns an error if the item is unknown.
pub fn read_card(document: &Document, item: NodeId) -> Result<BookCard, DomError> {
    let mut card = BookCard::default();
    let mut paragraphs = 0;

    for &child in document.children(item)? {
        match document.tag_name(child) {
            Ok("h3") => card.title = document.text_content(child)?,
            Ok("p") => {
                let text = document.text_content(child)?;
                match paragraphs {
                    0 => card.author = text,
                    1 => card.price = text,
                    _ => {}
                }
                paragraphs += 1;
            }
            Ok("img") => {
                card.image_src = document
                    .attribute(child, "src")?
                    .unwrap_or_default()
                    .to_string();
            }
            _ => {}
        }
    }
    Ok(card)
}

/// The delete control of a rendered item.
#[must_use]
pub fn delete_control(document: &Document, item: NodeId) -> Option<NodeId> {
    document
        .children(item)
        .ok()?
        .iter()
        .copied()
        .find(|&child| document.tag_name(child).is_ok_and(|tag| tag == "button"))
}

fn append_text(
    document: &mut Document,
    parent: NodeId,
    tag: &str,
    text: &str,
) -> Result<NodeId, DomError> {
    let element = document.create_element(tag);
    document.set_text_content(element, text)?;
    document.append(parent, element)?;
    Ok(element)
}
