//! The hosting page.
//!
//! [`build_shell`] creates the static page the bookstore script runs in:
//! header, toggle button, book form, empty book list, and footer. The view
//! finds its fixed elements through [`Anchors::locate`], by `id`, so any
//! document with the same ids works just as well.
//!
//! [`PageTemplate`] wraps a serialized body in the full HTML document.

use askama::Template;

use crate::dom::{Document, DomError, NodeId};
use crate::error::{Result, ViewError};

pub const STORE_NAME_ID: &str = "store-name";
pub const TOGGLE_ID: &str = "toggleForm";
pub const BOOK_FORM_ID: &str = "book-form";
pub const BOOK_LIST_ID: &str = "book-list";
pub const LOCATION_ID: &str = "location";
pub const ADDRESS_ID: &str = "address";
pub const HOURS_ID: &str = "hours";
pub const NUMBER_ID: &str = "number";

/// Label of the toggle control while the form is showing.
pub const HIDE_FORM_LABEL: &str = "Hide Book Form";
/// Label of the toggle control while the form is collapsed.
pub const SHOW_FORM_LABEL: &str = "New Book";

/// `(name, type, placeholder)` for each book form control.
const FORM_CONTROLS: &[(&str, &str, &str)] = &[
    ("title", "text", "Title"),
    ("author", "text", "Author"),
    ("price", "number", "Price"),
    ("imageUrl", "url", "Image URL"),
    ("inventory", "number", "Inventory"),
];

/// Fixed elements of the hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub store_name: NodeId,
    pub toggle: NodeId,
    pub book_form: NodeId,
    pub book_list: NodeId,
    pub location: NodeId,
    pub address: NodeId,
    pub hours: NodeId,
    pub number: NodeId,
}

impl Anchors {
    /// Find every anchor by its `id`.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::MissingAnchor` naming the first id not found.
    pub fn locate(document: &Document) -> Result<Self> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| ViewError::MissingAnchor(id.to_string()))
        };

        Ok(Self {
            store_name: find(STORE_NAME_ID)?,
            toggle: find(TOGGLE_ID)?,
            book_form: find(BOOK_FORM_ID)?,
            book_list: find(BOOK_LIST_ID)?,
            location: find(LOCATION_ID)?,
            address: find(ADDRESS_ID)?,
            hours: find(HOURS_ID)?,
            number: find(NUMBER_ID)?,
        })
    }
}

/// Build the hosting page with an expanded, empty book form.
///
/// # Errors
///
/// Returns an error only if the document model rejects the construction,
/// which indicates a bug in the shell layout.
pub fn build_shell() -> std::result::Result<Document, DomError> {
    let mut doc = Document::new();
    let body = doc.body();

    let header = child(&mut doc, body, "header")?;
    let store_name = child(&mut doc, header, "h1")?;
    doc.set_attribute(store_name, "id", STORE_NAME_ID)?;

    let main = child(&mut doc, body, "main")?;

    let toggle = child(&mut doc, main, "button")?;
    doc.set_attribute(toggle, "id", TOGGLE_ID)?;
    doc.set_text_content(toggle, HIDE_FORM_LABEL)?;

    let form = child(&mut doc, main, "form")?;
    doc.set_attribute(form, "id", BOOK_FORM_ID)?;
    for (name, kind, placeholder) in FORM_CONTROLS {
        let input = child(&mut doc, form, "input")?;
        doc.set_attribute(input, "type", kind)?;
        doc.set_attribute(input, "name", name)?;
        doc.set_attribute(input, "placeholder", placeholder)?;
        if *kind == "number" {
            doc.set_attribute(input, "step", "any")?;
        }
    }
    let submit = child(&mut doc, form, "input")?;
    doc.set_attribute(submit, "type", "submit")?;
    doc.set_attribute(submit, "value", "Add Book")?;

    let list = child(&mut doc, main, "ul")?;
    doc.set_attribute(list, "id", BOOK_LIST_ID)?;

    let footer = child(&mut doc, body, "footer")?;
    for id in [LOCATION_ID, ADDRESS_ID, HOURS_ID, NUMBER_ID] {
        let line = child(&mut doc, footer, "p")?;
        doc.set_attribute(line, "id", id)?;
    }

    Ok(doc)
}

fn child(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
) -> std::result::Result<NodeId, DomError> {
    let element = doc.create_element(tag);
    doc.append(parent, element)?;
    Ok(element)
}

/// The complete HTML document around a serialized `<body>`.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    /// Already-serialized markup; inserted without escaping.
    pub body: &'a str,
}

/// Serialize the document into a full HTML page.
///
/// # Errors
///
/// Returns an error if serialization or templating fails.
pub fn render_page(document: &Document, title: &str) -> Result<String> {
    let body = document.outer_html(document.body())?;
    let page = PageTemplate {
        title,
        body: &body,
    };
    Ok(page.render()?)
}
