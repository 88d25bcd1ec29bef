//! Form binding between book records and the book form.
//!
//! [`fill_in`] writes a draft into the form's named controls and [`extract`]
//! reads them back into a new [`Book`]. Neither validates: a missing control
//! is logged and skipped on write, and read as empty text.

use bookstore_core::{Book, BookDraft, FormField};

use crate::dom::{Document, DomError, NodeId};

/// Set each named control of `form` to the draft's value for that field.
///
/// # Errors
///
/// Returns an error if `form` is not a live node.
pub fn fill_in(document: &mut Document, form: NodeId, draft: &BookDraft) -> Result<(), DomError> {
    for field in FormField::ALL {
        match document.named_control(form, field.name())? {
            Some(control) => document.set_value(control, draft.get(field))?,
            None => tracing::warn!(field = %field, "Book form has no control for field"),
        }
    }
    Ok(())
}

/// Read the current text of every named control of `form`.
///
/// # Errors
///
/// Returns an error if `form` is not a live node.
pub fn read_draft(document: &Document, form: NodeId) -> Result<BookDraft, DomError> {
    let mut draft = BookDraft::default();
    for field in FormField::ALL {
        match document.named_control(form, field.name())? {
            Some(control) => draft.set(field, document.value(control)?),
            None => tracing::warn!(field = %field, "Book form has no control for field"),
        }
    }
    Ok(draft)
}

/// Build a new book from the form, coercing price and inventory.
///
/// Reviews start empty. Unparseable numbers become not-a-number rather than
/// errors.
///
/// # Errors
///
/// Returns an error if `form` is not a live node.
pub fn extract(document: &Document, form: NodeId) -> Result<Book, DomError> {
    read_draft(document, form).map(|draft| Book::from_draft(&draft))
}
