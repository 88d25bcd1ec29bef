//! The bookstore view controller.
//!
//! [`BookstoreView`] owns a document and the handles of its fixed elements.
//! Mounting wires three listeners:
//!
//! - `submit` on the book form: cancel the navigation, read the form into a
//!   new book, render it. The form keeps its values afterwards.
//! - `click` on the toggle control: collapse or expand the form and swap the
//!   control's label.
//! - `keydown` on the window: `Escape` collapses an expanded form and does
//!   nothing otherwise.
//!
//! Each rendered item carries its own delete listener (see [`crate::render`]).
//! Nothing is global; dropping the view drops the document and every
//! listener with it.

use bookstore_core::{Book, BookDraft, Store};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::StorefrontConfig;
use crate::dom::{Dispatch, Document, DomError, Event, EventKind, EventTarget, NodeId};
use crate::error::{Result, ViewError};
use crate::form;
use crate::page::{self, Anchors, HIDE_FORM_LABEL, SHOW_FORM_LABEL};
use crate::render::{self, Renderer};

/// Class marking the book form as hidden.
pub const COLLAPSED_CLASS: &str = "collapsed";

/// Key that collapses the form.
pub const ESCAPE_KEY: &str = "Escape";

/// Visibility of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Expanded,
    Collapsed,
}

impl FormState {
    /// The toggle control's label in this state.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        match self {
            Self::Expanded => HIDE_FORM_LABEL,
            Self::Collapsed => SHOW_FORM_LABEL,
        }
    }
}

/// A user action, as written in replay scripts.
///
/// ```yaml
/// - action: fill
///   title: Dune
///   price: "15"
/// - action: submit
/// - action: delete
///   index: 0
/// - action: toggle
/// - action: key
///   key: Escape
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Interaction {
    /// Type a draft into the book form.
    Fill(BookDraft),
    /// Submit the book form.
    Submit,
    /// Click the delete control of the item at this list position.
    Delete { index: usize },
    /// Click the toggle control.
    Toggle,
    /// Press a key with focus on the page.
    Key { key: String },
}

/// The mounted bookstore page.
#[derive(Debug)]
pub struct BookstoreView {
    document: Document,
    anchors: Anchors,
    renderer: Renderer,
}

impl BookstoreView {
    /// Mount the view on a hosting page.
    ///
    /// Locates the page's fixed elements, optionally prefills the form with
    /// [`BookDraft::sample`], and wires the form, toggle, and keyboard
    /// listeners.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::MissingAnchor` if the page lacks a required element.
    pub fn mount(document: Document, config: &StorefrontConfig) -> Result<Self> {
        let anchors = Anchors::locate(&document)?;
        let renderer = Renderer::new(anchors.book_list, config.currency);
        let mut view = Self {
            document,
            anchors,
            renderer,
        };

        if config.prefill_form {
            form::fill_in(&mut view.document, anchors.book_form, &BookDraft::sample())?;
        }
        view.wire_listeners()?;

        info!(currency = %config.currency, prefill = config.prefill_form, "Bookstore view mounted");
        Ok(view)
    }

    /// Mount on a fresh [`page::build_shell`] page and populate it.
    ///
    /// # Errors
    ///
    /// Returns an error if mounting or population fails.
    pub fn from_store(store: &Store, config: &StorefrontConfig) -> Result<Self> {
        let mut view = Self::mount(page::build_shell()?, config)?;
        view.populate(store)?;
        Ok(view)
    }

    fn wire_listeners(&mut self) -> Result<()> {
        let anchors = self.anchors;
        let renderer = self.renderer;

        self.document
            .add_event_listener(anchors.book_form, EventKind::Submit, move |document, event| {
                event.prevent_default();
                let book = form::extract(document, anchors.book_form)?;
                debug!(title = %book.title, "Book form submitted");
                renderer.render_book(document, &book).map(|_| ())
            })?;

        self.document
            .add_event_listener(anchors.toggle, EventKind::Click, move |document, _| {
                toggle_form(document, &anchors).map(|_| ())
            })?;

        self.document
            .add_event_listener(EventTarget::Window, EventKind::KeyDown, move |document, event| {
                if event.key() == Some(ESCAPE_KEY)
                    && read_form_state(document, &anchors)? == FormState::Expanded
                {
                    toggle_form(document, &anchors)?;
                }
                Ok(())
            })?;

        Ok(())
    }

    /// Render the header, the footer, and every book of the store in order.
    ///
    /// # Errors
    ///
    /// Returns an error if an anchor was removed from the page.
    pub fn populate(&mut self, store: &Store) -> Result<()> {
        render::render_header(&mut self.document, &self.anchors, store)?;
        render::render_footer(&mut self.document, &self.anchors, store)?;
        for book in &store.inventory {
            self.renderer.render_book(&mut self.document, book)?;
        }

        info!(store = %store.name, books = store.inventory.len(), "Populated bookstore page");
        Ok(())
    }

    /// Append one book to the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list container was removed.
    pub fn render_book(&mut self, book: &Book) -> Result<NodeId> {
        Ok(self.renderer.render_book(&mut self.document, book)?)
    }

    // =========================================================================
    // User interactions
    // =========================================================================

    /// Run one scripted interaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction targets a missing item or a
    /// listener fails while handling it.
    pub fn apply(&mut self, interaction: &Interaction) -> Result<()> {
        debug!(?interaction, "Applying interaction");
        match interaction {
            Interaction::Fill(draft) => self.fill_form(draft)?,
            Interaction::Submit => {
                self.submit()?;
            }
            Interaction::Delete { index } => self.delete_item(*index)?,
            Interaction::Toggle => {
                self.click_toggle()?;
            }
            Interaction::Key { key } => {
                self.press_key(key)?;
            }
        }
        Ok(())
    }

    /// Type a draft into the book form.
    ///
    /// # Errors
    ///
    /// Returns an error if the form was removed.
    pub fn fill_form(&mut self, draft: &BookDraft) -> Result<()> {
        Ok(form::fill_in(&mut self.document, self.anchors.book_form, draft)?)
    }

    /// Submit the book form.
    ///
    /// # Errors
    ///
    /// Returns an error if the form was removed or a listener failed.
    pub fn submit(&mut self) -> Result<Dispatch> {
        self.dispatch(self.anchors.book_form, Event::submit())
    }

    /// Click the toggle control.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener failed.
    pub fn click_toggle(&mut self) -> Result<Dispatch> {
        self.dispatch(self.anchors.toggle, Event::click())
    }

    /// Press a key with focus on the page body.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener failed.
    pub fn press_key(&mut self, key: &str) -> Result<Dispatch> {
        self.press_key_on(self.document.body(), key)
    }

    /// Press a key with focus on `node`, such as a form control.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or a listener failed.
    pub fn press_key_on(&mut self, node: NodeId, key: &str) -> Result<Dispatch> {
        self.dispatch(node, Event::key_down(key))
    }

    /// Click any node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or a listener failed.
    pub fn click(&mut self, node: NodeId) -> Result<Dispatch> {
        self.dispatch(node, Event::click())
    }

    /// Click the delete control of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NoSuchItem` if there is no item at `index`.
    pub fn delete_item(&mut self, index: usize) -> Result<()> {
        let items = self.items()?;
        let item = items.get(index).copied().ok_or(ViewError::NoSuchItem {
            index,
            len: items.len(),
        })?;
        let control = render::delete_control(&self.document, item)
            .ok_or(DomError::UnknownNode(item))?;
        self.click(control)?;
        Ok(())
    }

    fn dispatch(&mut self, target: impl Into<EventTarget>, event: Event) -> Result<Dispatch> {
        let outcome = self.document.dispatch(target, event)?;
        match outcome.errors.first() {
            Some(err) => Err(ViewError::Handler(err.clone())),
            None => Ok(outcome),
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Rendered book items, in list order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list container was removed.
    pub fn items(&self) -> Result<Vec<NodeId>> {
        Ok(self.document.children(self.anchors.book_list)?.to_vec())
    }

    /// Read back what an item displays.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is unknown.
    pub fn card(&self, item: NodeId) -> Result<render::BookCard> {
        Ok(render::read_card(&self.document, item)?)
    }

    /// Every item's display, in list order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list container was removed.
    pub fn cards(&self) -> Result<Vec<render::BookCard>> {
        self.items()?.into_iter().map(|item| self.card(item)).collect()
    }

    /// Current visibility of the book form.
    ///
    /// # Errors
    ///
    /// Returns an error if the form was removed.
    pub fn form_state(&self) -> Result<FormState> {
        Ok(read_form_state(&self.document, &self.anchors)?)
    }

    /// Current text of the toggle control.
    ///
    /// # Errors
    ///
    /// Returns an error if the toggle control was removed.
    pub fn toggle_label(&self) -> Result<String> {
        Ok(self.document.text_content(self.anchors.toggle)?)
    }

    /// Current text of the book form's controls.
    ///
    /// # Errors
    ///
    /// Returns an error if the form was removed.
    pub fn form_values(&self) -> Result<BookDraft> {
        Ok(form::read_draft(&self.document, self.anchors.book_form)?)
    }

    /// Serialize the page into a full HTML document titled with the store name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or templating fails.
    pub fn render_html(&self) -> Result<String> {
        let title = self.document.text_content(self.anchors.store_name)?;
        page::render_page(&self.document, &title)
    }

    #[must_use]
    pub const fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }
}

fn read_form_state(document: &Document, anchors: &Anchors) -> std::result::Result<FormState, DomError> {
    if document.has_class(anchors.book_form, COLLAPSED_CLASS)? {
        Ok(FormState::Collapsed)
    } else {
        Ok(FormState::Expanded)
    }
}

fn toggle_form(document: &mut Document, anchors: &Anchors) -> std::result::Result<FormState, DomError> {
    let state = if document.toggle_class(anchors.book_form, COLLAPSED_CLASS)? {
        FormState::Collapsed
    } else {
        FormState::Expanded
    };
    document.set_text_content(anchors.toggle, state.toggle_label())?;
    debug!(?state, "Toggled book form");
    Ok(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookstore_core::{CurrencyCode, Price};

    use super::*;

    fn no_prefill() -> StorefrontConfig {
        StorefrontConfig {
            prefill_form: false,
            ..StorefrontConfig::default()
        }
    }

    fn mounted() -> BookstoreView {
        BookstoreView::mount(page::build_shell().unwrap(), &no_prefill()).unwrap()
    }

    fn book(title: &str) -> Book {
        Book {
            title: title.to_string(),
            price: Price::from(1),
            ..Book::default()
        }
    }

    fn dune() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            price: "15".to_string(),
            image_url: "http://x/y.jpg".to_string(),
            inventory: "3".to_string(),
        }
    }

    #[test]
    fn test_mount_requires_anchors() {
        let err = BookstoreView::mount(Document::new(), &no_prefill()).unwrap_err();
        assert!(matches!(err, ViewError::MissingAnchor(_)));
    }

    #[test]
    fn test_mount_prefills_form() {
        let view =
            BookstoreView::mount(page::build_shell().unwrap(), &StorefrontConfig::default())
                .unwrap();
        assert_eq!(view.form_values().unwrap(), BookDraft::sample());
    }

    #[test]
    fn test_mount_without_prefill_leaves_form_empty() {
        assert_eq!(mounted().form_values().unwrap(), BookDraft::default());
    }

    #[test]
    fn test_submit_appends_one_item_and_keeps_fields() {
        let mut view = mounted();
        view.render_book(&book("Existing")).unwrap();
        view.fill_form(&dune()).unwrap();

        let outcome = view.submit().unwrap();
        assert!(outcome.default_prevented);

        let cards = view.cards().unwrap();
        assert_eq!(cards.len(), 2);
        let added = &cards[1];
        assert_eq!(added.title, "Dune");
        assert_eq!(added.author, "Frank Herbert");
        assert_eq!(added.price, "$15.00");
        assert_eq!(added.image_src, "http://x/y.jpg");

        assert_eq!(view.form_values().unwrap(), dune());
    }

    #[test]
    fn test_submit_with_bad_price_renders_nan() {
        let mut view = mounted();
        view.fill_form(&BookDraft {
            price: "a lot".to_string(),
            ..dune()
        })
        .unwrap();
        view.submit().unwrap();
        assert_eq!(view.cards().unwrap()[0].price, "$NaN");
    }

    #[test]
    fn test_submit_uses_configured_currency() {
        let config = StorefrontConfig {
            currency: CurrencyCode::EUR,
            ..no_prefill()
        };
        let mut view = BookstoreView::mount(page::build_shell().unwrap(), &config).unwrap();
        view.fill_form(&dune()).unwrap();
        view.submit().unwrap();
        assert_eq!(view.cards().unwrap()[0].price, "€15.00");
    }

    #[test]
    fn test_delete_item_by_index() {
        let mut view = mounted();
        for title in ["a", "b", "c"] {
            view.render_book(&book(title)).unwrap();
        }

        view.delete_item(1).unwrap();
        let titles: Vec<_> = view.cards().unwrap().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, ["a", "c"]);

        assert!(matches!(
            view.delete_item(2),
            Err(ViewError::NoSuchItem { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut view = mounted();
        assert_eq!(view.form_state().unwrap(), FormState::Expanded);
        assert_eq!(view.toggle_label().unwrap(), HIDE_FORM_LABEL);

        view.click_toggle().unwrap();
        assert_eq!(view.form_state().unwrap(), FormState::Collapsed);
        assert_eq!(view.toggle_label().unwrap(), SHOW_FORM_LABEL);

        view.click_toggle().unwrap();
        assert_eq!(view.form_state().unwrap(), FormState::Expanded);
        assert_eq!(view.toggle_label().unwrap(), HIDE_FORM_LABEL);
    }

    #[test]
    fn test_escape_only_collapses() {
        let mut view = mounted();

        view.press_key(ESCAPE_KEY).unwrap();
        assert_eq!(view.form_state().unwrap(), FormState::Collapsed);
        assert_eq!(view.toggle_label().unwrap(), SHOW_FORM_LABEL);

        let before = view.render_html().unwrap();
        view.press_key(ESCAPE_KEY).unwrap();
        assert_eq!(view.render_html().unwrap(), before);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut view = mounted();
        view.press_key("Enter").unwrap();
        view.press_key("escape").unwrap();
        assert_eq!(view.form_state().unwrap(), FormState::Expanded);
    }

    #[test]
    fn test_apply_interactions() {
        let mut view = mounted();
        let script = [
            Interaction::Fill(dune()),
            Interaction::Submit,
            Interaction::Submit,
            Interaction::Delete { index: 0 },
            Interaction::Toggle,
            Interaction::Key {
                key: ESCAPE_KEY.to_string(),
            },
        ];
        for step in &script {
            view.apply(step).unwrap();
        }

        assert_eq!(view.items().unwrap().len(), 1);
        assert_eq!(view.form_state().unwrap(), FormState::Collapsed);
    }

    #[test]
    fn test_interaction_deserializes_from_tagged_form() {
        let step: Interaction =
            serde_json::from_str(r#"{"action": "fill", "title": "Dune", "price": 15}"#).unwrap();
        assert_eq!(
            step,
            Interaction::Fill(BookDraft {
                title: "Dune".to_string(),
                price: "15".to_string(),
                ..BookDraft::default()
            })
        );

        let step: Interaction = serde_json::from_str(r#"{"action": "delete", "index": 2}"#).unwrap();
        assert_eq!(step, Interaction::Delete { index: 2 });
    }

    #[test]
    fn test_populate_renders_in_order() {
        let store = Store {
            name: "Easley's Technical Books".to_string(),
            inventory: vec![book("first"), book("second"), book("third")],
            ..Store::default()
        };

        let view = BookstoreView::from_store(&store, &no_prefill()).unwrap();
        let titles: Vec<_> = view.cards().unwrap().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
        assert!(view.render_html().unwrap().contains("<title>Easley"));
    }
}
