//! Integration tests for YAML interaction scripts.

#![allow(clippy::unwrap_used)]

use bookstore_integration_tests::{sample_view, titles};
use bookstore_storefront::view::{FormState, Interaction};

fn replay(yaml: &str) -> bookstore_storefront::BookstoreView {
    let steps: Vec<Interaction> = serde_yaml::from_str(yaml).unwrap();
    let mut view = sample_view();
    for step in &steps {
        view.apply(step).unwrap();
    }
    view
}

#[test]
fn test_add_then_remove_original() {
    let view = replay(
        r#"
- action: fill
  title: Dune
  author: Frank Herbert
  price: 15
  imageUrl: http://x/y.jpg
  inventory: 3
- action: submit
- action: delete
  index: 0
"#,
    );

    let titles = titles(&view);
    assert_eq!(titles.len(), 3);
    assert_eq!(titles[2], "Dune");
    assert_eq!(view.cards().unwrap()[2].price, "$15.00");
}

#[test]
fn test_even_toggles_restore_form() {
    let view = replay(
        r"
- action: toggle
- action: toggle
- action: toggle
- action: toggle
",
    );
    assert_eq!(view.form_state().unwrap(), FormState::Expanded);
}

#[test]
fn test_escape_then_escape_stays_collapsed() {
    let view = replay(
        r"
- action: key
  key: Escape
- action: key
  key: Escape
",
    );
    assert_eq!(view.form_state().unwrap(), FormState::Collapsed);
}

#[test]
fn test_fill_with_partial_draft_clears_other_fields() {
    let view = replay(
        r"
- action: fill
  title: Untitled
- action: submit
",
    );

    let added = view.cards().unwrap().pop().unwrap();
    assert_eq!(added.title, "Untitled");
    assert_eq!(added.author, "");
    assert_eq!(added.price, "$NaN");
}

#[test]
fn test_script_with_bad_index_fails_at_that_step() {
    let steps: Vec<Interaction> =
        serde_yaml::from_str("- action: delete\n  index: 9\n").unwrap();
    let mut view = sample_view();
    assert!(view.apply(&steps[0]).is_err());
    assert_eq!(view.items().unwrap().len(), 3);
}
