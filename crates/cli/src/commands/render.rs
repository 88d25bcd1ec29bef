//! Render the initial page.

use std::path::Path;

use bookstore_storefront::config::StorefrontConfig;

/// Populate the page from the configured store and write its HTML.
pub fn run(config: &StorefrontConfig, out: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let view = super::populated_view(config)?;
    let html = view.render_html()?;
    super::write_html(&html, out)
}
