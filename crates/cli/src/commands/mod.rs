//! CLI command implementations.

pub mod render;
pub mod replay;

use std::io::Write;
use std::path::Path;

use bookstore_storefront::config::StorefrontConfig;
use bookstore_storefront::content::load_store;
use bookstore_storefront::view::BookstoreView;

/// Load the configured store and mount a populated view for it.
pub fn populated_view(config: &StorefrontConfig) -> bookstore_storefront::Result<BookstoreView> {
    let store = load_store(config.require_data_path()?)?;
    BookstoreView::from_store(&store, config)
}

/// Write page HTML to `out`, or to stdout when no path is given.
pub fn write_html(html: &str, out: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match out {
        Some(path) => {
            std::fs::write(path, html)?;
            tracing::info!(path = %path.display(), bytes = html.len(), "Wrote page");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{html}")?;
        }
    }
    Ok(())
}
