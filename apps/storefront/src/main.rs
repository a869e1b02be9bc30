//! # Storefront (headless)
//!
//! Loads config, restores the cart, pulls the catalog, and logs a summary.
//! Useful for checking an API deployment and the persisted cart from a
//! terminal.
//!
//! ```text
//! $ BOOKSTORE_API_URL=http://localhost:82/api storefront
//! INFO Catalog loaded books=2 categories=2
//! INFO Cart restored lines=1 items=3 total=$76.97
//! ```

use bookstore_storefront::controllers::ShopController;
use bookstore_storefront::{init_tracing, Storefront, StorefrontConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();

    info!("Starting bookstore storefront");

    let config = StorefrontConfig::load_or_default(std::env::args().nth(1).map(Into::into));

    let mut store = match Storefront::bootstrap(config) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to start storefront");
            std::process::exit(1);
        }
    };

    let mut shop = ShopController::new(&mut store);
    shop.load(&mut store).await;

    let view = shop.view();
    info!(
        books = view.books.len(),
        categories = view.categories.len(),
        "Catalog loaded"
    );

    let totals = store.state().cart().totals();
    info!(
        lines = totals.line_count,
        items = totals.item_count,
        total = %totals.total,
        "Cart restored"
    );

    shop.dispose();
}
