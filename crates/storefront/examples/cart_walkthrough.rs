//! Cart walkthrough - a shopper on a wide screen, then a phone

use std::sync::Arc;
use std::time::Duration;

use storefront::observers::{CloseReason, Key};
use storefront::{MemoryStorage, Product, StorefrontConfig, StorefrontSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => StorefrontConfig::from_file(path)?,
        None => StorefrontConfig::default(),
    };
    let session = StorefrontSession::with_default_page(config, Arc::new(MemoryStorage::new()))?;

    let bench = Product::new("bench", "Oak Bench", 30000)
        .with_sale_price(25000)
        .with_image("/images/bench.jpg");
    let mug = Product::new("mug", "Stoneware Mug", 4000).with_stock(12);

    // Desktop: the drawer opens and confirms inline
    session.add_to_cart(bench.clone(), 1, false).await?;
    let view = session.drawer().view().await;
    println!("Drawer: {:?}, {} item(s), subtotal {}", view.state, view.item_count, view.subtotal);
    println!("Toasts on screen: {}", session.toasts().len().await);

    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("Tab inside drawer: {:?}", session.handle_key(Key::Tab { shift: false }).await?);
    println!("Escape: {:?}", session.handle_key(Key::Escape).await?);

    // Phone: the drawer stays shut and a toast appears instead
    session.viewport_resized(375).await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    session.add_to_cart(mug, 2, false).await?;
    for toast in session.toasts().active().await {
        println!("Toast [{:?}] {}", toast.severity, toast.message);
    }

    session.update_quantity("mug", 20).await;
    session.move_to_wishlist("bench").await;

    let summary = session.order_summary();
    println!(
        "Subtotal {} + shipping {} + VAT {} = {}",
        summary.subtotal, summary.shipping, summary.tax, summary.total
    );

    session.open_drawer().await?;
    session.close_drawer(CloseReason::ContinueExploring).await;

    let placed = session.complete_checkout().await?;
    println!("Order placed for {}", placed.total);

    session.shutdown().await;
    Ok(())
}
