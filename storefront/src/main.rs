use anyhow::Context;
use storefront::{Config, StorefrontState, init_logger_with_file};

fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Config + logging
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        pricing_mode = ?config.pricing_mode,
        "Watch storefront starting..."
    );

    // 3. Store + catalog
    let state = StorefrontState::initialize(config).context("failed to initialize storefront")?;

    // 4. Catalog summary
    let products = state.catalog.list_active();
    tracing::info!(count = products.len(), "Active products");
    for product in &products {
        let quote = state
            .default_quote(product)
            .with_context(|| format!("failed to price {}", product.id))?;
        tracing::info!(
            product_id = %product.id,
            name = %product.name,
            attributes = product.options.attributes().len(),
            price = %quote.final_price,
            "Product"
        );
    }

    tracing::info!(orders = state.orders.count()?, "Storefront ready");
    Ok(())
}
