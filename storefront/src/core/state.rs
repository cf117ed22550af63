use crate::accounts::AccountService;
use crate::cart::CartService;
use crate::catalog::CatalogService;
use crate::core::Config;
use crate::customization::CustomizationSession;
use crate::orders::{OrderService, PaymentInstruction, payment_instructions};
use crate::storage::{RedbStore, Store};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, PaymentMethod, PricingBreakdown, WatchProduct};
use std::sync::Arc;

/// Storefront state
///
/// Owns the catalog and one store shared by every service. Cheap to pass
/// around by reference; the store and catalog are behind `Arc`.
pub struct StorefrontState<S: Store = RedbStore> {
    pub config: Config,
    pub catalog: CatalogService,
    pub store: Arc<S>,
    pub carts: CartService<S>,
    pub orders: OrderService<S>,
    pub accounts: AccountService<S>,
}

impl StorefrontState<RedbStore> {
    /// Create the work dir, open the redb store and load the catalog
    pub fn initialize(config: Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::with_message(
                ErrorCode::ConfigError,
                format!("Failed to create work dir {}: {}", config.work_dir, e),
            )
        })?;

        let db_path = config.db_path();
        let store = Arc::new(RedbStore::open(&db_path)?);
        tracing::info!(path = %db_path.display(), "Store opened");

        let catalog = CatalogService::load_from_file(&config.catalog_path)?;
        Ok(Self::with_store(config, store, catalog))
    }
}

impl<S: Store> StorefrontState<S> {
    pub fn with_store(config: Config, store: Arc<S>, catalog: CatalogService) -> Self {
        Self {
            carts: CartService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            accounts: AccountService::new(store.clone()),
            config,
            catalog,
            store,
        }
    }

    /// Open the wizard for an active product, nothing selected
    pub fn start_session(&self, product_id: &str) -> AppResult<CustomizationSession> {
        let product = self.catalog.require_active(product_id)?;
        Ok(CustomizationSession::new(product).with_pricing_mode(self.config.pricing_mode))
    }

    /// Open the wizard for an active product with defaults selected
    pub fn start_session_with_defaults(&self, product_id: &str) -> AppResult<CustomizationSession> {
        let product = self.catalog.require_active(product_id)?;
        Ok(CustomizationSession::with_defaults(product).with_pricing_mode(self.config.pricing_mode))
    }

    /// Price of a product in its default configuration
    pub fn default_quote(&self, product: &Arc<WatchProduct>) -> AppResult<PricingBreakdown> {
        CustomizationSession::with_defaults(product.clone())
            .with_pricing_mode(self.config.pricing_mode)
            .quote()
    }

    /// Place an order from the user's saved cart and empty the cart
    pub fn checkout(
        &self,
        user_id: &str,
        address_id: Option<&str>,
        payment_method: PaymentMethod,
        note: Option<String>,
    ) -> AppResult<Order> {
        let user = self.accounts.get(user_id)?;
        let address = match address_id {
            Some(id) => user.address(id),
            None => user.default_address(),
        }
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::AddressNotFound, "No shipping address selected")
                .with_detail("user_id", user_id)
        })?;

        let mut cart = self.carts.load(user_id)?;
        let order = self
            .orders
            .place_order(user_id, &cart, address, payment_method, note)?;

        cart.clear();
        self.carts.save(&cart)?;
        Ok(order)
    }

    pub fn payment_instructions(&self, order: &Order) -> AppResult<PaymentInstruction> {
        payment_instructions(order, &self.config.payee, self.config.payment_window_minutes)
    }
}
