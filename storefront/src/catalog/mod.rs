//! Catalog Service - read-only product catalog with in-memory caching
//!
//! Products are loaded once from a JSON file (an array of `WatchProduct`)
//! and handed out as `Arc<WatchProduct>`, so sessions and quotes share the
//! same immutable catalog data.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::WatchProduct;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    #[error("Invalid base price for {product_id}: {price}")]
    InvalidPrice { product_id: String, price: Decimal },
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Io(_) | CatalogError::Parse(_) => {
                AppError::with_message(ErrorCode::ConfigError, message)
            }
            CatalogError::DuplicateProduct(id) => {
                AppError::with_message(ErrorCode::AlreadyExists, message).with_detail("product_id", id)
            }
            CatalogError::InvalidPrice { product_id, .. } => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, message)
                    .with_detail("product_id", product_id)
            }
        }
    }
}

/// Read-only product catalog
#[derive(Clone, Default)]
pub struct CatalogService {
    /// Products cache: product id -> product
    products: Arc<RwLock<HashMap<String, Arc<WatchProduct>>>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("products", &self.products.read().len())
            .finish()
    }
}

impl CatalogService {
    pub fn from_products(products: Vec<WatchProduct>) -> Result<Self, CatalogError> {
        let service = Self::default();
        service.replace(products)?;
        Ok(service)
    }

    /// Load a JSON array of products from disk
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<WatchProduct> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), count = products.len(), "Catalog file loaded");
        Self::from_products(products)
    }

    /// Swap the whole catalog. The previous catalog stays in place on error.
    pub fn replace(&self, products: Vec<WatchProduct>) -> Result<(), CatalogError> {
        let mut map = HashMap::with_capacity(products.len());

        for product in products {
            if product.base_price < Decimal::ZERO {
                return Err(CatalogError::InvalidPrice {
                    product_id: product.id,
                    price: product.base_price,
                });
            }

            for issue in product.options.integrity_issues() {
                tracing::warn!(product_id = %product.id, issue = ?issue, "Catalog integrity issue");
            }

            if map.contains_key(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
            map.insert(product.id.clone(), Arc::new(product));
        }

        *self.products.write() = map;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<WatchProduct>> {
        self.products.read().get(id).cloned()
    }

    /// Get a product that can currently be customized and ordered
    pub fn require_active(&self, id: &str) -> AppResult<Arc<WatchProduct>> {
        let product = self.get(id).ok_or_else(|| {
            AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
                .with_detail("product_id", id)
        })?;
        if !product.is_active {
            return Err(
                AppError::with_message(ErrorCode::ProductInactive, format!("Product {} is not on sale", id))
                    .with_detail("product_id", id),
            );
        }
        Ok(product)
    }

    /// Active products sorted by `sort_order`, then name
    pub fn list_active(&self) -> Vec<Arc<WatchProduct>> {
        let mut products: Vec<Arc<WatchProduct>> = self
            .products
            .read()
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        products
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::classic_watch;
    use std::io::Write;

    fn product(id: &str, name: &str, sort_order: i32) -> WatchProduct {
        let mut p = classic_watch();
        p.id = id.to_string();
        p.name = name.to_string();
        p.sort_order = sort_order;
        p
    }

    #[test]
    fn test_list_active_sorted() {
        let mut hidden = product("retired", "Retired", 0);
        hidden.is_active = false;
        let service = CatalogService::from_products(vec![
            product("b", "Beta", 2),
            product("a2", "Aviator", 1),
            product("a1", "Alpha", 1),
            hidden,
        ])
        .unwrap();

        let ids: Vec<String> = service.list_active().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b"]);
        assert_eq!(service.len(), 4);
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let err = CatalogService::from_products(vec![product("x", "X", 1), product("x", "Y", 2)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(ref id) if id == "x"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut p = product("x", "X", 1);
        p.base_price = Decimal::from(-10);
        let err = CatalogService::from_products(vec![p]).unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::ProductInvalidPrice);
    }

    #[test]
    fn test_high_price_product_loads() {
        let mut p = product("grand", "Grand Complication", 1);
        p.base_price = Decimal::from(1_200_000);
        let service = CatalogService::from_products(vec![p]).unwrap();
        assert_eq!(service.get("grand").unwrap().base_price, Decimal::from(1_200_000));
    }

    #[test]
    fn test_failed_replace_keeps_previous_catalog() {
        let service = CatalogService::from_products(vec![product("x", "X", 1)]).unwrap();
        assert!(service.replace(vec![product("y", "Y", 1), product("y", "Y", 1)]).is_err());
        assert!(service.get("x").is_some());
        assert!(service.get("y").is_none());
    }

    #[test]
    fn test_require_active() {
        let mut hidden = product("retired", "Retired", 0);
        hidden.is_active = false;
        let service =
            CatalogService::from_products(vec![classic_watch(), hidden]).unwrap();

        assert!(service.require_active("heritage-classic").is_ok());
        assert_eq!(
            service.require_active("retired").unwrap_err().code,
            ErrorCode::ProductInactive
        );
        assert_eq!(
            service.require_active("missing").unwrap_err().code,
            ErrorCode::ProductNotFound
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![classic_watch()]).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let service = CatalogService::load_from_file(file.path()).unwrap();
        let product = service.get("heritage-classic").unwrap();
        assert_eq!(*product, classic_watch());
    }

    #[test]
    fn test_load_bundled_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.json");
        let service = CatalogService::load_from_file(path).unwrap();
        assert!(!service.is_empty());
        for product in service.list_active() {
            assert!(product.options.integrity_issues().is_empty(), "{}", product.id);
        }
    }

    #[test]
    fn test_load_errors() {
        let err = CatalogService::load_from_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not an array").unwrap();
        let err = CatalogService::load_from_file(file.path()).unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::ConfigError);
    }
}
