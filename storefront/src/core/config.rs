use crate::orders::PayeeInfo;
use crate::pricing::PricingMode;
use std::path::PathBuf;

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Directory holding the store file |
/// | CATALOG_PATH | fixtures/catalog.json | Product catalog (JSON array) |
/// | PRICING_MODE | lenient | `lenient` or `strict` handling of unknown selections |
/// | LOG_LEVEL | info | Log level / filter directive |
/// | LOG_DIR | (unset) | Daily rolling log files when the directory exists |
/// | ENVIRONMENT | development | development / staging / production |
/// | PAYMENT_WINDOW_MINUTES | 30 | Time allowed to pay a pending order |
/// | PAYEE_ACCOUNT_NAME | built-in | Merchant account name |
/// | PAYEE_ALIPAY_ACCOUNT | built-in | Alipay receiving account |
/// | PAYEE_WECHAT_MERCHANT_ID | built-in | WeChat Pay merchant id |
/// | PAYEE_BANK_NAME | built-in | Bank for transfers |
/// | PAYEE_BANK_ACCOUNT | built-in | Bank account number |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/storefront PRICING_MODE=strict cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub catalog_path: String,
    pub pricing_mode: PricingMode,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
    pub payment_window_minutes: i64,
    pub payee: PayeeInfo,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = PayeeInfo::default();
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "fixtures/catalog.json".into()),
            pricing_mode: std::env::var("PRICING_MODE")
                .ok()
                .and_then(|m| PricingMode::parse(&m))
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            payment_window_minutes: std::env::var("PAYMENT_WINDOW_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &i64| *v > 0)
                .unwrap_or(30),
            payee: PayeeInfo {
                account_name: std::env::var("PAYEE_ACCOUNT_NAME").unwrap_or(defaults.account_name),
                alipay_account: std::env::var("PAYEE_ALIPAY_ACCOUNT")
                    .unwrap_or(defaults.alipay_account),
                wechat_merchant_id: std::env::var("PAYEE_WECHAT_MERCHANT_ID")
                    .unwrap_or(defaults.wechat_merchant_id),
                bank_name: std::env::var("PAYEE_BANK_NAME").unwrap_or(defaults.bank_name),
                bank_account: std::env::var("PAYEE_BANK_ACCOUNT").unwrap_or(defaults.bank_account),
            },
        }
    }

    /// Override the paths, commonly used in tests
    pub fn with_overrides(work_dir: impl Into<String>, catalog_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.catalog_path = catalog_path.into();
        config
    }

    /// redb store file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("storefront.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
