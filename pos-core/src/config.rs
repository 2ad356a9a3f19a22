use chrono_tz::Tz;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct PosConfig {
    pub work_dir: String,
    /// Where generated receipt files are written
    pub receipt_dir: String,
    /// Store name printed on receipt headers
    pub store_name: String,
    /// Currency suffix printed on receipts (minor units, no decimals)
    pub currency: String,
    /// Business timezone for receipt timestamps
    pub timezone: Tz,
    /// Base URL of the external recipe API
    pub meal_api_base_url: String,
    pub log_level: String,
    pub environment: String,
}

impl PosConfig {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("POS_WORK_DIR").unwrap_or_else(|_| "/var/lib/pos".into()),
            receipt_dir: std::env::var("POS_RECEIPT_DIR")
                .unwrap_or_else(|_| "/var/lib/pos/receipts".into()),
            store_name: std::env::var("POS_STORE_NAME")
                .unwrap_or_else(|_| "RestaurantPOS".into()),
            currency: std::env::var("POS_CURRENCY").unwrap_or_else(|_| "MKD".into()),
            timezone: std::env::var("POS_TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Skopje),
            meal_api_base_url: std::env::var("POS_MEAL_API_BASE_URL")
                .unwrap_or_else(|_| crate::recipes::DEFAULT_BASE_URL.into()),
            log_level: std::env::var("POS_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for PosConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
