//! # Desk Configuration
//!
//! Configuration for the StockDesk tools.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKDESK_STORE_NAME, STOCKDESK_CURRENCY, STOCKDESK_DRAFT_DIR,     │
//! │     STOCKDESK_API_URL, STOCKDESK_PAGE_SIZE                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stockdesk/config.toml (Linux)                            │
//! │     ~/Library/Application Support/com.stockdesk.stockdesk/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Main Warehouse"
//! currency_code = "USD"
//! currency_symbol = "$"
//!
//! [drafts]
//! dir = "/var/lib/stockdesk/drafts"  # optional
//! max_drafts = 50
//!
//! [api]
//! base_url = "https://admin.example.com/api"
//! page_size = 10
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stockdesk_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use tracing::{debug, info, warn};

use crate::error::{DraftError, DraftResult};

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in CLI output and printed documents.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "StockDesk".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Draft Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSettings {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Maximum drafts kept at once.
    #[serde(default = "default_max_drafts")]
    pub max_drafts: usize,
}

fn default_max_drafts() -> usize {
    50
}

impl Default for DraftSettings {
    fn default() -> Self {
        DraftSettings {
            dir: None,
            max_drafts: default_max_drafts(),
        }
    }
}

// =============================================================================
// API Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the order-management REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rows per list page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Desk Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub drafts: DraftSettings,

    #[serde(default)]
    pub api: ApiSettings,
}

impl DeskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration: file (if present), then environment, then validates.
    pub fn load(config_path: Option<PathBuf>) -> DraftResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`DeskConfig::load`] with an explicit variable lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> DraftResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading desk config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load desk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> DraftResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DraftError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Desk config saved");
        Ok(())
    }

    pub fn validate(&self) -> DraftResult<()> {
        let code = &self.store.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DraftError::InvalidConfig(format!(
                "currency_code must be a 3-letter ISO 4217 code, got: '{}'",
                code
            )));
        }

        if self.drafts.max_drafts == 0 {
            return Err(DraftError::InvalidConfig(
                "max_drafts must be greater than 0".into(),
            ));
        }

        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DraftError::InvalidConfig(format!(
                "API base URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.page_size == 0 || self.api.page_size > MAX_PAGE_SIZE {
            return Err(DraftError::InvalidConfig(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(())
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOCKDESK_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(code) = lookup("STOCKDESK_CURRENCY") {
            debug!(currency = %code, "Overriding currency from environment");
            self.store.currency_code = code.trim().to_uppercase();
        }

        if let Some(dir) = lookup("STOCKDESK_DRAFT_DIR") {
            debug!(dir = %dir, "Overriding draft directory from environment");
            self.drafts.dir = Some(PathBuf::from(dir));
        }

        if let Some(url) = lookup("STOCKDESK_API_URL") {
            self.api.base_url = url;
        }

        if let Some(size) = lookup("STOCKDESK_PAGE_SIZE") {
            match size.parse::<u32>() {
                Ok(s) => self.api.page_size = s,
                Err(_) => warn!(value = %size, "Ignoring non-numeric STOCKDESK_PAGE_SIZE"),
            }
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "stockdesk", "stockdesk")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Directory holding draft files.
    pub fn draft_dir(&self) -> DraftResult<PathBuf> {
        if let Some(dir) = &self.drafts.dir {
            return Ok(dir.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("drafts"))
            .ok_or(DraftError::NoDataDir)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
