//! # stockdesk-draft: Draft Cache & Configuration
//!
//! Filesystem layer for StockDesk.
//!
//! ## Module Organization
//! ```text
//! stockdesk_draft/
//! ├── lib.rs      ◄─── You are here
//! ├── config.rs   ◄─── DeskConfig (TOML + env overrides)
//! ├── store.rs    ◄─── DraftStore (one JSON file per draft)
//! └── error.rs    ◄─── DraftError
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use stockdesk_core::OrderForm;
//! use stockdesk_draft::{DeskConfig, DraftStore};
//!
//! let config = DeskConfig::load(None)?;
//! let store = DraftStore::from_config(&config)?;
//!
//! let mut form = OrderForm::new();
//! form.set_customer("cus_1");
//! let draft = store.save(None, &form)?;
//! assert!(store.load(&draft.id)?.is_some());
//! # Ok::<(), stockdesk_draft::DraftError>(())
//! ```

pub mod config;
pub mod error;
pub mod store;

pub use config::DeskConfig;
pub use error::{DraftError, DraftResult};
pub use store::{Draft, DraftStore, DraftSummary};
