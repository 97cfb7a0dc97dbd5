//! `lodestone-jobs` - character job progression as JSON
//!
//! # Features
//!
//! - **View-source tolerant**: accepts the page itself or a browser's
//!   syntax-highlighted "view-source" dump of it
//! - **Class-agnostic parsing**: job fields are recognized by the shape of
//!   their text, not by CSS classes
//! - **Fixed taxonomy**: eight role slots in two groups, always present
//! - **Graceful degradation**: markup changes yield empty fields, never errors
//!
//! # Example
//!
//! ```rust,no_run
//! use lodestone_jobs::{JobLookup, LookupConfig, UpstreamClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LookupConfig::default();
//!     let lookup = JobLookup::new(config.clone(), UpstreamClient::from_config(&config)?);
//!     let jobs = lookup.lookup("12345678").await?;
//!     println!("{} has {} jobs", jobs.details.name, jobs.job_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod lookup;
pub mod model;

pub use config::LookupConfig;
pub use error::{FetchError, LookupError};
pub use extract::{parse_character_page, Category, Group};
pub use http_client::UpstreamClient;
pub use lookup::{ApiResponse, ErrorBody, JobLookup, PageSource};
pub use model::{CategorySlot, CharacterJobs, CombatJobs, Details, JobEntry, VocationJobs};

/// Version of lodestone-jobs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
