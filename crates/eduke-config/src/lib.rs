//! # Eduke Config
//!
//! Configuration types for the Eduke client, loaded from environment variables.
//!
//! - [`api`]: remote API location, timeout, and bearer token
//! - [`session`]: identity of the signed-in user when running headless
//!
//! Snapshot store settings live with the store in `eduke-cache`.
//!
//! # Example
//!
//! ```ignore
//! use eduke_config::{ApiConfig, SessionConfig};
//!
//! dotenvy::dotenv().ok();
//! let api = ApiConfig::from_env();
//! let session = SessionConfig::from_env()?;
//! ```

pub mod api;
pub mod session;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use session::{SessionConfig, SessionConfigError};
