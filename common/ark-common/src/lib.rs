//! Ark Common - Shared plumbing for Ark API clients
//!
//! This crate provides the functionality every resource client needs:
//!
//! - **Transport**: the [`ApiClient`] trait and its reqwest implementation
//!   [`HttpApiClient`]
//! - **Errors**: [`ApiError`] and the [`ApiResult`] alias
//! - **Configuration**: [`Config`] loaded from TOML and the environment
//! - **Initialization**: [`init_tracing`] for binaries
//!
//! # Example
//!
//! ```rust,ignore
//! use ark_common::{ApiClient, Config, HttpApiClient};
//!
//! let config = Config::load()?;
//! let client = HttpApiClient::new(&config.api)?;
//! let body = client.get("/api/v1/namespaces/default/tools").await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod init;

// Re-export commonly used items at crate root
pub use client::{ApiClient, HttpApiClient};
pub use config::{ApiConfig, Config};
pub use error::{ApiError, ApiResult};
pub use init::{init_tracing, level_for_verbosity};

// Re-export async_trait for implementing ApiClient
pub use async_trait::async_trait;
