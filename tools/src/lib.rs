//! Ark Tools Library
//!
//! Typed client for the namespaced tool resources of the Ark API.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use ark_common::{Config, HttpApiClient};
//! use ark_tools::{NewTool, ToolsService};
//!
//! let config = Config::load()?;
//! let service = ToolsService::new(HttpApiClient::new(&config.api)?);
//!
//! let tools = service.get_all("default").await?;
//! service
//!     .create("default", NewTool::new("weather", "http", "Current weather")
//!         .with_url("https://weather.example.com"))
//!     .await?;
//! ```
//!
//! # Operations
//! - List tools in a namespace (`id` mirrors `name`)
//! - Get a tool with its schema
//! - Create, update and delete tools

pub mod cli;
pub mod service;
pub mod types;

// Re-export main service type
pub use service::ToolsService;

// Re-export types for direct API usage
pub use types::*;
