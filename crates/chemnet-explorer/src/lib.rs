//! ChemNet Explorer
//!
//! Client for the ChemNet chemical-research network API. Searches chemicals,
//! funding sources, universities and researchers, and renders each answer as
//! a network view whose visualization is embedded from the backend host.
//!
//! # Features
//!
//! - **Four search panels** plus a ranked funding-source table with detail overlay
//! - **Last-issued-wins**: stale responses never overwrite newer panel state
//! - **Three renderers**: Markdown (CLI), JSON, and HTML (web front end)
//!
//! # Example
//!
//! ```no_run
//! use chemnet_explorer::{ChemNetClient, Config, panel::ChemicalPanel};
//! use chemnet_explorer::models::ChemicalSearchRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ChemNetClient::new(Config::from_env()?)?;
//!
//!     let mut panel = ChemicalPanel::new();
//!     panel.search(&client, ChemicalSearchRequest::new("Aspirin", None)).await;
//!     let view = panel.view(client.visualization_host());
//!     println!("{}", chemnet_explorer::formatters::format_panel_markdown(&view));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod panel;
pub mod server;
pub mod views;

pub use client::ChemNetClient;
pub use config::Config;
pub use error::{ClientError, PanelError};
