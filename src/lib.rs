//! Client for the Mojang account, session and authentication web services
//!
//! This crate maps the Mojang HTTP APIs into typed value objects and a
//! small taxonomy of domain errors. Every operation goes through a common
//! request pipeline that retries connection failures and 5xx responses
//! (at most two retries) and converts ambiguous outcomes — `204` on GET,
//! `403`, `429`, empty bodies — into typed errors before a caller ever
//! sees them.
//!
//! # Example
//!
//! ```no_run
//! use mojang_api::MojangClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MojangClient::new()?;
//!
//!     // Resolve a username and fetch the profile's textures
//!     let profile = client.username_to_textures("Notch").await?;
//!     for property in &profile.properties {
//!         if let Some(textures) = property.as_textures() {
//!             let decoded = textures.textures()?;
//!             if let Some(skin) = decoded.skin {
//!                 println!("Skin: {} (slim: {})", skin.url, skin.is_slim);
//!             }
//!         }
//!     }
//!
//!     // Check a server name against the blocked list
//!     let blocked = client.blocked_servers().await?;
//!     if blocked.is_blocked("mc.example.com")? {
//!         println!("This server is blocked");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error handling
//!
//! Typed errors let callers branch without ever looking at raw status
//! codes. Two operations — [`MojangClient::validate`] and
//! [`MojangClient::signout`] — absorb [`Error::Forbidden`] into a boolean
//! `false`, since for them a rejected token is the expected negative
//! answer. Everything else propagates.
//!
//! # Testing
//!
//! Endpoints are configurable through [`ApiConfig`], so the whole client
//! can be pointed at a mock server; `with_http_client` additionally
//! accepts a caller-supplied `reqwest::Client`.

pub mod blocked_servers;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod properties;

// Re-export main types
pub use blocked_servers::BlockedServers;
pub use client::MojangClient;
pub use config::ApiConfig;
pub use errors::{Error, Result};
pub use models::{
    Answer, ApiStatus, AuthenticateResponse, NameHistoryItem, ProfileInfo, ProfileResponse,
    SecurityQuestion, ServicesCape, ServicesProfile, ServicesSkin, Statistics, UserInfo,
};
pub use properties::{Cape, Property, Skin, TexturesProperty, TexturesPropertyValue};
