//! PowerScale Client
//!
//! Typed access to the PowerScale REST API.
//!
//! ## Module Structure
//!
//! - `api` - `PowerScaleApi`, one method per REST operation
//! - `client` - `PowerScaleClient`, the HTTP implementation of `PowerScaleApi`
//! - `config` - Connection settings loaded from the environment
//! - `error` - `ClientError`
//! - `models` - Request and response bodies

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

// Re-export main types
pub use api::PowerScaleApi;
pub use client::PowerScaleClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
