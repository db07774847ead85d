//! PowerScale Core
//!
//! Core library for the PowerScale provider: resources, schemas, diagnostics
//! and the provider contract shared by the handler and client layers.

pub mod diagnostics;
pub mod filter;
pub mod provider;
pub mod resource;
pub mod schema;
