//! # Converter Hex
//!
//! Application service layer and HTTP adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `service` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - Generated API document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: ConversionRepository` and
//! `P: RateProvider`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use inbound::HttpServer;
pub use service::ConversionService;
