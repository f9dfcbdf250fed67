//! # Converter Types
//!
//! Domain types and port traits for the currency converter service.
//! This crate has no IO dependencies: only data structures, the
//! conversion arithmetic, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Conversion records, amounts, rounding
//! - `ports/` - Traits the rate provider and store adapters implement
//! - `dto/` - Request/response shapes of the HTTP API
//! - `error/` - Domain, repository and application errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

pub use domain::{
    Amount, ConversionId, ConversionInput, ConversionRecord, CurrencyCode, NewConversion,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{ConversionRepository, ExchangeError, RateProvider};
