//! Port traits (interfaces for adapters).
//!
//! The application layer depends on these traits, not on concrete
//! HTTP clients or database drivers.

mod exchange;
mod repository;

pub use exchange::{ExchangeError, RateProvider};
pub use repository::ConversionRepository;
