//! Domain models for the currency converter.

pub mod conversion;
pub mod money;

pub use conversion::{ConversionId, ConversionInput, ConversionRecord, CurrencyCode, NewConversion};
pub use money::{Amount, CONVERTED_SCALE, convert, decimal_to_f64, round_converted};
