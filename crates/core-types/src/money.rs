use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Converts a monetary input into the `f64` domain of the numeric kernels.
pub fn to_f64(field: &str, value: Decimal) -> Result<f64, CoreError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::invalid(field, format!("{value} is not representable as f64")))
}

/// Like [`to_f64`], but rejects zero and negative amounts.
pub fn to_positive_f64(field: &str, value: Decimal) -> Result<f64, CoreError> {
    if value <= Decimal::ZERO {
        return Err(CoreError::invalid(field, format!("{value} must be positive")));
    }
    to_f64(field, value)
}
