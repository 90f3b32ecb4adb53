use crate::model::Quantity;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest quantity accepted from a survey cell (10^15 t). Anything above it
/// is unknown; this keeps survey sums within `Decimal` range.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Coerce a text cell into a quantity.
///
/// Accepts plain ("120.5") and scientific ("1.2e3") notation. Empty text,
/// anything non-numeric and values outside `0..=MAX_QUANTITY` become `Unknown`.
pub fn coerce_text(s: &str) -> Quantity {
    let s = s.trim();
    if s.is_empty() {
        return Quantity::Unknown;
    }
    let parsed = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s));
    match parsed {
        Ok(v) => coerce_decimal(v),
        Err(_) => Quantity::Unknown,
    }
}

/// Coerce a numeric cell into a quantity.
pub fn coerce_number(f: f64) -> Quantity {
    if !f.is_finite() {
        return Quantity::Unknown;
    }
    match f64_to_decimal(f) {
        Some(v) => coerce_decimal(v),
        None => Quantity::Unknown,
    }
}

/// Coerce an integer cell into a quantity.
pub fn coerce_integer(i: i64) -> Quantity {
    coerce_decimal(Decimal::from(i))
}

/// Coerce an already-parsed decimal into a quantity.
pub fn coerce_decimal(v: Decimal) -> Quantity {
    if (v.is_sign_negative() && !v.is_zero()) || v > MAX_QUANTITY {
        Quantity::Unknown
    } else {
        Quantity::Known(v)
    }
}

/// Convert f64 to Decimal via its shortest string form, so spreadsheet values
/// such as 0.0829 do not turn into 0.08289999...
fn f64_to_decimal(f: f64) -> Option<Decimal> {
    let s = format!("{f}");
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}
