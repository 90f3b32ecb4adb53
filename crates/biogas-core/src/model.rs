use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A waste quantity as reported in the survey.
///
/// Cells that are empty, non-numeric or negative are kept as `Unknown`
/// rather than being turned into zero, so the absence stays visible.
/// Only the coercion functions in `ingest::values` build quantities from
/// raw input, so there is no `Deserialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "Option<Decimal>")]
pub enum Quantity {
    Known(Decimal),
    Unknown,
}

impl Quantity {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Quantity::Known(v) => Some(*v),
            Quantity::Unknown => None,
        }
    }

    /// The value to use in sums: unknown counts as zero.
    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Quantity::Unknown)
    }
}

impl From<Quantity> for Option<Decimal> {
    fn from(q: Quantity) -> Self {
        q.value()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Known(v) => write!(f, "{v}"),
            Quantity::Unknown => write!(f, "unknown"),
        }
    }
}

/// Waste category that can be summarized per municipality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    DomesticPublic,
    Pruning,
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteCategory::DomesticPublic => write!(f, "Domestic+Public"),
            WasteCategory::Pruning => write!(f, "Pruning"),
        }
    }
}

/// One survey row for a municipality reporting unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteRecord {
    pub municipality: String,
    pub total: Quantity,
    pub domestic_public: Quantity,
    pub pruning: Quantity,
}

impl WasteRecord {
    pub fn quantity(&self, category: WasteCategory) -> Quantity {
        match category {
            WasteCategory::DomesticPublic => self.domestic_public,
            WasteCategory::Pruning => self.pruning,
        }
    }

    /// Number of quantity cells in this record that are unknown.
    pub fn unknown_count(&self) -> usize {
        [self.total, self.domestic_public, self.pruning]
            .iter()
            .filter(|q| q.is_unknown())
            .count()
    }
}

/// Material fractions produced by manual separation, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialFraction {
    Organic,
    Plastic,
    PaperCardboard,
    Metal,
    Glass,
    Other,
}

impl MaterialFraction {
    pub const ALL: [MaterialFraction; 6] = [
        MaterialFraction::Organic,
        MaterialFraction::Plastic,
        MaterialFraction::PaperCardboard,
        MaterialFraction::Metal,
        MaterialFraction::Glass,
        MaterialFraction::Other,
    ];

    /// Position of this fraction in proportion vectors and separation output.
    pub fn index(self) -> usize {
        match self {
            MaterialFraction::Organic => 0,
            MaterialFraction::Plastic => 1,
            MaterialFraction::PaperCardboard => 2,
            MaterialFraction::Metal => 3,
            MaterialFraction::Glass => 4,
            MaterialFraction::Other => 5,
        }
    }
}

impl fmt::Display for MaterialFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialFraction::Organic => write!(f, "Organic"),
            MaterialFraction::Plastic => write!(f, "Plastic"),
            MaterialFraction::PaperCardboard => write!(f, "Paper/Cardboard"),
            MaterialFraction::Metal => write!(f, "Metal"),
            MaterialFraction::Glass => write!(f, "Glass"),
            MaterialFraction::Other => write!(f, "Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unknown_sums_as_zero() {
        assert_eq!(Quantity::Unknown.or_zero(), Decimal::ZERO);
        assert_eq!(Quantity::Known(dec!(4.5)).or_zero(), dec!(4.5));
    }

    #[test]
    fn quantity_serializes_as_optional_decimal() {
        let json = serde_json::to_string(&[Quantity::Known(dec!(12.5)), Quantity::Unknown]).unwrap();
        assert_eq!(json, r#"["12.5",null]"#);
    }

    #[test]
    fn record_counts_unknown_cells() {
        let record = WasteRecord {
            municipality: "Recife".into(),
            total: Quantity::Known(dec!(10)),
            domestic_public: Quantity::Unknown,
            pruning: Quantity::Unknown,
        };
        assert_eq!(record.unknown_count(), 2);
        assert_eq!(record.quantity(WasteCategory::Pruning), Quantity::Unknown);
    }

    #[test]
    fn fraction_index_matches_table_order() {
        for (i, fraction) in MaterialFraction::ALL.iter().enumerate() {
            assert_eq!(fraction.index(), i);
        }
    }
}
