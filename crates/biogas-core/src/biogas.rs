use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::BiogasError;

/// Upper bound for a yield factor. Survey quantities are capped as well, so
/// volumes stay within `Decimal` range.
pub const MAX_YIELD_FACTOR: Decimal = Decimal::ONE_THOUSAND;

/// Empirical biogas yield per unit mass, one factor per contributing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldFactors {
    pruning: Decimal,
    organic: Decimal,
    paper: Decimal,
}

impl YieldFactors {
    pub fn new(pruning: Decimal, organic: Decimal, paper: Decimal) -> Result<Self, BiogasError> {
        for (name, factor) in [
            ("yield_factor_pruning", pruning),
            ("yield_factor_organic", organic),
            ("yield_factor_paper", paper),
        ] {
            if factor <= Decimal::ZERO || factor > MAX_YIELD_FACTOR {
                return Err(BiogasError::ConfigInvalid(format!(
                    "{name} must be positive and at most {MAX_YIELD_FACTOR}, got {factor}"
                )));
            }
        }
        Ok(YieldFactors {
            pruning,
            organic,
            paper,
        })
    }

    pub fn pruning(&self) -> Decimal {
        self.pruning
    }

    pub fn organic(&self) -> Decimal {
        self.organic
    }

    pub fn paper(&self) -> Decimal {
        self.paper
    }
}

/// Material stream that contributes to gas production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasSource {
    Organic,
    PaperCardboard,
    Pruning,
}

impl GasSource {
    pub const ALL: [GasSource; 3] = [
        GasSource::Organic,
        GasSource::PaperCardboard,
        GasSource::Pruning,
    ];
}

impl fmt::Display for GasSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasSource::Organic => write!(f, "Organic"),
            GasSource::PaperCardboard => write!(f, "Paper/Cardboard"),
            GasSource::Pruning => write!(f, "Pruning"),
        }
    }
}

/// Gas volume per source. The total is always derived from the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasBreakdown {
    organic: Decimal,
    paper_cardboard: Decimal,
    pruning: Decimal,
}

/// Raw biogas volume per source.
pub type BiogasBreakdown = GasBreakdown;

impl GasBreakdown {
    pub fn new(organic: Decimal, paper_cardboard: Decimal, pruning: Decimal) -> Self {
        GasBreakdown {
            organic,
            paper_cardboard,
            pruning,
        }
    }

    pub fn get(&self, source: GasSource) -> Decimal {
        match source {
            GasSource::Organic => self.organic,
            GasSource::PaperCardboard => self.paper_cardboard,
            GasSource::Pruning => self.pruning,
        }
    }

    pub fn total(&self) -> Decimal {
        self.organic + self.paper_cardboard + self.pruning
    }

    pub fn iter(&self) -> impl Iterator<Item = (GasSource, Decimal)> + '_ {
        GasSource::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// Percentage of the total contributed by `source`.
    ///
    /// Returns `None` when the total is zero, since there is no composition
    /// to report.
    pub fn share(&self, source: GasSource) -> Option<Decimal> {
        let total = self.total();
        if total.is_zero() {
            return None;
        }
        Some(self.get(source) / total * Decimal::ONE_HUNDRED)
    }

    /// Apply `f` to every source volume, producing a new breakdown.
    pub(crate) fn map(&self, f: impl Fn(Decimal) -> Decimal) -> GasBreakdown {
        GasBreakdown {
            organic: f(self.organic),
            paper_cardboard: f(self.paper_cardboard),
            pruning: f(self.pruning),
        }
    }
}

impl Serialize for GasBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GasBreakdown", 4)?;
        state.serialize_field("organic", &self.organic)?;
        state.serialize_field("paper_cardboard", &self.paper_cardboard)?;
        state.serialize_field("pruning", &self.pruning)?;
        state.serialize_field("total", &self.total())?;
        state.end()
    }
}

pub fn yield_volume(quantity: Decimal, factor: Decimal) -> Decimal {
    quantity * factor
}

/// Compute biogas volumes for the three contributing sources.
///
/// Organic and paper quantities come from the separation output. Pruning is
/// its own reported category, so its quantity is the raw pruning sum.
pub fn biogas_breakdown(
    organic_qty: Decimal,
    paper_qty: Decimal,
    pruning_qty: Decimal,
    factors: &YieldFactors,
) -> BiogasBreakdown {
    GasBreakdown::new(
        yield_volume(organic_qty, factors.organic()),
        yield_volume(paper_qty, factors.paper()),
        yield_volume(pruning_qty, factors.pruning()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn survey_factors() -> YieldFactors {
        YieldFactors::new(dec!(0.460), dec!(0.215), dec!(0.358)).unwrap()
    }

    #[test]
    fn factors_outside_range_rejected() {
        assert!(YieldFactors::new(dec!(0), dec!(0.2), dec!(0.3)).is_err());
        assert!(YieldFactors::new(dec!(0.4), dec!(1000.5), dec!(0.3)).is_err());
        assert!(YieldFactors::new(dec!(0.4), dec!(0.2), MAX_YIELD_FACTOR).is_ok());
    }

    #[test]
    fn paper_yield_example() {
        assert_eq!(yield_volume(dec!(82.9), dec!(0.358)), dec!(29.6782));
    }

    #[test]
    fn total_is_sum_of_sources() {
        let b = biogas_breakdown(dec!(555.7), dec!(82.9), dec!(120), &survey_factors());
        assert_eq!(b.get(GasSource::Organic), dec!(119.4755));
        assert_eq!(b.get(GasSource::PaperCardboard), dec!(29.6782));
        assert_eq!(b.get(GasSource::Pruning), dec!(55.2));
        assert_eq!(b.total(), dec!(119.4755) + dec!(29.6782) + dec!(55.2));
    }

    #[test]
    fn zero_inputs_give_zero_breakdown() {
        let b = biogas_breakdown(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, &survey_factors());
        assert!(b.total().is_zero());
        assert_eq!(b.share(GasSource::Organic), None);
    }

    #[test]
    fn shares_add_up_to_one_hundred() {
        let b = GasBreakdown::new(dec!(50), dec!(30), dec!(20));
        assert_eq!(b.share(GasSource::Organic), Some(dec!(50)));
        assert_eq!(b.share(GasSource::PaperCardboard), Some(dec!(30)));
        assert_eq!(b.share(GasSource::Pruning), Some(dec!(20)));
    }

    #[test]
    fn non_positive_factor_rejected() {
        assert!(YieldFactors::new(dec!(0), dec!(0.215), dec!(0.358)).is_err());
        assert!(YieldFactors::new(dec!(0.46), dec!(-0.1), dec!(0.358)).is_err());
    }

    #[test]
    fn serialized_total_is_derived() {
        let b = GasBreakdown::new(dec!(1.5), dec!(2), dec!(0.5));
        let value = serde_json::to_value(b).unwrap();
        assert_eq!(value["total"], "4.0");
    }
}
