use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::biogas::{BiogasBreakdown, GasBreakdown};
use crate::error::BiogasError;

/// Biomethane volume per source after purification.
pub type BiomethaneBreakdown = GasBreakdown;

/// Fraction of biogas volume recovered as biomethane, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PurificationEfficiency(Decimal);

impl PurificationEfficiency {
    pub const FULL: PurificationEfficiency = PurificationEfficiency(Decimal::ONE);

    /// Build from a percentage in [0, 100], as entered by the user.
    pub fn from_percent(percent: Decimal) -> Result<Self, BiogasError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(BiogasError::EfficiencyOutOfRange(percent));
        }
        Ok(PurificationEfficiency(percent / Decimal::ONE_HUNDRED))
    }

    pub fn from_fraction(fraction: Decimal) -> Result<Self, BiogasError> {
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(BiogasError::EfficiencyOutOfRange(
                fraction * Decimal::ONE_HUNDRED,
            ));
        }
        Ok(PurificationEfficiency(fraction))
    }

    pub fn fraction(&self) -> Decimal {
        self.0
    }

    pub fn percent(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for PurificationEfficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent().normalize())
    }
}

/// Scale every biogas source by the purification efficiency.
pub fn purify(breakdown: &BiogasBreakdown, efficiency: PurificationEfficiency) -> BiomethaneBreakdown {
    let factor = efficiency.fraction();
    breakdown.map(|volume| volume * factor)
}
