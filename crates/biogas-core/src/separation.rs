use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::BiogasError;
use crate::model::MaterialFraction;

/// Allowed overshoot of the proportion sum above 1.0.
pub const PROPORTION_SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Fixed fractions used to split the domestic+public stream into materials.
///
/// The six values follow [`MaterialFraction::ALL`]. Each lies in [0, 1] and
/// their sum may fall short of 1.0; the gap is the share of the stream the
/// survey leaves unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparationProportions([Decimal; 6]);

impl SeparationProportions {
    pub fn new(values: &[Decimal]) -> Result<Self, BiogasError> {
        let array: [Decimal; 6] = values.try_into().map_err(|_| {
            BiogasError::ConfigInvalid(format!(
                "separation_proportions must have exactly 6 values, got {}",
                values.len()
            ))
        })?;

        for (fraction, value) in MaterialFraction::ALL.iter().zip(array.iter()) {
            if *value < Decimal::ZERO || *value > Decimal::ONE {
                return Err(BiogasError::ConfigInvalid(format!(
                    "separation proportion for {fraction} is {value}, expected a value between 0 and 1"
                )));
            }
        }

        let sum: Decimal = array.iter().sum();
        if sum > Decimal::ONE + PROPORTION_SUM_TOLERANCE {
            return Err(BiogasError::ConfigInvalid(format!(
                "separation proportions sum to {sum}, which exceeds 1"
            )));
        }

        Ok(SeparationProportions(array))
    }

    pub fn get(&self, fraction: MaterialFraction) -> Decimal {
        self.0[fraction.index()]
    }

    pub fn as_array(&self) -> &[Decimal; 6] {
        &self.0
    }

    pub fn sum(&self) -> Decimal {
        self.0.iter().sum()
    }

    /// Share of the stream not covered by any fraction, never negative.
    pub fn unclassified(&self) -> Decimal {
        (Decimal::ONE - self.sum()).max(Decimal::ZERO)
    }
}

/// Quantities per material fraction after manual separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separation {
    quantities: [Decimal; 6],
}

impl Separation {
    pub fn quantity(&self, fraction: MaterialFraction) -> Decimal {
        self.quantities[fraction.index()]
    }

    pub fn quantities(&self) -> &[Decimal; 6] {
        &self.quantities
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialFraction, Decimal)> + '_ {
        MaterialFraction::ALL
            .iter()
            .copied()
            .zip(self.quantities.iter().copied())
    }

    pub fn total(&self) -> Decimal {
        self.quantities.iter().sum()
    }
}

impl Serialize for Separation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.quantities.len()))?;
        for (fraction, quantity) in self.iter() {
            map.serialize_entry(&fraction, &quantity)?;
        }
        map.end()
    }
}

/// Split `total` into material fractions. No rounding is applied.
pub fn separate(total: Decimal, proportions: &SeparationProportions) -> Separation {
    let mut quantities = [Decimal::ZERO; 6];
    for (slot, proportion) in quantities.iter_mut().zip(proportions.as_array()) {
        *slot = total * *proportion;
    }
    Separation { quantities }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn survey_defaults() -> SeparationProportions {
        SeparationProportions::new(&[
            dec!(0.5557),
            dec!(0.1355),
            dec!(0.0829),
            dec!(0.02),
            dec!(0.0209),
            dec!(0.0067),
        ])
        .unwrap()
    }

    #[test]
    fn separates_one_thousand_tonnes() {
        let sep = separate(dec!(1000), &survey_defaults());
        assert_eq!(
            sep.quantities(),
            &[
                dec!(555.7),
                dec!(135.5),
                dec!(82.9),
                dec!(20.0),
                dec!(20.9),
                dec!(6.7)
            ]
        );
        assert_eq!(sep.quantity(MaterialFraction::PaperCardboard), dec!(82.9));
    }

    #[test]
    fn zero_total_gives_all_zero() {
        let sep = separate(Decimal::ZERO, &survey_defaults());
        assert!(sep.quantities().iter().all(|q| q.is_zero()));
    }

    #[test]
    fn output_sums_to_total_times_proportion_sum() {
        let props = survey_defaults();
        let sep = separate(dec!(2345.67), &props);
        assert_eq!(sep.total(), dec!(2345.67) * props.sum());
        assert_eq!(props.unclassified(), dec!(0.1783));
    }

    #[test]
    fn complete_proportions_preserve_total() {
        let props = SeparationProportions::new(&[
            dec!(0.5),
            dec!(0.2),
            dec!(0.1),
            dec!(0.1),
            dec!(0.05),
            dec!(0.05),
        ])
        .unwrap();
        assert_eq!(separate(dec!(812.4), &props).total(), dec!(812.4));
        assert_eq!(props.unclassified(), Decimal::ZERO);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let props = survey_defaults();
        assert_eq!(separate(dec!(77.7), &props), separate(dec!(77.7), &props));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(SeparationProportions::new(&[dec!(0.5), dec!(0.5)]).is_err());
    }

    #[test]
    fn out_of_range_rejected() {
        let values = [dec!(1.2), dec!(0), dec!(0), dec!(0), dec!(0), dec!(0)];
        assert!(SeparationProportions::new(&values).is_err());
        let values = [dec!(-0.1), dec!(0.2), dec!(0), dec!(0), dec!(0), dec!(0)];
        assert!(SeparationProportions::new(&values).is_err());
    }

    #[test]
    fn sum_above_one_rejected() {
        let values = [dec!(0.6), dec!(0.3), dec!(0.2), dec!(0), dec!(0), dec!(0)];
        assert!(SeparationProportions::new(&values).is_err());
    }

    #[test]
    fn serializes_in_fraction_order() {
        let sep = separate(dec!(100), &survey_defaults());
        let json = serde_json::to_string(&sep).unwrap();
        assert!(json.starts_with(r#"{"organic":"55.5700","plastic":"#));
        assert!(json.contains(r#""paper_cardboard":"8.2900""#));
    }
}
