use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{WasteCategory, WasteRecord};

/// Summed quantity of one waste category per municipality.
///
/// Entries iterate in municipality-name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MunicipalAggregate {
    category: WasteCategory,
    totals: BTreeMap<String, Decimal>,
}

impl MunicipalAggregate {
    pub fn category(&self) -> WasteCategory {
        self.category
    }

    pub fn get(&self, municipality: &str) -> Option<Decimal> {
        self.totals.get(municipality).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.totals.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.totals.values().sum()
    }
}

/// Group records by municipality (exact, case-sensitive match) and sum the
/// chosen category.
///
/// Unknown quantities add nothing to the sum, but the municipality still
/// appears, with 0 if none of its values are known.
pub fn aggregate_by_municipality(
    records: &[WasteRecord],
    category: WasteCategory,
) -> MunicipalAggregate {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        *totals.entry(record.municipality.clone()).or_default() +=
            record.quantity(category).or_zero();
    }
    MunicipalAggregate { category, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quantity;
    use rust_decimal_macros::dec;

    fn record(municipality: &str, domestic_public: Quantity, pruning: Quantity) -> WasteRecord {
        WasteRecord {
            municipality: municipality.into(),
            total: Quantity::Unknown,
            domestic_public,
            pruning,
        }
    }

    #[test]
    fn sums_per_municipality() {
        let records = vec![
            record("Olinda", Quantity::Known(dec!(10)), Quantity::Known(dec!(1))),
            record("Recife", Quantity::Known(dec!(40)), Quantity::Known(dec!(3))),
            record("Olinda", Quantity::Known(dec!(5.5)), Quantity::Known(dec!(2))),
        ];
        let agg = aggregate_by_municipality(&records, WasteCategory::DomesticPublic);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.get("Olinda"), Some(dec!(15.5)));
        assert_eq!(agg.get("Recife"), Some(dec!(40)));
        assert_eq!(agg.total(), dec!(55.5));

        let pruning = aggregate_by_municipality(&records, WasteCategory::Pruning);
        assert_eq!(pruning.get("Olinda"), Some(dec!(3)));
        assert_eq!(pruning.category(), WasteCategory::Pruning);
    }

    #[test]
    fn all_unknown_municipality_appears_with_zero() {
        let records = vec![
            record("Paulista", Quantity::Unknown, Quantity::Unknown),
            record("Paulista", Quantity::Unknown, Quantity::Known(dec!(7))),
            record("Recife", Quantity::Known(dec!(3)), Quantity::Unknown),
        ];
        let agg = aggregate_by_municipality(&records, WasteCategory::DomesticPublic);
        assert_eq!(agg.get("Paulista"), Some(Decimal::ZERO));
        assert_eq!(agg.get("Recife"), Some(dec!(3)));
    }

    #[test]
    fn grouping_is_case_sensitive() {
        let records = vec![
            record("Recife", Quantity::Known(dec!(1)), Quantity::Unknown),
            record("recife", Quantity::Known(dec!(2)), Quantity::Unknown),
            record("Recife ", Quantity::Known(dec!(4)), Quantity::Unknown),
        ];
        let agg = aggregate_by_municipality(&records, WasteCategory::DomesticPublic);
        assert_eq!(agg.len(), 3);
    }

    #[test]
    fn empty_input_gives_empty_aggregate() {
        let agg = aggregate_by_municipality(&[], WasteCategory::Pruning);
        assert!(agg.is_empty());
        assert!(agg.total().is_zero());
    }
}
