use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;

use crate::aggregate::MunicipalAggregate;
use crate::model::WasteCategory;

pub const OTHER_LABEL: &str = "Other";

/// Label of a bucketed entry. `Other` is its own variant so a municipality
/// that happens to be called "Other" is never merged into the remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketLabel {
    Municipality(String),
    Other,
}

impl fmt::Display for BucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketLabel::Municipality(name) => write!(f, "{name}"),
            BucketLabel::Other => write!(f, "{OTHER_LABEL}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketEntry {
    pub label: BucketLabel,
    pub quantity: Decimal,
}

/// The largest municipalities of an aggregate followed by a single `Other`
/// entry holding the remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketedAggregate {
    category: WasteCategory,
    top_n: NonZeroUsize,
    entries: Vec<BucketEntry>,
}

impl BucketedAggregate {
    pub fn category(&self) -> WasteCategory {
        self.category
    }

    /// The `n` that was requested, which may exceed the municipalities shown.
    pub fn top_n(&self) -> NonZeroUsize {
        self.top_n
    }

    pub fn entries(&self) -> &[BucketEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The trailing remainder entry.
    pub fn other(&self) -> Decimal {
        self.entries
            .last()
            .map(|e| e.quantity)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Percentage of the total per entry, in entry order. `None` when the
    /// total is zero.
    pub fn shares(&self) -> Option<Vec<Decimal>> {
        let total = self.total();
        if total.is_zero() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|e| e.quantity / total * Decimal::ONE_HUNDRED)
                .collect(),
        )
    }
}

/// Keep the `n` largest municipalities and fold the rest into `Other`.
///
/// Sorting is stable, so equal quantities keep aggregate order. `Other` is
/// always appended, with zero when nothing is left over, so the result has
/// `min(n, len) + 1` entries and its total equals the aggregate total.
pub fn bucket_top_n(aggregate: &MunicipalAggregate, n: NonZeroUsize) -> BucketedAggregate {
    let mut ranked: Vec<(&str, Decimal)> = aggregate.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let split = n.get().min(ranked.len());
    let (top, rest) = ranked.split_at(split);

    let other = rest
        .iter()
        .fold(Decimal::ZERO, |acc, (_, quantity)| acc + *quantity);

    let mut entries: Vec<BucketEntry> = top
        .iter()
        .map(|(name, quantity)| BucketEntry {
            label: BucketLabel::Municipality((*name).to_string()),
            quantity: *quantity,
        })
        .collect();
    entries.push(BucketEntry {
        label: BucketLabel::Other,
        quantity: other,
    });

    BucketedAggregate {
        category: aggregate.category(),
        top_n: n,
        entries,
    }
}
