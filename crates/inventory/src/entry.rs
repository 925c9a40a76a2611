use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use coldstore_core::{Entity, EntryId};
use coldstore_farmers::FarmerSnapshot;

use crate::category::PerCategory;
use crate::lot::LotNumber;
use crate::weights::SampleWeights;

/// Form input for one category of an intake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub bag_count: u32,
    pub sample_weights: SampleWeights,
}

impl CategoryInput {
    pub fn new(bag_count: u32, sample_weights: SampleWeights) -> Self {
        Self {
            bag_count,
            sample_weights,
        }
    }
}

/// Recorded figures for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub bag_count: u32,
    pub sample_weights: SampleWeights,
    pub average_weight: f64,
    pub total_weight: f64,
}

impl From<&CategoryInput> for CategoryRecord {
    fn from(input: &CategoryInput) -> Self {
        let average_weight = input.sample_weights.average();
        Self {
            bag_count: input.bag_count,
            sample_weights: input.sample_weights,
            average_weight,
            total_weight: average_weight * f64::from(input.bag_count),
        }
    }
}

/// An inbound stock entry. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: EntryId,
    pub farmer: FarmerSnapshot,
    pub date: NaiveDate,
    pub lot_number: LotNumber,
    pub remark: Option<String>,
    pub categories: PerCategory<CategoryRecord>,
    pub total_bags: u64,
    pub total_weight: f64,
}

impl StockEntry {
    /// Derive per-category and aggregate figures from form input.
    ///
    /// `remark` is stored trimmed and dropped when blank.
    pub fn compute(
        id: EntryId,
        farmer: FarmerSnapshot,
        date: NaiveDate,
        sequence: u64,
        remark: &str,
        inputs: &PerCategory<CategoryInput>,
    ) -> Self {
        let categories = inputs.map(|_, input| CategoryRecord::from(input));
        let total_bags: u64 = categories
            .iter()
            .map(|(_, r)| u64::from(r.bag_count))
            .sum();
        let total_weight: f64 = categories.iter().map(|(_, r)| r.total_weight).sum();
        let remark = Some(remark.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Self {
            id,
            farmer,
            date,
            lot_number: LotNumber::new(sequence, total_bags, remark.as_deref().unwrap_or("")),
            remark,
            categories,
            total_bags,
            total_weight,
        }
    }
}

impl Entity for StockEntry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
