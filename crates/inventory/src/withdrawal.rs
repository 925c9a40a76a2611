use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use coldstore_core::{Entity, WithdrawalId};
use coldstore_farmers::FarmerSnapshot;

use crate::category::PerCategory;

/// Bags taken out of the store against a lot.
///
/// `lot_number` is whatever the operator typed. It is not checked against
/// recorded stock entries and no remaining balance is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalEntry {
    pub id: WithdrawalId,
    pub farmer: FarmerSnapshot,
    pub lot_number: String,
    pub bag_counts: PerCategory<u32>,
    pub total_bags: u64,
    pub date: NaiveDate,
}

impl Entity for WithdrawalEntry {
    type Id = WithdrawalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
