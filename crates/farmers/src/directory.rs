//! In-memory farmer directory and the read-only lookup the ledger depends on.

use serde::{Deserialize, Serialize};

use coldstore_core::{Aggregate, DomainError, DomainResult, FarmerId};

use crate::farmer::{Farmer, FarmerCommand, RegisterFarmer};

/// Copy of the farmer fields stamped onto stock and withdrawal entries.
///
/// Entries hold a snapshot, not a reference: a later change to the farmer
/// record never rewrites history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FarmerSnapshot {
    pub id: FarmerId,
    pub name: String,
    pub father_name: String,
    pub village: String,
}

impl From<&Farmer> for FarmerSnapshot {
    fn from(farmer: &Farmer) -> Self {
        Self {
            id: farmer.id_typed(),
            name: farmer.name().to_string(),
            father_name: farmer.father_name().to_string(),
            village: farmer.village().to_string(),
        }
    }
}

/// Read-only farmer resolution.
pub trait FarmerLookup {
    fn snapshot(&self, id: FarmerId) -> Option<FarmerSnapshot>;
}

/// Registered farmers in registration order.
#[derive(Debug, Clone, Default)]
pub struct FarmerDirectory {
    farmers: Vec<Farmer>,
}

impl FarmerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a farmer, returning the stored record.
    pub fn register(&mut self, cmd: RegisterFarmer) -> DomainResult<Farmer> {
        if self.get(cmd.farmer_id).is_some() {
            return Err(DomainError::validation("farmer already registered"));
        }

        let mut farmer = Farmer::empty(cmd.farmer_id);
        let events = farmer
            .handle(&FarmerCommand::RegisterFarmer(cmd))
            .inspect_err(|err| tracing::warn!(error = %err, "farmer registration rejected"))?;
        for event in &events {
            farmer.apply(event);
        }

        tracing::info!(
            farmer_id = %farmer.id_typed(),
            village = farmer.village(),
            "farmer registered"
        );
        self.farmers.push(farmer.clone());
        Ok(farmer)
    }

    pub fn get(&self, id: FarmerId) -> Option<&Farmer> {
        self.farmers.iter().find(|f| f.id_typed() == id)
    }

    pub fn list(&self) -> &[Farmer] {
        &self.farmers
    }

    pub fn len(&self) -> usize {
        self.farmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.farmers.is_empty()
    }
}

impl FarmerLookup for FarmerDirectory {
    fn snapshot(&self, id: FarmerId) -> Option<FarmerSnapshot> {
        self.get(id).map(FarmerSnapshot::from)
    }
}
