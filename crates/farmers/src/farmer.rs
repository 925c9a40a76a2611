use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use coldstore_core::{Aggregate, AggregateRoot, DomainError, FarmerId};
use coldstore_events::Event;

/// Aggregate root: Farmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Farmer {
    id: FarmerId,
    name: String,
    father_name: String,
    phone: String,
    village: String,
    /// Cumulative bag count. Starts at zero; nothing in the ledger feeds it.
    total_bags: u64,
    registration_date: Option<NaiveDate>,
    #[serde(skip)]
    version: u64,
    #[serde(skip)]
    created: bool,
}

impl Farmer {
    /// Create an empty, not-yet-registered aggregate instance for rehydration.
    pub fn empty(id: FarmerId) -> Self {
        Self {
            id,
            name: String::new(),
            father_name: String::new(),
            phone: String::new(),
            village: String::new(),
            total_bags: 0,
            registration_date: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> FarmerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn father_name(&self) -> &str {
        &self.father_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn village(&self) -> &str {
        &self.village
    }

    pub fn total_bags(&self) -> u64 {
        self.total_bags
    }

    pub fn registration_date(&self) -> Option<NaiveDate> {
        self.registration_date
    }

    pub fn is_registered(&self) -> bool {
        self.created
    }
}

impl AggregateRoot for Farmer {
    type Id = FarmerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterFarmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFarmer {
    pub farmer_id: FarmerId,
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub village: String,
    pub registration_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

impl RegisterFarmer {
    /// Build a registration with a fresh id, recorded now.
    pub fn new(
        name: impl Into<String>,
        father_name: impl Into<String>,
        phone: impl Into<String>,
        village: impl Into<String>,
        registration_date: NaiveDate,
    ) -> Self {
        Self {
            farmer_id: FarmerId::new(),
            name: name.into(),
            father_name: father_name.into(),
            phone: phone.into(),
            village: village.into(),
            registration_date,
            occurred_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FarmerCommand {
    RegisterFarmer(RegisterFarmer),
}

/// Event: FarmerRegistered.
///
/// Text fields are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerRegistered {
    pub farmer_id: FarmerId,
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub village: String,
    pub registration_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FarmerEvent {
    FarmerRegistered(FarmerRegistered),
}

impl Event for FarmerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FarmerEvent::FarmerRegistered(_) => "farmers.farmer.registered",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            FarmerEvent::FarmerRegistered(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Farmer {
    type Command = FarmerCommand;
    type Event = FarmerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            FarmerEvent::FarmerRegistered(e) => {
                self.id = e.farmer_id;
                self.name = e.name.clone();
                self.father_name = e.father_name.clone();
                self.phone = e.phone.clone();
                self.village = e.village.clone();
                self.total_bags = 0;
                self.registration_date = Some(e.registration_date);
                self.created = true;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            FarmerCommand::RegisterFarmer(cmd) => self.handle_register(cmd),
        }
    }
}

fn required(value: &str, field: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

impl Farmer {
    fn handle_register(&self, cmd: &RegisterFarmer) -> Result<Vec<FarmerEvent>, DomainError> {
        if self.created {
            return Err(DomainError::validation("farmer already registered"));
        }
        if self.id != cmd.farmer_id {
            return Err(DomainError::invariant("farmer_id mismatch"));
        }

        Ok(vec![FarmerEvent::FarmerRegistered(FarmerRegistered {
            farmer_id: cmd.farmer_id,
            name: required(&cmd.name, "name")?,
            father_name: required(&cmd.father_name, "father name")?,
            phone: required(&cmd.phone, "phone")?,
            village: required(&cmd.village, "village")?,
            registration_date: cmd.registration_date,
            occurred_at: cmd.occurred_at,
        })])
    }
}
