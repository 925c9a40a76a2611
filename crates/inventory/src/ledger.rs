use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use coldstore_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, EntryId, FarmerId, LedgerId,
    WithdrawalId,
};
use coldstore_events::Event;
use coldstore_farmers::{FarmerLookup, FarmerSnapshot};

use crate::category::PerCategory;
use crate::entry::{CategoryInput, StockEntry};
use crate::lot::{LotNumber, LotSequence};
use crate::withdrawal::WithdrawalEntry;

/// Intake form submission, before the farmer is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockIntake {
    pub farmer_id: FarmerId,
    pub date: NaiveDate,
    #[serde(default)]
    pub remark: String,
    pub categories: PerCategory<CategoryInput>,
}

/// Withdrawal form submission, before the farmer is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub farmer_id: FarmerId,
    pub date: NaiveDate,
    pub lot_number: String,
    pub bag_counts: PerCategory<u32>,
}

/// Totals shown on the stock dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_bags: u64,
    pub total_weight: f64,
    pub today_bags: u64,
}

/// Command: RecordStockEntry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStockEntry {
    pub ledger_id: LedgerId,
    pub entry_id: EntryId,
    pub farmer: FarmerSnapshot,
    pub date: NaiveDate,
    pub remark: String,
    pub categories: PerCategory<CategoryInput>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordWithdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWithdrawal {
    pub ledger_id: LedgerId,
    pub withdrawal_id: WithdrawalId,
    pub farmer: FarmerSnapshot,
    pub date: NaiveDate,
    pub lot_number: String,
    pub bag_counts: PerCategory<u32>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryCommand {
    RecordStockEntry(RecordStockEntry),
    RecordWithdrawal(RecordWithdrawal),
}

/// Event: StockEntryRecorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntryRecorded {
    pub ledger_id: LedgerId,
    pub entry: StockEntry,
    pub occurred_at: DateTime<Utc>,
}

/// Event: WithdrawalRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRecorded {
    pub ledger_id: LedgerId,
    pub withdrawal: WithdrawalEntry,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    StockEntryRecorded(StockEntryRecorded),
    WithdrawalRecorded(WithdrawalRecorded),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::StockEntryRecorded(_) => "inventory.stock_entry.recorded",
            InventoryEvent::WithdrawalRecorded(_) => "inventory.withdrawal.recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::StockEntryRecorded(e) => e.occurred_at,
            InventoryEvent::WithdrawalRecorded(e) => e.occurred_at,
        }
    }
}

/// Aggregate root: StockLedger (one season of intake and withdrawals).
///
/// Stock entries are kept in insertion order. Withdrawals are kept most
/// recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLedger {
    id: LedgerId,
    lots: LotSequence,
    entries: Vec<StockEntry>,
    withdrawals: Vec<WithdrawalEntry>,
    version: u64,
}

impl StockLedger {
    pub fn new(id: LedgerId) -> Self {
        Self::with_lot_sequence(id, LotSequence::default())
    }

    pub fn with_lot_sequence(id: LedgerId, lots: LotSequence) -> Self {
        Self {
            id,
            lots,
            entries: Vec::new(),
            withdrawals: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> LedgerId {
        self.id
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn withdrawals(&self) -> &[WithdrawalEntry] {
        &self.withdrawals
    }

    /// Sequence number the next recorded stock entry will carry.
    pub fn next_lot_sequence(&self) -> u64 {
        self.lots.peek()
    }

    /// Lot number the next stock entry would receive, without allocating it.
    pub fn tentative_lot_number(&self, total_bags: u64, remark: &str) -> String {
        LotNumber::preview(self.lots.peek(), total_bags, remark)
    }

    /// Record an intake: resolve the farmer, compute weights, assign a lot.
    pub fn record_stock_entry(
        &mut self,
        farmers: &impl FarmerLookup,
        intake: StockIntake,
    ) -> DomainResult<StockEntry> {
        let farmer = resolve_farmer(farmers, intake.farmer_id)
            .inspect_err(|err| tracing::warn!(error = %err, "stock entry rejected"))?;

        let cmd = RecordStockEntry {
            ledger_id: self.id,
            entry_id: EntryId::new(),
            farmer,
            date: intake.date,
            remark: intake.remark,
            categories: intake.categories,
            occurred_at: Utc::now(),
        };
        let events = self.handle(&InventoryCommand::RecordStockEntry(cmd))?;
        self.apply_all(&events);

        let entry = self
            .entries
            .last()
            .cloned()
            .ok_or_else(|| DomainError::invariant("stock entry missing after apply"))?;
        tracing::info!(
            lot = %entry.lot_number,
            farmer_id = %entry.farmer.id,
            total_bags = entry.total_bags,
            total_weight = entry.total_weight,
            "stock entry recorded"
        );
        Ok(entry)
    }

    /// Record a withdrawal; the newest withdrawal is listed first.
    pub fn record_withdrawal(
        &mut self,
        farmers: &impl FarmerLookup,
        request: WithdrawalRequest,
    ) -> DomainResult<WithdrawalEntry> {
        // An unknown farmer and an empty quantity share one form message.
        let farmer = resolve_farmer(farmers, request.farmer_id)
            .ok()
            .filter(|_| request.bag_counts.total() > 0)
            .ok_or_else(|| DomainError::validation("select a farmer and enter a quantity"))
            .inspect_err(|err| tracing::warn!(error = %err, "withdrawal rejected"))?;

        let cmd = RecordWithdrawal {
            ledger_id: self.id,
            withdrawal_id: WithdrawalId::new(),
            farmer,
            date: request.date,
            lot_number: request.lot_number,
            bag_counts: request.bag_counts,
            occurred_at: Utc::now(),
        };
        let events = self
            .handle(&InventoryCommand::RecordWithdrawal(cmd))
            .inspect_err(|err| tracing::warn!(error = %err, "withdrawal rejected"))?;
        self.apply_all(&events);

        let withdrawal = self
            .withdrawals
            .first()
            .cloned()
            .ok_or_else(|| DomainError::invariant("withdrawal missing after apply"))?;
        tracing::info!(
            lot = %withdrawal.lot_number,
            farmer_id = %withdrawal.farmer.id,
            total_bags = withdrawal.total_bags,
            "withdrawal recorded"
        );
        Ok(withdrawal)
    }

    /// Dashboard totals. `today` is compared by calendar date only.
    pub fn summary_stats(&self, today: NaiveDate) -> SummaryStats {
        self.entries
            .iter()
            .fold(SummaryStats::default(), |mut stats, entry| {
                stats.total_bags += entry.total_bags;
                stats.total_weight += entry.total_weight;
                if entry.date == today {
                    stats.today_bags += entry.total_bags;
                }
                stats
            })
    }

    /// Stock entry whose lot number matches exactly (input is trimmed).
    pub fn entry_by_lot(&self, lot: &str) -> Option<&StockEntry> {
        let lot = lot.trim();
        let found = self
            .entries
            .iter()
            .find(|e| e.lot_number.to_string() == lot);
        tracing::debug!(lot, found = found.is_some(), "lot lookup");
        found
    }

    /// Withdrawals whose typed lot number, trimmed, matches.
    pub fn withdrawals_for_lot(&self, lot: &str) -> Vec<&WithdrawalEntry> {
        let lot = lot.trim();
        self.withdrawals
            .iter()
            .filter(|w| w.lot_number.trim() == lot)
            .collect()
    }

    fn apply_all(&mut self, events: &[InventoryEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    fn ensure_ledger_id(&self, ledger_id: LedgerId) -> Result<(), DomainError> {
        if self.id != ledger_id {
            return Err(DomainError::invariant("ledger_id mismatch"));
        }
        Ok(())
    }

    fn handle_stock_entry(&self, cmd: &RecordStockEntry) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_ledger_id(cmd.ledger_id)?;
        // The sequence must have a successor before a lot is handed out.
        let mut lots = self.lots;
        lots.advance()?;

        let entry = StockEntry::compute(
            cmd.entry_id,
            cmd.farmer.clone(),
            cmd.date,
            self.lots.peek(),
            &cmd.remark,
            &cmd.categories,
        );

        Ok(vec![InventoryEvent::StockEntryRecorded(StockEntryRecorded {
            ledger_id: cmd.ledger_id,
            entry,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_withdrawal(&self, cmd: &RecordWithdrawal) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_ledger_id(cmd.ledger_id)?;

        let total_bags = cmd.bag_counts.total();
        if total_bags == 0 {
            return Err(DomainError::validation("select a farmer and enter a quantity"));
        }
        if cmd.lot_number.trim().is_empty() {
            return Err(DomainError::validation("lot number cannot be empty"));
        }

        Ok(vec![InventoryEvent::WithdrawalRecorded(WithdrawalRecorded {
            ledger_id: cmd.ledger_id,
            withdrawal: WithdrawalEntry {
                id: cmd.withdrawal_id,
                farmer: cmd.farmer.clone(),
                lot_number: cmd.lot_number.clone(),
                bag_counts: cmd.bag_counts,
                total_bags,
                date: cmd.date,
            },
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn resolve_farmer(farmers: &impl FarmerLookup, id: FarmerId) -> DomainResult<FarmerSnapshot> {
    farmers
        .snapshot(id)
        .ok_or_else(|| DomainError::validation("select a farmer"))
}

impl AggregateRoot for StockLedger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for StockLedger {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::StockEntryRecorded(e) => {
                let allocated = self.lots.advance();
                debug_assert_eq!(allocated, Ok(e.entry.lot_number.sequence()));
                self.entries.push(e.entry.clone());
            }
            InventoryEvent::WithdrawalRecorded(e) => {
                self.withdrawals.insert(0, e.withdrawal.clone());
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::RecordStockEntry(cmd) => self.handle_stock_entry(cmd),
            InventoryCommand::RecordWithdrawal(cmd) => self.handle_withdrawal(cmd),
        }
    }
}
