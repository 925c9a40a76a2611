//! Stock entry ledger for a potato cold store.
//!
//! Intake is graded into three categories, weighed by sample, and labelled
//! with a sequential lot number. Withdrawals are recorded against free-text
//! lot numbers. Pure domain logic: no IO, no storage.

pub mod category;
pub mod entry;
pub mod ledger;
pub mod lot;
pub mod weights;
pub mod withdrawal;

pub use category::{Category, PerCategory};
pub use entry::{CategoryInput, CategoryRecord, StockEntry};
pub use ledger::{
    InventoryCommand, InventoryEvent, RecordStockEntry, RecordWithdrawal, StockEntryRecorded,
    StockIntake, StockLedger, SummaryStats, WithdrawalRecorded, WithdrawalRequest,
};
pub use lot::{LotNumber, LotSequence};
pub use weights::{SAMPLE_SLOTS, SampleWeights, average_positive};
pub use withdrawal::WithdrawalEntry;
