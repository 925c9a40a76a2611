//! Backend for the warehouse forms: configuration, session state, and a
//! line-oriented JSON command shell.

pub mod config;
pub mod error;
pub mod session;
pub mod shell;

pub use config::AppConfig;
pub use error::AppError;
pub use session::{CategoryForm, StockEntryForm, WarehouseSession, WithdrawalForm};
