//! Farmer registration and directory (event-sourced).
//!
//! Farmers are the suppliers whose potatoes enter the cold store. The ledger
//! never owns farmer records; it asks a [`FarmerLookup`] for a snapshot.

pub mod directory;
pub mod farmer;

pub use directory::{FarmerDirectory, FarmerLookup, FarmerSnapshot};
pub use farmer::{Farmer, FarmerCommand, FarmerEvent, FarmerRegistered, RegisterFarmer};
