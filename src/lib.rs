//! FixIt: maintenance data toolkit
//!
//! A command-line companion to the FixIt CMMS for bulk-loading spare parts,
//! equipment, locations and users from CSV files into a local store.

pub mod cli;
pub mod core;
pub mod import;
pub mod store;
