//! plugman library
//!
//! Core functionality for the plugman plugin manager: a deduplicated
//! catalog of installable plugin packages, dependency-closure queries over
//! their declared requirements, and reconciliation of the active directory
//! against the user's explicit-enable intent.

pub mod archive;
pub mod catalog;
pub mod cli_output;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod paths;
pub mod reconcile;
pub mod report;
pub mod state;
pub mod store;

pub use error::{PlugmanError, PlugmanResult};
