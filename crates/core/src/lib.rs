//! Core business logic for the finance office backend.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Budget entry totals and expense posting
//! - `dashboard` - Fiscal year summaries
//! - `reports` - Budget statement layout
//! - `workflow` - Bill, schedule and cheque sign-off chains
//! - `fiscal` - Fiscal years and the current-year switch
//! - `catalog` - Object codes, levels and bulk import parsing

pub mod budget;
pub mod catalog;
pub mod dashboard;
pub mod fiscal;
pub mod reports;
pub mod workflow;
