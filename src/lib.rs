//! Care Payroll Engine
//!
//! This crate turns caregivers' recorded work intervals into approved,
//! rate-adjusted payroll entries and printable receipts. It sorts hours into
//! regular, overtime, holiday and shadow-day categories, drives work logs and
//! payments through their review states against a storage port, and renders
//! single and consolidated receipts.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod ports;
pub mod receipt;
