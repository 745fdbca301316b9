//! Core business logic for Vantra.
//!
//! This crate contains the domain logic of the multi-entity financial
//! resolution engine, independent of any storage backend or transport.
//!
//! # Modules
//!
//! - `currency` - Exchange rate records, resolution ordering, fallback table,
//!   and the online provider client
//! - `entity` - Company entities (group parents and sister companies)
//! - `accounts` - Chart of accounts records and seed templates
//! - `consolidation` - Ownership-weighted cross-entity aggregation

pub mod accounts;
pub mod consolidation;
pub mod currency;
pub mod entity;
