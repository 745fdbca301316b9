//! Document-store layer for Vantra.
//!
//! This crate provides:
//! - The `RecordStore` contract every storage backend implements
//! - Partition handles and the tenant resolver enforcing data isolation
//! - Typed repositories for rates, entities, accounts, and assignments
//! - An in-memory backend for development and tests

pub mod backend;
pub mod document;
pub mod error;
pub mod memory;
pub mod partition;
pub mod repositories;

pub use backend::RecordStore;
pub use document::{Collection, Filter};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use partition::{
    AssignmentError, PartitionAssignment, PartitionHandle, PartitionId, TenantResolver,
};
