//! # landgrid-store: Document store for Landgrid
//!
//! A typed, in-memory document store in the shape of the external store
//! interface the service layer consumes:
//!
//! - [`Collection`]: one entity type, keyed by `ObjectId`, with
//!   insert / get / update / remove / find / count
//! - [`Filter`]: equality, numeric comparison and case-insensitive
//!   substring conditions evaluated against the serialized (camelCase wire)
//!   form of each document, so filter paths match what API callers see
//! - [`Database`]: the full set of collections for the system
//!
//! The store is deliberately not transactional: no operation spans more than
//! one document, and nothing here coordinates the plot-write /
//! counter-recompute pair. That coupling is owned by the service layer and
//! is best-effort by design.

mod collection;
mod db;
mod error;
mod filter;

pub use collection::{Collection, Document};
pub use db::Database;
pub use error::StoreError;
pub use filter::{Condition, Filter, Op};
