//! # landgrid-rbac: Access control gate
//!
//! Maps an authenticated principal plus a required permission to an
//! allow/deny decision. The gate is a pure predicate over the principal's
//! permission tokens: it holds no session state, and a deny is turned into
//! an authorization failure by the boundary layer.
//!
//! The literal token `"all"` is an unconditional grant.

pub mod gate;
pub mod principal;

pub use gate::{Decision, Gate};
pub use principal::{PermissionSet, Principal};
