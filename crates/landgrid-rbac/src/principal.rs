//! Principals and permission token sets.

use std::collections::BTreeSet;

use landgrid_types::{ObjectId, Role};
use serde::{Deserialize, Serialize};

/// The wildcard token granting everything.
pub const ALL_TOKEN: &str = "all";

/// Set of permission tokens held by a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    tokens: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new(tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the set holds the literal `"all"` wildcard.
    pub fn grants_all(&self) -> bool {
        self.tokens.contains(ALL_TOKEN)
    }

    /// Whether the set holds any of the required tokens, or the wildcard.
    pub fn grants_any(&self, required: &[&str]) -> bool {
        self.grants_all() || required.iter().any(|token| self.tokens.contains(*token))
    }

    pub fn grant(&mut self, token: impl Into<String>) {
        self.tokens.insert(token.into());
    }

    pub fn revoke(&mut self, token: &str) {
        self.tokens.remove(token);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// An authenticated caller, resolved from an inbound credential by the
/// out-of-scope auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The authenticated user.
    pub user: ObjectId,
    /// Name of the user's role, for audit logging.
    pub role_name: String,
    /// Tokens from the user's role.
    pub permissions: PermissionSet,
}

impl Principal {
    /// Builds a principal from a user id and its resolved role record.
    pub fn from_role(user: ObjectId, role: &Role) -> Self {
        Self {
            user,
            role_name: role.name.clone(),
            permissions: PermissionSet::new(role.permissions.iter().cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grants_any_with_direct_token() {
        let set = PermissionSet::new(["plots.create", "plots.read"]);
        assert!(set.grants_any(&["plots.create"]));
        assert!(set.grants_any(&["plots.delete", "plots.read"]));
        assert!(!set.grants_any(&["plots.delete"]));
    }

    #[test]
    fn test_all_token_grants_everything() {
        let set = PermissionSet::new(["all"]);
        assert!(set.grants_all());
        assert!(set.grants_any(&["anything.at.all"]));
        assert!(set.grants_any(&[]) || !set.is_empty());
    }

    #[test]
    fn test_empty_set_denies() {
        let set = PermissionSet::empty();
        assert!(!set.grants_any(&["plots.read"]));
    }

    #[test]
    fn test_grant_and_revoke() {
        let mut set = PermissionSet::empty();
        set.grant("roles.manage");
        assert!(set.grants_any(&["roles.manage"]));
        set.revoke("roles.manage");
        assert!(!set.grants_any(&["roles.manage"]));
    }
}
