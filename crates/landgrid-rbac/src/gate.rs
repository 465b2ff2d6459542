//! The allow/deny gate.

use tracing::{info, warn};

use crate::principal::Principal;

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Permission check gate.
///
/// `check` allows when the principal's role holds any of the required tokens
/// or the literal `"all"` token. Access attempts are audit-logged unless
/// disabled.
#[derive(Debug, Clone)]
pub struct Gate {
    audit_enabled: bool,
}

impl Gate {
    pub const fn new() -> Self {
        Self {
            audit_enabled: true,
        }
    }

    /// Disables audit logging (for tests).
    #[must_use]
    pub const fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Checks the principal against a set of acceptable permission tokens.
    ///
    /// An empty `required` slice means the operation needs authentication
    /// only, so any principal is allowed.
    pub fn check(&self, principal: &Principal, required: &[&str]) -> Decision {
        let allowed = required.is_empty() || principal.permissions.grants_any(required);

        if self.audit_enabled {
            if allowed {
                info!(
                    user = %principal.user,
                    role = %principal.role_name,
                    required = ?required,
                    "access granted"
                );
            } else {
                warn!(
                    user = %principal.user,
                    role = %principal.role_name,
                    required = ?required,
                    "access denied"
                );
            }
        }

        if allowed { Decision::Allow } else { Decision::Deny }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}
