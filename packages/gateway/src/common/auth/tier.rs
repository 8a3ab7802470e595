use std::fmt;

use super::Identity;

/// Capability tier a resolver may require
///
/// Ordered `Anonymous < User < Admin < SuperAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleTier {
    /// Any valid session, including subject 0
    Anonymous,

    /// A registered shopper (subject id 1 or above)
    User,

    /// Store administrator
    Admin,

    /// Administrator who manages other administrators
    SuperAdmin,
}

impl RoleTier {
    /// Whether `identity` meets this tier.
    ///
    /// SuperAdmin implies Admin: a super admin token satisfies the Admin tier
    /// even when its admin flag is unset.
    pub fn is_satisfied_by(&self, identity: &Identity) -> bool {
        let registered = identity.subject_id >= 1;

        match self {
            RoleTier::Anonymous => true,
            RoleTier::User => registered,
            RoleTier::Admin => registered && (identity.is_admin || identity.is_super_admin),
            RoleTier::SuperAdmin => registered && identity.is_super_admin,
        }
    }

    /// Highest tier the identity reaches
    pub fn granted_to(identity: &Identity) -> RoleTier {
        [RoleTier::SuperAdmin, RoleTier::Admin, RoleTier::User]
            .into_iter()
            .find(|tier| tier.is_satisfied_by(identity))
            .unwrap_or(RoleTier::Anonymous)
    }
}

impl fmt::Display for RoleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoleTier::Anonymous => "Session",
            RoleTier::User => "User",
            RoleTier::Admin => "Admin",
            RoleTier::SuperAdmin => "Super admin",
        };
        f.write_str(label)
    }
}
