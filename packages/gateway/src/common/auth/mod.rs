/// Authorization primitives for the gateway
///
/// A validated session token becomes an [`Identity`]; resolvers declare the
/// [`RoleTier`] they need and the access gate compares the two:
///
/// ```rust,ignore
/// use crate::common::auth::{Identity, RoleTier};
///
/// let identity = Identity { subject_id: 42, is_admin: true, is_super_admin: false };
/// assert!(RoleTier::Admin.is_satisfied_by(&identity));
/// assert!(!RoleTier::SuperAdmin.is_satisfied_by(&identity));
/// ```

mod errors;
mod identity;
mod tier;

pub use errors::{AuthError, TokenError};
pub use identity::Identity;
pub use tier::RoleTier;
