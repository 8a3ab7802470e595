use std::future::Future;

use juniper::FieldResult;
use tracing::debug;

use crate::common::auth::{AuthError, Identity, RoleTier};
use crate::common::to_field_error;
use crate::domains::auth::TokenService;
use crate::server::graphql::{GraphQLContext, RequestIdentity};

/// Resolver wrapper that admits a request only at or above a role tier
///
/// One gate type serves every tier; the tier is the only thing that varies.
/// ```rust,ignore
/// AccessGate::ADMIN
///     .run(ctx, |req| user_queries::get_all_users(req))
///     .await
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGate {
    required: RoleTier,
}

impl AccessGate {
    pub const USER: AccessGate = AccessGate::new(RoleTier::User);
    pub const ADMIN: AccessGate = AccessGate::new(RoleTier::Admin);
    pub const SUPER_ADMIN: AccessGate = AccessGate::new(RoleTier::SuperAdmin);

    pub const fn new(required: RoleTier) -> Self {
        Self { required }
    }

    /// Cookie present, token valid, tier met
    pub fn admit(
        &self,
        session_token: Option<&str>,
        tokens: &TokenService,
    ) -> Result<Identity, AuthError> {
        let token = session_token.ok_or(AuthError::NoSession)?;
        let identity = tokens.validate(token)?;

        if !self.required.is_satisfied_by(&identity) {
            return Err(AuthError::InsufficientRole {
                required: self.required,
            });
        }

        Ok(identity)
    }

    /// Admit the request, then invoke `resolver` with the child context
    pub async fn run<'a, T, F, Fut>(&self, ctx: &'a GraphQLContext, resolver: F) -> FieldResult<T>
    where
        F: FnOnce(RequestIdentity<'a>) -> Fut,
        Fut: Future<Output = FieldResult<T>>,
    {
        let identity = self
            .admit(ctx.session_token.as_deref(), &ctx.deps.tokens)
            .map_err(|err| {
                debug!(required = %self.required, error = %err, "Access gate rejected request");
                to_field_error(err)
            })?;

        debug!(
            subject_id = identity.subject_id,
            required = %self.required,
            granted = %RoleTier::granted_to(&identity),
            "Access gate admitted request"
        );

        resolver(RequestIdentity::new(ctx, identity)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::auth::TokenError;
    use crate::kernel::TestDependencies;
    use chrono::{Duration, Utc};

    fn tokens() -> TokenService {
        TokenService::new("test_secret_key")
    }

    #[test]
    fn test_missing_cookie_is_no_session() {
        assert_eq!(
            AccessGate::USER.admit(None, &tokens()),
            Err(AuthError::NoSession)
        );
    }

    #[test]
    fn test_token_failures_become_invalid_session() {
        let tokens = tokens();
        let foreign = TokenService::new("other-secret").issue(1, false, false).unwrap();
        let expired = tokens
            .issue_at(1, false, false, Utc::now() - Duration::days(3))
            .unwrap();

        assert_eq!(
            AccessGate::USER.admit(Some("garbage"), &tokens),
            Err(AuthError::InvalidSession(TokenError::Malformed))
        );
        assert_eq!(
            AccessGate::USER.admit(Some(&foreign), &tokens),
            Err(AuthError::InvalidSession(TokenError::SignatureInvalid))
        );
        assert_eq!(
            AccessGate::USER.admit(Some(&expired), &tokens),
            Err(AuthError::InvalidSession(TokenError::Expired))
        );
    }

    #[test]
    fn test_non_admin_never_passes_admin_gate() {
        let tokens = tokens();

        for subject_id in [0, 1, 42, u32::MAX] {
            let token = tokens.issue(subject_id, false, false).unwrap();
            assert_eq!(
                AccessGate::ADMIN.admit(Some(&token), &tokens),
                Err(AuthError::InsufficientRole {
                    required: RoleTier::Admin
                })
            );
        }
    }

    #[test]
    fn test_super_admin_passes_admin_gate() {
        let tokens = tokens();
        let token = tokens.issue(3, false, true).unwrap();

        assert_eq!(
            AccessGate::ADMIN.admit(Some(&token), &tokens).map(|i| i.subject_id),
            Ok(3)
        );
        assert!(AccessGate::SUPER_ADMIN.admit(Some(&token), &tokens).is_ok());
    }

    #[test]
    fn test_admin_does_not_pass_super_admin_gate() {
        let tokens = tokens();
        let token = tokens.issue(3, true, false).unwrap();

        assert_eq!(
            AccessGate::SUPER_ADMIN.admit(Some(&token), &tokens),
            Err(AuthError::InsufficientRole {
                required: RoleTier::SuperAdmin
            })
        );
    }

    #[test]
    fn test_anonymous_subject_rejected_by_user_gate() {
        let tokens = tokens();
        let token = tokens.issue(0, false, false).unwrap();

        assert!(AccessGate::new(RoleTier::Anonymous).admit(Some(&token), &tokens).is_ok());
        assert_eq!(
            AccessGate::USER.admit(Some(&token), &tokens),
            Err(AuthError::InsufficientRole {
                required: RoleTier::User
            })
        );
    }

    #[tokio::test]
    async fn test_run_hands_subject_to_resolver() {
        let deps = TestDependencies::new();
        let token = deps.tokens.issue(42, false, false).unwrap();
        let ctx = GraphQLContext::new(deps.server_deps(), Some(token));

        let seen = AccessGate::USER
            .run(&ctx, |req| async move { Ok(req.subject_id()) })
            .await
            .unwrap();

        assert_eq!(seen, 42);
    }

    #[tokio::test]
    async fn test_run_skips_resolver_when_rejected() {
        let deps = TestDependencies::new();
        let ctx = GraphQLContext::new(deps.server_deps(), None);
        let mut invoked = false;

        let result = AccessGate::USER
            .run(&ctx, |_req| {
                invoked = true;
                async { Ok(()) }
            })
            .await;

        assert!(!invoked);
        assert_eq!(result.unwrap_err().message(), "Unauthenticated: you are not logged in");
    }
}
