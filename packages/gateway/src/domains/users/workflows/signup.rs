//! Account creation across the identity, cart and wishlist backends.
//!
//! ```text
//! Start -> UserCreated -> CartCreated -> WishlistCreated
//!   \            \              \
//!    +------------+--------------+--> Failed(step, cause)
//! ```
//!
//! Steps run strictly in order and are never retried. Reaching `Failed` after
//! the user exists triggers compensation in reverse order: the cart (when the
//! wishlist step failed) and then the user are deleted. Compensation is
//! best-effort; its own failures are logged and never replace the original
//! error.

use std::fmt;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::domains::users::models::{NewUser, UserRecord};
use crate::kernel::{BackendAggregator, BackendError, ServerDeps};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    User,
    Cart,
    Wishlist,
}

impl fmt::Display for SignupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignupStep::User => "user",
            SignupStep::Cart => "cart",
            SignupStep::Wishlist => "wishlist",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Signup failed at the {step} step: {cause}")]
pub struct OrchestrationError {
    pub step: SignupStep,
    pub cause: BackendError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignupState {
    Start,
    UserCreated(UserRecord),
    CartCreated(UserRecord),
    WishlistCreated(UserRecord),
    Failed {
        step: SignupStep,
        cause: BackendError,
        /// Set once step 1 succeeded; drives compensation
        user: Option<UserRecord>,
    },
}

/// The three writes of one signup, evaluated once
#[derive(Debug, Clone)]
pub struct SignupPlan {
    user: NewUser,
}

impl SignupPlan {
    pub const STEPS: [SignupStep; 3] = [SignupStep::User, SignupStep::Cart, SignupStep::Wishlist];

    pub fn new(user: NewUser) -> Self {
        Self { user }
    }
}

pub struct OrchestratedSignup<'a> {
    deps: &'a ServerDeps,
    backends: BackendAggregator,
}

impl<'a> OrchestratedSignup<'a> {
    pub fn new(deps: &'a ServerDeps, backends: BackendAggregator) -> Self {
        Self { deps, backends }
    }

    /// Run the plan to a terminal state
    pub async fn run(&self, plan: SignupPlan) -> Result<UserRecord, OrchestrationError> {
        let mut state = SignupState::Start;

        loop {
            state = match state {
                SignupState::WishlistCreated(user) => {
                    info!(user_id = user.id, "Signup completed");
                    return Ok(user);
                }
                SignupState::Failed { step, cause, user } => {
                    warn!(step = %step, error = %cause, "Signup failed");
                    if let Some(user) = user {
                        self.compensate(step, &user).await;
                    }
                    return Err(OrchestrationError { step, cause });
                }
                pending => self.advance(pending, &plan).await,
            };
        }
    }

    /// Perform the single transition out of `state`
    pub async fn advance(&self, state: SignupState, plan: &SignupPlan) -> SignupState {
        match state {
            SignupState::Start => {
                let created = self
                    .backends
                    .call("user", self.deps.users.user_signup(plan.user.clone()))
                    .await;
                match created {
                    Ok(user) => SignupState::UserCreated(user),
                    Err(cause) => SignupState::Failed {
                        step: SignupStep::User,
                        cause,
                        user: None,
                    },
                }
            }
            SignupState::UserCreated(user) => {
                let cart = self
                    .backends
                    .call("cart", self.deps.carts.create_cart(user.id))
                    .await;
                match cart {
                    Ok(cart) if cart.user_id != 0 => SignupState::CartCreated(user),
                    Ok(_) => SignupState::Failed {
                        step: SignupStep::Cart,
                        cause: BackendError::CallFailed {
                            service: "cart",
                            message: "cart was not created".to_string(),
                        },
                        user: Some(user),
                    },
                    Err(cause) => SignupState::Failed {
                        step: SignupStep::Cart,
                        cause,
                        user: Some(user),
                    },
                }
            }
            SignupState::CartCreated(user) => {
                let wishlist = self
                    .backends
                    .call("wishlist", self.deps.wishlists.create_wishlist(user.id))
                    .await;
                match wishlist {
                    Ok(_) => SignupState::WishlistCreated(user),
                    Err(cause) => SignupState::Failed {
                        step: SignupStep::Wishlist,
                        cause,
                        user: Some(user),
                    },
                }
            }
            terminal => terminal,
        }
    }

    async fn compensate(&self, failed: SignupStep, user: &UserRecord) {
        // The request deadline may be what failed the step; undo gets its own budget
        let backends = BackendAggregator::new(Instant::now() + self.deps.backend_deadline);

        if failed == SignupStep::Wishlist {
            match backends.call("cart", self.deps.carts.delete_cart(user.id)).await {
                Ok(()) => info!(user_id = user.id, "Compensated signup: cart deleted"),
                Err(err) => error!(user_id = user.id, error = %err, "Failed to delete cart of aborted signup"),
            }
        }

        match backends.call("user", self.deps.users.delete_user(user.id)).await {
            Ok(()) => info!(user_id = user.id, "Compensated signup: user deleted"),
            Err(err) => error!(user_id = user.id, error = %err, "Failed to delete user of aborted signup"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;

    fn plan() -> SignupPlan {
        SignupPlan::new(NewUser::parse("Ann".into(), "a@x.com".into(), "p".into()).unwrap())
    }

    fn cart_down() -> BackendError {
        BackendError::Unavailable {
            service: "cart",
            message: "connection refused".to_string(),
        }
    }

    #[tokio::test]
    async fn test_all_steps_succeed() {
        let deps = TestDependencies::new().with_users(|users| users.with_next_id(7));
        let server_deps = deps.server_deps();

        let user = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded())
            .run(plan())
            .await
            .unwrap();

        assert_eq!(
            user,
            UserRecord {
                id: 7,
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
            }
        );
        assert_eq!(
            deps.log.calls(),
            vec![
                "user.UserSignup(a@x.com)",
                "cart.CreateCart(7)",
                "wishlist.CreateWishlist(7)",
            ]
        );
    }

    #[tokio::test]
    async fn test_cart_failure_stops_before_wishlist_and_deletes_user() {
        let deps = TestDependencies::new().with_users(|users| users.with_next_id(7));
        deps.carts.fail("CreateCart", cart_down());
        let server_deps = deps.server_deps();

        let err = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded())
            .run(plan())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            OrchestrationError {
                step: SignupStep::Cart,
                cause: cart_down(),
            }
        );
        assert!(!deps.log.called("wishlist.CreateWishlist"));
        assert!(!deps.log.called("cart.DeleteCart"));
        assert!(deps.log.called("user.DeleteUser"));
        assert!(deps.users.account_ids().is_empty());
    }

    #[tokio::test]
    async fn test_unowned_cart_counts_as_cart_failure() {
        let deps = TestDependencies::new().with_users(|users| users.with_next_id(7));
        deps.carts.return_unowned_carts();
        let server_deps = deps.server_deps();

        let err = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded())
            .run(plan())
            .await
            .unwrap_err();

        assert_eq!(err.step, SignupStep::Cart);
        assert_eq!(err.to_string(), "Signup failed at the cart step: cart service call failed: cart was not created");
    }

    #[tokio::test]
    async fn test_wishlist_failure_compensates_in_reverse_order() {
        let deps = TestDependencies::new().with_users(|users| users.with_next_id(7));
        deps.wishlists.fail(
            "CreateWishlist",
            BackendError::CallFailed {
                service: "wishlist",
                message: "duplicate wishlist".to_string(),
            },
        );
        let server_deps = deps.server_deps();

        let err = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded())
            .run(plan())
            .await
            .unwrap_err();

        assert_eq!(err.step, SignupStep::Wishlist);
        assert_eq!(
            deps.log.calls(),
            vec![
                "user.UserSignup(a@x.com)",
                "cart.CreateCart(7)",
                "wishlist.CreateWishlist(7)",
                "cart.DeleteCart(7)",
                "user.DeleteUser(7)",
            ]
        );
    }

    #[tokio::test]
    async fn test_compensation_failure_keeps_original_error() {
        let deps = TestDependencies::new().with_users(|users| users.with_next_id(7));
        deps.carts.fail("CreateCart", cart_down());
        deps.users.fail(
            "DeleteUser",
            BackendError::Unavailable {
                service: "user",
                message: "connection refused".to_string(),
            },
        );
        let server_deps = deps.server_deps();

        let err = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded())
            .run(plan())
            .await
            .unwrap_err();

        assert_eq!(err.step, SignupStep::Cart);
        assert_eq!(err.cause, cart_down());
    }

    #[tokio::test]
    async fn test_user_failure_touches_nothing_else() {
        let deps = TestDependencies::new();
        deps.users.fail(
            "UserSignup",
            BackendError::CallFailed {
                service: "user",
                message: "email already registered".to_string(),
            },
        );
        let server_deps = deps.server_deps();

        let err = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded())
            .run(plan())
            .await
            .unwrap_err();

        assert_eq!(err.step, SignupStep::User);
        assert_eq!(deps.log.calls(), vec!["user.UserSignup(a@x.com)"]);
    }

    #[tokio::test]
    async fn test_transitions_follow_the_plan() {
        let deps = TestDependencies::new().with_users(|users| users.with_next_id(7));
        let server_deps = deps.server_deps();
        let signup = OrchestratedSignup::new(&server_deps, BackendAggregator::unbounded());
        let plan = plan();

        let mut state = SignupState::Start;
        for _ in SignupPlan::STEPS {
            state = signup.advance(state, &plan).await;
        }

        assert!(matches!(state, SignupState::WishlistCreated(ref user) if user.id == 7));
        // Terminal states stay put
        assert_eq!(signup.advance(state.clone(), &plan).await, state);
    }
}
