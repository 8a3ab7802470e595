use std::ops::Deref;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::common::auth::Identity;
use crate::domains::auth::SessionCookie;
use crate::kernel::{BackendAggregator, ServerDeps};

/// GraphQL request context
///
/// Built per request by the router middleware. Shared resources come in through
/// `deps`; everything else lives only as long as the request.
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: Arc<ServerDeps>,
    /// Raw `jwtToken` cookie value, unvalidated
    pub session_token: Option<String>,
    deadline: Instant,
    session_cookie: Arc<Mutex<Option<SessionCookie>>>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServerDeps>, session_token: Option<String>) -> Self {
        let deadline = Instant::now() + deps.backend_deadline;
        Self {
            deps,
            session_token,
            deadline,
            session_cookie: Arc::new(Mutex::new(None)),
        }
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.deps
    }

    /// Backend access bounded by this request's deadline
    pub fn backends(&self) -> BackendAggregator {
        BackendAggregator::new(self.deadline)
    }

    /// Stage a cookie change for the HTTP response; the last one staged wins
    pub async fn stage_session_cookie(&self, cookie: SessionCookie) {
        *self.session_cookie.lock().await = Some(cookie);
    }

    pub async fn take_session_cookie(&self) -> Option<SessionCookie> {
        self.session_cookie.lock().await.take()
    }
}

/// Child context handed to gated resolvers
///
/// Only `AccessGate` creates one, so holding a `RequestIdentity` means the
/// session was validated and the tier check passed.
pub struct RequestIdentity<'a> {
    parent: &'a GraphQLContext,
    identity: Identity,
}

impl<'a> RequestIdentity<'a> {
    pub(crate) fn new(parent: &'a GraphQLContext, identity: Identity) -> Self {
        Self { parent, identity }
    }

    pub fn subject_id(&self) -> u32 {
        self.identity.subject_id
    }
}

impl Deref for RequestIdentity<'_> {
    type Target = GraphQLContext;

    fn deref(&self) -> &GraphQLContext {
        self.parent
    }
}
