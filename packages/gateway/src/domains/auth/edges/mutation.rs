use juniper::FieldResult;

use crate::domains::auth::SessionCookie;
use crate::server::graphql::GraphQLContext;

/// Expire the session cookie
///
/// The token itself stays valid until it expires; only the cookie is dropped.
pub async fn logout(ctx: &GraphQLContext) -> FieldResult<bool> {
    ctx.stage_session_cookie(SessionCookie::Clear).await;
    Ok(true)
}
