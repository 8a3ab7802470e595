use juniper::FieldResult;
use tracing::info;

use crate::common::auth::RoleTier;
use crate::common::to_field_error;
use crate::domains::auth::SessionCookie;
use crate::domains::users::data::UserData;
use crate::domains::users::models::Credentials;
use crate::server::graphql::GraphQLContext;

/// Log in as a shopper
pub async fn user_login(
    ctx: &GraphQLContext,
    email: String,
    password: String,
) -> FieldResult<UserData> {
    login(ctx, RoleTier::User, email, password).await
}

/// Log in as a store admin
pub async fn admin_login(
    ctx: &GraphQLContext,
    email: String,
    password: String,
) -> FieldResult<UserData> {
    login(ctx, RoleTier::Admin, email, password).await
}

/// Log in as a super admin; the token carries both admin flags
pub async fn super_admin_login(
    ctx: &GraphQLContext,
    email: String,
    password: String,
) -> FieldResult<UserData> {
    login(ctx, RoleTier::SuperAdmin, email, password).await
}

async fn login(
    ctx: &GraphQLContext,
    tier: RoleTier,
    email: String,
    password: String,
) -> FieldResult<UserData> {
    let credentials = Credentials::parse(email, password).map_err(to_field_error)?;

    let users = &ctx.deps.users;
    let verify = match tier {
        RoleTier::SuperAdmin => users.super_admin_login(credentials),
        RoleTier::Admin => users.admin_login(credentials),
        RoleTier::User | RoleTier::Anonymous => users.user_login(credentials),
    };
    let user = ctx
        .backends()
        .call("user", verify)
        .await
        .map_err(to_field_error)?;

    let token = ctx
        .deps
        .tokens
        .issue(user.id, tier >= RoleTier::Admin, tier == RoleTier::SuperAdmin)
        .map_err(to_field_error)?;
    ctx.stage_session_cookie(SessionCookie::Issue(token)).await;

    info!(user_id = user.id, tier = %tier, "Login succeeded");

    Ok(user.into())
}
