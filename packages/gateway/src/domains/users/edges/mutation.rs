use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::users::data::{AddressData, UserData};
use crate::domains::users::models::{NewAddress, NewUser};
use crate::domains::users::workflows::{OrchestratedSignup, SignupPlan};
use crate::server::graphql::{GraphQLContext, RequestIdentity};

/// Create a shopper account together with its cart and wishlist
pub async fn user_signup(
    ctx: &GraphQLContext,
    name: String,
    email: String,
    password: String,
) -> FieldResult<UserData> {
    let user = NewUser::parse(name, email, password).map_err(to_field_error)?;

    let created = OrchestratedSignup::new(ctx.deps(), ctx.backends())
        .run(SignupPlan::new(user))
        .await
        .map_err(to_field_error)?;

    Ok(created.into())
}

pub async fn add_admin(
    req: RequestIdentity<'_>,
    name: String,
    email: String,
    password: String,
) -> FieldResult<UserData> {
    let admin = NewUser::parse(name, email, password).map_err(to_field_error)?;

    req.backends()
        .call("user", req.deps.users.add_admin(admin))
        .await
        .map(UserData::from)
        .map_err(to_field_error)
}

pub async fn add_address(
    req: RequestIdentity<'_>,
    city: String,
    district: String,
    state: String,
    road: String,
) -> FieldResult<AddressData> {
    let address = NewAddress::parse(req.subject_id(), city, district, state, road)
        .map_err(to_field_error)?;

    req.backends()
        .call("user", req.deps.users.add_address(address))
        .await
        .map(AddressData::from)
        .map_err(to_field_error)
}

pub async fn remove_address(req: RequestIdentity<'_>) -> FieldResult<AddressData> {
    req.backends()
        .call("user", req.deps.users.remove_address(req.subject_id()))
        .await
        .map(AddressData::from)
        .map_err(to_field_error)
}
