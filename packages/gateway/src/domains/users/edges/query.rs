use juniper::FieldResult;

use crate::common::errors::require_id;
use crate::common::to_field_error;
use crate::domains::users::data::{AddressData, UserData};
use crate::server::graphql::RequestIdentity;

pub async fn get_all_users(req: RequestIdentity<'_>) -> FieldResult<Vec<UserData>> {
    let users = req
        .backends()
        .collect("user", req.deps.users.get_all_users())
        .await
        .map_err(to_field_error)?;

    Ok(users.into_iter().map(UserData::from).collect())
}

pub async fn get_all_admins(req: RequestIdentity<'_>) -> FieldResult<Vec<UserData>> {
    let admins = req
        .backends()
        .collect("user", req.deps.users.get_all_admins())
        .await
        .map_err(to_field_error)?;

    Ok(admins.into_iter().map(UserData::from).collect())
}

pub async fn get_user(req: RequestIdentity<'_>, id: i32) -> FieldResult<UserData> {
    let id = require_id("id", id).map_err(to_field_error)?;

    req.backends()
        .call("user", req.deps.users.get_user(id))
        .await
        .map(UserData::from)
        .map_err(to_field_error)
}

pub async fn get_admin(req: RequestIdentity<'_>, id: i32) -> FieldResult<UserData> {
    let id = require_id("id", id).map_err(to_field_error)?;

    req.backends()
        .call("user", req.deps.users.get_admin(id))
        .await
        .map(UserData::from)
        .map_err(to_field_error)
}

/// Address of the requesting user
pub async fn get_address(req: RequestIdentity<'_>) -> FieldResult<AddressData> {
    req.backends()
        .call("user", req.deps.users.get_address(req.subject_id()))
        .await
        .map(AddressData::from)
        .map_err(to_field_error)
}
