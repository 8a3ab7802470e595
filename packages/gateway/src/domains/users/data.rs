use juniper::GraphQLObject;

use crate::domains::users::models::{AddressRecord, UserRecord};

/// User GraphQL data type
///
/// Only `id`, `name` and `email` exist on this type, so a password can never
/// be selected by a client.
#[derive(Debug, Clone, PartialEq, GraphQLObject)]
#[graphql(name = "user")]
pub struct UserData {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<UserRecord> for UserData {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id as i32,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, GraphQLObject)]
#[graphql(name = "address")]
pub struct AddressData {
    pub id: i32,
    pub city: String,
    pub district: String,
    pub state: String,
    pub road: String,
    pub user_id: i32,
}

impl From<AddressRecord> for AddressData {
    fn from(address: AddressRecord) -> Self {
        Self {
            id: address.id as i32,
            city: address.city,
            district: address.district,
            state: address.state,
            road: address.road,
            user_id: address.user_id as i32,
        }
    }
}
