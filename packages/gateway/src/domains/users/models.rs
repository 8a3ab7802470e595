use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::errors::{require_present, require_text, ValidationError};

/// User as returned by the identity backend
///
/// Any password the backend echoes back is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
}

/// Account to create (shopper or admin)
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn parse(name: String, email: String, password: String) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", name)?,
            email: require_text("email", email)?,
            password: require_present("password", password)?,
        })
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn parse(email: String, password: String) -> Result<Self, ValidationError> {
        Ok(Self {
            email: require_text("email", email)?,
            password: require_present("password", password)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    pub id: u32,
    pub user_id: u32,
    pub city: String,
    pub district: String,
    pub state: String,
    pub road: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub user_id: u32,
    pub city: String,
    pub district: String,
    pub state: String,
    pub road: String,
}

impl NewAddress {
    pub fn parse(
        user_id: u32,
        city: String,
        district: String,
        state: String,
        road: String,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            city: require_text("city", city)?,
            district: require_text("district", district)?,
            state: require_text("state", state)?,
            road: require_text("road", road)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_requires_every_field() {
        let err = NewUser::parse("Ann".into(), "a@x.com".into(), "".into()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("password"));
    }

    #[test]
    fn test_password_is_sent_as_typed() {
        let user = NewUser::parse("Ann".into(), "a@x.com".into(), "  s3cret  ".into()).unwrap();
        let credentials = Credentials::parse(" a@x.com ".into(), " s3cret".into()).unwrap();

        assert_eq!(user.password, "  s3cret  ");
        assert_eq!(credentials.password, " s3cret");
        assert_eq!(credentials.email, "a@x.com");
        assert_ne!(user.password, credentials.password);
    }

    #[test]
    fn test_debug_output_hides_password() {
        let user = NewUser::parse("Ann".into(), "a@x.com".into(), "hunter2".into()).unwrap();
        let credentials = Credentials::parse("a@x.com".into(), "hunter2".into()).unwrap();

        assert!(!format!("{:?}", user).contains("hunter2"));
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }

    #[test]
    fn test_user_record_ignores_echoed_password() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":7,"name":"Ann","email":"a@x.com","password":"p"}"#,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"id": 7, "name": "Ann", "email": "a@x.com"})
        );
    }
}
