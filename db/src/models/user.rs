use std::fmt::Display;

use eventbook_common::views::User;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub email: String,

    /// bcrypt digest of the user's password.
    pub password: String,

    /// Events attributed to this user, oldest first. Only ever appended to.
    #[serde(default)]
    pub created_events: Vec<ObjectId>,
}

impl Display for DbUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbUser {{ id: {:?}, email: {}, created_events: {} }}",
            self.id,
            self.email,
            self.created_events.len()
        )
    }
}

impl DbUser {
    /// Build a user that has not been stored yet.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: None,
            email,
            password: password_hash,
            created_events: vec![],
        }
    }
}

impl From<DbUser> for User {
    fn from(value: DbUser) -> Self {
        Self {
            id: value
                .id
                .map(|oid| oid.to_hex())
                .unwrap_or_else(|| "unknown".into())
                .into(),
            email: value.email,
            password: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson;

    use super::*;

    #[test]
    fn test_user_view_withholds_password() {
        let mut user = DbUser::new("a@x.com".into(), "$2b$12$digest".into());
        user.id = Some(ObjectId::new());

        let view: User = user.into();
        assert_eq!(view.email, "a@x.com");
        assert_eq!(view.password, "");
    }

    #[test]
    fn test_user_display_omits_password() {
        let user = DbUser::new("a@x.com".into(), "$2b$12$digest".into());
        assert!(!user.to_string().contains("digest"));
    }

    #[test]
    fn test_user_document_uses_camel_case() {
        let mut user = DbUser::new("a@x.com".into(), "hash".into());
        user.created_events.push(ObjectId::new());

        let document = bson::to_document(&user).unwrap();
        assert_eq!(document.get_array("createdEvents").unwrap().len(), 1);
        assert!(!document.contains_key("created_events"));
    }

    #[test]
    fn test_user_document_defaults_created_events() {
        let document = bson::doc! {
            "_id": ObjectId::new(),
            "email": "a@x.com",
            "password": "hash",
        };

        let user: DbUser = bson::from_document(document).unwrap();
        assert!(user.created_events.is_empty());
    }
}
