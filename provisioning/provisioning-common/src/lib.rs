// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::struct_excessive_bools)]

pub mod error;
pub use error::{AppsError, AppsErrorCode, LoginError};

/// Administrator credentials used to open a session against a domain.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub domain: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("domain", &self.domain)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct UserEntry {
    pub login: Login,
    pub name: Name,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quota: Option<Quota>,
}

impl UserEntry {
    /// A new user entry as sent on creation. Flags are left at their server-side defaults.
    #[must_use]
    pub fn new(user_name: &str, given_name: &str, family_name: &str, password: &str) -> Self {
        UserEntry {
            login: Login {
                user_name: user_name.to_owned(),
                password: Some(password.to_owned()),
                ..Login::default()
            },
            name: Name {
                given_name: given_name.to_owned(),
                family_name: family_name.to_owned(),
            },
            quota: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Login {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
    #[serde(
        rename = "hashFunctionName",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub hash_function_name: Option<String>,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub admin: bool,
    #[serde(rename = "agreedToTerms", default)]
    pub agreed_to_terms: bool,
    #[serde(rename = "changePasswordAtNextLogin", default)]
    pub change_password: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Name {
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

/// Mailbox quota, in MB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Quota {
    pub limit: u64,
}

/// One page of a user listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct UserFeed {
    pub entries: Vec<UserEntry>,
    #[serde(
        rename = "nextStartUsername",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub next_start_username: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ClientLoginRequest {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Passwd")]
    pub password: String,
    #[serde(rename = "accountType")]
    pub account_type: String,
    pub service: String,
}

impl ClientLoginRequest {
    #[must_use]
    pub fn hosted(credentials: &Credentials) -> Self {
        ClientLoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            account_type: "HOSTED".to_owned(),
            service: "apps".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ClientLoginResponse {
    #[serde(rename = "Auth")]
    pub auth: String,
}

#[cfg(test)]
mod tests {
    #[test]
    fn user_entry_wire_names() {
        let entry = super::UserEntry::new("alice", "Alice", "Smith", "secret");

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            serde_json::json!({
                "login": {
                    "userName": "alice",
                    "password": "secret",
                    "suspended": false,
                    "admin": false,
                    "agreedToTerms": false,
                    "changePasswordAtNextLogin": false,
                },
                "name": {
                    "givenName": "Alice",
                    "familyName": "Smith",
                },
            }),
            value
        );
    }

    #[test]
    fn user_entry_defaults_missing_flags() {
        let entry: super::UserEntry = serde_json::from_str(
            r#"{
                "login": { "userName": "bob" },
                "name": { "givenName": "Bob", "familyName": "Jones" },
                "quota": { "limit": 25600 }
            }"#,
        )
        .unwrap();

        assert_eq!("bob", entry.login.user_name);
        assert_eq!(None, entry.login.password);
        assert!(!entry.login.suspended);
        assert_eq!(Some(super::Quota { limit: 25600 }), entry.quota);
    }

    #[test]
    fn feed_without_continuation() {
        let feed: super::UserFeed = serde_json::from_str(r#"{ "entries": [] }"#).unwrap();
        assert!(feed.entries.is_empty());
        assert_eq!(None, feed.next_start_username);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = super::Credentials {
            email: "admin@example.com".to_owned(),
            domain: "example.com".to_owned(),
            password: "hunter2".to_owned(),
        };

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("admin@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn hosted_login_request() {
        let credentials = super::Credentials {
            email: "admin@example.com".to_owned(),
            domain: "example.com".to_owned(),
            password: "hunter2".to_owned(),
        };

        let value = serde_json::to_value(super::ClientLoginRequest::hosted(&credentials)).unwrap();
        assert_eq!(
            serde_json::json!({
                "Email": "admin@example.com",
                "Passwd": "hunter2",
                "accountType": "HOSTED",
                "service": "apps",
            }),
            value
        );
    }
}
