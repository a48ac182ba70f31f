// Copyright (c) Microsoft. All rights reserved.

use std::io::{Error, ErrorKind};

/// Error codes reported in the body of a failed provisioning request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppsErrorCode {
    UnknownError,
    UserDeletedRecently,
    UserSuspended,
    DomainUserLimitExceeded,
    DomainAliasLimitExceeded,
    DomainSuspended,
    DomainFeatureUnavailable,
    EntityExists,
    EntityDoesNotExist,
    EntityNameIsReserved,
    EntityNameNotValid,
    InvalidGivenName,
    InvalidFamilyName,
    InvalidPassword,
    InvalidUsername,
    InvalidHashFunctionName,
    InvalidHashDigestLength,
    InvalidEmailAddress,
    InvalidQueryParameterValue,
    TooManyRecipientsOnEmailList,
}

const ERROR_CODES: &[(u16, AppsErrorCode)] = &[
    (1000, AppsErrorCode::UnknownError),
    (1100, AppsErrorCode::UserDeletedRecently),
    (1101, AppsErrorCode::UserSuspended),
    (1200, AppsErrorCode::DomainUserLimitExceeded),
    (1201, AppsErrorCode::DomainAliasLimitExceeded),
    (1202, AppsErrorCode::DomainSuspended),
    (1203, AppsErrorCode::DomainFeatureUnavailable),
    (1300, AppsErrorCode::EntityExists),
    (1301, AppsErrorCode::EntityDoesNotExist),
    (1302, AppsErrorCode::EntityNameIsReserved),
    (1303, AppsErrorCode::EntityNameNotValid),
    (1400, AppsErrorCode::InvalidGivenName),
    (1401, AppsErrorCode::InvalidFamilyName),
    (1402, AppsErrorCode::InvalidPassword),
    (1403, AppsErrorCode::InvalidUsername),
    (1404, AppsErrorCode::InvalidHashFunctionName),
    (1405, AppsErrorCode::InvalidHashDigestLength),
    (1406, AppsErrorCode::InvalidEmailAddress),
    (1407, AppsErrorCode::InvalidQueryParameterValue),
    (1500, AppsErrorCode::TooManyRecipientsOnEmailList),
];

impl AppsErrorCode {
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        ERROR_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, error_code)| *error_code)
    }

    #[must_use]
    pub fn code(self) -> u16 {
        ERROR_CODES
            .iter()
            .find(|(_, error_code)| *error_code == self)
            .map_or(1000, |(c, _)| *c)
    }

    fn kind(self) -> ErrorKind {
        match self {
            AppsErrorCode::EntityExists => ErrorKind::AlreadyExists,
            AppsErrorCode::EntityDoesNotExist => ErrorKind::NotFound,
            AppsErrorCode::EntityNameIsReserved
            | AppsErrorCode::EntityNameNotValid
            | AppsErrorCode::InvalidGivenName
            | AppsErrorCode::InvalidFamilyName
            | AppsErrorCode::InvalidPassword
            | AppsErrorCode::InvalidUsername
            | AppsErrorCode::InvalidHashFunctionName
            | AppsErrorCode::InvalidHashDigestLength
            | AppsErrorCode::InvalidEmailAddress
            | AppsErrorCode::InvalidQueryParameterValue => ErrorKind::InvalidInput,
            AppsErrorCode::DomainFeatureUnavailable | AppsErrorCode::DomainSuspended => {
                ErrorKind::PermissionDenied
            }
            _ => ErrorKind::Other,
        }
    }
}

impl std::fmt::Display for AppsErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The wire name is the variant name.
        write!(f, "{:?}", self)
    }
}

/// Body of a failed provisioning request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct AppsError {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    #[serde(default)]
    pub reason: String,
    #[serde(
        rename = "invalidInput",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub invalid_input: Option<String>,
}

impl AppsError {
    #[must_use]
    pub fn new(error_code: AppsErrorCode, invalid_input: Option<&str>) -> Self {
        AppsError {
            error_code: error_code.code().to_string(),
            reason: error_code.to_string(),
            invalid_input: invalid_input.map(ToOwned::to_owned),
        }
    }

    #[must_use]
    pub fn code(&self) -> Option<AppsErrorCode> {
        self.error_code.parse().ok().and_then(AppsErrorCode::from_code)
    }
}

impl std::fmt::Display for AppsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{} ({})", code, self.error_code)?,
            None if self.reason.is_empty() => write!(f, "error {}", self.error_code)?,
            None => write!(f, "{} ({})", self.reason, self.error_code)?,
        }

        if let Some(invalid_input) = &self.invalid_input {
            write!(f, ": {}", invalid_input)?;
        }

        Ok(())
    }
}

impl std::convert::From<AppsError> for Error {
    fn from(err: AppsError) -> Error {
        let kind = match (err.code(), err.error_code.as_str()) {
            (Some(code), _) => code.kind(),
            // Rejected tokens carry the HTTP status instead of a provisioning code.
            (None, "401" | "403") => ErrorKind::PermissionDenied,
            (None, _) => ErrorKind::Other,
        };

        Error::new(kind, err.to_string())
    }
}

/// Body of a failed login request, e.g. `{"Error": "BadAuthentication"}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct LoginError {
    #[serde(rename = "Error")]
    pub error: String,
}

impl std::convert::From<LoginError> for Error {
    fn from(err: LoginError) -> Error {
        Error::new(
            ErrorKind::PermissionDenied,
            format!("login failed: {}", err.error),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use super::{AppsError, AppsErrorCode, LoginError};

    #[test]
    fn code_round_trip() {
        for (code, error_code) in super::ERROR_CODES {
            assert_eq!(Some(*error_code), AppsErrorCode::from_code(*code));
            assert_eq!(*code, error_code.code());
        }

        assert_eq!(None, AppsErrorCode::from_code(9999));
    }

    #[test]
    fn not_found_maps_to_io_kind() {
        let err = AppsError::new(AppsErrorCode::EntityDoesNotExist, Some("bob"));
        assert_eq!("1301", err.error_code);

        let err: std::io::Error = err.into();
        assert_eq!(ErrorKind::NotFound, err.kind());
        assert_eq!("EntityDoesNotExist (1301): bob", err.to_string());
    }

    #[test]
    fn exists_maps_to_io_kind() {
        let err: std::io::Error = AppsError::new(AppsErrorCode::EntityExists, Some("alice")).into();
        assert_eq!(ErrorKind::AlreadyExists, err.kind());
    }

    #[test]
    fn unknown_code_keeps_reason() {
        let err: AppsError = serde_json::from_str(
            r#"{ "errorCode": "4242", "reason": "SomethingNew", "invalidInput": "x" }"#,
        )
        .unwrap();
        assert_eq!(None, err.code());
        assert_eq!("SomethingNew (4242): x", err.to_string());

        let err: std::io::Error = err.into();
        assert_eq!(ErrorKind::Other, err.kind());
    }

    #[test]
    fn rejected_token_is_permission_denied() {
        let err: AppsError = serde_json::from_str(
            r#"{ "errorCode": "401", "reason": "TokenInvalid" }"#,
        )
        .unwrap();
        assert_eq!("TokenInvalid (401)", err.to_string());

        let err: std::io::Error = err.into();
        assert_eq!(ErrorKind::PermissionDenied, err.kind());

        let err: std::io::Error =
            AppsError::new(AppsErrorCode::DomainFeatureUnavailable, Some("other.com")).into();
        assert_eq!(ErrorKind::PermissionDenied, err.kind());
    }

    #[test]
    fn login_error() {
        let err: LoginError = serde_json::from_str(r#"{ "Error": "BadAuthentication" }"#).unwrap();

        let err: std::io::Error = err.into();
        assert_eq!(ErrorKind::PermissionDenied, err.kind());
        assert_eq!("login failed: BadAuthentication", err.to_string());
    }
}
