// Copyright (c) Microsoft. All rights reserved.

use std::io::{Error, ErrorKind};

use provisioning_common::{ClientLoginRequest, ClientLoginResponse, Credentials, LoginError};

use http_common::HttpRequest;

/// An unauthenticated handle on the provisioning API.
///
/// Call [`Client::login`] to obtain a [`crate::Session`] for a domain.
#[derive(Clone)]
pub struct Client {
    pub(crate) endpoint: url::Url,
    pub(crate) connector: crate::CloudConnector,
    pub(crate) timeout: Option<std::time::Duration>,
}

impl Client {
    pub fn new(endpoint: url::Url) -> Result<Self, Error> {
        if endpoint.cannot_be_a_base() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("{} cannot be used as an API endpoint", endpoint),
            ));
        }

        let connector = crate::CloudConnector::new()
            .map_err(|err| Error::new(ErrorKind::Other, err))?;

        Ok(Client {
            endpoint,
            connector,
            timeout: None,
        })
    }

    /// Bounds every request made by this client and its session. Requests are unbounded by default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);

        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Authenticates the administrator and returns a session bound to `credentials.domain`.
    pub async fn login(self, credentials: &Credentials) -> Result<crate::Session, Error> {
        let uri = crate::endpoint_uri(&self.endpoint, "accounts/ClientLogin");

        let request = HttpRequest::post(
            self.connector.clone(),
            uri.as_str(),
            Some(ClientLoginRequest::hosted(credentials)),
        )
        .with_timeout(self.timeout);

        let response = request.json_response().await?;
        let ClientLoginResponse { auth } =
            response.parse_expect_ok::<ClientLoginResponse, LoginError>()?;

        log::info!(
            "Authenticated as {} for domain {}",
            credentials.email,
            credentials.domain
        );

        Ok(crate::Session::new(self, &credentials.domain, &auth))
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn requests_are_unbounded_unless_a_timeout_is_set() {
        let client = super::Client::new("http://127.0.0.1:8080".parse().unwrap()).unwrap();
        assert_eq!(None, client.timeout);

        let client = client.with_timeout(std::time::Duration::from_secs(5));
        assert_eq!(Some(std::time::Duration::from_secs(5)), client.timeout);
    }
}
