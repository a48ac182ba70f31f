// Copyright (c) Microsoft. All rights reserved.

use std::io::{Error, ErrorKind};

use provisioning_common::{AppsError, UserEntry, UserFeed};

use http_common::HttpRequest;

const API_VERSION: &str = "2.0";

/// An authenticated session against a single domain.
pub struct Session {
    client: crate::Client,
    domain: String,
    auth_header: String,
}

impl Session {
    pub(crate) fn new(client: crate::Client, domain: &str, token: &str) -> Self {
        Session {
            client,
            domain: domain.to_owned(),
            auth_header: format!("GoogleLogin auth={}", token),
        }
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub async fn create_user(
        &self,
        user_name: &str,
        given_name: &str,
        family_name: &str,
        password: &str,
    ) -> Result<UserEntry, Error> {
        let body = UserEntry::new(user_name, given_name, family_name, password);

        let request = self.build_request(hyper::Method::POST, None, None, Some(body))?;

        let response = request.json_response().await?;
        response.parse::<UserEntry, AppsError>(&[hyper::StatusCode::CREATED])
    }

    pub async fn retrieve_user(&self, user_name: &str) -> Result<UserEntry, Error> {
        let request: HttpRequest<(), _> =
            self.build_request(hyper::Method::GET, Some(user_name), None, None)?;

        let response = request.json_response().await?;
        response.parse_expect_ok::<UserEntry, AppsError>()
    }

    /// Retrieves one page of users, starting at `start_username` if given.
    pub async fn retrieve_page(&self, start_username: Option<&str>) -> Result<UserFeed, Error> {
        let request: HttpRequest<(), _> =
            self.build_request(hyper::Method::GET, None, start_username, None)?;

        let response = request.json_response().await?;
        response.parse_expect_ok::<UserFeed, AppsError>()
    }

    /// Retrieves every user of the domain, following the listing across pages.
    pub async fn retrieve_all_users(&self) -> Result<Vec<UserEntry>, Error> {
        let mut users = vec![];
        let mut start_username: Option<String> = None;

        loop {
            let UserFeed {
                mut entries,
                next_start_username,
            } = self.retrieve_page(start_username.as_deref()).await?;

            users.append(&mut entries);

            match next_start_username {
                Some(next) if start_username.as_deref() == Some(next.as_str()) => {
                    return Err(Error::new(
                        ErrorKind::InvalidData,
                        format!("user listing did not advance past {}", next),
                    ));
                }

                Some(next) => {
                    log::debug!("Fetched {} users so far, continuing at {}", users.len(), next);
                    start_username = Some(next);
                }

                None => break,
            }
        }

        Ok(users)
    }

    pub async fn update_user(&self, user_name: &str, user: &UserEntry) -> Result<UserEntry, Error> {
        let request = self.build_request(hyper::Method::PUT, Some(user_name), None, Some(user))?;

        let response = request.json_response().await?;
        response.parse_expect_ok::<UserEntry, AppsError>()
    }

    pub async fn delete_user(&self, user_name: &str) -> Result<(), Error> {
        let request: HttpRequest<(), _> =
            self.build_request(hyper::Method::DELETE, Some(user_name), None, None)?;

        request.no_content_response::<AppsError>().await
    }

    fn build_request<TRequest>(
        &self,
        method: hyper::Method,
        user_name: Option<&str>,
        start_username: Option<&str>,
        body: Option<TRequest>,
    ) -> Result<HttpRequest<TRequest, crate::CloudConnector>, Error>
    where
        TRequest: serde::Serialize,
    {
        let path = {
            let mut path = format!(
                "a/feeds/{}/user/{}",
                percent_encoding::percent_encode(self.domain.as_bytes(), crate::ENCODE_SET),
                API_VERSION,
            );

            if let Some(user_name) = user_name {
                let user_name =
                    percent_encoding::percent_encode(user_name.as_bytes(), crate::ENCODE_SET);
                path = format!("{}/{}", path, user_name);
            }

            path
        };

        let mut uri = crate::endpoint_uri(&self.client.endpoint, &path);
        if let Some(start_username) = start_username {
            uri.query_pairs_mut()
                .append_pair("startUsername", start_username);
        }

        let connector = self.client.connector.clone();

        let mut request = match method {
            hyper::Method::DELETE => HttpRequest::delete(connector, uri.as_str()),
            hyper::Method::GET => HttpRequest::get(connector, uri.as_str()),
            hyper::Method::POST => HttpRequest::post(connector, uri.as_str(), body),
            hyper::Method::PUT => {
                let body = body.ok_or_else(|| {
                    Error::new(ErrorKind::InvalidInput, "missing PUT body")
                })?;
                HttpRequest::put(connector, uri.as_str(), body)
            }

            // No other methods are used by the user feed.
            _ => unreachable!(),
        }
        .with_timeout(self.client.timeout);

        request.add_header(hyper::header::AUTHORIZATION, &self.auth_header)?;

        Ok(request)
    }
}
