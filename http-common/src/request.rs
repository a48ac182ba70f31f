// Copyright (c) Microsoft. All rights reserved.

use std::io::{Error, ErrorKind};

const CONTENT_TYPE_JSON: &str = "application/json";

/// A single JSON request against a remote endpoint.
///
/// The request is sent exactly once. A failure, or an elapsed timeout if one was set, is returned to the caller as-is.
pub struct HttpRequest<TBody, TConnector> {
    connector: TConnector,
    method: hyper::Method,
    uri: String,
    headers: http::HeaderMap<http::HeaderValue>,
    body: Option<TBody>,
    timeout: Option<std::time::Duration>,
}

impl<TBody, TConnector> HttpRequest<TBody, TConnector>
where
    TBody: serde::Serialize,
    TConnector: Clone + Send + Sync + hyper::client::connect::Connect + 'static,
{
    #[must_use]
    pub fn delete(connector: TConnector, uri: &str) -> Self {
        Self::new(connector, hyper::Method::DELETE, uri, None)
    }

    #[must_use]
    pub fn get(connector: TConnector, uri: &str) -> Self {
        Self::new(connector, hyper::Method::GET, uri, None)
    }

    #[must_use]
    pub fn post(connector: TConnector, uri: &str, body: Option<TBody>) -> Self {
        Self::new(connector, hyper::Method::POST, uri, body)
    }

    #[must_use]
    pub fn put(connector: TConnector, uri: &str, body: TBody) -> Self {
        Self::new(connector, hyper::Method::PUT, uri, Some(body))
    }

    fn new(connector: TConnector, method: hyper::Method, uri: &str, body: Option<TBody>) -> Self {
        HttpRequest {
            connector,
            method,
            uri: uri.to_string(),
            headers: http::HeaderMap::default(),
            body,
            timeout: None,
        }
    }

    /// Bounds the whole exchange, including the response body. Without this the request waits indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.timeout = timeout;

        self
    }

    pub fn add_header(
        &mut self,
        name: hyper::header::HeaderName,
        value: &str,
    ) -> Result<(), Error> {
        let value = http::HeaderValue::from_str(value)
            .map_err(|err| Error::new(ErrorKind::InvalidInput, err))?;

        self.headers.insert(name, value);

        Ok(())
    }

    /// Sends the request and expects `204 No Content`.
    ///
    /// Client and server errors are parsed as `TError`.
    pub async fn no_content_response<TError>(self) -> Result<(), Error>
    where
        TError: serde::de::DeserializeOwned + Into<Error>,
    {
        let (status, _, body) = self.process_request().await?;

        if status == hyper::StatusCode::NO_CONTENT {
            Ok(())
        } else {
            HttpResponse { status, body }.error::<(), TError>(&[hyper::StatusCode::NO_CONTENT])
        }
    }

    pub async fn json_response(self) -> Result<HttpResponse, Error> {
        let (status, headers, body) = self.process_request().await?;

        let is_json_response = if let Some(content_type) = headers.get(hyper::header::CONTENT_TYPE)
        {
            let content_type = content_type
                .to_str()
                .map_err(|err| Error::new(ErrorKind::InvalidData, err))?;

            content_type.contains(CONTENT_TYPE_JSON)
        } else {
            false
        };

        if !is_json_response {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("invalid Content-Type in {} response; expected JSON", status),
            ));
        }

        Ok(HttpResponse { status, body })
    }

    async fn process_request(
        self,
    ) -> Result<
        (
            hyper::StatusCode,
            http::HeaderMap<http::HeaderValue>,
            hyper::body::Bytes,
        ),
        Error,
    > {
        let client: hyper::Client<_, hyper::Body> = hyper::Client::builder().build(self.connector);

        let mut request = hyper::Request::builder()
            .method(&self.method)
            .uri(&self.uri);

        let request_body = if let Some(body) = &self.body {
            request = request.header(hyper::header::CONTENT_TYPE, CONTENT_TYPE_JSON);

            serde_json::to_vec(body)
                .map_err(|err| Error::new(ErrorKind::InvalidInput, err))?
                .into()
        } else {
            hyper::Body::default()
        };

        for (header_name, header_value) in &self.headers {
            request = request.header(header_name, header_value);
        }

        let request = request
            .body(request_body)
            .map_err(|err| Error::new(ErrorKind::InvalidInput, err))?;

        log::debug!("{} {}", self.method, self.uri);

        let response_future = async {
            let response = client.request(request).await.map_err(|err| {
                if err.is_connect() {
                    // Network error.
                    Error::new(ErrorKind::NotConnected, err)
                } else {
                    Error::new(ErrorKind::Other, err)
                }
            })?;

            let (
                http::response::Parts {
                    status: response_status,
                    headers: response_headers,
                    ..
                },
                response_body,
            ) = response.into_parts();

            // Make sure to download body inside the timeout
            let response_body = hyper::body::to_bytes(response_body)
                .await
                .map_err(|err| Error::new(ErrorKind::Other, err))?;

            Ok::<_, Error>((response_status, response_headers, response_body))
        };

        let result = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, response_future).await {
                Ok(result) => result,
                Err(elapsed) => Err(elapsed.into()),
            },
            None => response_future.await,
        };

        match result {
            Ok(response) => {
                log::debug!("{} {} -> {}", self.method, self.uri, response.0);
                Ok(response)
            }

            Err(err) => {
                log::warn!("Failed to send HTTP request {} {}: {}", self.method, self.uri, err);
                Err(err)
            }
        }
    }
}

#[derive(Debug)]
pub struct HttpResponse {
    status: hyper::StatusCode,
    body: hyper::body::Bytes,
}

impl HttpResponse {
    pub fn parse_expect_ok<TResponse, TError>(self) -> Result<TResponse, Error>
    where
        TResponse: serde::de::DeserializeOwned,
        TError: serde::de::DeserializeOwned + Into<Error>,
    {
        self.parse::<TResponse, TError>(&[hyper::StatusCode::OK])
    }

    pub fn parse<TResponse, TError>(
        self,
        expected_statuses: &[hyper::StatusCode],
    ) -> Result<TResponse, Error>
    where
        TResponse: serde::de::DeserializeOwned,
        TError: serde::de::DeserializeOwned + Into<Error>,
    {
        if expected_statuses.contains(&self.status) {
            let response: TResponse = serde_json::from_slice(&self.body)
                .map_err(|err| Error::new(ErrorKind::InvalidData, err))?;

            Ok(response)
        } else {
            self.error::<TResponse, TError>(expected_statuses)
        }
    }

    fn error<TResponse, TError>(
        self,
        expected_statuses: &[hyper::StatusCode],
    ) -> Result<TResponse, Error>
    where
        TError: serde::de::DeserializeOwned + Into<Error>,
    {
        if self.status.is_client_error() || self.status.is_server_error() {
            let error: TError = serde_json::from_slice(&self.body).map_err(|err| {
                Error::new(
                    ErrorKind::InvalidData,
                    format!("could not parse {} error response: {}", self.status, err),
                )
            })?;

            Err(error.into())
        } else {
            Err(Error::new(
                ErrorKind::Other,
                format!(
                    "Expected one of {:?}, got {}",
                    expected_statuses, self.status
                ),
            ))
        }
    }
}
