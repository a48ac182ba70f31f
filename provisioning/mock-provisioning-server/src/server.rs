// Copyright (c) Microsoft. All rights reserved.

use provisioning_common::{AppsError, AppsErrorCode, Credentials, LoginError, UserEntry};

pub(crate) struct ParsedRequest {
    pub method: hyper::Method,
    pub uri: String,
    pub headers: std::collections::HashMap<String, String>,
    pub body: Option<String>,
}

impl ParsedRequest {
    async fn from_http(req: hyper::Request<hyper::Body>) -> Result<Self, Response> {
        let method = req.method().clone();
        let uri = req.uri().to_string();
        log::debug!("> {} {} {:?}", method, uri, req.version());

        let mut headers = std::collections::HashMap::with_capacity(req.headers().len());
        for (key, value) in req.headers() {
            let key = key.to_string();
            let value = value
                .to_str()
                .map_err(|_| Response::bad_request("bad header value"))?
                .to_string();

            log::debug!("> {}: {}", key, value);
            headers.insert(key, value);
        }

        let body = hyper::body::to_bytes(req.into_body())
            .await
            .map_err(|_| Response::bad_request("unable to get body"))?
            .to_vec();

        let body = if body.is_empty() {
            None
        } else {
            let body = String::from_utf8(body)
                .map_err(|_| Response::bad_request("unable to parse body"))?;

            log::debug!("> {}", body);

            Some(body)
        };

        Ok(ParsedRequest {
            method,
            uri,
            headers,
            body,
        })
    }

    pub fn json_body<T>(&self) -> Result<T, Response>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| Response::bad_request("missing body"))?;

        serde_json::from_str(body).map_err(|err| Response::bad_request(err))
    }
}

pub(crate) enum Response {
    Empty {
        status: hyper::StatusCode,
    },

    Json {
        status: hyper::StatusCode,
        body: String,
    },
}

impl Response {
    pub fn bad_request(message: impl std::fmt::Display) -> Self {
        log::debug!("bad request: {}", message);

        Response::apps_error(
            hyper::StatusCode::BAD_REQUEST,
            AppsErrorCode::UnknownError,
            Some(&message.to_string()),
        )
    }

    pub fn not_found() -> Self {
        Response::Empty {
            status: hyper::StatusCode::NOT_FOUND,
        }
    }

    pub fn no_content() -> Self {
        Response::Empty {
            status: hyper::StatusCode::NO_CONTENT,
        }
    }

    pub fn method_not_allowed(method: &hyper::Method) -> Self {
        log::debug!("{} not allowed", method);

        Response::Empty {
            status: hyper::StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn apps_error(
        status: hyper::StatusCode,
        code: AppsErrorCode,
        invalid_input: Option<&str>,
    ) -> Self {
        Response::json(status, AppsError::new(code, invalid_input))
    }

    pub fn unauthorized() -> Self {
        Response::json(
            hyper::StatusCode::UNAUTHORIZED,
            AppsError {
                error_code: "401".to_owned(),
                reason: "TokenInvalid".to_owned(),
                invalid_input: None,
            },
        )
    }

    pub fn login_error(error: &str) -> Self {
        Response::json(
            hyper::StatusCode::FORBIDDEN,
            LoginError {
                error: error.to_owned(),
            },
        )
    }

    pub fn json(status: hyper::StatusCode, body: impl serde::Serialize) -> Self {
        match serde_json::to_string(&body) {
            Ok(body) => Response::Json { status, body },
            Err(err) => {
                log::error!("could not serialize response: {}", err);

                Response::Empty {
                    status: hyper::StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    }

    #[allow(clippy::wrong_self_convention)] // This function should consume self.
    pub fn to_http(self) -> hyper::Response<hyper::Body> {
        let mut response = hyper::Response::builder();

        let (status, body) = match self {
            Response::Empty { status } => (status, hyper::Body::empty()),

            Response::Json { status, body } => {
                response = response.header(hyper::header::CONTENT_TYPE, "application/json");

                log::debug!("< {}", body);

                (status, hyper::Body::from(body))
            }
        };

        log::debug!("< {}", status);

        let mut response = response.body(body).unwrap_or_default();
        *response.status_mut() = status;

        response
    }
}

pub(crate) struct ContextInner {
    pub admin: Credentials,
    pub tokens: std::collections::BTreeSet<String>,
    pub users: std::collections::BTreeMap<String, UserEntry>,
    pub page_size: usize,
    issued_tokens: u64,
}

impl ContextInner {
    pub fn new(options: &crate::Options) -> Self {
        ContextInner {
            admin: Credentials {
                email: options.admin_email.clone(),
                domain: options.domain.clone(),
                password: options.admin_password.clone(),
            },
            tokens: std::collections::BTreeSet::new(),
            users: std::collections::BTreeMap::new(),
            page_size: options.page_size.max(1),
            issued_tokens: 0,
        }
    }

    pub fn issue_token(&mut self) -> String {
        self.issued_tokens += 1;

        let token = format!("mock-token-{}", self.issued_tokens);
        self.tokens.insert(token.clone());

        token
    }
}

pub(crate) type Context = std::sync::Arc<std::sync::Mutex<ContextInner>>;

pub(crate) async fn serve_request(
    context: Context,
    req: hyper::Request<hyper::Body>,
) -> Result<hyper::Response<hyper::Body>, std::convert::Infallible> {
    let req = match ParsedRequest::from_http(req).await {
        Ok(req) => req,
        Err(response) => return Ok(response.to_http()),
    };

    if let Some(response) = crate::login::process_request(&req, &context) {
        return Ok(response.to_http());
    }

    if let Some(response) = crate::users::process_request(&req, &context) {
        return Ok(response.to_http());
    }

    log::debug!("{} not found", req.uri);
    Ok(Response::not_found().to_http())
}

pub(crate) fn get_param(captures: &regex::Captures<'_>, name: &str) -> Result<String, Response> {
    let value = &captures[name];

    let value = percent_encoding::percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| Response::bad_request(format!("bad {}", name)))?
        .to_string();

    Ok(value)
}
