// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod client;
pub use client::Client;

mod session;
pub use session::Session;

pub const DEFAULT_ENDPOINT: &str = "https://apps-apis.google.com";

type CloudConnector = hyper_openssl::HttpsConnector<hyper::client::HttpConnector>;

const ENCODE_SET: &percent_encoding::AsciiSet = &http_common::PATH_SEGMENT_ENCODE_SET.add(b'=');

/// Appends `path` to the path of `endpoint`.
fn endpoint_uri(endpoint: &url::Url, path: &str) -> url::Url {
    let mut uri = endpoint.clone();

    let base = uri.path().trim_end_matches('/').to_owned();
    uri.set_path(&format!("{}/{}", base, path));
    uri.set_query(None);

    uri
}
