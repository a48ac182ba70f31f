// Copyright (c) Microsoft. All rights reserved.

use anyhow::Context;

/// Optional values read from the file given to `--config`.
///
/// Passwords are not accepted here.
#[derive(Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) endpoint: Option<url::Url>,
    pub(crate) admin_login: Option<String>,
    pub(crate) domain: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

impl Settings {
    pub(crate) fn load(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Settings::default()),
        };

        let settings: Settings = config_common::read_config(path)
            .with_context(|| format!("could not load settings from {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);

        Ok(settings)
    }

    /// The flag wins over the file, which wins over the public API.
    pub(crate) fn endpoint(&self, flag: Option<&url::Url>) -> anyhow::Result<url::Url> {
        if let Some(endpoint) = flag.or(self.endpoint.as_ref()) {
            return Ok(endpoint.clone());
        }

        let endpoint = provisioning_client_async::DEFAULT_ENDPOINT
            .parse()
            .context("could not parse default endpoint")?;
        Ok(endpoint)
    }

    /// `None` unless `timeout_secs` is set, in which case every request is bounded by it.
    pub(crate) fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }
}
