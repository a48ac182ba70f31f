// Copyright (c) Microsoft. All rights reserved.

use provisioning_common::Credentials;

use crate::prompt::{prompt, prompt_secret, Reader};

/// Gathers the administrator credentials from flags, then settings, then the user.
pub(crate) fn collect(
    options: &crate::options::Options,
    settings: &crate::settings::Settings,
    stdin: &mut impl Reader,
) -> anyhow::Result<Credentials> {
    let email = match options.admin_login.as_ref().or(settings.admin_login.as_ref()) {
        Some(email) => email.clone(),
        None => prompt(stdin, "Administrator Email: ")?,
    };

    let domain = match options.domain.as_ref().or(settings.domain.as_ref()) {
        Some(domain) => domain.clone(),
        None => prompt(stdin, "Domain: ")?,
    };

    let password = match &options.admin_password {
        Some(password) => password.clone(),
        None => prompt_secret(stdin, "Please Authenticate: ")?,
    };

    Ok(Credentials {
        email,
        domain,
        password,
    })
}
