// Copyright (c) Microsoft. All rights reserved.

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(
    name = "provisionctl",
    version,
    about = "Command line user configuration for a hosted domain"
)]
pub(crate) struct Options {
    /// The Administrator Email address for the domain.
    #[arg(long = "adminlogin", value_name = "EMAIL")]
    pub(crate) admin_login: Option<String>,

    /// The Administrator Password for the domain.
    #[arg(long = "adminpassword", value_name = "PASSWORD")]
    pub(crate) admin_password: Option<String>,

    /// The Domain to configure.
    #[arg(short = 'd', long, value_name = "DOMAIN")]
    pub(crate) domain: Option<String>,

    /// The method to be used.
    #[arg(short = 'm', long, value_enum, value_name = "METHOD")]
    pub(crate) method: Option<Method>,

    /// The user in which to perform actions.
    #[arg(short = 'u', long, value_name = "USERNAME")]
    pub(crate) username: Option<String>,

    /// The password to be set for the user.
    #[arg(short = 'p', long, value_name = "PASSWORD")]
    pub(crate) password: Option<String>,

    /// Optional. Firstname of new user.
    #[arg(short = 'f', long = "firstname", value_name = "NAME")]
    pub(crate) first_name: Option<String>,

    /// Optional. Lastname of new user.
    #[arg(short = 'l', long = "lastname", value_name = "NAME")]
    pub(crate) last_name: Option<String>,

    /// Optional TOML settings file with endpoint, admin_login, domain and timeout_secs.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Base URL of the provisioning API.
    #[arg(long, value_name = "URL")]
    pub(crate) endpoint: Option<url::Url>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Method {
    Create,
    Retrieve,
    #[value(name = "retrieve_all")]
    RetrieveAll,
    Delete,
    Update,
}

/// A validated request for exactly one user operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Create {
        user_name: String,
        first_name: Option<String>,
        last_name: Option<String>,
        password: Option<String>,
    },
    Retrieve {
        user_name: String,
    },
    RetrieveAll,
    Delete {
        user_name: String,
    },
    Update {
        user_name: String,
        password: String,
    },
}

impl Command {
    /// Returns `None` when the options do not name a complete command, in which case usage should be shown.
    ///
    /// A method is always required, a username is required for everything but `retrieve_all`,
    /// and `update` also requires the new password.
    pub(crate) fn from_options(options: &Options) -> Option<Self> {
        let method = options.method?;

        if method == Method::RetrieveAll {
            return Some(Command::RetrieveAll);
        }

        let user_name = options.username.clone()?;

        let command = match method {
            Method::Create => Command::Create {
                user_name,
                first_name: options.first_name.clone(),
                last_name: options.last_name.clone(),
                password: options.password.clone(),
            },
            Method::Retrieve => Command::Retrieve { user_name },
            Method::Delete => Command::Delete { user_name },
            Method::Update => Command::Update {
                user_name,
                password: options.password.clone()?,
            },
            Method::RetrieveAll => Command::RetrieveAll,
        };

        Some(command)
    }
}
