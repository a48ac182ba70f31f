// Copyright (c) Microsoft. All rights reserved.

#[derive(Debug)]
pub enum Error {
    ReadConfig(std::path::PathBuf, std::io::Error),
    ParseConfig(std::path::PathBuf, toml::de::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReadConfig(path, _) => {
                write!(f, "could not read config from {}", path.display())
            }
            Error::ParseConfig(path, _) => {
                write!(f, "could not parse config from {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadConfig(_, err) => Some(err),
            Error::ParseConfig(_, err) => Some(err),
        }
    }
}
