// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;

use crate::error::Error;

/// Reads the TOML file at `config_path` and deserializes it into `TConfig`.
pub fn read_config<TConfig>(config_path: &std::path::Path) -> Result<TConfig, Error>
where
    TConfig: serde::de::DeserializeOwned,
{
    let config = std::fs::read_to_string(config_path)
        .map_err(|err| Error::ReadConfig(config_path.to_owned(), err))?;

    parse_config(config_path, &config)
}

fn parse_config<TConfig>(config_path: &std::path::Path, config: &str) -> Result<TConfig, Error>
where
    TConfig: serde::de::DeserializeOwned,
{
    toml::from_str(config).map_err(|err| Error::ParseConfig(config_path.to_owned(), err))
}
