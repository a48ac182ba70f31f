// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

const LOG_LEVEL_ENV_VAR: &str = "PROVISION_LOG";

/// Installs the process-wide logger.
///
/// Records at or above `default_level` are written to stderr unless `PROVISION_LOG` overrides the filter.
pub fn try_init(default_level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    builder(default_level).try_init()
}

fn builder(default_level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    builder
        .format(|fmt, record| {
            use std::io::Write;

            let timestamp = fmt.timestamp();

            if record.level() >= log::Level::Debug {
                writeln!(
                    fmt,
                    "<{}>{} [{}] - [{}] {}",
                    to_syslog_level(record.level()),
                    timestamp,
                    level_tag(record.level()),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(
                    fmt,
                    "<{}>{} [{}] - {}",
                    to_syslog_level(record.level()),
                    timestamp,
                    level_tag(record.level()),
                    record.args()
                )
            }
        })
        .filter_level(default_level)
        .parse_env(LOG_LEVEL_ENV_VAR);

    builder
}

fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "TRCE",
        log::Level::Debug => "DBUG",
        log::Level::Info => "INFO",
        log::Level::Warn => "WARN",
        log::Level::Error => "ERR!",
    }
}

fn to_syslog_level(level: log::Level) -> i8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug | log::Level::Trace => 7,
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn syslog_levels() {
        assert_eq!(super::to_syslog_level(log::Level::Error), 3);
        assert_eq!(super::to_syslog_level(log::Level::Warn), 4);
        assert_eq!(super::to_syslog_level(log::Level::Info), 6);
        assert_eq!(super::to_syslog_level(log::Level::Debug), 7);
        assert_eq!(super::to_syslog_level(log::Level::Trace), 7);
    }

    #[test]
    fn level_tags_are_four_chars() {
        for level in [
            log::Level::Error,
            log::Level::Warn,
            log::Level::Info,
            log::Level::Debug,
            log::Level::Trace,
        ] {
            assert_eq!(super::level_tag(level).len(), 4);
        }
    }
}
