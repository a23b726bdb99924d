use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::BTreeMap, mem};
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("Logger spec parsing error: {0}")]
    ParseLoggerSpecError(String),

    #[error("Appender {0} was already consumed")]
    AppenderConsumed(&'static str),

    #[error("Logger configuration error: {0}")]
    ConfigError(String),

    #[error("Logger initialization error: {0}")]
    InitError(String),
}

#[derive(Clone)]
pub(super) struct LoggerSpec {
    pub name: String,
    pub level: LevelFilter,
    pub appenders: Vec<&'static str>,
}

impl LoggerSpec {
    pub fn new(name: String, level: LevelFilter, appenders: Vec<&'static str>) -> Self {
        Self { name, level, appenders }
    }

    pub fn logger(&self) -> Logger {
        Logger::builder().appenders(self.appenders.iter().map(|x| x.to_string())).build(self.name.clone(), self.level)
    }
}

pub(super) struct Loggers {
    loggers: Vec<LoggerSpec>,
    root_level: LevelFilter,
}

impl Loggers {
    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    pub fn items(&self) -> impl IntoIterator<Item = Logger> + '_ {
        self.loggers.iter().map(|x| x.logger())
    }
}

/// Parses `level,module=level,...` filter expressions.
pub(super) struct Builder {
    appenders: Vec<&'static str>,
    // ordered so that the resulting config is stable
    loggers: BTreeMap<String, LevelFilter>,
    root_level: Option<LevelFilter>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { appenders: vec![], loggers: BTreeMap::new(), root_level: None }
    }

    pub fn from_expression(expression: &str) -> Self {
        let mut builder = Self::new();
        builder.parse_specs(expression);
        builder
    }

    fn parse_specs(&mut self, expression: &str) {
        for spec in expression.split(',').map(|x| x.trim()).filter(|x| !x.is_empty()) {
            let mut parts = spec.split('=');
            match (parts.next(), parts.next().map(|x| x.trim()), parts.next()) {
                (Some(part0), None, None) => match part0.parse() {
                    Ok(level) => {
                        self.root_level.replace(level);
                    }
                    Err(_) => {
                        self.loggers.insert(part0.to_string(), LevelFilter::max());
                    }
                },
                (Some(part0), Some(""), None) => {
                    self.loggers.insert(part0.to_string(), LevelFilter::max());
                }
                (Some(part0), Some(part1), None) => match part1.parse() {
                    Ok(level) => {
                        self.loggers.insert(part0.to_string(), level);
                    }
                    Err(_) => eprintln!("Ignoring invalid logging spec '{}'", LogError::ParseLoggerSpecError(part1.to_string())),
                },
                _ => eprintln!("Ignoring invalid logging spec '{}'", LogError::ParseLoggerSpecError(spec.to_string())),
            }
        }
    }

    pub fn appenders(mut self, appenders: impl Iterator<Item = &'static str>) -> Self {
        self.appenders = appenders.collect();
        self
    }

    pub fn build(mut self) -> Loggers {
        let appenders = mem::take(&mut self.appenders);
        let loggers = mem::take(&mut self.loggers)
            .into_iter()
            .map(|(name, level)| LoggerSpec::new(name, level, appenders.clone()))
            .collect::<Vec<_>>();
        Loggers { loggers, root_level: self.root_level.take().unwrap_or(LevelFilter::Error) }
    }
}
