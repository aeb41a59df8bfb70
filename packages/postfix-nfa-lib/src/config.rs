use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    enabled: bool,
    log_file: bool,
    log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
    pub fn get_enabled(&self) -> &bool {
        &self.enabled
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }
    pub fn get_log_file(&self) -> &bool {
        &self.log_file
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }
    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }
}

/// How the query result is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// A single token: the length, `INF` or `ERROR`.
    Plain,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    format: OutputFormat,
    graphviz: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Plain,
            graphviz: false,
        }
    }
}

impl OutputConfig {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
    pub fn get_format(&self) -> &OutputFormat {
        &self.format
    }

    pub fn with_graphviz(mut self, graphviz: bool) -> Self {
        self.graphviz = graphviz;
        self
    }
    pub fn get_graphviz(&self) -> &bool {
        &self.graphviz
    }
}

/// Top level configuration of a query run. Every key is optional, missing
/// keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    logger: LoggerConfig,
    output: OutputConfig,
}

impl QueryConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let canonic_path = std::fs::canonicalize(file_path)?;
        let content = std::fs::read_to_string(canonic_path)?;
        Self::from_toml(&content)
    }

    pub fn from_optional_file<P: AsRef<Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }
    pub fn get_logger(&self) -> &LoggerConfig {
        &self.logger
    }
    pub fn get_logger_mut(&mut self) -> &mut LoggerConfig {
        &mut self.logger
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
    pub fn get_output(&self) -> &OutputConfig {
        &self.output
    }
}
