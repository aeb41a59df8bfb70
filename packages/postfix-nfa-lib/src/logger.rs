use std::{
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
    sync::Mutex,
};

use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WAR",
            LogLevel::Error => "ERR",
        }
    }

    pub fn colored_tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => self.tag().bright_cyan(),
            LogLevel::Info => self.tag().bright_green(),
            LogLevel::Warn => self.tag().yellow(),
            LogLevel::Error => self.tag().bright_red(),
        }
    }

    fn severity(&self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warn => 2,
            LogLevel::Error => 3,
        }
    }

    /// Whether a message of this level passes a logger configured with
    /// `threshold`.
    pub fn show(&self, threshold: &LogLevel) -> bool {
        self.severity() >= threshold.severity()
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// Run logger for compilations and queries.
///
/// Messages at or above the configured level go to stderr with a colored
/// prefix. Stdout is never touched, it carries the query result. If a log file
/// is attached, every message is mirrored into it without colors regardless of
/// the level.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    name: String,
    file: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    pub fn new(level: LogLevel, name: String) -> Self {
        Logger {
            level,
            name,
            file: None,
        }
    }

    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> anyhow::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.file = Some(Mutex::new(BufWriter::new(file)));

        Ok(self)
    }

    /// Builds the logger described by `config`, or `None` if logging is
    /// disabled.
    pub fn from_config(config: &LoggerConfig, name: String) -> anyhow::Result<Option<Self>> {
        if !*config.get_enabled() {
            return Ok(None);
        }

        let logger = Logger::new(*config.get_log_level(), name);

        if *config.get_log_file() {
            let path = format!(
                "./logs/query_run_{}.txt",
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            );
            return logger.with_log_file(path).map(Some);
        }

        Ok(Some(logger))
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    fn prefix(&self, level: &LogLevel) -> String {
        format!(
            "[{}] {}",
            level.colored_tag(),
            format!("{}:", self.name).dimmed()
        )
    }

    fn prefix_no_color(&self, level: &LogLevel) -> String {
        format!("[{}] {}:", level.tag(), self.name)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.writeln_to_file(&format!("{} {}", self.prefix_no_color(&level), message));

        if level.show(&self.level) {
            eprintln!("{} {}", self.prefix(&level), message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn empty(&self, level: LogLevel) {
        self.writeln_to_file("");
        if level.show(&self.level) {
            eprintln!();
        }
    }

    /// Write failures are dropped, a broken log file must not abort a query.
    fn writeln_to_file(&self, line: &str) {
        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = writeln!(f, "{}", line);
        }
    }

    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder::new(name, self)
    }
}

#[derive(Debug, Clone)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(name: &'a str, logger: &'a Logger) -> Self {
        ObjectBuilder {
            logger,
            name,
            fields: vec![],
        }
    }

    pub fn add_field(mut self, name: &'a str, value: &str) -> Self {
        self.fields.push((name, value.to_string()));

        self
    }

    fn build(&self) -> String {
        let mut result = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            result.push_str(&format!("\n  {}: {}", name, value));
        }
        result.push_str("\n}");
        result
    }

    pub fn log(&self, level: LogLevel) {
        self.logger.log(level, &self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter() {
        assert!(LogLevel::Error.show(&LogLevel::Warn));
        assert!(LogLevel::Warn.show(&LogLevel::Warn));
        assert!(!LogLevel::Info.show(&LogLevel::Warn));
        assert!(!LogLevel::Debug.show(&LogLevel::Info));

        for level in LogLevel::ALL {
            assert!(level.show(&LogLevel::Debug));
        }
    }

    #[test]
    fn parse_level() {
        assert_eq!("DBG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn object_builder_layout() {
        let logger = Logger::new(LogLevel::Error, "test".into());
        let object = logger
            .object("Query")
            .add_field("symbol", "a")
            .add_field("length", "3");

        assert_eq!(object.build(), "Query {\n  symbol: a\n  length: 3\n}");
    }

    #[test]
    fn log_file_mirrors_all_levels() {
        let path = std::env::temp_dir().join(format!(
            "postfix_nfa_logger_test_{}.txt",
            std::process::id()
        ));

        {
            let logger = Logger::new(LogLevel::Error, "test".into())
                .with_log_file(&path)
                .unwrap();
            logger.debug("hidden on stderr");
            logger.info("also hidden");
        }

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            content,
            "[DBG] test: hidden on stderr\n[INF] test: also hidden\n"
        );
    }
}
