pub mod analyzer;
pub mod cli;
pub mod config;
pub mod search;
pub mod tasks;

pub use analyzer::{parse_natural_language, Analysis, Analyzer, AnalyzerOptions, TaskInfo};
pub use config::{AppConfig, ConfigLoader, ConfigPaths};
