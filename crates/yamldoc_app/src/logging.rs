//! Logger setup for the `yamldoc` binary.
//!
//! Terminal output goes to stderr so stdout carries only the written paths.
//! File output goes to `./yamldoc.log`. `YAMLDOC_LOG` (e.g. `debug`) sets
//! the level; the default is `info`.

use std::env;
use std::fs::File;

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./yamldoc.log";
const LEVEL_ENV: &str = "YAMLDOC_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogDestination {
    File,
    #[default]
    Terminal,
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

pub fn initialize(destination: LogDestination) {
    let level = level_from_env();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            build_config(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, build_config(), file)),
            Err(err) => eprintln!("yamldoc: could not create log file {LOG_FILE}: {err}"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn level_from_env() -> LevelFilter {
    env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
