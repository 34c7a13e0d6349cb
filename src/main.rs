mod app;
mod command;
mod config;
mod consts;
mod game;
mod util;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use lexopt::prelude::*;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Arguments::from_env() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ringsnake: {e}");
            return ExitCode::from(2);
        }
    };
    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ringsnake: {e:#}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = App::new(config.theme).run(terminal);
    ratatui::restore();
    io_exit(r)
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

/// Parsed command-line arguments
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    /// Path given with `--config`, if any
    config_file: Option<PathBuf>,
}

impl Arguments {
    /// Parse command-line arguments.  Returns `Ok(None)` if `--help` or
    /// `--version` was given & handled.
    fn from_env() -> Result<Option<Arguments>, lexopt::Error> {
        let mut args = Arguments::default();
        let mut parser = lexopt::Parser::from_env();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => {
                    args.config_file = Some(PathBuf::from(parser.value()?));
                }
                Short('h') | Long("help") => {
                    println!("Usage: ringsnake [-c <file>|--config <file>]");
                    println!();
                    println!("Classic Snake on a walled 32×16 grid");
                    println!();
                    println!("Options:");
                    println!("  -c <file>, --config <file>    Read settings from <file>");
                    println!("  -h, --help                    Display this help message and exit");
                    println!("  -V, --version                 Show the program version and exit");
                    return Ok(None);
                }
                Short('V') | Long("version") => {
                    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                    return Ok(None);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Some(args))
    }

    /// Load the configuration: from the `--config` path if one was given (in
    /// which case the file must exist), otherwise from the default path
    /// (which need not)
    fn config(&self) -> anyhow::Result<Config> {
        if let Some(ref path) = self.config_file {
            Config::load(path, false)
        } else {
            Config::load(&Config::default_path()?, true)
        }
        .context("failed to load configuration")
    }
}
