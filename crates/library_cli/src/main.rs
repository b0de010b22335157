//! `library` command: interactive menu or one-shot operations over the
//! library text files.

mod cli;
mod commands;
mod menu;
mod render;

use clap::Parser;
use cli::Cli;
use library_core::{
    default_log_level, init_logging, LibraryConfig, LibraryLoad, LibraryService, LoadReport,
};
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let config = LibraryConfig::in_dir(&cli.data_dir).with_return_policy(cli.return_policy);
    let mut library = LibraryService::from_config(&config);
    let load = library.load_all();
    report_load(&load);

    match cli.command {
        None => {
            info!("event=cli_session module=cli status=start mode=menu");
            let stdin = io::stdin();
            match menu::run(&mut library, stdin.lock(), io::stdout()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(command) => {
            let mut stdout = io::stdout().lock();
            match commands::run(command, &mut library, &mut stdout) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn start_logging(cli: &Cli) -> Result<(), String> {
    let log_dir = match &cli.log_dir {
        Some(dir) => absolute(dir)?,
        None => absolute(&cli.data_dir.join("logs"))?,
    };
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", log_dir.display()))?
        .to_string();
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir).map_err(|err| err.to_string())
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("cannot resolve `{}`: {err}", path.display()))
}

fn report_load(load: &LibraryLoad) {
    warn_on_load("books", &load.books);
    warn_on_load("members", &load.members);
}

fn warn_on_load(resource: &str, report: &LoadReport) {
    if report.read_failed {
        eprintln!("Error loading {resource}.");
    }
    for skipped in &report.skipped {
        eprintln!("Skipped malformed {resource} entry at {skipped}");
    }
}
