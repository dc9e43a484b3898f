//! earcheck CLI - Command-line interface for the discrimination battery
//!
//! This binary runs pitch, rhythm, and melody sessions on the terminal and
//! exposes the stimulus generators and configuration tooling behind them.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use earcheck_cli::commands;
use earcheck_cli::commands::generate::StimulusKind;
use earcheck_spec::TaskKind;

mod cli_args;

use cli_args::{Cli, Commands, StimulusArg, TaskArg};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            task,
            config,
            seed,
            record,
            json,
        } => commands::run::run(
            task_kind(task),
            config.as_deref(),
            seed,
            record.as_deref(),
            json,
        ),
        Commands::Generate {
            kind,
            length,
            seed,
            count,
            config,
            json,
        } => commands::generate::run(
            stimulus_kind(kind),
            length,
            seed,
            count,
            config.as_deref(),
            json,
        ),
        Commands::Check { notes } => commands::check::run(&notes),
        Commands::Scales { pitch_class } => commands::scales::run(&pitch_class),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::InitConfig { output } => commands::init_config::run(output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

/// Installs the stderr log subscriber. `-v` flags take precedence over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn task_kind(task: TaskArg) -> TaskKind {
    match task {
        TaskArg::Pitch => TaskKind::Pitch,
        TaskArg::Rhythm => TaskKind::Rhythm,
        TaskArg::Melody => TaskKind::Melody,
    }
}

fn stimulus_kind(kind: StimulusArg) -> StimulusKind {
    match kind {
        StimulusArg::Melody => StimulusKind::Melody,
        StimulusArg::Rhythm => StimulusKind::Rhythm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "earcheck", "run", "melody", "--seed", "42", "--record", "out.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                task,
                config,
                seed,
                record,
                json,
            } => {
                assert_eq!(task, TaskArg::Melody);
                assert!(config.is_none());
                assert_eq!(seed, Some(42));
                assert_eq!(record.as_deref(), Some("out.wav"));
                assert!(!json);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_task() {
        assert!(Cli::try_parse_from(["earcheck", "run", "timbre"]).is_err());
    }

    #[test]
    fn test_cli_parses_generate_with_count() {
        let cli = Cli::try_parse_from([
            "earcheck", "generate", "rhythm", "--length", "6", "-n", "3", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                kind,
                length,
                count,
                json,
                seed,
                ..
            } => {
                assert_eq!(kind, StimulusArg::Rhythm);
                assert_eq!(length, 6);
                assert_eq!(count, 3);
                assert!(json);
                assert!(seed.is_none());
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_generate_requires_length() {
        assert!(Cli::try_parse_from(["earcheck", "generate", "melody"]).is_err());
    }

    #[test]
    fn test_cli_check_requires_notes() {
        assert!(Cli::try_parse_from(["earcheck", "check"]).is_err());
        let cli = Cli::try_parse_from(["earcheck", "check", "C4", "7", "E4"]).unwrap();
        match cli.command {
            Commands::Check { notes } => assert_eq!(notes, vec!["C4", "7", "E4"]),
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let cli = Cli::try_parse_from(["earcheck", "scales", "F#", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scales { pitch_class } => assert_eq!(pitch_class, "F#"),
            _ => panic!("expected scales command"),
        }
    }

    #[test]
    fn test_cli_parses_init_config() {
        let cli = Cli::try_parse_from(["earcheck", "init-config", "-o", "battery.json"]).unwrap();
        match cli.command {
            Commands::InitConfig { output } => assert_eq!(output.as_deref(), Some("battery.json")),
            _ => panic!("expected init-config command"),
        }
    }
}
