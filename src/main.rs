mod automaton;
mod cli;
mod compile;
mod config;
mod error;
mod explore;
mod pipeline;
mod render;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::ExplorerConfig;
use pipeline::Explorer;
use ui::{EnumerationProgress, Reporter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let reporter = Reporter::new(cli.json);
    match run(cli, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            reporter.error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli, reporter: &Reporter) -> Result<()> {
    let mut config = ExplorerConfig::load(cli.config.as_deref())?;
    cli.command.apply_overrides(&mut config);

    let explorer = Explorer::from_config(&config);
    let dfa = explorer.build_dfa(cli.command.regex())?;

    match cli.command {
        Command::Build { .. } => reporter.print_automaton(&dfa),
        Command::Check { words, .. } => {
            let results: Vec<(String, bool)> = words
                .into_iter()
                .map(|word| {
                    let accepted = dfa.accepts_str(&word);
                    (word, accepted)
                })
                .collect();
            reporter.print_checks(&results);
        }
        Command::Sample { .. } => {
            let samples = explorer.sample(&dfa, config.num_samples, config.max_length);
            reporter.print_samples(&samples);
        }
        Command::Enumerate { regex, .. } => {
            let progress =
                EnumerationProgress::start(&regex, config.max_enum_length, reporter.is_json());
            let result = explorer.enumerate_accepted(&dfa, config.max_enum_length);
            progress.finish();
            reporter.print_enumeration(&result?);
        }
        Command::Dot { output, .. } => match output {
            Some(path) => {
                render::write_dot(&dfa, &path)?;
                reporter.wrote(&path);
            }
            None => reporter.print_dot(&render::to_dot(&dfa)),
        },
    }

    Ok(())
}
