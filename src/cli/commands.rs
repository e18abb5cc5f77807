//! Command dispatch

use std::io::{self, Read};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{CodeReport, CodingService};
use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::ToTermTree;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    if !settings.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Commands::Codes {
            input,
            no_frequencies,
        }) => cmd_codes(&settings, input, !no_frequencies && settings.show_frequencies),
        Some(Commands::Tree { input }) => cmd_tree(&settings, input),
        Some(Commands::Stats { input }) => cmd_stats(&settings, input),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e)),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(delimiter) = cli.delimiter {
        settings.delimiter = delimiter;
        settings
            .validate()
            .map_err(|e| CliError::InvalidArgs(format!("--delimiter: {e}")))?;
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

/// Read the frequency list from the argument, a file, or stdin.
fn read_input(args: &InputArgs) -> CliResult<String> {
    if let Some(path) = &args.file {
        return Ok(std::fs::read_to_string(path).with_path_context("read input", path)?);
    }
    match args.input.as_deref() {
        Some(text) if text != "-" => Ok(text.to_string()),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::io("read stdin", e))?;
            Ok(buf)
        }
    }
}

fn run(settings: &Settings, args: &InputArgs) -> CliResult<CodeReport> {
    let input = read_input(args)?;
    Ok(CodingService::new(settings).run(&input)?)
}

#[instrument(skip(settings))]
fn cmd_codes(settings: &Settings, args: &InputArgs, show_frequencies: bool) -> CliResult<()> {
    let report = run(settings, args)?;
    if show_frequencies {
        output::info(&report.alphabet.frequencies.iter().join(" "));
    }
    for entry in &report.table {
        output::code_line(&entry.symbol, &entry.code);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: &Settings, args: &InputArgs) -> CliResult<()> {
    let report = run(settings, args)?;
    let rendered = report
        .tree
        .to_term_tree()
        .map_err(ApplicationError::from)?;
    output::info(&rendered);
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_stats(settings: &Settings, args: &InputArgs) -> CliResult<()> {
    let report = run(settings, args)?;
    let table = &report.table;
    output::action("symbols", &table.len());
    output::action("total frequency", &report.total_frequency());
    output::action("weighted path length", &table.weighted_length());
    match table.average_length() {
        Some(avg) => output::action("average code length", &format!("{avg:.4}")),
        None => output::action("average code length", "n/a"),
    }
    output::action("max code length", &table.max_length());
    output::action("tree depth", &report.tree.depth());
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no config directory available"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
