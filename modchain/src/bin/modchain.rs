//! Main entry point for Cli

#![deny(warnings, missing_docs, trivial_casts, unused_qualifications)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::{ArgMatches, Command, FromArgMatches};
use modchain::cli::command::{Commands, GenesisCmd, ModchainCli};
use modchain::cli::{build_command, module_command_path};
use modchain::config::{load_config, Config};
use modchain::modules::error::Error;
use modchain::modules::manager::BasicManager;
use modchain::{basic_manager, load_genesis, Simulation};
use serde::Serialize;
use tracing::metadata::LevelFilter;

fn main() -> ExitCode {
    let modules = match basic_manager() {
        Ok(modules) => modules,
        Err(e) => {
            eprintln!("invalid module set: {e}");
            return ExitCode::FAILURE;
        }
    };

    let matches = build_command(&modules).get_matches();
    let cli = ModchainCli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let cfg = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("cannot load config {}: {e}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    let log_level = if cli.quiet {
        LevelFilter::OFF
    } else if cli.verbose {
        LevelFilter::TRACE
    } else {
        cfg.global.log_level.clone().into()
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    match run(&cli, &cfg, &modules, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(
    cli: &ModchainCli,
    cfg: &Config,
    modules: &BasicManager,
    matches: &ArgMatches,
) -> Result<(), Error> {
    match &cli.command {
        Commands::Genesis(GenesisCmd::Default) => print_json(&modules.default_genesis()),
        Commands::Genesis(GenesisCmd::Validate { file }) => {
            let genesis = load_genesis(Some(file), modules)?;
            modules.validate_genesis(&genesis)?;
            println!("genesis file {} is valid", file.display());
            Ok(())
        }
        Commands::Simulate(cmd) => {
            let genesis = load_genesis(cmd.genesis.as_deref(), modules)?;
            let report = Simulation::run(cfg, &genesis, cmd.blocks)?.report()?;
            print_json(&report)
        }
        Commands::Query(cmd) => {
            let path = matches
                .subcommand_matches("query")
                .and_then(module_command_path)
                .ok_or(Error::NotHandled)?;
            let genesis = load_genesis(cmd.genesis.as_deref(), modules)?;
            let simulation = Simulation::run(cfg, &genesis, cmd.blocks)?;
            let response = simulation.app.query(&path, &[])?;
            println!("{}", String::from_utf8_lossy(&response));
            Ok(())
        }
        Commands::Tx(_) => match matches.subcommand_matches("tx").and_then(module_command_path) {
            Some(path) => Err(Error::Custom {
                reason: format!("cannot send `{path}`: no transport is available"),
            }),
            None => {
                let tx = modules.add_tx_commands(Command::new("tx"));
                if tx.get_subcommands().next().is_none() {
                    println!("no module contributes transaction commands");
                }
                for command in tx.get_subcommands() {
                    println!("{}", command.get_name());
                }
                Ok(())
            }
        },
    }
}

fn print_json(value: &impl Serialize) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::Custom {
        reason: e.to_string(),
    })?;
    println!("{json}");
    Ok(())
}
