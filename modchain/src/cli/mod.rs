pub mod command;

use clap::{ArgMatches, Command, CommandFactory};
use modchain_modules::manager::BasicManager;
use modchain_modules::types::COMMAND_ARGS;

use self::command::ModchainCli;

/// The full command line: the built-in commands plus the query and tx commands of `modules`.
pub fn build_command(modules: &BasicManager) -> Command {
    ModchainCli::command()
        .mut_subcommand("query", |query| {
            modules
                .add_query_commands(query)
                .subcommand_required(true)
        })
        .mut_subcommand("tx", |tx| modules.add_tx_commands(tx))
}

/// Turns the matches of a module command into a route path: `<module>/<command>/<args>...`.
pub fn module_command_path(matches: &ArgMatches) -> Option<String> {
    let (module, mut current) = matches.subcommand()?;
    let mut segments = vec![module.to_owned()];

    while let Some((name, sub)) = current.subcommand() {
        segments.push(name.to_owned());
        current = sub;
    }
    if let Ok(Some(args)) = current.try_get_many::<String>(COMMAND_ARGS) {
        segments.extend(args.cloned());
    }

    Some(segments.join("/"))
}
