use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ModchainCli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// The path to the configuration file.
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        default_value = "config.toml"
    )]
    pub config: PathBuf,

    /// Increase output logging verbosity to TRACE level.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output logging (overrides --verbose).
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Clone, Debug, Parser)]
pub enum Commands {
    #[command(subcommand)]
    Genesis(GenesisCmd),
    Simulate(SimulateCmd),
    Query(QueryCmd),
    Tx(TxCmd),
}

#[derive(Clone, Debug, Parser)]
#[command(about = "Create and check genesis files")]
pub enum GenesisCmd {
    /// Print the default genesis state of every module.
    Default,
    /// Validate the genesis state in a file.
    Validate {
        /// The genesis file to validate.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Debug, Parser)]
#[command(about = "Run blocks on an in-memory chain and print its state")]
pub struct SimulateCmd {
    /// Genesis file to start from; the default genesis is used when omitted.
    #[arg(long, value_name = "FILE")]
    pub genesis: Option<PathBuf>,

    /// Number of blocks to run.
    #[arg(long, default_value_t = 1)]
    pub blocks: u64,
}

/// Module query commands are added to this command at runtime.
#[derive(Clone, Debug, Parser)]
#[command(about = "Query a module of an in-memory chain")]
pub struct QueryCmd {
    /// Genesis file to start from; the default genesis is used when omitted.
    #[arg(long, value_name = "FILE")]
    pub genesis: Option<PathBuf>,

    /// Number of blocks to run before querying.
    #[arg(long, default_value_t = 1)]
    pub blocks: u64,
}

/// Module transaction commands are added to this command at runtime.
#[derive(Clone, Debug, Parser)]
#[command(about = "List the transaction commands of the modules")]
pub struct TxCmd {}
