use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use plugman::commands::{self, Env};
use plugman::PlugmanResult;

#[derive(Parser)]
#[command(name = "plugman")]
#[command(about = "Plugin catalog and dependency-aware activation manager")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase output verbosity (show debug messages)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Suppress informational output
    #[arg(short = 'Q', long = "quiet-all", global = true)]
    quiet_all: bool,

    /// Manager home directory (default: ~/.plugman)
    #[arg(long = "home", global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available plugins with their activation status
    List {
        /// Only show plugins whose name matches this regular expression
        #[arg(value_name = "PATTERN")]
        pattern: Option<String>,

        /// One line per plugin
        #[arg(short = 'c', long = "compact")]
        compact: bool,
    },

    /// Enable plugins (and everything they require)
    Enable {
        /// Plugin names to enable
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Disable explicitly-enabled plugins (and their dependents)
    Disable {
        /// Plugin names to disable
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Remove active plugins no longer required by the enabled set
    Prune,

    /// Generate shell completions
    #[command(hide = true)]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize structured logging based on verbosity flags
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet_all {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::debug!("plugman v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_command(cli) {
        plugman::cli_output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run_command(cli: Cli) -> PlugmanResult<()> {
    match cli.command {
        Commands::Completion { shell } => {
            // Used by install scripts for automatic completion setup
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
        command => {
            let env = Env::load(cli.home)?;
            match command {
                Commands::List { pattern, compact } => commands::run_list(&env, pattern, compact),
                Commands::Enable { names } => commands::run_enable(&env, names),
                Commands::Disable { names } => commands::run_disable(&env, names),
                Commands::Prune => commands::run_prune(&env),
                Commands::Completion { .. } => unreachable!("handled above"),
            }
        }
    }
}
