use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "recharge-cli", version, about = "Recharge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a social interaction
    Log(commands::log::LogArgs),
    /// Battery dashboard
    Status {
        /// Skip the implicit recovery tick before display
        #[arg(long)]
        no_tick: bool,
    },
    /// Detected behavioral patterns
    Patterns {
        /// Print raw JSON instead of the formatted list
        #[arg(long)]
        json: bool,
    },
    /// Recovery recommendations
    Recommend {
        /// Print raw JSON instead of the formatted list
        #[arg(long)]
        json: bool,
    },
    /// Personal limits derived from history
    Limits {
        /// Print raw JSON instead of the formatted list
        #[arg(long)]
        json: bool,
    },
    /// Ask the assistant about your battery
    Ask {
        /// Question to ask
        question: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log(args) => commands::log::run(args),
        Commands::Status { no_tick } => commands::status::run(no_tick),
        Commands::Patterns { json } => commands::patterns::run(json),
        Commands::Recommend { json } => commands::recommend::run(json),
        Commands::Limits { json } => commands::limits::run(json),
        Commands::Ask { question } => commands::ask::run(&question),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
