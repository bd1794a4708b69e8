use clap::Parser;
use tracing_subscriber::EnvFilter;

use variant_state::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("variant_state=debug,info")
    } else {
        EnvFilter::new("variant_state=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Classify(args) => {
            cli::classify::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::DbCheck(args) => {
            cli::db_check::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
