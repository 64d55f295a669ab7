use clap::Parser;
use martian::cli::{run_cli, Cli};
use martian::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let _guard = init_logging_with_config(&log_config)?;

    run_cli(cli, &mut std::io::stdout().lock())
}
