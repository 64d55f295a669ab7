use crate::binder::Params;
use crate::client::Client;
use crate::config::ClientOptions;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for martian
#[derive(Parser, Debug)]
#[command(name = "martian")]
#[command(about = "Resolve named API routes to URLs", long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of MARTIAN_LOG_LEVEL
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the routes of an API description
    Routes {
        /// Path to the API description (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// API root the routes resolve under
        #[arg(short, long, default_value = "")]
        root: String,
    },
    /// Print the URL of a route
    UrlFor(ResolveArgs),
    /// Print the request descriptor of a route as JSON
    Request(ResolveArgs),
}

/// Arguments shared by `url-for` and `request`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the API description (YAML or JSON)
    #[arg(short, long)]
    pub spec: PathBuf,

    /// API root, e.g. https://api.example.com
    #[arg(short, long, default_value = "")]
    pub root: String,

    /// Route name
    #[arg(long)]
    pub route: String,

    /// Parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,

    /// YAML options file; MARTIAN_* environment variables apply otherwise
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `key=value`; the value is JSON when it parses as JSON, else a string.
pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn options(config: Option<&PathBuf>) -> anyhow::Result<ClientOptions> {
    match config {
        Some(path) => ClientOptions::from_yaml_file(path),
        None => Ok(ClientOptions::from_env()),
    }
}

/// Execute a parsed command, writing its output to `out`.
pub fn run_cli(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Routes { spec, root } => {
            let client = Client::from_path(root, &spec, ClientOptions::from_env())?;
            for summary in client.explore() {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    summary.name,
                    summary.method,
                    summary.path,
                    summary.summary.as_deref().unwrap_or("")
                )?;
            }
            Ok(())
        }
        Commands::UrlFor(args) => {
            let (client, params) = prepare(&args)?;
            let url = client.url_for_with(&args.route, &params)?;
            writeln!(out, "{url}")?;
            Ok(())
        }
        Commands::Request(args) => {
            let (client, params) = prepare(&args)?;
            let request = client.request_for(&args.route, &params)?;
            let json = serde_json::to_string_pretty(&request)
                .context("failed to serialize request descriptor")?;
            writeln!(out, "{json}")?;
            Ok(())
        }
    }
}

fn prepare(args: &ResolveArgs) -> anyhow::Result<(Client, Params)> {
    let options = options(args.config.as_ref())?;
    let client = Client::from_path(args.root.clone(), &args.spec, options)?;
    let params = args.params.iter().cloned().collect();
    Ok((client, params))
}
