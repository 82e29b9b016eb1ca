mod server;

use std::io::{self, BufRead, IsTerminal};

use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use relink_config::{
    RelinkConfigData, config_exists, load_config, open_in_editor, resolve_server_addr,
    resolve_simple_output, resolve_spotify_credentials, resolve_timeout, save_config,
    set_config_value,
};
use relink_core::{ConversionResult, RelinkError, RelinkResult};
use relink_music::{MusicConverter, SpotifyCredentials};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Serve POST /convert over HTTP
    Serve {
        /// Listen address, e.g. 127.0.0.1:8080
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Open config file in editor
    Edit,
}

#[derive(Debug, Parser)]
#[command(name = "relink")]
#[command(version, about = "Convert Apple Music links to Spotify and back", long_about = None)]
struct Cli {
    /// Print only the converted link
    #[arg(long)]
    simple: bool,
    /// Print {"Link": "<url>"}
    #[arg(long, conflicts_with = "simple")]
    json: bool,
    /// Log requests and ranking decisions
    #[arg(short, long)]
    verbose: bool,
    #[arg(value_name = "URL")]
    url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {err}", style("Error:").red());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "relink=debug" } else { "relink=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> RelinkResult<()> {
    match cli.command {
        Some(Commands::Config { action }) => return handle_config_command(action),
        Some(Commands::Serve { addr }) => {
            let config = load_config()?;
            let converter = build_converter(&config)?;
            let addr = addr.unwrap_or_else(|| resolve_server_addr(&config));
            return server::serve(converter, &addr).await;
        }
        None => {}
    }

    let url = gather_input(cli.url)?;
    let mut config = load_config()?;
    if !config_exists()? && resolve_spotify_credentials(&config).is_err() {
        first_time_setup(&mut config)?;
    }

    let converter = build_converter(&config)?;
    let simple = cli.simple || resolve_simple_output(&config).unwrap_or(false);
    let result = converter.convert(&url).await?;

    if cli.json {
        let body = serde_json::json!({ "Link": result.target_url });
        println!("{body}");
    } else {
        print_result(&result, simple);
    }
    Ok(())
}

fn build_converter(config: &RelinkConfigData) -> RelinkResult<MusicConverter> {
    let (client_id, client_secret) = resolve_spotify_credentials(config)?;
    let timeout = resolve_timeout(config)?;
    MusicConverter::new(SpotifyCredentials::new(client_id, client_secret), timeout)
}

/// One link from the argument, or the first non-empty line of piped stdin.
fn gather_input(arg: Option<String>) -> RelinkResult<String> {
    if let Some(url) = arg {
        return Ok(url);
    }

    if io::stdin().is_terminal() {
        return Err(RelinkError::InvalidInput("no input URL provided".to_string()));
    }

    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line =
            line.map_err(|err| RelinkError::InvalidInput(format!("failed to read stdin: {err}")))?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    match lines.len() {
        0 => Err(RelinkError::InvalidInput("no input URL provided".to_string())),
        1 => Ok(lines.remove(0)),
        n => Err(RelinkError::InvalidInput(format!(
            "expected one URL on stdin, got {n}"
        ))),
    }
}

fn first_time_setup(config: &mut RelinkConfigData) -> RelinkResult<()> {
    let theme = ColorfulTheme::default();
    println!(
        "{} Let's configure your Spotify API credentials",
        style("First-time setup:").bold().cyan()
    );

    let client_id: String = Input::with_theme(&theme)
        .with_prompt("Spotify client id")
        .interact_text()
        .map_err(|err| RelinkError::InvalidInput(format!("prompt failed: {err}")))?;
    let client_secret = Password::with_theme(&theme)
        .with_prompt("Spotify client secret")
        .interact()
        .map_err(|err| RelinkError::InvalidInput(format!("prompt failed: {err}")))?;

    config.spotify.client_id = Some(client_id.trim().to_string());
    config.spotify.client_secret = Some(client_secret.trim().to_string());

    if let Err(err) = save_config(config) {
        warn!("could not save config: {err}");
        eprintln!("{} {err}", style("Warning:").yellow());
    } else {
        println!(
            "{} Config file created at ~/.relink/config.toml",
            style("✓").green()
        );
    }
    Ok(())
}

fn handle_config_command(action: ConfigAction) -> RelinkResult<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config()?;
            match get_nested_config_value(&config, &key) {
                Some(v) => println!("{key} = {v}"),
                None => println!("{key} = <null>"),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            set_config_value(&key, &value)?;
            let shown = if key == "spotify.client_secret" { "<hidden>" } else { value.as_str() };
            println!("{} Set {key} = {shown}", style("✓").green());
            Ok(())
        }
        ConfigAction::List => {
            let config = load_config()?;
            println!("Current configuration:");
            println!("\n[spotify]");
            println!(
                "client_id = {}",
                config.spotify.client_id.as_deref().unwrap_or("<null>")
            );
            println!(
                "client_secret = {}",
                if config.spotify.client_secret.is_some() { "<set>" } else { "<null>" }
            );
            println!("\n[http]");
            println!(
                "timeout_secs = {}",
                config
                    .http
                    .timeout_secs
                    .map(|secs| secs.to_string())
                    .unwrap_or_else(|| "<null>".to_string())
            );
            println!("\n[server]");
            println!("addr = {}", config.server.addr.as_deref().unwrap_or("<null>"));
            println!("\n[output]");
            println!("simple = {}", config.output.simple.unwrap_or(false));
            Ok(())
        }
        ConfigAction::Edit => open_in_editor(),
    }
}

fn get_nested_config_value(config: &RelinkConfigData, key_path: &str) -> Option<String> {
    let parts: Vec<&str> = key_path.split('.').collect();

    match parts.as_slice() {
        ["spotify", "client_id"] => config.spotify.client_id.clone(),
        ["spotify", "client_secret"] => config.spotify.client_secret.as_ref().map(|_| "<set>".to_string()),
        ["http", "timeout_secs"] => config.http.timeout_secs.map(|secs| secs.to_string()),
        ["server", "addr"] => config.server.addr.clone(),
        ["output", "simple"] => config.output.simple.map(|b| b.to_string()),
        _ => None,
    }
}

fn print_result(result: &ConversionResult, simple: bool) {
    if simple {
        println!("{}", result.target_url);
        return;
    }

    println!("{} {}", style("From:").cyan(), format_source_line(result));
    println!("  {} {}", style("URL:").dim(), result.source_url);
    println!(
        "{} {} {}",
        style("To:").green(),
        result.target_service,
        result.target_url
    );
}

fn format_source_line(result: &ConversionResult) -> String {
    let info = &result.info;
    match &info.track {
        Some(track) => format!(
            "{} - {track} / {} / {}",
            result.source_service, info.album, info.artist
        ),
        None => format!("{} - {} / {}", result.source_service, info.album, info.artist),
    }
}
