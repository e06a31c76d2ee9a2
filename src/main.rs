use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use panel_effects::device::{TOKEN_ENV, URL_ENV};
use panel_effects::*;
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Device API base URL, e.g. http://192.168.1.40:16021/api/v1
    #[arg(long, env = URL_ENV)]
    url: String,
    /// Auth token issued by the device
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: String,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List effect names
    List,
    /// Show the active effect
    Current,
    /// Activate an effect
    Select {
        name: String,
    },
    /// Print the full definition of an effect as JSON
    Show {
        name: String,
    },
    /// Print every effect definition as JSON
    Dump,
    /// Rename an effect
    Rename {
        name: String,
        new_name: String,
    },
    /// Delete an effect
    Delete {
        name: String,
    },
    /// Create or overwrite an effect from a JSON definition
    Add {
        name: String,
        /// File holding the effect definition
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Stream a custom animation, e.g. "1 12 1 255 0 0 0 5"
    Display {
        animation: String,
        /// Loop the animation
        #[arg(short, long = "loop")]
        looped: bool,
    },
    /// Show an effect for a while, then revert
    Flash {
        name: String,
        /// How long to show the effect
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,
    },
    /// Send a raw JSON payload under "write"
    Raw {
        payload: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| EnvFilter::new("panel_effects=info,panelctl=info")),
        )
        .compact()
        .init();

    color_eyre::install()?;

    let cli = Cli::parse();
    debug!("Parsed command line arguments");

    let config = DeviceConfig::new(cli.url, cli.token)?;
    let transport = HttpTransport::with_timeout(Duration::from_secs(cli.timeout))?;
    let effects = EffectsClient::with_transport(&config, transport);

    if let Err(e) = run(&effects, cli.command).await {
        error!("Command failed: {}", e);
        return Err(e);
    }

    Ok(())
}

#[instrument(skip_all)]
async fn run(effects: &EffectsClient, command: Commands) -> Result<()> {
    match command {
        Commands::List => {
            for name in effects.list().await? {
                println!("{name}");
            }
        }
        Commands::Current => {
            println!("{}", effects.get().await?);
        }
        Commands::Select { name } => {
            effects.select(&name).await?;
            info!("Selected {}", name);
        }
        Commands::Show { name } => {
            let effect = effects.fetch_effect(&name).await?;
            println!("{}", serde_json::to_string_pretty(&effect)?);
        }
        Commands::Dump => {
            let all = effects.fetch_all_effects().await?;
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
        Commands::Rename { name, new_name } => {
            effects.rename(&name, &new_name).await?;
            info!("Renamed {} to {}", name, new_name);
        }
        Commands::Delete { name } => {
            effects.delete(&name).await?;
            info!("Deleted {}", name);
        }
        Commands::Add { name, file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .wrap_err_with(|| format!("reading {}", file.display()))?;
            let data: EffectData = serde_json::from_str(&text)
                .wrap_err_with(|| format!("parsing effect definition in {}", file.display()))?;
            effects.add_or_update(data, &name).await?;
            info!("Saved {}", name);
        }
        Commands::Display { animation, looped } => {
            // Parse first so typos fail here rather than on the device
            let animation: StreamAnimation = animation.parse()?;
            debug!("Streaming {} panels", animation.panels.len());
            effects.display_animation(&animation, looped).await?;
        }
        Commands::Flash { name, seconds } => {
            effects
                .display_temporary(&name, Duration::from_secs(seconds))
                .await?;
            info!("Showing {} for {}s", name, seconds);
        }
        Commands::Raw { payload } => {
            let payload: serde_json::Value =
                serde_json::from_str(&payload).wrap_err("payload is not valid JSON")?;
            effects.raw_write(payload).await?;
        }
    }

    Ok(())
}
