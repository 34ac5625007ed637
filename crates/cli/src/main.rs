mod config_commands;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    switchboard_gateway::server::{GatewayOptions, start_gateway},
    switchboard_plugins::{CommandRegistry, EventRegistry, NO_DESCRIPTION, bundled},
};

#[derive(Parser)]
#[command(
    name = "switchboard",
    about = "Switchboard — chat command dispatch gateway",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    // Gateway arguments (used when no subcommand is provided, or with `gateway`)
    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Custom config directory (overrides default ~/.config/switchboard/).
    #[arg(long, global = true, env = "SWITCHBOARD_CONFIG_DIR")]
    config_dir: Option<std::path::PathBuf>,
    /// Custom data directory (overrides default data dir).
    #[arg(long, global = true, env = "SWITCHBOARD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server (default when no subcommand is provided).
    Gateway,
    /// List the registered command and event plugins.
    Plugins,
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Build both registries from the bundled plugin set.
fn registries() -> anyhow::Result<(CommandRegistry, EventRegistry)> {
    let commands = CommandRegistry::from_handlers(bundled::commands())?;
    let events = EventRegistry::from_handlers(bundled::events())?;
    Ok((commands, events))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "switchboard starting");

    match cli.command {
        // Default: start the gateway when no subcommand is provided
        None | Some(Commands::Gateway) => {
            // Apply directory overrides before loading config
            if let Some(ref dir) = cli.config_dir {
                switchboard_config::set_config_dir(dir.clone());
            }
            if let Some(ref dir) = cli.data_dir {
                switchboard_config::set_data_dir(dir.clone());
            }

            let config = switchboard_config::discover_and_load();
            let (commands, events) = registries()?;

            // CLI args override config values
            let opts = GatewayOptions {
                bind: cli.bind,
                port: cli.port,
            };
            start_gateway(opts, config, commands, events).await
        },
        Some(Commands::Plugins) => list_plugins(),
        Some(Commands::Config { action }) => config_commands::handle_config(action),
    }
}

fn list_plugins() -> anyhow::Result<()> {
    let (commands, events) = registries()?;

    println!("Commands:");
    for handler in commands.iter() {
        let meta = handler.meta();
        let description = meta.description.as_deref().unwrap_or(NO_DESCRIPTION);
        println!("  {} [prefix: {}] — {}", meta.name, meta.prefix, description);
    }

    println!("\nEvents:");
    for handler in events.iter() {
        let meta = handler.meta();
        let description = meta.description.as_deref().unwrap_or(NO_DESCRIPTION);
        println!("  {} — {}", meta.name, description);
    }

    Ok(())
}
