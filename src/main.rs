use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use steam_compare::{
    api::ComparisonClient,
    app_state::{InputSlot, Phase},
    config::{ClientSettings, ServerSettings},
    controller::ComparisonController,
    server, view,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "steam_compare", about = "Find games two Steam accounts can play together")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the built web bundle with client-side route fallback
    Serve {
        #[arg(long)]
        bind: Option<SocketAddr>,
        #[arg(long)]
        asset_dir: Option<PathBuf>,
    },
    /// Compare two Steam libraries
    Compare {
        user_id_1: String,
        user_id_2: String,
        /// Only show co-op and multiplayer games
        #[arg(long)]
        co_op_only: bool,
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Check that the comparison service is up
    Health {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
}

#[derive(Debug, Args)]
struct EndpointArgs {
    /// Host the client runs on; localhost selects the local service
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    api_base_url: Option<String>,
}

impl EndpointArgs {
    fn into_settings(self) -> ClientSettings {
        let mut settings = ClientSettings::from_env();
        if let Some(host) = self.host.as_deref() {
            settings = ClientSettings {
                base_url_override: settings.base_url_override,
                ..ClientSettings::for_host(Some(host))
            };
        }
        if self.api_base_url.is_some() {
            settings.base_url_override = self.api_base_url;
        }
        settings
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to create runtime")?;

    rt.block_on(run(cli.command))
}

async fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Serve { bind, asset_dir } => {
            let mut settings = ServerSettings::from_env()?;
            if let Some(bind) = bind {
                settings.bind_addr = bind;
            }
            if let Some(asset_dir) = asset_dir {
                settings.asset_dir = asset_dir;
            }
            server::start_server(settings).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare {
            user_id_1,
            user_id_2,
            co_op_only,
            endpoint,
        } => {
            let client = ComparisonClient::new(endpoint.into_settings());
            let mut controller = ComparisonController::new(client);
            controller.set_input(InputSlot::First, user_id_1);
            controller.set_input(InputSlot::Second, user_id_2);
            controller.set_co_op_only_filter(co_op_only);
            controller.submit().await;

            print!("{}", view::render(controller.state()));
            if controller.state().phase == Phase::Error {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Health { endpoint } => {
            let client = ComparisonClient::new(endpoint.into_settings());
            match client.check_health().await {
                Ok(()) => {
                    println!("{} is healthy", client.settings().base_url());
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    tracing::warn!("Health check failed: {}", err);
                    println!("{} is unhealthy: {}", client.settings().base_url(), err);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
