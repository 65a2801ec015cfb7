use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gateway_configuration::environment::ProcessEnvironment;
use gateway_configuration::{
    make_runtime_configuration, parse_configuration, write_parsed_configuration,
    ParsedConfiguration,
};
use graphql_gateway::{routes, state};

/// Serve the tables of a Postgres-compatible database over GraphQL.
#[derive(Parser)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Serve GraphQL requests. This is the default.
    Serve(ServeArgs),
    /// Write the initial configuration into a directory.
    Initialize {
        #[arg(long, env = "GATEWAY_CONFIGURATION_DIRECTORY", default_value = ".")]
        configuration: PathBuf,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// The directory holding configuration.json and the GraphQL schema.
    #[arg(long, env = "GATEWAY_CONFIGURATION_DIRECTORY", default_value = ".")]
    configuration: PathBuf,
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8082)]
    port: u16,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Serve(cli.serve)) {
        Command::Serve(args) => serve(args).await,
        Command::Initialize { configuration } => initialize(configuration).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!("starting server initialization");

    let parsed = parse_configuration(&args.configuration).await?;
    let configuration =
        make_runtime_configuration(parsed, &args.configuration, ProcessEnvironment)?;
    let state = state::create_state(&configuration).await?;
    let router = routes::create_router(state, args.port);

    let address = SocketAddr::new(args.host, args.port);
    tracing::info!("GraphQL endpoint: http://localhost:{}/graphql", args.port);
    tracing::info!("GraphQL Playground: http://localhost:{}/playground", args.port);

    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn initialize(configuration: PathBuf) -> anyhow::Result<()> {
    write_parsed_configuration(&ParsedConfiguration::initial(), &configuration).await?;
    tracing::info!(path = %configuration.display(), "wrote initial configuration");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("unable to listen for the shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
