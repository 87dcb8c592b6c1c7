use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_board::api::{self, AppState};
use todo_board::config::StoreConfig;

#[derive(Parser)]
#[command(name = "todo-board")]
#[command(about = "Personal todo tracking with categories, search and pagination")]
struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,
    },
    /// Create the todos and categories tables if they do not exist
    Setup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "todo_board=debug,todo_core=debug,tower_http=debug".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host }) => serve(&cli.store, &host, port).await?,
        Some(Commands::Setup) => setup(&cli.store)?,
        None => serve(&cli.store, "127.0.0.1", 3000).await?,
    }

    Ok(())
}

async fn serve(config: &StoreConfig, host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting todo-board server on port {}", port);

    let tables = config.tables()?;
    let db = config.open_database()?;
    db.provision_all(&tables)?;

    let app = api::create_router(AppState::new(db, tables, &config.user_id));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("todo-board listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn setup(config: &StoreConfig) -> anyhow::Result<()> {
    println!("Setting up tables...");

    let tables = config.tables()?;
    let db = config.open_database()?;
    for (name, created) in db.provision_all(&tables)? {
        if created {
            println!("Table {} created successfully", name);
        } else {
            println!("Table {} already exists", name);
        }
    }

    println!("Setup complete!");
    Ok(())
}
