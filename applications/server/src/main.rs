/// Tempo Server - music streaming API
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tempo_server::{
    config::ServerConfig,
    create_router,
    services::{create_account, NewAccount},
    state::AppState,
    AuthService,
};
use tempo_storage::{seed, users};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-server")]
#[command(about = "Tempo music streaming server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "TEMPO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations
    Migrate,
    /// Insert demo users and a demo catalog
    Seed,
    /// Create a new user
    AddUser {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Defaults to the username
        #[arg(short, long)]
        display_name: Option<String>,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Migrate => migrate(&config).await?,
        Commands::Seed => seed_demo(&config).await?,
        Commands::AddUser {
            email,
            username,
            password,
            display_name,
        } => add_user(&config, email, username, &password, display_name).await?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool = tempo_storage::create_pool(&config.storage.database_url).await?;
    tempo_storage::run_migrations(&pool).await?;
    Ok(pool)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Tempo server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = open_database(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::from_settings(&config.auth));
    let app_state = AppState::new(pool, auth_service);
    let app = create_router(app_state, &config);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    open_database(config).await?;
    println!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn seed_demo(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let auth_service = AuthService::from_settings(&config.auth);
    let password_hash = auth_service.hash_password(seed::DEMO_PASSWORD)?;

    let summary = seed::seed_demo(&pool, &password_hash).await?;

    println!(
        "Seeded {} users, {} artists, {} albums, {} tracks",
        summary.users, summary.artists, summary.albums, summary.tracks
    );
    println!(
        "Demo login: demo@example.com / {}",
        seed::DEMO_PASSWORD
    );
    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    email: String,
    username: String,
    password: &str,
    display_name: Option<String>,
) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let auth_service = AuthService::from_settings(&config.auth);

    let user = create_account(
        &pool,
        &auth_service,
        NewAccount {
            email: &email,
            username: &username,
            password,
            display_name,
        },
    )
    .await?;

    println!("Created user {} ({}) with id {}", user.username, user.email, user.id);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let users = users::list_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.username, user.email);
    }

    Ok(())
}
