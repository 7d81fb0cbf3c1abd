use disastermap::{database, routes, AppState, Config};
use env_logger::Env;

#[tokio::main]
async fn main() {
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    });
    env_logger::init_from_env(Env::default().default_filter_or(config.rust_log()));
    let bind_address = config.bind_address();

    let db_pool = match database::create_pool(&config).await {
        Ok(pool) => {
            tracing::info!(path = %config.storage_path.display(), "database ready");
            pool
        },
        Err(e) => {
            eprintln!("❌ Failed to open database: {}", e);
            eprintln!("Check your DATABASE_PATH: {}", config.storage_path.display());
            std::process::exit(1);
        }
    };

    let app = routes::router(AppState::new(config, db_pool));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to bind to {}: {}", bind_address, e);
            std::process::exit(1);
        });

    tracing::info!("🚀 Starting server at http://{}", bind_address);

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("❌ Server error: {}", e);
            std::process::exit(1);
        });
}
