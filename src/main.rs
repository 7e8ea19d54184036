use dotenvy::dotenv;
use tracing::{error, info};

use jobly::jobly_config::ServerConfig;
use jobly::jobly_db::{init_db_pool, run_migrations};
use jobly::logging::init_tracing;
use jobly::router::init_router;
use jobly::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let pool = init_db_pool().await;
    if let Err(e) = run_migrations(&pool).await {
        error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let server_config = ServerConfig::from_env();
    let app = init_router(init_app_state(pool));

    let addr = server_config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("Server running on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
}
