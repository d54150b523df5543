include!("../../lib.rs");
use std::net::SocketAddr;
use std::time::Instant;
use lambda_http::{run, service_fn, Error, Service};
use tracing::{error, info};
use crate::app::{build_app, ENDPOINTS};
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::StoreStatus;
use crate::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let started_at = Instant::now();
    let lambda = std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok();
    setup_tracing(lambda);

    info!("Starting server...");
    let config = match Configuration::load() {
        Ok(config) => config,
        Err(err) => {
            error!("FAILED to start server: {}", err);
            std::process::exit(1);
        }
    };

    info!("Connecting to {} store...", config.store);
    let store_status = StoreStatus::new();
    let catalog = match create_catalog_service(&config, store_status.clone()).await {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("FAILED to start server: {}", err);
            std::process::exit(1);
        }
    };
    info!("Connected to {} store successfully", config.store);

    let state = AppState::new(config.clone(), catalog, store_status, started_at);
    let app = build_app(state);

    if config.lambda {
        info!("Running under the lambda runtime");
        // lambda_http hands us its own body type; convert it to the axum body the router expects
        let handler = service_fn(move |req: lambda_http::Request| {
            let mut app = app.clone();
            async move {
                std::future::poll_fn(|cx| app.poll_ready(cx)).await?;
                app.call(req.map(|body| axum::body::Body::from(body.to_vec()))).await
            }
        });
        return run(handler).await;
    }

    let addr: SocketAddr = config.socket_addr().parse()?;
    info!("Server running on http://localhost:{}", config.port);
    info!("Available API endpoints:");
    for (method, path, description) in ENDPOINTS {
        info!("   - {:<6} {} ({})", method, path, description);
    }
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install signal handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
