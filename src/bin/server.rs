use std::env::var;
use std::net::SocketAddr;

use anyhow::Error;
use axum::Server;
use cap_std::{ambient_authority, fs::Dir};
use parking_lot::Mutex;
use tower::{
    limit::GlobalConcurrencyLimitLayer, load_shed::LoadShedLayer, make::Shared, ServiceBuilder,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phonebook::{
    config::Config,
    controller::Controller,
    data_path_from_env,
    server::router,
    storage::DirStorage,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_path = data_path_from_env();

    let bind_addr = var("BIND_ADDR")
        .expect("Environment variable BIND_ADDR not set")
        .parse::<SocketAddr>()
        .expect("Environment variable BIND_ADDR invalid");

    let request_limit = var("REQUEST_LIMIT")
        .expect("Environment variable REQUEST_LIMIT not set")
        .parse::<usize>()
        .expect("Environment variable REQUEST_LIMIT invalid");

    let dir = Dir::open_ambient_dir(data_path, ambient_authority())?;

    let config = Config::read(&dir)?;

    let controller = &*Box::leak(Box::new(Mutex::new(Controller::open(
        DirStorage::new(dir),
        &config,
    ))));

    tracing::info!(
        "Loaded {} contacts",
        controller.lock().repository().len()
    );

    let router = router(controller);

    let make_service = Shared::new(
        ServiceBuilder::new()
            .layer(LoadShedLayer::new())
            .layer(GlobalConcurrencyLimitLayer::new(request_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(true)),
            )
            .service(router),
    );

    tracing::info!("Listening on {}", bind_addr);
    Server::bind(&bind_addr).serve(make_service).await?;

    Ok(())
}
