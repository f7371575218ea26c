use std::net::SocketAddr;
use axum::Router;
use lambda_http::{run, Error};
use books::catalog::controller::build_router;
use books::core::controller::AppState;
use books::core::domain::{Configuration, RuntimeMode};
use books::utils::sql::{build_pool, create_table, setup_tracing};

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::from_env();
    let pool = build_pool(&config).await?;
    create_table(&pool).await?;

    let runtime = config.runtime;
    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config, pool);

    match runtime {
        RuntimeMode::Lambda => {
            tracing::info!("serving books through the lambda runtime");
            let app: Router<(), lambda_http::Body> = build_router(state);
            run(app).await
        }
        RuntimeMode::Http => {
            let addr: SocketAddr = listen_addr.parse()?;
            tracing::info!(%addr, "serving books over http");
            let app: Router<(), axum::body::Body> = build_router(state);
            axum::Server::bind(&addr)
                .serve(app.into_make_service())
                .await?;
            Ok(())
        }
    }
}
