#[tokio::main]
async fn main() {
    gridwatch_observability::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| {
        tracing::warn!("PORT not set; defaulting to 5000");
        "5000".to_string()
    });
    let addr = format!("0.0.0.0:{port}");

    let app = gridwatch_api::build_app();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
