use berea_api::{config::read_config, router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = read_config().expect("Failed to read configuration");

    let app_state = AppState::new(&settings);
    match app_state.refresh_library().await {
        Ok(library) => tracing::info!(
            sermons = library.sermons.len(),
            verse_insights = library.insight_count(),
            community_notes = library.community_notes.len(),
            personal_notes = library.personal_notes.len(),
            "Study library loaded"
        ),
        Err(err) => tracing::warn!(error = %err, "Starting with an empty study library"),
    }

    let app = router::create(app_state, &settings);

    let addr = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
