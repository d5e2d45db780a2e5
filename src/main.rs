mod app;
mod bootstrap;
mod config;
mod error;
mod headshots;
mod state;
mod users;
mod validate;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "headshot_studio=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    if app_state.config.demo_user.enabled {
        if let Err(e) = bootstrap::ensure_demo_user(
            &app_state.db,
            &bootstrap::UnixTimeIdentity,
            &app_state.config.demo_user,
        )
        .await
        {
            tracing::warn!(error = %e, "demo user bootstrap failed; continuing");
        }
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
