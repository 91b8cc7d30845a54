use std::sync::Arc;

use chatdeck::assistant::AssistantGateway;
use chatdeck::services::conversation::ConversationStore;
use chatdeck::services::prefs::Prefs;
use chatdeck::{routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let data_dir = std::env::var("CHATDECK_DATA_DIR").unwrap_or_else(|_| ".chatdeck".into());

    let gateway = Arc::new(AssistantGateway::from_env().expect("assistant gateway init failed"));
    let prefs = Prefs::open(&data_dir).expect("preference dir init failed");

    // Ambient light/dark preference is a presentation concern; the server
    // seeds the store with light.
    let store = ConversationStore::new(Arc::clone(&gateway), prefs, false);
    let state = state::AppState::new(gateway, store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chatdeck listening");
    axum::serve(listener, app).await.expect("server failed");
}
