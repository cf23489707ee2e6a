//! kassabot - Telegram intake bot for income/expense records
//!
//! A thin delivery shell around a pure conversation state machine:
//! updates arrive over a webhook, finalized records are forwarded to a
//! single configured recipient chat.

mod api;
mod config;
mod runtime;
mod state_machine;
mod telegram;

use api::AppState;
use config::Config;
use runtime::{SessionManager, TelegramForwarder, TelegramResponder};
use state_machine::DialogContext;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kassabot=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = Arc::new(Config::from_env()?);

    let client = Arc::new(telegram::Client::new(&config.bot_token));

    if let Some(url) = &config.webhook_url {
        client
            .set_webhook(url, config.webhook_secret.as_deref())
            .await?;
        tracing::info!(url = %url, "Webhook registered");
    } else {
        tracing::warn!("KASSABOT_WEBHOOK_URL not set; register the webhook manually");
    }

    // Wire the session store to the Telegram transport
    let responder = Arc::new(TelegramResponder::new(client.clone()));
    let forwarder = Arc::new(TelegramForwarder::new(
        client.clone(),
        config.recipient.clone(),
        config.forward_timeout,
    ));
    let sessions = Arc::new(SessionManager::new(
        DialogContext::new(config.recipient.label.clone()),
        responder,
        forwarder,
    ));

    let state = AppState::new(sessions, client, config.clone());
    let app = api::create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(recipient = %config.recipient.label, "kassabot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
