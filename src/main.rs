//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run the session.
//! No business logic here; routing and replies live in the use cases.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use voice_assistant::adapters::console::{ConsoleCapture, ConsolePlayback};
use voice_assistant::adapters::persistence::{MemoryStore, SqliteStore};
use voice_assistant::adapters::random::{SeededRandom, ThreadRandom};
use voice_assistant::ports::{RandomSource, RecordStore, SessionPort};
use voice_assistant::shared::config::AppConfig;
use voice_assistant::usecases::{
    AssistantContext, Dispatcher, SessionExit, SessionService, run_until_stopped,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    voice_assistant::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        error!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });

    let rng: Arc<dyn RandomSource> = match cfg.rng_seed {
        Some(seed) => {
            info!(seed, "replies use a seeded random source");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };

    // --- Store: one handle shared by every collection; closed below on every exit path ---
    let (ctx, store): (AssistantContext, Arc<dyn RecordStore>) = if cfg.in_memory_or_default() {
        info!("records are kept in memory only");
        let store = Arc::new(MemoryStore::new());
        (AssistantContext::new(store.clone(), rng), store as Arc<dyn RecordStore>)
    } else {
        let data_dir = cfg.data_dir_or_default();
        let store = Arc::new(
            SqliteStore::connect(&data_dir)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        );
        info!(path = %store.path().display(), "records stored on disk");
        (AssistantContext::new(store.clone(), rng), store as Arc<dyn RecordStore>)
    };

    let dispatcher = Arc::new(Dispatcher::new(&ctx));
    let session: Arc<dyn SessionPort> = Arc::new(SessionService::new(
        Arc::new(ConsoleCapture::stdin()),
        Arc::new(ConsolePlayback::new(cfg.speech_command.clone())),
        dispatcher,
        cfg.capture_timeout_or_default(),
    ));

    // --- Run until stop, end of input, error, panic or Ctrl-C; the store is closed on each ---
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    match run_until_stopped(session, store, ctrl_c).await {
        SessionExit::Finished => Ok(()),
        SessionExit::Failed(message) => {
            eprintln!("An error occurred: {}", message);
            Ok(())
        }
        SessionExit::Interrupted => {
            println!("\nAssistant stopped by user.");
            // The blocking stdin reader would keep the runtime from shutting down.
            std::process::exit(0);
        }
    }
}
