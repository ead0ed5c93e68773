use std::sync::Arc;

use anyhow::Context;

use chatflow::catalog::load_catalog;
use chatflow::config::ChatConfig;
use chatflow::engine::Conversation;
use chatflow::remote::create_client;
use chatflow::shell::{ChatState, CliShell, http};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the CLI shell owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ChatConfig::from_env().context("invalid configuration")?;

    eprintln!("💬 chatflow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Endpoint: {}", config.remote.endpoint);
    eprintln!("   Catalog: {}", config.responses_path.display());
    eprintln!("   Greeting: {}", config.options_path.display());

    let loaded = load_catalog(
        &config.responses_path,
        &config.options_path,
        &config.texts.back_label,
        config.strict_catalog,
    )
    .context("failed to load response catalog")?;

    if !loaded.issues.is_empty() {
        eprintln!(
            "   Warning: {} catalog issue(s), see log",
            loaded.issues.len()
        );
    }

    let client = create_client(&config.remote)?;
    let conversation = Conversation::new(
        Arc::new(loaded.catalog),
        Arc::new(loaded.greeting),
        config.texts.clone(),
    );

    match config.http_port {
        Some(port) => {
            eprintln!("   Chat API: http://0.0.0.0:{}/api/chat/history\n", port);
            http::serve(port, ChatState::new(conversation, client)).await?;
        }
        None => {
            eprintln!("   Type a number to pick an option. /help for commands.\n");
            CliShell::new(conversation, client).run().await?;
        }
    }

    Ok(())
}
