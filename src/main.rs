use clap::Parser;
use harmony::cli::{Args, Commands};
use harmony::config::ProviderSettings;
use harmony::display::{self, RequestOutcome};
use harmony::llm::{ChatMessage, LLMProvider, LLMProviderFactory};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout belongs to the rendered views.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("harmony=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let command_name = args.command.name();

    if let Err(error) = run(args.command).await {
        display::render_error(&error.to_string(), Some(command_name));
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let prompt = command.prompt()?;

    let settings = ProviderSettings::from_env();
    let selection = settings.select()?;
    debug!(provider = %selection.kind, "provider selected");
    let provider = LLMProviderFactory::create_provider(selection.kind, selection.api_key)?;

    match command {
        Commands::Chat { .. } => run_chat(provider, prompt).await,
        Commands::Complete { .. } => run_completion(provider, prompt).await,
    }
}

async fn run_chat(provider: Arc<dyn LLMProvider>, prompt: String) -> anyhow::Result<()> {
    let label = provider.provider_name();
    display::render_chat_view(&prompt, label, &RequestOutcome::Pending);

    let messages = vec![ChatMessage::user(&prompt)];
    let outcome = RequestOutcome::settle(provider.send_chat_request(messages, None)).await;
    display::render_chat_view(&prompt, label, &outcome);

    if outcome.failed() {
        std::process::exit(1);
    }
    info!(provider = label, "chat request completed");
    Ok(())
}

async fn run_completion(provider: Arc<dyn LLMProvider>, prompt: String) -> anyhow::Result<()> {
    let label = provider.provider_name();
    display::render_completion_view(&prompt, label, &RequestOutcome::Pending);

    let outcome = RequestOutcome::settle(provider.send_completion_request(prompt.clone(), None)).await;
    display::render_completion_view(&prompt, label, &outcome);

    if outcome.failed() {
        std::process::exit(1);
    }
    info!(provider = label, "completion request completed");
    Ok(())
}
