//! CLI entrypoint for jobchat
//!
//! Wires the layers together with dependency injection: configuration →
//! model gateway + tool executor over the in-memory store → chat use case
//! → the transport the caller asked for.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use jobchat_application::{ChatInput, ConversationLogger, RunChatUseCase};
use jobchat_domain::{ChatEvent, Message};
use jobchat_infrastructure::{
    ConfigLoader, InMemoryJobStore, JobBoardToolExecutor, JsonLinesTransport,
    JsonlConversationLogger, OpenAiChatGateway, tools,
};
use jobchat_infrastructure::transport::ChannelSink;
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.list_tools {
        let spec = tools::default_tool_spec();
        let mut catalog: Vec<_> = spec.all().collect();
        catalog.sort_by(|a, b| a.name.cmp(&b.name));
        for tool in catalog {
            println!("{:<16} {}", tool.name, tool.description);
        }
        return Ok(());
    }

    let Some(question) = cli.question else {
        bail!("A message is required (or use --list-tools).");
    };

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    if let Some(model) = cli.model {
        config.provider.model = model;
    }

    // === Dependency Injection ===
    let params = config.chat.to_params();
    let gateway =
        Arc::new(OpenAiChatGateway::new(config.provider.clone()).map_err(|e| anyhow::anyhow!(e))?);
    let store = Arc::new(InMemoryJobStore::seeded());
    let executor =
        Arc::new(JobBoardToolExecutor::new(store).with_timeout(params.tool_timeout()));

    // Ctrl-C cancels the in-flight exchange
    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, cancelling exchange");
                token.cancel();
            }
        });
    }

    let mut use_case = RunChatUseCase::new(gateway, executor)
        .with_params(params)
        .with_cancellation(token);

    if let Some(path) = &config.log.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        use_case = use_case.with_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    // === Input ===
    let mut input = ChatInput::new(question);
    if let Some(path) = &cli.history {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading history file {}", path.display()))?;
        let history: Vec<Message> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing history file {}", path.display()))?;
        input = input.with_history(history);
    }

    // === Run ===
    let output = if cli.buffered {
        let output = use_case.execute(input).await?;
        println!(
            "{}",
            serde_json::json!({
                "text": output.text,
                "tool_calls_used": output.tool_calls_used,
            })
        );
        output
    } else if cli.json {
        let transport = JsonLinesTransport::new(tokio::io::stdout());
        use_case.execute_streaming(input, &transport).await?
    } else {
        let (sink, mut rx) = ChannelSink::new(64);
        let printer = tokio::spawn(async move {
            let mut stdout = std::io::stdout();
            while let Some(event) = rx.recv().await {
                match event {
                    ChatEvent::TextFragment { text } => {
                        let _ = write!(stdout, "{}", text);
                        let _ = stdout.flush();
                    }
                    ChatEvent::ToolInvoked { name } => {
                        eprintln!("· looking up {} …", name);
                    }
                    ChatEvent::Done => {
                        let _ = writeln!(stdout);
                    }
                    ChatEvent::Error { reason } => {
                        eprintln!("error: {}", reason);
                    }
                }
            }
        });

        let result = use_case.execute_streaming(input, &sink).await;
        drop(sink);
        let _ = printer.await;
        result?
    };

    if let Some(path) = &cli.save_transcript {
        let json = serde_json::to_string_pretty(&output.transcript)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing transcript to {}", path.display()))?;
        info!(path = %path.display(), turns = output.transcript.len(), "Transcript saved");
    }

    Ok(())
}
