use std::sync::Arc;

use chrono::{Duration, Local};
use grounding_agent_sdk::agents::{AgentDefinition, AgentsClient, GroundingConfig};
use grounding_agent_sdk::auth::EnvTokenCredential;
use grounding_agent_sdk::chat::{AzureChatClient, ChatSession, ChatSessionConfig};
use grounding_agent_sdk::cli::Console;
use grounding_agent_sdk::config::FoundryConfig;
use grounding_agent_sdk::logging;
use grounding_agent_sdk::tools::{GroundingSearchTool, ToolRegistry};

const SYSTEM_PROMPT: &str = "You are a news assistant. Use the bing_search tool to ground \
answers about current events in live web results, and cite your sources.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables are loaded from the .env file
    dotenvy::dotenv().ok();

    // The guard flushes buffered log lines when main returns
    let _guard = logging::init_logging()?;

    tracing::info!("=== Grounded Search Agent Starting ===");

    let console = Console::new();
    console.print_banner();

    // The Foundry project hosts agents, threads and runs; the chat
    // deployment drives the conversation and decides when to search
    let foundry = FoundryConfig::from_env()?;
    let credential = Arc::new(EnvTokenCredential::new("AZURE_AI_AUTH_TOKEN"));
    let agents_client = AgentsClient::from_config(&foundry, credential);

    let definition = AgentDefinition::new(GroundingConfig::new(&foundry.connection_id));

    let mut registry = ToolRegistry::new();
    registry.register(GroundingSearchTool::new(agents_client, definition));
    tracing::info!("Registered {} tools", registry.len());

    let llm = AzureChatClient::from_env()?;
    let config = ChatSessionConfig::new(SYSTEM_PROMPT).with_streaming(true);
    let mut session = ChatSession::new(llm, config).with_tools(Arc::new(registry));

    // The first question is scripted so the demo runs hands-free
    let yesterday = (Local::now() - Duration::days(1)).format("%Y-%m-%d");
    let mut input = format!("tell me yesterday's {} Tesla news", yesterday);
    console.print_user(&input);

    loop {
        console.print_assistant_prefix();
        let result = session
            .turn(&input, &mut |delta| console.print_assistant_chunk(delta))
            .await;
        console.println();

        if let Err(e) = result {
            tracing::error!("Turn failed: {:#}", e);
            console.print_error(&format!("{:#}", e));
        }
        console.print_separator();

        input = loop {
            let line = console.read_input()?;
            if !line.is_empty() {
                break line;
            }
        };
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
    }

    console.print_system("Session ended.");
    tracing::info!("=== Grounded Search Agent Shutting Down ===");

    Ok(())
}
