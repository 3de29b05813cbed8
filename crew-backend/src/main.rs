use dotenv::dotenv;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

mod ai;
mod cli;
mod config;
mod tools;

use ai::{OllamaClient, Pipeline, RoleCatalog};
use cli::ConsoleObserver;
use config::Config;
use tools::{TaskStore, ToolContext};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            eprintln!("[Error] {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Using Ollama at {} (model {}), config directory {:?}",
        config.ollama_base_url,
        config.ollama_model,
        config.config_dir
    );

    let registry = Arc::new(tools::create_registry_with_profile(config.tool_profile));
    if registry.is_empty() {
        log::warn!("No tools registered for the {:?} profile", config.tool_profile);
    }
    log::info!(
        "Registered {} tools ({:?} profile): {:?}",
        registry.len(),
        registry.profile(),
        registry.names()
    );

    let mut context = ToolContext::new(TaskStore::new());
    if let Some(workspace) = &config.workspace_dir {
        log::info!("Relative file writes resolve under {:?}", workspace);
        context = context.with_workspace(workspace.clone());
    }

    let catalog = RoleCatalog::load(&config.config_dir, &config.ollama_model, &config.ollama_base_url);

    let client = match OllamaClient::new(config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut pipeline = Pipeline::new(catalog, Arc::new(client), registry.clone(), context);

    print!("{}", cli::banner(&registry.definitions()));
    println!("{}", cli::SEPARATOR);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("User: ");
        if let Err(e) = std::io::stdout().flush() {
            log::warn!("[CLI] Failed to flush prompt: {}", e);
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        if cli::is_exit_command(&line) {
            break;
        }

        let mut observer = ConsoleObserver::new(std::io::stdout());
        match pipeline.run_turn(&line, &mut observer).await {
            Ok(report) => {
                log::debug!(
                    "Turn {} finished: {} chars from {}, {} tool call(s)",
                    report.turn_id,
                    report.response.len(),
                    report.role,
                    report.tool_results.len()
                );
                for outcome in &report.dispatches {
                    log::debug!(
                        "Turn {} dispatch to {} ({:?}): {} chars, {} tool call(s)",
                        report.turn_id,
                        outcome.directive.target_role,
                        outcome.directive.instruction,
                        outcome.response.len(),
                        outcome.tool_results.len()
                    );
                }
            }
            Err(e) => println!("[Error] {}", e),
        }
        println!("{}", cli::SEPARATOR);
    }

    log::info!("Session ended with {} task(s) registered", pipeline.tasks().len());
    println!("Goodbye!");
}
