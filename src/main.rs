use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use codeflow_rs::codeflow::config::{EngineConfig, ProviderSettings};
use codeflow_rs::codeflow::workflow::state::Message;
use codeflow_rs::codeflow::workflow::{
    presets, AgentState, GraphExecutionResult, Routing, ToolRegistry, Workflow, WorkflowEngine,
    WorkflowLoader,
};
use dotenv::dotenv;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that runs a workflow
#[derive(ClapArgs, Debug)]
struct RunOptions {
    /// User request that starts the conversation
    #[arg(short, long)]
    input: String,

    /// Project root the workflow operates on
    #[arg(long)]
    project_path: Option<String>,

    /// File of interest, relative to the project root
    #[arg(long)]
    current_file: Option<String>,

    /// Always follow a node's first outgoing edge
    #[arg(long)]
    first_edge: bool,

    /// Print the full execution result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a workflow from a YAML or JSON file
    Run {
        /// Path to the workflow file
        #[arg(short, long)]
        file: String,

        #[command(flatten)]
        options: RunOptions,
    },
    /// Run a built-in workflow
    Preset {
        /// Preset id, see `presets`
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        options: RunOptions,
    },
    /// List built-in workflows
    Presets,
    /// List built-in tools
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Run { file, options } => {
            let workflow = WorkflowLoader::new()
                .load_workflow(&file)
                .with_context(|| format!("failed to load workflow from {}", file))?;
            run(&workflow, options).await?;
        }
        Commands::Preset { name, options } => {
            let workflow = presets::by_id(&name)
                .with_context(|| format!("unknown preset '{}'", name))?;
            run(&workflow, options).await?;
        }
        Commands::Presets => {
            for workflow in presets::all() {
                println!("{:<26} {}", workflow.id, workflow.description);
            }
        }
        Commands::Tools => {
            let registry = ToolRegistry::with_builtins();
            for name in registry.names().await {
                if let Some(tool) = registry.get(&name).await {
                    println!("{:<18} {}", name, tool.description());
                }
            }
        }
    }

    Ok(())
}

async fn run(workflow: &Workflow, options: RunOptions) -> anyhow::Result<()> {
    let model = ProviderSettings::from_env()?.build_model()?;
    let config = EngineConfig {
        routing: if options.first_edge {
            Routing::FirstEdge
        } else {
            Routing::Outcome
        },
    };
    let engine = WorkflowEngine::with_config(model, ToolRegistry::with_builtins(), config);

    let mut initial = AgentState::new().with_message(Message::user(options.input));
    if let Some(project) = options.project_path {
        initial = initial.with_project_path(project);
    }
    if let Some(file) = options.current_file {
        initial = initial.with_current_file(file);
    }

    log::info!("Running workflow: {}", workflow.name);
    let result = engine.execute_workflow(workflow, initial).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report(&result);
    }

    if !result.success {
        anyhow::bail!(
            "workflow '{}' failed: {}",
            workflow.id,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn report(result: &GraphExecutionResult) {
    for step in &result.steps {
        println!("[{}] {} ({} ms)", step.node_id, step.node_name, step.duration.as_millis());
    }
    if let Some(reply) = result.final_reply() {
        println!("Response: {}", reply);
    }
}
