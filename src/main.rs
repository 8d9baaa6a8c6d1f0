use clap::{Parser, Subcommand};
use dotenv::dotenv;
use flowcond::condition::{self, EvaluationContext, Locale};
use flowcond::config::EngineConfig;
use flowcond::flow;
use flowcond::loader::ConditionLoader;

use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a condition file is well formed
    Validate {
        /// Path to the condition (JSON or YAML)
        #[arg(short, long)]
        expr: PathBuf,
    },
    /// Evaluate a condition against a set of variables
    Eval {
        /// Path to the condition (JSON or YAML)
        #[arg(short, long)]
        expr: PathBuf,

        /// Path to the variables (JSON or YAML mapping)
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
    /// Print a condition as readable text
    Render {
        /// Path to the condition (JSON or YAML)
        #[arg(short, long)]
        expr: PathBuf,

        /// Output language (en, zh); defaults to FLOWCOND_LOCALE
        #[arg(short, long)]
        locale: Option<Locale>,
    },
    /// List the edges that can be followed from a node
    Route {
        /// Path to the edge list (JSON or YAML)
        #[arg(short, long)]
        edges: PathBuf,

        /// Source node id
        #[arg(short, long)]
        from: String,

        /// Path to the variables (JSON or YAML mapping)
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
}

fn load_context(
    loader: &ConditionLoader,
    path: Option<&Path>,
) -> Result<EvaluationContext, flowcond::FlowCondError> {
    match path {
        Some(path) => Ok(EvaluationContext::with_variables(
            loader.load_variables(path)?,
        )),
        None => Ok(EvaluationContext::new()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let loader = ConditionLoader::new();

    match args.command {
        Commands::Validate { expr } => {
            let tree = loader.load_expression(&expr)?;
            match condition::validate(&tree) {
                Ok(()) => println!("valid"),
                Err(e) => println!("invalid: {}", e),
            }
        }
        Commands::Eval { expr, context } => {
            let tree = loader.load_expression(&expr)?;
            let ctx = load_context(&loader, context.as_deref())?;
            println!("{}", condition::evaluate(&tree, &ctx));
        }
        Commands::Render { expr, locale } => {
            let config = EngineConfig::from_env()?.with_locale(locale);
            log::info!("Rendering with locale: {}", config.locale);

            let tree = loader.load_expression(&expr)?;
            println!("{}", condition::to_text_localized(&tree, config.locale));
        }
        Commands::Route {
            edges,
            from,
            context,
        } => {
            let edges = loader.load_edges(&edges)?;
            let ctx = load_context(&loader, context.as_deref())?;

            let selected = flow::select_edges(&edges, &from, &ctx);
            if selected.is_empty() {
                log::info!("No edge from '{}' can be followed", from);
            }
            for edge in selected {
                println!("{} -> {} ({})", edge.source, edge.target, edge.id);
            }
        }
    }

    Ok(())
}
