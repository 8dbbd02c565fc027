//! Command-line surface for the optflow engine.

mod acquire;
mod activities;
mod render;

use crate::acquire::GitCloneAcquirer;
use crate::activities::{DocumentActivity, ScanActivity};
use crate::render::JsonReportRenderer;
use clap::{Parser, Subcommand, ValueEnum};
use optflow::acquire::{resolve_checkout_root, RepoSource, RepositoryAcquirer};
use optflow::activity::{ActivityOptions, ActivityRegistry};
use optflow::catalog::{AnalysisDepth, ContextStore};
use optflow::errors::EngineError;
use optflow::observability::init_tracing;
use optflow::orchestrator::Orchestrator;
use optflow::pipeline::PipelineOptions;
use optflow::report::ReportRenderer;
use optflow::target::Target;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "optflow", version, about = "Context-driven analysis pipeline orchestrator")]
struct Cli {
    /// Path to the context catalog.
    #[arg(long, global = true, env = "OPTFLOW_CATALOG", default_value = "contexts.json")]
    catalog: PathBuf,

    /// Working directory for repository checkouts.
    #[arg(long, global = true, env = "OPTFLOW_WORKDIR", default_value = "projects")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available contexts.
    Contexts,

    /// Show engine wiring and session state.
    Status {
        /// Initialize with this context before reporting.
        #[arg(long)]
        context: Option<String>,
    },

    /// Run a single activity against a target.
    Run {
        /// Activity name.
        activity: String,

        /// Context to activate (catalog default when omitted).
        #[arg(long)]
        context: Option<String>,

        /// Local target path.
        #[arg(long, conflicts_with = "repo")]
        target: Option<PathBuf>,

        /// Repository to acquire and use as the target
        /// (URL or owner/name shorthand).
        #[arg(long)]
        repo: Option<String>,

        /// Destination directory for artifacts.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Analysis depth override.
        #[arg(long, value_enum)]
        depth: Option<DepthArg>,
    },

    /// Run the active context's full pipeline against a target.
    Pipeline {
        /// Context to activate (catalog default when omitted).
        #[arg(long)]
        context: Option<String>,

        /// Local target path.
        #[arg(long, conflicts_with = "repo")]
        target: Option<PathBuf>,

        /// Repository to acquire and use as the target
        /// (URL or owner/name shorthand).
        #[arg(long)]
        repo: Option<String>,

        /// Destination directory for artifacts and the report.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Halt after the first failing step instead of continuing.
        #[arg(long)]
        stop_on_error: bool,

        /// Analysis depth override.
        #[arg(long, value_enum)]
        depth: Option<DepthArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DepthArg {
    Shallow,
    Standard,
    Deep,
}

impl From<DepthArg> for AnalysisDepth {
    fn from(depth: DepthArg) -> Self {
        match depth {
            DepthArg::Shallow => Self::Shallow,
            DepthArg::Standard => Self::Standard,
            DepthArg::Deep => Self::Deep,
        }
    }
}

fn build_engine(catalog: &Path) -> Result<Orchestrator, EngineError> {
    let registry = Arc::new(ActivityRegistry::new());
    registry.register(Arc::new(ScanActivity::new()))?;
    registry.register(Arc::new(DocumentActivity::new()))?;

    let store = ContextStore::load_from_path(catalog, &registry.name_set())?;
    Ok(Orchestrator::new(store, registry))
}

fn activity_options(output: Option<PathBuf>, depth: Option<DepthArg>) -> ActivityOptions {
    let mut options = ActivityOptions::new();
    if let Some(output) = output {
        options = options.with_output(output);
    }
    if let Some(depth) = depth {
        options = options.with_depth(depth.into());
    }
    options
}

async fn resolve_target(
    target: Option<PathBuf>,
    repo: Option<String>,
    workdir: &Path,
) -> Result<Target, EngineError> {
    match (target, repo) {
        (Some(path), None) => Ok(Target::path(path)),
        (None, Some(repo)) => {
            let source = RepoSource::parse(&repo)?;
            let checkout = GitCloneAcquirer::new().acquire(&source, workdir).await?;
            Ok(Target::checkout(resolve_checkout_root(&checkout), source.url))
        }
        _ => Err(EngineError::config(
            "exactly one of --target or --repo is required",
        )),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), EngineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn execute(cli: Cli) -> Result<(), EngineError> {
    let engine = build_engine(&cli.catalog)?;

    match cli.command {
        Command::Contexts => {
            for context in engine.list_contexts() {
                println!(
                    "{:<24} {:<10} [{}]  {}",
                    context.name,
                    context.analysis_depth.to_string(),
                    context.enabled_activities.join(", "),
                    context.description,
                );
            }
            Ok(())
        }

        Command::Status { context } => {
            if context.is_some() {
                engine.initialize(context.as_deref())?;
            }
            print_json(&engine.status())
        }

        Command::Run {
            activity,
            context,
            target,
            repo,
            output,
            depth,
        } => {
            engine.initialize(context.as_deref())?;
            let target = resolve_target(target, repo, &cli.workdir).await?;
            let options = activity_options(output, depth);

            let result = engine.run_activity(&activity, &target, &options).await?;
            print_json(&result)?;
            if !result.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }

        Command::Pipeline {
            context,
            target,
            repo,
            output,
            stop_on_error,
            depth,
        } => {
            engine.initialize(context.as_deref())?;

            let mut options = PipelineOptions::new()
                .with_activity_options(activity_options(output.clone(), depth));
            if stop_on_error {
                options = options.stop_on_error();
            }

            let result = match (target, repo) {
                (Some(path), None) => {
                    engine.run_pipeline(&Target::path(path), &options).await?
                }
                (None, Some(repo)) => {
                    let source = RepoSource::parse(&repo)?;
                    engine
                        .acquire_and_run_pipeline(
                            &GitCloneAcquirer::new(),
                            &source,
                            &cli.workdir,
                            &options,
                        )
                        .await?
                }
                _ => {
                    return Err(EngineError::config(
                        "exactly one of --target or --repo is required",
                    ))
                }
            };

            let payload = engine.aggregate(&result);
            if let Some(output) = output {
                let template = engine.current_context()?.output_template.clone();
                let renderer = JsonReportRenderer::new(output);
                let report = renderer
                    .render(&payload, &template)
                    .await
                    .map_err(|e| EngineError::config(format!("report rendering failed: {e}")))?;
                eprintln!("report written to {}", report.display());
            }

            print_json(&payload)?;
            if !result.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("info");

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.kind());
            if err.is_fatal() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_pipeline() {
        let cli = Cli::try_parse_from([
            "optflow",
            "pipeline",
            "--context",
            "general-analyst",
            "--target",
            "/tmp/project",
            "--stop-on-error",
        ])
        .unwrap();

        match cli.command {
            Command::Pipeline {
                context,
                target,
                stop_on_error,
                ..
            } => {
                assert_eq!(context.as_deref(), Some("general-analyst"));
                assert_eq!(target, Some(PathBuf::from("/tmp/project")));
                assert!(stop_on_error);
            }
            _ => panic!("expected pipeline subcommand"),
        }
    }

    #[test]
    fn test_cli_rejects_target_and_repo_together() {
        let parsed = Cli::try_parse_from([
            "optflow",
            "run",
            "scan",
            "--target",
            "/tmp",
            "--repo",
            "acme/widgets",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_depth_arg_maps_to_engine_depth() {
        assert_eq!(
            AnalysisDepth::from(DepthArg::Deep),
            AnalysisDepth::Deep
        );
    }
}
