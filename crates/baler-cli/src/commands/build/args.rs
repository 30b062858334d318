use baler_bundler::TaskRegistry;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Lint the module set before compiling; violations abort the build.
    #[arg(long)]
    pub lint: bool,

    /// Embed source-position metadata in the artifact.
    #[arg(long)]
    pub dev: bool,

    /// Run a specific registered task instead of the default.
    #[arg(short, long, value_name = "NAME")]
    pub task: Option<String>,

    /// Override the artifact destination path.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// The task an invocation runs: an explicit `--task` wins, otherwise the
/// `--lint` flag selects the lint-gated default.
pub(crate) fn selected_task(args: &BuildArgs) -> String {
    match &args.task {
        Some(name) => name.clone(),
        None => TaskRegistry::default_task(args.lint).to_string(),
    }
}
