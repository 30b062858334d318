//! The `watch` command: build once, then rebuild on every change.

use std::path::Path;

use baler_bundler::{watch_loop, Orchestrator, TaskRegistry};
use baler_core::error::cli::{CliError, CliResult};
use baler_core::log_info;

use super::build::selected_task;
use super::BuildArgs;

pub fn execute(config: Option<&Path>, args: BuildArgs) -> CliResult<()> {
    let mut bundler = crate::commands::load_project(config)?;
    if let Some(output) = args.output.clone() {
        bundler.set_dest(output);
    }

    let registry = TaskRegistry::builtin();
    let task = selected_task(&args);
    if registry.get(&task).is_none() {
        return Err(CliError::UnknownTask { name: task });
    }

    log_info!("watch", "watching for changes, task '{}'", task);
    let orchestrator = Orchestrator::new(bundler, registry);
    watch_loop(&orchestrator, &task, args.dev)?;
    Ok(())
}
