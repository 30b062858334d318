use std::path::Path;

use baler_bundler::{Orchestrator, TaskRegistry};
use baler_core::error::cli::{CliError, CliResult};
use baler_core::log_info;

use super::args::{selected_task, BuildArgs};

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

    let orchestrator = Orchestrator::new(bundler, registry);
    let invocation = orchestrator.run(&task, args.dev)?;
    match invocation.outcome {
        Ok(Some(report)) => {
            log_info!(
                "build",
                "task '{}' done: {} ({} modules, {} bytes)",
                task,
                report.dest.display(),
                report.module_count,
                report.bytes
            );
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
