//! The `tasks` command: list registered tasks and their step sequences.

use baler_bundler::{Step, TaskRegistry};
use baler_core::error::cli::CliResult;

pub fn execute() -> CliResult<()> {
    let registry = TaskRegistry::builtin();
    for task in registry.iter() {
        let steps: Vec<&str> = task
            .steps
            .iter()
            .map(|step| match step {
                Step::Lint => "lint",
                Step::Compile => "compile",
            })
            .collect();
        let suffix = if task.debug { " (source metadata)" } else { "" };
        println!("{:<18} {}{}", task.name, steps.join(" -> "), suffix);
    }
    Ok(())
}
