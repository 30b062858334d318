//! Named build tasks and the per-invocation state machine.
//!
//! The orchestrator owns the task registry and runs one invocation at a
//! time through an explicit `Idle -> Linting -> Compiling -> Done | Failed`
//! state machine. A lint failure never reaches the compiler, and any
//! failure leaves the previous artifact in place.

use std::fmt;

use baler_core::{log_error, BuildError, BuildResult};

use crate::bundler::{BundleReport, Bundler};
use crate::emit::EmitOptions;

/// Name of the plain production build task.
pub const TASK_BUNDLE: &str = "bundle";
/// Name of the lint-gated build task.
pub const TASK_BUNDLE_WITH_LINT: &str = "bundle-with-lint";
/// Name of the dev build task (source metadata enabled).
pub const TASK_DEV: &str = "dev";

/// One step of a task pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Run the lint gate; failure aborts the pipeline.
    Lint,
    /// Compile and write the artifact.
    Compile,
}

/// A named, ordered pipeline. Defined once at registration, never mutated.
#[derive(Debug, Clone)]
pub struct Task {
    /// The name it is invoked by.
    pub name: String,
    /// Steps in execution order.
    pub steps: Vec<Step>,
    /// Whether this task compiles with source metadata.
    pub debug: bool,
}

/// Lifecycle states of one task invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Created but not started.
    Idle,
    /// Running the lint gate.
    Linting,
    /// Running the compiler.
    Compiling,
    /// Finished, artifact written.
    Done,
    /// Aborted; previous artifact untouched.
    Failed,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Idle => "idle",
            TaskState::Linting => "linting",
            TaskState::Compiling => "compiling",
            TaskState::Done => "done",
            TaskState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The named tasks known to this process run.
#[derive(Debug)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// The built-in tasks: `bundle`, `bundle-with-lint`, and `dev`.
    pub fn builtin() -> Self {
        Self {
            tasks: vec![
                Task {
                    name: TASK_BUNDLE.to_string(),
                    steps: vec![Step::Compile],
                    debug: false,
                },
                Task {
                    name: TASK_BUNDLE_WITH_LINT.to_string(),
                    steps: vec![Step::Lint, Step::Compile],
                    debug: false,
                },
                Task {
                    name: TASK_DEV.to_string(),
                    steps: vec![Step::Compile],
                    debug: true,
                },
            ],
        }
    }

    /// Register an additional task. A duplicate name is a configuration
    /// error.
    pub fn register(&mut self, task: Task) -> BuildResult<()> {
        if self.tasks.iter().any(|t| t.name == task.name) {
            return Err(BuildError::config(task.name, "duplicate task name"));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Look up a task by name.
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// All tasks, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// The default task name for the given flag.
    pub fn default_task(lint: bool) -> &'static str {
        if lint {
            TASK_BUNDLE_WITH_LINT
        } else {
            TASK_BUNDLE
        }
    }
}

/// Record of one task invocation: the states it passed through and its
/// outcome.
#[derive(Debug)]
pub struct Invocation {
    /// Task name.
    pub task: String,
    /// States in transition order, starting at `Idle`.
    pub states: Vec<TaskState>,
    /// The report of a successful compile, or the aborting error. Lint-only
    /// tasks succeed with no report.
    pub outcome: BuildResult<Option<BundleReport>>,
}

impl Invocation {
    /// Whether the invocation reached `Done`.
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The state the invocation ended in.
    pub fn final_state(&self) -> TaskState {
        self.states.last().copied().unwrap_or(TaskState::Idle)
    }
}

/// Runs tasks against one bundler. Exclusively owns the task registry.
#[derive(Debug)]
pub struct Orchestrator {
    registry: TaskRegistry,
    bundler: Bundler,
}

impl Orchestrator {
    /// Create an orchestrator over a bundler and a task registry.
    pub fn new(bundler: Bundler, registry: TaskRegistry) -> Self {
        Self { registry, bundler }
    }

    /// The task registry.
    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// The bundler tasks run against.
    pub fn bundler(&self) -> &Bundler {
        &self.bundler
    }

    /// Run one task invocation to completion. `debug` forces source
    /// metadata on regardless of the task's own setting. The only error is
    /// an unknown task name; step failures are recorded in the invocation.
    pub fn run(&self, name: &str, debug: bool) -> BuildResult<Invocation> {
        let task = self
            .registry
            .get(name)
            .ok_or_else(|| BuildError::config(name, "unknown task"))?
            .clone();

        let mut states = vec![TaskState::Idle];
        let mut report = None;
        for step in &task.steps {
            let result = match step {
                Step::Lint => {
                    states.push(TaskState::Linting);
                    self.bundler.lint().map(|_| None)
                }
                Step::Compile => {
                    states.push(TaskState::Compiling);
                    let options = EmitOptions {
                        debug: debug || task.debug,
                    };
                    self.bundler.compile(&options).map(Some)
                }
            };
            match result {
                Ok(step_report) => {
                    if step_report.is_some() {
                        report = step_report;
                    }
                }
                Err(e) => {
                    states.push(TaskState::Failed);
                    log_error!("task", "task '{}' failed: {}", task.name, e);
                    return Ok(Invocation {
                        task: task.name,
                        states,
                        outcome: Err(e),
                    });
                }
            }
        }
        states.push(TaskState::Done);
        Ok(Invocation {
            task: task.name,
            states,
            outcome: Ok(report),
        })
    }
}
