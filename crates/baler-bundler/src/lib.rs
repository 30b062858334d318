//! The baler bundling pipeline.
//!
//! Module discovery, alias and shim resolution, static require-graph
//! resolution, artifact emission, the lint gate, and the task orchestrator
//! with its watch trigger.

pub mod alias;
pub mod bundler;
pub mod emit;
pub mod graph;
pub mod lint;
pub mod scan;
pub mod shim;
pub mod sources;
pub mod task;
pub mod watch;

pub use alias::AliasTable;
pub use bundler::{BundleReport, Bundler};
pub use emit::EmitOptions;
pub use graph::{BundleGraph, BundleModule, ModuleKind};
pub use lint::{LintRule, Linter};
pub use shim::{ShimDescriptor, ShimSet};
pub use sources::ModuleDescriptor;
pub use task::{Invocation, Orchestrator, Step, Task, TaskRegistry, TaskState};
pub use watch::{watch_loop, WatchTrigger};
