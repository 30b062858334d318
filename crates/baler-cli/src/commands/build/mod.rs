mod args;
mod driver;

pub use args::BuildArgs;
pub(crate) use args::selected_task;
pub use driver::execute;
