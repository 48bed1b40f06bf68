//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioDelivery};
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::{MockSmsDelivery, TestDependencies};
pub use traits::*;
