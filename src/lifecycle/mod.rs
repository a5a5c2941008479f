//! Work log review and payment workflows.
//!
//! Both workflows sit on top of the [`PayrollStore`](crate::ports::PayrollStore)
//! port and rely on its conditional updates for every status change.

mod payment_processor;
mod work_log_lifecycle;

pub use payment_processor::PaymentProcessor;
pub use work_log_lifecycle::WorkLogLifecycle;
