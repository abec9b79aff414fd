// storefront/src/flow/mod.rs

//! Named-step pipelines for multi-step client flows (checkout, add to cart).
//!
//! A flow is a `Pipeline<TData, Err>`: an ordered list of named steps, each
//! with `before`/`on`/`after` handlers that operate on a shared
//! `ContextData<TData>`. A handler returns `StepControl::Continue` to proceed
//! or `StepControl::Halt` to end the run early without an error.

pub mod context;
pub mod control;
pub mod error;
pub mod execution;
pub mod pipeline;

pub use context::{ContextData, Handler};
pub use control::{FlowOutcome, StepControl};
pub use error::FlowError;
pub use pipeline::Pipeline;
