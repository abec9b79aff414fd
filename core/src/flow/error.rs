// storefront/src/flow/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found in flow '{flow}': {step_name}")]
  StepNotFound { flow: &'static str, step_name: String },

  #[error("Handler missing for non-optional step '{step_name}' in flow '{flow}'")]
  HandlerMissing { flow: &'static str, step_name: String },

  #[error("Step '{step_name}' declared twice in flow '{flow}'")]
  DuplicateStep { flow: &'static str, step_name: String },
}
