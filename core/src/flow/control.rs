// storefront/src/flow/control.rs

//! Signals for controlling flow execution and the outcome of a run.

/// Returned by a handler to continue or halt the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  Continue,
  /// Stop immediately. No further handlers run, in this step or later ones.
  Halt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every step ran.
  Completed,
  /// A handler returned `StepControl::Halt`.
  Halted,
}
