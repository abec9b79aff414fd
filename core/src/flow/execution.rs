// storefront/src/flow/execution.rs

//! `Pipeline::run()`: executes steps in order, each through its
//! `before`, `on` and `after` phases.

use crate::flow::context::ContextData;
use crate::flow::control::{FlowOutcome, StepControl};
use crate::flow::error::FlowError;
use crate::flow::pipeline::{Phase, Pipeline};
use tracing::{event, instrument, Instrument, Level};

enum PhaseResult {
  Continue,
  Halted,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs the flow against `ctx_data`.
  ///
  /// A non-optional step with no handlers at all fails the run with
  /// `FlowError::HandlerMissing`, converted into `Err`. The first handler
  /// error aborts the run and is returned as-is.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(flow = self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = tracing::info_span!("flow_step", step_name, step_index = step_idx, optional = step_def.optional);

      let has_handlers = [Phase::Before, Phase::On, Phase::After]
        .iter()
        .any(|phase| !self.handlers(*phase, step_name).is_empty());

      if !has_handlers {
        if step_def.optional {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(parent: &step_span, Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          flow: self.name,
          step_name: step_def.name.clone(),
        }));
      }

      for phase in [Phase::Before, Phase::On, Phase::After] {
        let result = self.run_phase(phase, step_name, &ctx_data).instrument(step_span.clone()).await?;
        if let PhaseResult::Halted = result {
          return Ok(FlowOutcome::Halted);
        }
      }
      event!(parent: &step_span, Level::DEBUG, "Step finished.");
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_phase(&self, phase: Phase, step_name: &str, ctx_data: &ContextData<TData>) -> Result<PhaseResult, Err> {
    for (handler_idx, handler_fn) in self.handlers(phase, step_name).iter().enumerate() {
      match handler_fn(ctx_data.clone()).await {
        Ok(StepControl::Continue) => {}
        Ok(StepControl::Halt) => {
          event!(Level::INFO, phase = phase.as_str(), handler_index = handler_idx, "Flow halted by handler.");
          return Ok(PhaseResult::Halted);
        }
        Err(e) => {
          event!(Level::WARN, phase = phase.as_str(), handler_index = handler_idx, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PhaseResult::Continue)
  }
}
