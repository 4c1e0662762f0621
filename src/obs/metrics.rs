// self
use crate::obs::{CallOutcome, CallStage};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(stage: CallStage, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"stockdash_client_call_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}
