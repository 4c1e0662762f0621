// self
use crate::{_prelude::*, config::Destination, obs::CallStage, store::StoreError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by dispatch and refresh calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided destination + stage.
	pub fn new(destination: Destination, stage: CallStage) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"stockdash_client.call",
				destination = destination.as_str(),
				stage = stage.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (destination, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Reports a credential store write that could not be persisted.
pub fn record_store_failure(operation: &'static str, error: &StoreError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(operation, %error, "credential store could not persist");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, error);
	}
}
