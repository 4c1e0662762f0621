//! Forced-navigation hook invoked when the session cannot be recovered.

/// Sends the user back to the login entry point.
///
/// The refresh coordinator calls [`redirect`](LoginRedirect::redirect) once when a signed-in
/// session cannot be recovered, after local credentials were cleared. Implementations must not
/// block.
pub trait LoginRedirect
where
	Self: Send + Sync,
{
	/// Navigates to `target` (the configured login path).
	fn redirect(&self, target: &str);
}

/// Redirect hook that does nothing, for headless contexts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRedirect;
impl LoginRedirect for NoopRedirect {
	fn redirect(&self, _target: &str) {}
}

impl<F> LoginRedirect for F
where
	F: Fn(&str) + Send + Sync,
{
	fn redirect(&self, target: &str) {
		self(target)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	#[test]
	fn closures_act_as_redirect_hooks() {
		let hits = AtomicUsize::new(0);
		let hook = |target: &str| {
			assert_eq!(target, "/login");
			hits.fetch_add(1, Ordering::Relaxed);
		};

		LoginRedirect::redirect(&hook, "/login");
		NoopRedirect.redirect("/login");

		assert_eq!(hits.load(Ordering::Relaxed), 1);
	}
}
