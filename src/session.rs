//! Ordering guard for overlapping requests.

/// Tags requests with increasing generations so that only the reply to the
/// most recently issued request is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestTracker {
	generation: u64,
}

impl RequestTracker {
	/// Starts a request and returns its ticket. Older tickets become stale.
	pub fn begin(&mut self) -> u64 {
		self.generation += 1;
		self.generation
	}

	/// Whether `ticket` belongs to the latest request.
	pub fn is_current(&self, ticket: u64) -> bool {
		ticket == self.generation
	}

	/// Makes every outstanding ticket stale without starting a new request.
	pub fn cancel(&mut self) {
		self.generation += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_last_submitted_wins() {
		let mut tracker = RequestTracker::default();
		let first = tracker.begin();
		let second = tracker.begin();
		// The first reply arrives late and must be dropped.
		assert!(!tracker.is_current(first));
		assert!(tracker.is_current(second));
	}

	#[test]
	fn test_cancel() {
		let mut tracker = RequestTracker::default();
		let ticket = tracker.begin();
		tracker.cancel();
		assert!(!tracker.is_current(ticket));
	}
}
