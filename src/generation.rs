use core::cell::Cell;

/// Orders overlapping refreshes. Only the most recently started one may touch the DOM.
#[derive(Debug, Default)]
pub struct Generations(Cell<u64>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generations {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new generation, superseding all earlier tickets.
	pub fn begin(&self) -> Ticket {
		let next = self.0.get().wrapping_add(1);
		self.0.set(next);
		Ticket(next)
	}

	#[must_use]
	pub fn is_current(&self, ticket: Ticket) -> bool {
		self.0.get() == ticket.0
	}
}
