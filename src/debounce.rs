//! Debouncing with generation counters.
//!
//! Every scheduled value bumps the generation. When its timer fires, the value
//! is released only if no newer value was scheduled in the meantime, so a burst
//! of inputs collapses to the last one.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::set_timeout;

/// Holds the latest pending value and the generation it was scheduled under.
#[derive(Debug)]
pub struct Debouncer<T> {
	generation: u64,
	pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
	fn default() -> Self {
		Self {
			generation: 0,
			pending: None,
		}
	}
}

impl<T> Debouncer<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces any pending value and returns the ticket its timer must present.
	pub fn schedule(&mut self, value: T) -> u64 {
		self.generation = self.generation.wrapping_add(1);
		self.pending = Some(value);
		self.generation
	}

	/// Releases the pending value if `generation` is still the latest.
	pub fn fire(&mut self, generation: u64) -> Option<T> {
		if generation == self.generation {
			self.pending.take()
		} else {
			None
		}
	}

	/// Drops the pending value; outstanding timers become no-ops.
	pub fn cancel(&mut self) {
		self.generation = self.generation.wrapping_add(1);
		self.pending = None;
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}

/// Schedules `value` and calls `apply` with it after `delay`, unless another
/// value is scheduled on the same debouncer first.
pub fn debounce<T: 'static>(
	debouncer: &Rc<RefCell<Debouncer<T>>>,
	value: T,
	delay: Duration,
	apply: impl FnOnce(T) + 'static,
) {
	let generation = debouncer.borrow_mut().schedule(value);
	let debouncer = Rc::clone(debouncer);
	set_timeout(
		move || {
			let fired = debouncer.borrow_mut().fire(generation);
			if let Some(value) = fired {
				apply(value);
			}
		},
		delay,
	);
}
