//! Reusable scratch buffers shared by every render.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

const MAX_IDLE: usize = 64;

/// Bounded free list of reusable values.
pub(crate) struct Pool<T> {
	idle: Mutex<Vec<T>>,
	reset: fn(&mut T) -> bool,
}

impl<T: Default> Pool<T> {
	/// Pool whose `reset` clears an item and reports whether it is worth keeping.
	pub(crate) const fn new(reset: fn(&mut T) -> bool) -> Self {
		Self {
			idle: parking_lot::const_mutex(Vec::new()),
			reset,
		}
	}

	/// Take an idle item or make a fresh one.
	pub(crate) fn get(&self) -> Pooled<'_, T> {
		let item = self.idle.lock().pop().unwrap_or_default();
		Pooled { pool: self, item }
	}

	fn put(&self, mut item: T) {
		if !(self.reset)(&mut item) {
			return;
		}
		let mut idle = self.idle.lock();
		if idle.len() < MAX_IDLE {
			idle.push(item);
		}
	}

	#[cfg(test)]
	pub(crate) fn idle_count(&self) -> usize {
		self.idle.lock().len()
	}
}

/// Item borrowed from a [`Pool`], returned on drop.
pub(crate) struct Pooled<'p, T: Default> {
	pool: &'p Pool<T>,
	item: T,
}

impl<T: Default> Deref for Pooled<'_, T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.item
	}
}

impl<T: Default> DerefMut for Pooled<'_, T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.item
	}
}

impl<T: Default> Drop for Pooled<'_, T> {
	fn drop(&mut self) {
		self.pool.put(std::mem::take(&mut self.item));
	}
}

const MAX_POOLED_BYTES: usize = 64 * 1024;

/// Clear a text buffer, dropping oversized ones.
pub(crate) fn reset_string(buf: &mut String) -> bool {
	buf.clear();
	buf.capacity() <= MAX_POOLED_BYTES
}

/// Clear a list, dropping oversized ones.
pub(crate) fn reset_vec<T>(list: &mut Vec<T>) -> bool {
	list.clear();
	list.capacity() <= MAX_POOLED_BYTES / size_of::<T>().max(1)
}
