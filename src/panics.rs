//! Panic containment for rendering calls.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

thread_local! {
	static SCOPES: RefCell<Vec<bool>> = const { RefCell::new(Vec::new()) };
	static TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

/// Panic recovered inside [`contain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caught {
	/// Panic payload text.
	pub message: String,
	/// Backtrace captured at the panic site, when requested.
	pub trace: Option<String>,
}

/// Run `f`, converting a panic into [`Caught`].
///
/// While a containment scope is active on this thread the default panic report is suppressed;
/// panics outside any scope still reach the previously installed hook.
pub(crate) fn contain<R>(want_trace: bool, f: impl FnOnce() -> R) -> Result<R, Caught> {
	install_hook();
	SCOPES.with_borrow_mut(|scopes| scopes.push(want_trace));
	let result = panic::catch_unwind(AssertUnwindSafe(f));
	SCOPES.with_borrow_mut(|scopes| {
		scopes.pop();
	});
	result.map_err(|payload| Caught {
		message: payload_message(payload.as_ref()),
		trace: TRACE.with_borrow_mut(Option::take),
	})
}

fn install_hook() {
	HOOK.call_once(|| {
		let previous = panic::take_hook();
		panic::set_hook(Box::new(move |info| {
			let scope = SCOPES
				.try_with(|scopes| scopes.try_borrow().ok().and_then(|scopes| scopes.last().copied()))
				.ok()
				.flatten();
			match scope {
				Some(true) => {
					let trace = Backtrace::force_capture().to_string();
					let _ = TRACE.try_with(|slot| {
						if let Ok(mut slot) = slot.try_borrow_mut() {
							*slot = Some(trace);
						}
					});
				}
				Some(false) => {}
				None => previous(info),
			}
		}));
	});
}

/// Text of a panic payload.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> String {
	if let Some(text) = payload.downcast_ref::<&'static str>() {
		return (*text).to_owned();
	}
	if let Some(text) = payload.downcast_ref::<String>() {
		return text.clone();
	}
	"Box<dyn Any>".to_owned()
}
