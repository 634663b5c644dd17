use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::value::key::identity_of;
use crate::value::{Type, Value};

fn addr_of<T: ?Sized>(ptr: *const T) -> usize {
	ptr.cast::<()>() as usize
}

/// Shared mutable cell referenced by pointer values.
///
/// Cloning a `Ptr` aliases the same cell, which is what lets value graphs contain cycles.
#[derive(Clone)]
pub struct Ptr {
	elem: Type,
	cell: Arc<RwLock<Value>>,
}

impl Ptr {
	/// New cell holding `value`.
	pub fn new(elem: &Type, value: Value) -> Self {
		Self {
			elem: elem.clone(),
			cell: Arc::new(RwLock::new(value)),
		}
	}

	/// Pointee type.
	pub fn elem(&self) -> &Type {
		&self.elem
	}

	/// Snapshot of the current pointee.
	pub fn get(&self) -> Value {
		self.cell.read().clone()
	}

	/// Replace the pointee.
	pub fn set(&self, value: Value) {
		*self.cell.write() = value;
	}

	/// Address identifying the cell.
	pub fn addr(&self) -> usize {
		addr_of(Arc::as_ptr(&self.cell))
	}

	/// Non-owning handle to the same cell.
	pub fn downgrade(&self) -> WeakPtr {
		WeakPtr {
			elem: self.elem.clone(),
			cell: Arc::downgrade(&self.cell),
		}
	}

	/// True when both handles alias the same cell.
	pub fn ptr_eq(&self, other: &Ptr) -> bool {
		Arc::ptr_eq(&self.cell, &other.cell)
	}
}

/// Non-owning pointer whose target may already be gone.
#[derive(Clone)]
pub struct WeakPtr {
	elem: Type,
	cell: Weak<RwLock<Value>>,
}

impl WeakPtr {
	/// Weak pointer that never upgrades.
	pub fn dangling(elem: &Type) -> Self {
		Self {
			elem: elem.clone(),
			cell: Weak::new(),
		}
	}

	/// Pointee type.
	pub fn elem(&self) -> &Type {
		&self.elem
	}

	/// Strong handle if the target is still alive.
	pub fn upgrade(&self) -> Option<Ptr> {
		self.cell.upgrade().map(|cell| Ptr {
			elem: self.elem.clone(),
			cell,
		})
	}
}

struct SliceBuf {
	items: Vec<Value>,
	cap: usize,
}

/// Shared growable sequence with a tracked capacity.
#[derive(Clone)]
pub struct Slice {
	elem: Type,
	buf: Arc<RwLock<SliceBuf>>,
}

impl Slice {
	/// Slice whose capacity equals its length.
	pub fn new(elem: &Type, items: Vec<Value>) -> Self {
		let cap = items.len();
		Self::with_capacity(elem, items, cap)
	}

	/// Slice with an explicit capacity, raised to at least the length.
	pub fn with_capacity(elem: &Type, items: Vec<Value>, cap: usize) -> Self {
		let cap = cap.max(items.len());
		Self {
			elem: elem.clone(),
			buf: Arc::new(RwLock::new(SliceBuf { items, cap })),
		}
	}

	/// Element type.
	pub fn elem(&self) -> &Type {
		&self.elem
	}

	/// Current length.
	pub fn len(&self) -> usize {
		self.buf.read().items.len()
	}

	/// True when the slice holds no elements.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Current capacity.
	pub fn cap(&self) -> usize {
		self.buf.read().cap
	}

	/// Element snapshot at `idx`.
	pub fn get(&self, idx: usize) -> Option<Value> {
		self.buf.read().items.get(idx).cloned()
	}

	/// Replace the element at `idx`, returning false when out of range.
	pub fn set(&self, idx: usize, value: Value) -> bool {
		let mut buf = self.buf.write();
		match buf.items.get_mut(idx) {
			Some(slot) => {
				*slot = value;
				true
			}
			None => false,
		}
	}

	/// Append one element, doubling capacity when full.
	pub fn push(&self, value: Value) {
		let mut buf = self.buf.write();
		if buf.items.len() == buf.cap {
			buf.cap = (buf.cap * 2).max(4);
		}
		buf.items.push(value);
	}

	/// Snapshot of all elements.
	pub fn items(&self) -> Vec<Value> {
		self.buf.read().items.clone()
	}

	/// Address identifying the backing storage.
	pub fn addr(&self) -> usize {
		addr_of(Arc::as_ptr(&self.buf))
	}
}

/// Shared key/value table preserving insertion order.
#[derive(Clone)]
pub struct Map {
	key: Type,
	value: Type,
	entries: Arc<RwLock<Vec<(Value, Value)>>>,
}

impl Map {
	/// Empty table.
	pub fn new(key: &Type, value: &Type) -> Self {
		Self {
			key: key.clone(),
			value: value.clone(),
			entries: Arc::new(RwLock::new(Vec::new())),
		}
	}

	/// Key type.
	pub fn key_type(&self) -> &Type {
		&self.key
	}

	/// Value type.
	pub fn value_type(&self) -> &Type {
		&self.value
	}

	/// Insert an entry. Comparable keys replace an equal existing key and return its old value.
	pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
		let mut entries = self.entries.write();
		if let Some(wanted) = identity_of(&key)
			&& let Some(slot) = entries.iter_mut().find(|(existing, _)| identity_of(existing).as_ref() == Some(&wanted))
		{
			return Some(std::mem::replace(&mut slot.1, value));
		}
		entries.push((key, value));
		None
	}

	pub(crate) fn append(&self, key: Value, value: Value) {
		self.entries.write().push((key, value));
	}

	/// Value stored under a comparable key.
	pub fn get(&self, key: &Value) -> Option<Value> {
		let wanted = identity_of(key)?;
		self.entries
			.read()
			.iter()
			.find(|(existing, _)| identity_of(existing).as_ref() == Some(&wanted))
			.map(|(_, value)| value.clone())
	}

	/// Entry count.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// True when the table holds no entries.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Snapshot of all entries in insertion order.
	pub fn entries(&self) -> Vec<(Value, Value)> {
		self.entries.read().clone()
	}

	/// Address identifying the table.
	pub fn addr(&self) -> usize {
		addr_of(Arc::as_ptr(&self.entries))
	}
}

/// Shared bounded queue.
#[derive(Clone)]
pub struct Chan {
	elem: Type,
	queue: Arc<Mutex<VecDeque<Value>>>,
	cap: usize,
}

impl Chan {
	/// Empty queue holding at most `cap` buffered values.
	pub fn new(elem: &Type, cap: usize) -> Self {
		Self {
			elem: elem.clone(),
			queue: Arc::new(Mutex::new(VecDeque::with_capacity(cap))),
			cap,
		}
	}

	/// Element type.
	pub fn elem(&self) -> &Type {
		&self.elem
	}

	/// Buffer a value, handing it back when the queue is full.
	pub fn send(&self, value: Value) -> std::result::Result<(), Value> {
		let mut queue = self.queue.lock();
		if queue.len() >= self.cap {
			return Err(value);
		}
		queue.push_back(value);
		Ok(())
	}

	/// Take the oldest buffered value.
	pub fn recv(&self) -> Option<Value> {
		self.queue.lock().pop_front()
	}

	/// Take every buffered value.
	pub fn drain(&self) -> Vec<Value> {
		self.queue.lock().drain(..).collect()
	}

	/// Buffered value count.
	pub fn len(&self) -> usize {
		self.queue.lock().len()
	}

	/// True when nothing is buffered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Buffer capacity.
	pub fn cap(&self) -> usize {
		self.cap
	}

	/// Address identifying the queue.
	pub fn addr(&self) -> usize {
		addr_of(Arc::as_ptr(&self.queue))
	}
}

/// Named callable reference.
#[derive(Clone)]
pub struct Func {
	sig: Type,
	name: Arc<str>,
}

impl Func {
	/// Function with a signature type (see [`Type::func`]) and a display name.
	pub fn new(sig: &Type, name: impl Into<Arc<str>>) -> Self {
		Self {
			sig: sig.clone(),
			name: name.into(),
		}
	}

	/// Signature type.
	pub fn sig(&self) -> &Type {
		&self.sig
	}

	/// Display name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Address identifying this function handle.
	pub fn addr(&self) -> usize {
		addr_of(Arc::as_ptr(&self.name))
	}
}
