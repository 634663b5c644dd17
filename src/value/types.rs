use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};

use parking_lot::RwLock;
use tracing::trace;

use crate::error::{PrettyError, Result};
use crate::value::{Kind, Value};

/// Hook producing human-readable text for a value.
pub type TextHook = Arc<dyn Fn(&Value) -> String + Send + Sync>;
/// Hook producing an error message and its cause chain.
pub type ErrorHook = Arc<dyn Fn(&Value) -> ErrorReport + Send + Sync>;
/// Hook exposing the byte content of a container.
pub type BytesHook = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
/// Hook yielding the items of an iterable value.
pub type IterHook = Arc<dyn Fn(&Value) -> Box<dyn Iterator<Item = Value>> + Send + Sync>;
/// Hook yielding the key/value pairs of an iterable value.
pub type PairsHook = Arc<dyn Fn(&Value) -> Box<dyn Iterator<Item = (Value, Value)>> + Send + Sync>;

/// Error message plus its `source()` chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
	/// Top-level message.
	pub message: String,
	/// Messages of the underlying causes, outermost first.
	pub causes: Vec<String>,
}

impl ErrorReport {
	/// Report with no causes.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			causes: Vec::new(),
		}
	}

	/// Append one cause.
	pub fn caused_by(mut self, cause: impl Into<String>) -> Self {
		self.causes.push(cause.into());
		self
	}

	/// Collect the message and source chain of a standard error.
	pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
		let mut causes = Vec::new();
		let mut source = err.source();
		while let Some(cause) = source {
			causes.push(cause.to_string());
			source = cause.source();
		}
		Self {
			message: err.to_string(),
			causes,
		}
	}
}

/// Behaviour hooks attached to a type.
#[derive(Clone, Default)]
pub struct Methods {
	/// `Display`-style text.
	pub display: Option<TextHook>,
	/// Error message and causes.
	pub error: Option<ErrorHook>,
	/// Byte content view.
	pub bytes: Option<BytesHook>,
	/// Item iteration.
	pub iter: Option<IterHook>,
	/// Key/value iteration.
	pub pairs: Option<PairsHook>,
	/// Extra trait names reported by type dumps.
	pub traits: Vec<Arc<str>>,
}

impl Methods {
	/// True when no hook and no trait name is present.
	pub fn is_empty(&self) -> bool {
		self.display.is_none() && self.error.is_none() && self.bytes.is_none() && self.iter.is_none() && self.pairs.is_none() && self.traits.is_empty()
	}

	/// Trait names implied by the hooks followed by the declared extras.
	pub fn trait_names(&self) -> Vec<Arc<str>> {
		let mut names: Vec<Arc<str>> = Vec::new();
		if self.display.is_some() {
			names.push(Arc::from("Display"));
		}
		if self.error.is_some() {
			names.push(Arc::from("Error"));
		}
		if self.bytes.is_some() {
			names.push(Arc::from("AsRef<[u8]>"));
		}
		if self.iter.is_some() || self.pairs.is_some() {
			names.push(Arc::from("IntoIterator"));
		}
		names.extend(self.traits.iter().cloned());
		names
	}
}

impl fmt::Debug for Methods {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Methods")
			.field("display", &self.display.is_some())
			.field("error", &self.error.is_some())
			.field("bytes", &self.bytes.is_some())
			.field("iter", &self.iter.is_some())
			.field("pairs", &self.pairs.is_some())
			.field("traits", &self.traits)
			.finish()
	}
}

/// One declared struct field.
#[derive(Debug, Clone)]
pub struct Field {
	name: Arc<str>,
	ty: Type,
	public: bool,
}

impl Field {
	/// Field with explicit visibility.
	pub fn new(name: impl Into<Arc<str>>, ty: &Type, public: bool) -> Self {
		Self {
			name: name.into(),
			ty: ty.clone(),
			public,
		}
	}

	/// Publicly readable field.
	pub fn public(name: impl Into<Arc<str>>, ty: &Type) -> Self {
		Self::new(name, ty, true)
	}

	/// Private field; values read through it are not readable.
	pub fn private(name: impl Into<Arc<str>>, ty: &Type) -> Self {
		Self::new(name, ty, false)
	}

	/// Field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declared field type.
	pub fn ty(&self) -> &Type {
		&self.ty
	}

	/// Field visibility.
	pub fn is_public(&self) -> bool {
		self.public
	}
}

struct TypeInfo {
	id: u64,
	name: Arc<str>,
	kind: Kind,
	base: Option<Type>,
	elem: Option<Type>,
	key: Option<Type>,
	len: Option<usize>,
	fields: OnceLock<Vec<Field>>,
	params: Vec<Type>,
	results: Vec<Type>,
	size: Option<usize>,
	methods: Methods,
}

/// Shared handle to runtime type metadata.
///
/// Builtin and composite types are interned, so structurally equal requests return the same handle.
/// Struct and named types built with [`TypeBuilder`] are unique per build.
#[derive(Clone)]
pub struct Type(Arc<TypeInfo>);

#[derive(PartialEq, Eq, Hash)]
struct TypeKey {
	kind: Kind,
	name: Arc<str>,
	parts: Vec<u64>,
	labels: Vec<(Arc<str>, bool)>,
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static REGISTRY: LazyLock<RwLock<HashMap<TypeKey, Type>>> = LazyLock::new(Default::default);

struct Spec {
	name: Arc<str>,
	kind: Kind,
	base: Option<Type>,
	elem: Option<Type>,
	key: Option<Type>,
	len: Option<usize>,
	fields: Option<Vec<Field>>,
	params: Vec<Type>,
	results: Vec<Type>,
	size: Option<usize>,
	methods: Methods,
}

impl Spec {
	fn new(name: Arc<str>, kind: Kind) -> Self {
		Self {
			name,
			kind,
			base: None,
			elem: None,
			key: None,
			len: None,
			fields: None,
			params: Vec::new(),
			results: Vec::new(),
			size: kind.builtin_size(),
			methods: Methods::default(),
		}
	}

	fn build(self) -> Type {
		let fields = OnceLock::new();
		if let Some(list) = self.fields {
			let _ = fields.set(list);
		}
		Type(Arc::new(TypeInfo {
			id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
			name: self.name,
			kind: self.kind,
			base: self.base,
			elem: self.elem,
			key: self.key,
			len: self.len,
			fields,
			params: self.params,
			results: self.results,
			size: self.size,
			methods: self.methods,
		}))
	}
}

macro_rules! builtin_types {
	($($name:ident => $kind:ident,)*) => {
		impl Type {
			$(
				#[doc = concat!("Builtin `", stringify!($name), "` type.")]
				pub fn $name() -> Type {
					Self::scalar(Kind::$kind)
				}
			)*
		}
	};
}

builtin_types! {
	invalid => Invalid,
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	i128 => I128,
	isize => Isize,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	u128 => U128,
	usize => Usize,
	f32 => F32,
	f64 => F64,
	complex64 => Complex64,
	complex128 => Complex128,
	string => String,
	unsafe_pointer => UnsafePointer,
}

impl Type {
	fn intern(kind: Kind, name: Arc<str>, parts: Vec<u64>, make: impl FnOnce(Arc<str>) -> Spec) -> Type {
		Self::intern_labeled(kind, name, parts, Vec::new(), make)
	}

	/// Interning keyed by field names and visibility as well as field types.
	fn intern_labeled(kind: Kind, name: Arc<str>, parts: Vec<u64>, labels: Vec<(Arc<str>, bool)>, make: impl FnOnce(Arc<str>) -> Spec) -> Type {
		let key = TypeKey { kind, name, parts, labels };
		if let Some(ty) = REGISTRY.read().get(&key) {
			return ty.clone();
		}
		let candidate = make(key.name.clone()).build();
		match REGISTRY.write().entry(key) {
			Entry::Occupied(found) => found.get().clone(),
			Entry::Vacant(slot) => {
				trace!(type_id = candidate.id(), name = candidate.name(), kind = %kind, "interned type");
				slot.insert(candidate).clone()
			}
		}
	}

	fn scalar(kind: Kind) -> Type {
		Self::intern(kind, Arc::from(kind.builtin_name()), Vec::new(), |name| Spec::new(name, kind))
	}

	fn composite(kind: Kind, name: String, elem: Option<&Type>, key: Option<&Type>, extra: impl FnOnce(&mut Spec)) -> Type {
		let parts = [key, elem].into_iter().flatten().map(Type::id).collect();
		Self::intern(kind, Arc::from(name), parts, |name| {
			let mut spec = Spec::new(name, kind);
			spec.elem = elem.cloned();
			spec.key = key.cloned();
			extra(&mut spec);
			spec
		})
	}

	/// Builtin type of a scalar kind, `None` for composite kinds.
	pub fn builtin(kind: Kind) -> Option<Type> {
		(kind.is_scalar() || kind == Kind::Invalid).then(|| Self::scalar(kind))
	}

	/// Growable sequence type, named `Vec<T>`.
	pub fn slice_of(elem: &Type) -> Type {
		Self::composite(Kind::Slice, format!("Vec<{}>", elem.name()), Some(elem), None, |spec| {
			spec.size = Some(size_of::<Vec<u8>>());
		})
	}

	/// Fixed-length sequence type, named `[T; N]`.
	pub fn array_of(elem: &Type, len: usize) -> Type {
		Self::composite(Kind::Array, format!("[{}; {len}]", elem.name()), Some(elem), None, |spec| {
			spec.len = Some(len);
			spec.size = elem.size().and_then(|size| size.checked_mul(len));
		})
	}

	/// Key/value table type, named `HashMap<K, V>`.
	pub fn map_of(key: &Type, value: &Type) -> Type {
		Self::composite(Kind::Map, format!("HashMap<{}, {}>", key.name(), value.name()), Some(value), Some(key), |_| {})
	}

	/// Shared reference type, named `&T`.
	pub fn pointer_to(elem: &Type) -> Type {
		Self::composite(Kind::Pointer, format!("&{}", elem.name()), Some(elem), None, |_| {})
	}

	/// Buffered queue type, named `Channel<T>`.
	pub fn chan_of(elem: &Type) -> Type {
		Self::composite(Kind::Chan, format!("Channel<{}>", elem.name()), Some(elem), None, |spec| {
			spec.size = Some(size_of::<usize>());
		})
	}

	/// Function signature type, named like `fn(A, B) -> R`.
	pub fn func(params: &[Type], results: &[Type]) -> Type {
		let args = params.iter().map(Type::name).collect::<Vec<_>>().join(", ");
		let name = match results {
			[] => format!("fn({args})"),
			[single] => format!("fn({args}) -> {}", single.name()),
			many => format!("fn({args}) -> ({})", many.iter().map(Type::name).collect::<Vec<_>>().join(", ")),
		};
		let mut parts: Vec<u64> = params.iter().map(Type::id).collect();
		parts.push(0);
		parts.extend(results.iter().map(Type::id));
		Self::intern(Kind::Func, Arc::from(name), parts, |name| {
			let mut spec = Spec::new(name, Kind::Func);
			spec.params = params.to_vec();
			spec.results = results.to_vec();
			spec.size = Some(size_of::<usize>());
			spec
		})
	}

	/// Dynamically typed slot, named `dyn Name`.
	pub fn interface(name: &str) -> Type {
		Self::composite(Kind::Interface, format!("dyn {name}"), None, None, |spec| {
			spec.size = Some(2 * size_of::<usize>());
		})
	}

	/// Tuple type with positional public fields `0`, `1`, ...
	pub fn tuple(parts: &[Type]) -> Type {
		let name = match parts {
			[single] => format!("({},)", single.name()),
			many => format!("({})", many.iter().map(Type::name).collect::<Vec<_>>().join(", ")),
		};
		Self::intern(Kind::Struct, Arc::from(name), parts.iter().map(Type::id).collect(), |name| {
			let mut spec = Spec::new(name, Kind::Struct);
			spec.fields = Some(parts.iter().enumerate().map(|(idx, ty)| Field::public(idx.to_string(), ty)).collect());
			spec
		})
	}

	/// Interned type with an explicit name such as `Box<T>` or `BTreeMap<K, V>`.
	pub fn generic(kind: Kind, name: &str, elem: Option<&Type>, key: Option<&Type>) -> Type {
		Self::composite(kind, name.to_owned(), elem, key, |_| {})
	}

	/// Like [`Type::generic`], attaching hooks the first time the type is interned.
	pub fn generic_with(kind: Kind, name: &str, elem: Option<&Type>, key: Option<&Type>, methods: impl FnOnce() -> Methods) -> Type {
		Self::composite(kind, name.to_owned(), elem, key, |spec| spec.methods = methods())
	}

	/// Interned struct type with the given fields and hooks.
	pub fn record(name: &str, fields: &[Field], methods: impl FnOnce() -> Methods) -> Type {
		let parts = fields.iter().map(|field| field.ty().id()).collect();
		let labels = fields.iter().map(|field| (Arc::from(field.name()), field.is_public())).collect();
		Self::intern_labeled(Kind::Struct, Arc::from(name), parts, labels, |name| {
			let mut spec = Spec::new(name, Kind::Struct);
			spec.fields = Some(fields.to_vec());
			spec.methods = methods();
			spec
		})
	}

	/// Interned struct type with private fields, used as the structural mirror of native values.
	pub fn opaque(name: &str, fields: &[(&str, Type)], methods: impl FnOnce() -> Methods) -> Type {
		let fields: Vec<Field> = fields.iter().map(|(field, ty)| Field::private(*field, ty)).collect();
		Self::record(name, &fields, methods)
	}

	/// Process-unique type id.
	pub fn id(&self) -> u64 {
		self.0.id
	}

	/// Display name.
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Structural kind.
	pub fn kind(&self) -> Kind {
		self.0.kind
	}

	/// Underlying type of a named type.
	pub fn base(&self) -> Option<&Type> {
		self.0.base.as_ref()
	}

	/// True for types declared with [`TypeBuilder::named`].
	pub fn is_named(&self) -> bool {
		self.0.base.is_some()
	}

	/// Element type of sequences, pointers, channels, and maps.
	pub fn elem(&self) -> Option<&Type> {
		self.0.elem.as_ref()
	}

	/// Key type of maps.
	pub fn key(&self) -> Option<&Type> {
		self.0.key.as_ref()
	}

	/// Fixed length of array types.
	pub fn len(&self) -> Option<usize> {
		self.0.len
	}

	/// Declared struct fields, empty until defined.
	pub fn fields(&self) -> &[Field] {
		self.0.fields.get().map(Vec::as_slice).unwrap_or_default()
	}

	/// Declared struct field by index.
	pub fn field(&self, idx: usize) -> Option<&Field> {
		self.fields().get(idx)
	}

	/// Declared struct field index by name.
	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.fields().iter().position(|field| field.name() == name)
	}

	/// True once struct fields have been defined.
	pub fn has_fields(&self) -> bool {
		self.0.fields.get().is_some()
	}

	/// Define struct fields after the type exists, allowing self-referential types.
	pub fn set_fields(&self, fields: Vec<Field>) -> Result<()> {
		if self.kind() != Kind::Struct {
			return Err(PrettyError::KindMismatch {
				expected: Kind::Struct.to_string(),
				got: self.kind().to_string(),
			});
		}
		self.0.fields.set(fields).map_err(|_| PrettyError::FieldsAlreadyDefined {
			type_name: self.name().to_owned(),
		})
	}

	/// Function parameter types.
	pub fn params(&self) -> &[Type] {
		&self.0.params
	}

	/// Function result types.
	pub fn results(&self) -> &[Type] {
		&self.0.results
	}

	/// In-memory size when known.
	pub fn size(&self) -> Option<usize> {
		self.0.size
	}

	/// Attached behaviour hooks.
	pub fn methods(&self) -> &Methods {
		&self.0.methods
	}

	/// True when the type reports the named trait.
	pub fn implements(&self, trait_name: &str) -> bool {
		self.methods().trait_names().iter().any(|name| &**name == trait_name)
	}
}

impl PartialEq for Type {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for Type {}

impl Hash for Type {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Type").field(&self.name()).finish()
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Builder for struct and named types.
pub struct TypeBuilder {
	spec: Spec,
	fields: Vec<Field>,
}

impl TypeBuilder {
	/// Start a struct type. Fields may be added now or later via [`Type::set_fields`].
	pub fn structure(name: impl Into<Arc<str>>) -> Self {
		Self {
			spec: Spec::new(name.into(), Kind::Struct),
			fields: Vec::new(),
		}
	}

	/// Start a named type sharing the structure of `base`.
	pub fn named(name: impl Into<Arc<str>>, base: &Type) -> Self {
		let mut spec = Spec::new(name.into(), base.kind());
		spec.base = Some(base.clone());
		spec.elem = base.elem().cloned();
		spec.key = base.key().cloned();
		spec.len = base.len();
		spec.params = base.params().to_vec();
		spec.results = base.results().to_vec();
		spec.size = base.size();
		Self {
			spec,
			fields: base.fields().to_vec(),
		}
	}

	/// Append a public field.
	pub fn field(mut self, name: impl Into<Arc<str>>, ty: &Type) -> Self {
		self.fields.push(Field::public(name, ty));
		self
	}

	/// Append a private field.
	pub fn private_field(mut self, name: impl Into<Arc<str>>, ty: &Type) -> Self {
		self.fields.push(Field::private(name, ty));
		self
	}

	/// Attach a `Display`-style hook.
	pub fn display(mut self, hook: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
		self.spec.methods.display = Some(Arc::new(hook));
		self
	}

	/// Attach an error hook.
	pub fn error(mut self, hook: impl Fn(&Value) -> ErrorReport + Send + Sync + 'static) -> Self {
		self.spec.methods.error = Some(Arc::new(hook));
		self
	}

	/// Attach a byte-content hook.
	pub fn bytes(mut self, hook: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
		self.spec.methods.bytes = Some(Arc::new(hook));
		self
	}

	/// Attach an item iteration hook.
	pub fn iter(mut self, hook: impl Fn(&Value) -> Box<dyn Iterator<Item = Value>> + Send + Sync + 'static) -> Self {
		self.spec.methods.iter = Some(Arc::new(hook));
		self
	}

	/// Attach a key/value iteration hook.
	pub fn pairs(mut self, hook: impl Fn(&Value) -> Box<dyn Iterator<Item = (Value, Value)>> + Send + Sync + 'static) -> Self {
		self.spec.methods.pairs = Some(Arc::new(hook));
		self
	}

	/// Report an extra trait name in type dumps.
	pub fn implements(mut self, trait_name: impl Into<Arc<str>>) -> Self {
		self.spec.methods.traits.push(trait_name.into());
		self
	}

	/// Override the reported size.
	pub fn size(mut self, size: usize) -> Self {
		self.spec.size = Some(size);
		self
	}

	/// Finish the type.
	pub fn build(mut self) -> Type {
		if self.spec.kind == Kind::Struct && !self.fields.is_empty() {
			self.spec.fields = Some(self.fields);
		}
		let ty = self.spec.build();
		trace!(type_id = ty.id(), name = ty.name(), kind = %ty.kind(), "built type");
		ty
	}
}
