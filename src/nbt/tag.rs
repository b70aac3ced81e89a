use crate::{McError, McResult};
use crate::nbt::Map;

pub type Byte = i8;
pub type Short = i16;
pub type Int = i32;
pub type Long = i64;
pub type Float = f32;
pub type Double = f64;
pub type ByteArray = Vec<i8>;
pub type String = std::string::String; // Lol (for solidarity and isomorphism)
pub type IntArray = Vec<i32>;
pub type LongArray = Vec<i64>;

/// The tag kind discriminant as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TagID {
	End = 0,
	Byte = 1,
	Short = 2,
	Int = 3,
	Long = 4,
	Float = 5,
	Double = 6,
	ByteArray = 7,
	String = 8,
	List = 9,
	Compound = 10,
	IntArray = 11,
	LongArray = 12,
}

impl TagID {
	/// The name of this tag kind as it is usually written ("TAG_Byte" etc.
	/// without the prefix).
	pub const fn title(self) -> &'static str {
		match self {
			TagID::End => "End",
			TagID::Byte => "Byte",
			TagID::Short => "Short",
			TagID::Int => "Int",
			TagID::Long => "Long",
			TagID::Float => "Float",
			TagID::Double => "Double",
			TagID::ByteArray => "ByteArray",
			TagID::String => "String",
			TagID::List => "List",
			TagID::Compound => "Compound",
			TagID::IntArray => "IntArray",
			TagID::LongArray => "LongArray",
		}
	}

	pub const fn value(self) -> u8 {
		self as u8
	}
}

impl TryFrom<u8> for TagID {
	type Error = McError;

	fn try_from(value: u8) -> McResult<Self> {
		Ok(match value {
			0 => TagID::End,
			1 => TagID::Byte,
			2 => TagID::Short,
			3 => TagID::Int,
			4 => TagID::Long,
			5 => TagID::Float,
			6 => TagID::Double,
			7 => TagID::ByteArray,
			8 => TagID::String,
			9 => TagID::List,
			10 => TagID::Compound,
			11 => TagID::IntArray,
			12 => TagID::LongArray,
			unsupported => return Err(McError::UnsupportedTagId(unsupported)),
		})
	}
}

impl std::fmt::Display for TagID {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.title())
	}
}

/// A tag payload. The End tag has no payload and no variant here; it only
/// exists on the wire as the Compound terminator.
#[derive(Debug, Clone, PartialEq)]
#[repr(u8)]
pub enum Tag {
	Byte(Byte) = 1,
	Short(Short) = 2,
	Int(Int) = 3,
	Long(Long) = 4,
	Float(Float) = 5,
	Double(Double) = 6,
	ByteArray(ByteArray) = 7,
	String(String) = 8,
	List(ListTag) = 9,
	Compound(Map) = 10,
	IntArray(IntArray) = 11,
	LongArray(LongArray) = 12,
}

/// A List tag holds one kind of element, so each element kind gets its own
/// variant and a heterogeneous list is unrepresentable. Elements never carry
/// names.
#[derive(Debug, Clone, PartialEq)]
pub enum ListTag {
	/// A list with no elements and no declared element kind.
	Empty,
	Byte(Vec<Byte>),
	Short(Vec<Short>),
	Int(Vec<Int>),
	Long(Vec<Long>),
	Float(Vec<Float>),
	Double(Vec<Double>),
	ByteArray(Vec<ByteArray>),
	String(Vec<String>),
	List(Vec<ListTag>),
	Compound(Vec<Map>),
	IntArray(Vec<IntArray>),
	LongArray(Vec<LongArray>),
}

/// A tag together with the name it was decoded with. The root of a decoded
/// buffer is a [NamedTag]; a zero-length wire name decodes to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
	pub name: Option<String>,
	pub tag: Tag,
}

impl NamedTag {
	pub fn new<S: Into<String>>(name: S, tag: Tag) -> Self {
		let name = name.into();
		Self {
			name: if name.is_empty() { None } else { Some(name) },
			tag,
		}
	}

	pub fn nameless(tag: Tag) -> Self {
		Self { name: None, tag }
	}
}

impl Tag {
	/// The wire discriminant for this payload.
	pub fn id(&self) -> TagID {
		match self {
			Tag::Byte(_) => TagID::Byte,
			Tag::Short(_) => TagID::Short,
			Tag::Int(_) => TagID::Int,
			Tag::Long(_) => TagID::Long,
			Tag::Float(_) => TagID::Float,
			Tag::Double(_) => TagID::Double,
			Tag::ByteArray(_) => TagID::ByteArray,
			Tag::String(_) => TagID::String,
			Tag::List(_) => TagID::List,
			Tag::Compound(_) => TagID::Compound,
			Tag::IntArray(_) => TagID::IntArray,
			Tag::LongArray(_) => TagID::LongArray,
		}
	}
}

impl ListTag {
	/// The declared element kind. An empty list reports [TagID::End].
	pub fn id(&self) -> TagID {
		match self {
			ListTag::Empty => TagID::End,
			ListTag::Byte(_) => TagID::Byte,
			ListTag::Short(_) => TagID::Short,
			ListTag::Int(_) => TagID::Int,
			ListTag::Long(_) => TagID::Long,
			ListTag::Float(_) => TagID::Float,
			ListTag::Double(_) => TagID::Double,
			ListTag::ByteArray(_) => TagID::ByteArray,
			ListTag::String(_) => TagID::String,
			ListTag::List(_) => TagID::List,
			ListTag::Compound(_) => TagID::Compound,
			ListTag::IntArray(_) => TagID::IntArray,
			ListTag::LongArray(_) => TagID::LongArray,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ListTag::Empty => 0,
			ListTag::Byte(list) => list.len(),
			ListTag::Short(list) => list.len(),
			ListTag::Int(list) => list.len(),
			ListTag::Long(list) => list.len(),
			ListTag::Float(list) => list.len(),
			ListTag::Double(list) => list.len(),
			ListTag::ByteArray(list) => list.len(),
			ListTag::String(list) => list.len(),
			ListTag::List(list) => list.len(),
			ListTag::Compound(list) => list.len(),
			ListTag::IntArray(list) => list.len(),
			ListTag::LongArray(list) => list.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

macro_rules! __tag_from_impls {
	($($type:ty => $variant:ident;)+) => {
		$(
			impl From<$type> for Tag {
				fn from(value: $type) -> Self {
					Tag::$variant(value)
				}
			}
		)+
	};
}

__tag_from_impls!(
	Byte => Byte;
	Short => Short;
	Int => Int;
	Long => Long;
	Float => Float;
	Double => Double;
	ByteArray => ByteArray;
	String => String;
	ListTag => List;
	Map => Compound;
	IntArray => IntArray;
	LongArray => LongArray;
);

macro_rules! __collect_list {
	($tags:ident, $variant:ident) => {
		ListTag::$variant($tags.into_iter().map(|tag| match tag {
			Tag::$variant(value) => value,
			other => panic!("mixed list: expected {}, found {}", TagID::$variant, other.id()),
		}).collect())
	};
}

impl From<Vec<Tag>> for ListTag {
	/// Groups already-built tags into a homogeneous list. This is the
	/// backing for the `list!` macro.
	///
	/// Panics if the tags are not all the same kind; lists cannot hold
	/// mixed kinds.
	fn from(tags: Vec<Tag>) -> Self {
		let Some(first) = tags.first() else {
			return ListTag::Empty;
		};
		match first.id() {
			TagID::End => ListTag::Empty,
			TagID::Byte => __collect_list!(tags, Byte),
			TagID::Short => __collect_list!(tags, Short),
			TagID::Int => __collect_list!(tags, Int),
			TagID::Long => __collect_list!(tags, Long),
			TagID::Float => __collect_list!(tags, Float),
			TagID::Double => __collect_list!(tags, Double),
			TagID::ByteArray => __collect_list!(tags, ByteArray),
			TagID::String => __collect_list!(tags, String),
			TagID::List => __collect_list!(tags, List),
			TagID::Compound => __collect_list!(tags, Compound),
			TagID::IntArray => __collect_list!(tags, IntArray),
			TagID::LongArray => __collect_list!(tags, LongArray),
		}
	}
}

impl From<&str> for Tag {
	fn from(value: &str) -> Self {
		Tag::String(value.to_owned())
	}
}

impl From<bool> for Tag {
	fn from(value: bool) -> Self {
		Tag::Byte(value as i8)
	}
}

macro_rules! __listtag_from_impls {
	($($type:ty => $variant:ident;)+) => {
		$(
			impl From<Vec<$type>> for ListTag {
				fn from(list: Vec<$type>) -> Self {
					if list.is_empty() {
						ListTag::Empty
					} else {
						ListTag::$variant(list)
					}
				}
			}
		)+
	};
}

__listtag_from_impls!(
	Byte => Byte;
	Short => Short;
	Int => Int;
	Long => Long;
	Float => Float;
	Double => Double;
	ByteArray => ByteArray;
	String => String;
	ListTag => List;
	Map => Compound;
	IntArray => IntArray;
	LongArray => LongArray;
);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tag_id_round_trip() {
		for value in 0u8..=12 {
			let id = TagID::try_from(value).unwrap();
			assert_eq!(id.value(), value);
		}
		assert!(matches!(TagID::try_from(13), Err(McError::UnsupportedTagId(13))));
		assert!(matches!(TagID::try_from(255), Err(McError::UnsupportedTagId(255))));
	}

	#[test]
	fn list_reports_declared_kind() {
		let list = ListTag::from(vec![1i32, 2, 3]);
		assert_eq!(list.id(), TagID::Int);
		assert_eq!(list.len(), 3);
		assert_eq!(ListTag::Empty.id(), TagID::End);
		assert!(ListTag::from(Vec::<i64>::new()).is_empty());
	}

	#[test]
	fn named_tag_empty_name_is_none() {
		let named = NamedTag::new("", Tag::Byte(1));
		assert_eq!(named.name, None);
		let named = NamedTag::new("hello", Tag::Byte(1));
		assert_eq!(named.name.as_deref(), Some("hello"));
	}
}
