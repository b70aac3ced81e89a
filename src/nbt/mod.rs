pub mod tag;
pub mod decode;
pub mod snbt;
pub mod value;
pub mod macros;

/// The map type used for Compound tags.
/// Compound entries keep their insertion order and names are unique,
/// which is exactly what [indexmap::IndexMap] gives us.
pub type Map = indexmap::IndexMap<std::string::String, tag::Tag>;

pub use tag::{
	Tag,
	TagID,
	ListTag,
	NamedTag,
};
pub use decode::read_named_tag;
pub use snbt::{
	to_snbt,
	to_snbt_with,
	SnbtOptions,
};
pub use value::{
	project,
	tag_to_value,
};
