//! Renders a tag tree as indented SNBT text.
//!
//! The output format is fixed: tooling already consumes it, so the quirks
//! are part of the contract. In particular, list elements are always
//! comma-terminated (the last one too), scalar list elements carry no
//! indentation, and string contents are not escaped.

use crate::nbt::Map;
use crate::nbt::tag::{
	Tag,
	ListTag,
	NamedTag,
};

/// Formatting options. `indent` is the unit repeated once per nesting
/// level; the default is two spaces.
#[derive(Debug, Clone)]
pub struct SnbtOptions {
	pub indent: String,
}

impl Default for SnbtOptions {
	fn default() -> Self {
		Self {
			indent: "  ".to_owned(),
		}
	}
}

/// Render with the default two-space indent.
pub fn to_snbt(root: &NamedTag) -> String {
	to_snbt_with(root, &SnbtOptions::default())
}

pub fn to_snbt_with(root: &NamedTag, options: &SnbtOptions) -> String {
	tag_snbt(&root.tag, root.name.is_some(), 0, &options.indent)
}

fn pad(level: usize, indent: &str) -> String {
	indent.repeat(level)
}

/// `named` tells a container whether its caller already laid down
/// indentation for it (compound entries and a named root do; list elements
/// don't, so nameless containers indent themselves).
fn tag_snbt(tag: &Tag, named: bool, level: usize, indent: &str) -> String {
	match tag {
		Tag::Byte(value) => format!("{value}b"),
		Tag::Short(value) => value.to_string(),
		Tag::Int(value) => value.to_string(),
		Tag::Long(value) => format!("{value}L"),
		// Float literals are written at double precision.
		Tag::Float(value) => format!("{}F", *value as f64),
		Tag::Double(value) => format!("{value}D"),
		Tag::String(value) => format!("\"{value}\""),
		Tag::ByteArray(array) => {
			array_snbt("B", array.iter().map(|v| v.to_string()), named, level, indent)
		}
		Tag::IntArray(array) => {
			array_snbt("I", array.iter().map(|v| v.to_string()), named, level, indent)
		}
		Tag::LongArray(array) => {
			array_snbt("L", array.iter().map(|v| format!("{v}L")), named, level, indent)
		}
		Tag::List(list) => list_snbt(list, named, level, indent),
		Tag::Compound(map) => compound_snbt(map, named, level, indent),
	}
}

fn array_snbt<I>(prefix: &str, values: I, named: bool, level: usize, indent: &str) -> String
where
I: Iterator<Item = String> {
	let mut out = String::new();
	if !named {
		out.push_str(&pad(level, indent));
	}
	out.push('[');
	out.push_str(prefix);
	out.push(';');
	let joined = values.collect::<Vec<_>>().join(", ");
	if !joined.is_empty() {
		out.push(' ');
		out.push_str(&joined);
	}
	out.push(']');
	out
}

fn list_snbt(list: &ListTag, named: bool, level: usize, indent: &str) -> String {
	let mut out = String::new();
	if !named {
		out.push_str(&pad(level, indent));
	}
	if list.is_empty() {
		out.push_str("[]");
		return out;
	}
	out.push_str("[\n");
	let inner = level + 1;
	{
		// Every element is terminated with ",\n" -- including the last one.
		// Consumers of this format expect the trailing comma; keep this
		// loop separate from the compound's.
		let mut push = |rendered: String| {
			out.push_str(&rendered);
			out.push_str(",\n");
		};
		match list {
			ListTag::Empty => (),
			ListTag::Byte(values) => values.iter().for_each(|v| push(format!("{v}b"))),
			ListTag::Short(values) => values.iter().for_each(|v| push(v.to_string())),
			ListTag::Int(values) => values.iter().for_each(|v| push(v.to_string())),
			ListTag::Long(values) => values.iter().for_each(|v| push(format!("{v}L"))),
			ListTag::Float(values) => values.iter().for_each(|v| push(format!("{}F", *v as f64))),
			ListTag::Double(values) => values.iter().for_each(|v| push(format!("{v}D"))),
			ListTag::String(values) => values.iter().for_each(|v| push(format!("\"{v}\""))),
			ListTag::ByteArray(arrays) => arrays.iter().for_each(|a| {
				push(array_snbt("B", a.iter().map(|v| v.to_string()), false, inner, indent))
			}),
			ListTag::IntArray(arrays) => arrays.iter().for_each(|a| {
				push(array_snbt("I", a.iter().map(|v| v.to_string()), false, inner, indent))
			}),
			ListTag::LongArray(arrays) => arrays.iter().for_each(|a| {
				push(array_snbt("L", a.iter().map(|v| format!("{v}L")), false, inner, indent))
			}),
			ListTag::List(lists) => lists.iter().for_each(|l| {
				push(list_snbt(l, false, inner, indent))
			}),
			ListTag::Compound(maps) => maps.iter().for_each(|m| {
				push(compound_snbt(m, false, inner, indent))
			}),
		}
	}
	out.push_str(&pad(level, indent));
	out.push(']');
	out
}

fn compound_snbt(map: &Map, named: bool, level: usize, indent: &str) -> String {
	let mut out = String::new();
	if !named {
		out.push_str(&pad(level, indent));
	}
	if map.is_empty() {
		out.push_str("{}");
		return out;
	}
	out.push_str("{\n");
	let inner = level + 1;
	let last = map.len() - 1;
	for (i, (key, value)) in map.iter().enumerate() {
		out.push_str(&pad(inner, indent));
		out.push_str(key);
		out.push_str(": ");
		out.push_str(&tag_snbt(value, true, inner, indent));
		// Here the final entry really does drop its comma.
		if i == last {
			out.push('\n');
		} else {
			out.push_str(",\n");
		}
	}
	out.push_str(&pad(level, indent));
	out.push('}');
	out
}
