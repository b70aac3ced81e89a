//! Projects a tag tree down to plain [serde_json::Value] data.
//!
//! This is the lossy "just give me the values" view: tag kinds and names
//! are stripped, so a Byte and a Short both come back as a plain number
//! and the tree cannot be re-encoded from it.

use serde_json::{Number, Value};

use crate::nbt::Map;
use crate::nbt::tag::{
	Tag,
	ListTag,
	NamedTag,
};

/// Project the root tag's payload. The root name is dropped along with all
/// other tag metadata.
pub fn project(root: &NamedTag) -> Value {
	tag_to_value(&root.tag)
}

/// Non-finite floats have no JSON representation and project to null.
pub fn tag_to_value(tag: &Tag) -> Value {
	match tag {
		Tag::Byte(value) => Value::from(*value as i64),
		Tag::Short(value) => Value::from(*value as i64),
		Tag::Int(value) => Value::from(*value as i64),
		Tag::Long(value) => Value::from(*value),
		Tag::Float(value) => float_value(*value as f64),
		Tag::Double(value) => float_value(*value),
		Tag::String(value) => Value::String(value.clone()),
		Tag::ByteArray(array) => {
			Value::Array(array.iter().map(|&v| Value::from(v as i64)).collect())
		}
		Tag::IntArray(array) => {
			Value::Array(array.iter().map(|&v| Value::from(v as i64)).collect())
		}
		Tag::LongArray(array) => {
			Value::Array(array.iter().map(|&v| Value::from(v)).collect())
		}
		Tag::List(list) => list_to_value(list),
		Tag::Compound(map) => compound_to_value(map),
	}
}

fn float_value(value: f64) -> Value {
	Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn list_to_value(list: &ListTag) -> Value {
	Value::Array(match list {
		ListTag::Empty => Vec::new(),
		ListTag::Byte(values) => values.iter().map(|&v| Value::from(v as i64)).collect(),
		ListTag::Short(values) => values.iter().map(|&v| Value::from(v as i64)).collect(),
		ListTag::Int(values) => values.iter().map(|&v| Value::from(v as i64)).collect(),
		ListTag::Long(values) => values.iter().map(|&v| Value::from(v)).collect(),
		ListTag::Float(values) => values.iter().map(|&v| float_value(v as f64)).collect(),
		ListTag::Double(values) => values.iter().map(|&v| float_value(v)).collect(),
		ListTag::String(values) => {
			values.iter().map(|v| Value::String(v.clone())).collect()
		}
		ListTag::ByteArray(arrays) => arrays.iter()
			.map(|a| Value::Array(a.iter().map(|&v| Value::from(v as i64)).collect()))
			.collect(),
		ListTag::IntArray(arrays) => arrays.iter()
			.map(|a| Value::Array(a.iter().map(|&v| Value::from(v as i64)).collect()))
			.collect(),
		ListTag::LongArray(arrays) => arrays.iter()
			.map(|a| Value::Array(a.iter().map(|&v| Value::from(v)).collect()))
			.collect(),
		ListTag::List(lists) => lists.iter().map(list_to_value).collect(),
		ListTag::Compound(maps) => maps.iter().map(compound_to_value).collect(),
	})
}

fn compound_to_value(map: &Map) -> Value {
	Value::Object(
		map.iter()
			.map(|(key, value)| (key.clone(), tag_to_value(value)))
			.collect(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use crate::nbt::read_named_tag;
	use crate::{compound, list};

	#[test]
	fn byte_entry_in_compound() {
		let buf = [10, 0, 0, 1, 0, 1, b'a', 5, 0];
		let root = read_named_tag(&buf).unwrap();
		assert_eq!(project(&root), json!({ "a": 5 }));
	}

	#[test]
	fn kinds_collapse_to_plain_numbers() {
		let root = NamedTag::new("c", compound! {
			("byte", 5i8),
			("short", 5i16),
			("int", 5i32),
		});
		assert_eq!(project(&root), json!({ "byte": 5, "short": 5, "int": 5 }));
	}

	#[test]
	fn empty_list_projects_to_empty_array() {
		let root = NamedTag::new("l", list![]);
		assert_eq!(project(&root), json!([]));
	}

	#[test]
	fn nested_structure() {
		let root = NamedTag::new("c", compound! {
			("list", list![1i32, 2, 3]),
			("longs", Tag::LongArray(vec![1, 2])),
			("name", "hello"),
			("inner", compound! { ("d", 0.5f64) }),
		});
		assert_eq!(
			project(&root),
			json!({
				"list": [1, 2, 3],
				"longs": [1, 2],
				"name": "hello",
				"inner": { "d": 0.5 },
			})
		);
	}

	#[test]
	fn object_keys_keep_insertion_order() {
		let buf = [
			10, 0, 0,
			1, 0, 1, b'z', 1,
			1, 0, 1, b'a', 2,
			0,
		];
		let root = read_named_tag(&buf).unwrap();
		let Value::Object(object) = project(&root) else {
			panic!("expected object");
		};
		let keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
		assert_eq!(keys, ["z", "a"]);
	}

	#[test]
	fn non_finite_floats_project_to_null() {
		let root = NamedTag::nameless(Tag::Double(f64::NAN));
		assert_eq!(project(&root), Value::Null);
	}

	#[test]
	fn meaning_round_trip() {
		// Projecting and then rebuilding with the right kinds gets back the
		// same tree.
		let original = NamedTag::new("c", compound! {
			("a", 5i8),
			("b", "text"),
		});
		let projected = project(&original);
		let rebuilt = NamedTag::new("c", compound! {
			("a", projected["a"].as_i64().unwrap() as i8),
			("b", projected["b"].as_str().unwrap()),
		});
		assert_eq!(original, rebuilt);
	}
}
