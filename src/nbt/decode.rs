//! Decodes the NBT binary format from an in-memory buffer.
//!
//! Everything in this format is big-endian. A named tag is a 1-byte kind,
//! a length-prefixed UTF-8 name, then the payload; list elements are bare
//! payloads (no kind byte of their own, no name).

use byteorder::{BigEndian, ReadBytesExt};
use log::trace;

use crate::{McError, McResult};
use crate::nbt::Map;
use crate::nbt::tag::{
	Tag,
	TagID,
	ListTag,
	NamedTag,
};

/// Nesting deeper than this is assumed to be hostile input. The format
/// itself puts no bound on depth, and each level costs a stack frame.
const MAX_DEPTH: usize = 512;

/// Decode a named tag from the start of `buf`.
///
/// Trailing bytes after the root tag are ignored. Duplicate names inside a
/// Compound are last-write-wins. A root kind byte of 0 (the End marker)
/// yields [McError::EndTagMarker] since there is no payload to return.
pub fn read_named_tag(buf: &[u8]) -> McResult<NamedTag> {
	trace!("decoding nbt buffer of {} bytes", buf.len());
	let mut reader = TagReader::new(buf);
	reader.read_root()
}

/// A forward-only cursor over one NBT buffer. Create one per decode; the
/// cursor is consumed left to right and never rewinds.
pub struct TagReader<'a> {
	buf: &'a [u8],
	pos: usize,
	depth: usize,
}

impl<'a> TagReader<'a> {
	pub fn new(buf: &'a [u8]) -> Self {
		Self {
			buf,
			pos: 0,
			depth: 0,
		}
	}

	/// The current offset into the buffer.
	pub fn position(&self) -> usize {
		self.pos
	}

	fn remaining(&self) -> usize {
		self.buf.len() - self.pos
	}

	/// Takes the next `count` bytes, advancing the cursor.
	fn take(&mut self, count: usize) -> McResult<&'a [u8]> {
		if count > self.remaining() {
			return Err(McError::UnexpectedEof(self.pos));
		}
		let slice = &self.buf[self.pos..self.pos + count];
		self.pos += count;
		Ok(slice)
	}

	fn read_u8(&mut self) -> McResult<u8> {
		Ok(self.take(1)?[0])
	}

	fn read_i8(&mut self) -> McResult<i8> {
		Ok(self.take(1)?[0] as i8)
	}

	fn read_u16(&mut self) -> McResult<u16> {
		let mut bytes = self.take(2)?;
		Ok(bytes.read_u16::<BigEndian>()?)
	}

	fn read_i16(&mut self) -> McResult<i16> {
		let mut bytes = self.take(2)?;
		Ok(bytes.read_i16::<BigEndian>()?)
	}

	fn read_i32(&mut self) -> McResult<i32> {
		let mut bytes = self.take(4)?;
		Ok(bytes.read_i32::<BigEndian>()?)
	}

	fn read_u32(&mut self) -> McResult<u32> {
		let mut bytes = self.take(4)?;
		Ok(bytes.read_u32::<BigEndian>()?)
	}

	fn read_i64(&mut self) -> McResult<i64> {
		let mut bytes = self.take(8)?;
		Ok(bytes.read_i64::<BigEndian>()?)
	}

	fn read_f32(&mut self) -> McResult<f32> {
		let mut bytes = self.take(4)?;
		Ok(bytes.read_f32::<BigEndian>()?)
	}

	fn read_f64(&mut self) -> McResult<f64> {
		let mut bytes = self.take(8)?;
		Ok(bytes.read_f64::<BigEndian>()?)
	}

	/// Reads a 2-byte length prefix followed by that many bytes of UTF-8.
	fn read_string(&mut self) -> McResult<String> {
		let length = self.read_u16()? as usize;
		let bytes = self.take(length)?;
		Ok(String::from_utf8(bytes.to_vec())?)
	}

	/// Reads a name, mapping the zero-length name to `None`.
	fn read_name(&mut self) -> McResult<Option<String>> {
		let name = self.read_string()?;
		Ok(if name.is_empty() { None } else { Some(name) })
	}

	/// Validates an element count against the space left in the buffer.
	/// Every element occupies at least `width` bytes, so a count that could
	/// not possibly fit is rejected before anything is allocated.
	fn checked_count(&self, count: i64, width: usize) -> McResult<usize> {
		if count < 0 {
			return Err(McError::InvalidLength(count));
		}
		let count = count as usize;
		if count.checked_mul(width).map_or(true, |total| total > self.remaining()) {
			return Err(McError::InvalidLength(count as i64));
		}
		Ok(count)
	}

	pub fn read_root(&mut self) -> McResult<NamedTag> {
		let id = self.read_tag_id()?;
		let name = self.read_name()?;
		let tag = self.read_payload(id)?;
		Ok(NamedTag { name, tag })
	}

	/// Reads a kind byte. The End marker is not a decodable tag, so it is
	/// an error here; the Compound loop checks for it before calling this.
	fn read_tag_id(&mut self) -> McResult<TagID> {
		let value = self.read_u8()?;
		if value == TagID::End.value() {
			return Err(McError::EndTagMarker);
		}
		TagID::try_from(value)
	}

	/// Decodes the payload for an already-read kind. Names are never read
	/// here; whether a tag has a name is decided by the caller (Compound
	/// entries and the root do, list elements don't), which is what the
	/// wire format's "skip the next name" rule amounts to.
	fn read_payload(&mut self, id: TagID) -> McResult<Tag> {
		Ok(match id {
			TagID::End => return Err(McError::EndTagMarker),
			TagID::Byte => Tag::Byte(self.read_i8()?),
			TagID::Short => Tag::Short(self.read_i16()?),
			TagID::Int => Tag::Int(self.read_i32()?),
			TagID::Long => Tag::Long(self.read_i64()?),
			TagID::Float => Tag::Float(self.read_f32()?),
			TagID::Double => Tag::Double(self.read_f64()?),
			TagID::ByteArray => {
				let count = self.read_i32()?;
				let count = self.checked_count(count as i64, 1)?;
				let bytes = self.take(count)?;
				Tag::ByteArray(bytes.iter().map(|&b| b as i8).collect())
			}
			TagID::String => Tag::String(self.read_string()?),
			TagID::List => Tag::List(self.read_list()?),
			TagID::Compound => Tag::Compound(self.read_compound()?),
			TagID::IntArray => {
				let count = self.read_i32()?;
				let count = self.checked_count(count as i64, 4)?;
				let mut array = Vec::with_capacity(count);
				for _ in 0..count {
					array.push(self.read_i32()?);
				}
				Tag::IntArray(array)
			}
			TagID::LongArray => {
				let count = self.read_i32()?;
				let count = self.checked_count(count as i64, 8)?;
				let mut array = Vec::with_capacity(count);
				for _ in 0..count {
					array.push(self.read_i64()?);
				}
				Tag::LongArray(array)
			}
		})
	}

	fn descend(&mut self) -> McResult<()> {
		self.depth += 1;
		if self.depth > MAX_DEPTH {
			return Err(McError::DepthLimit);
		}
		Ok(())
	}

	fn read_list(&mut self) -> McResult<ListTag> {
		self.descend()?;
		let kind = self.read_u8()?;
		let count = self.read_u32()? as i64;
		let list = if count == 0 {
			// The declared element kind is irrelevant for an empty list,
			// but it still has to be a known kind.
			if kind != 0 {
				TagID::try_from(kind)?;
			}
			ListTag::Empty
		} else {
			match TagID::try_from(kind)? {
				TagID::End => return Err(McError::EndTagMarker),
				TagID::Byte => {
					let count = self.checked_count(count, 1)?;
					let bytes = self.take(count)?;
					ListTag::Byte(bytes.iter().map(|&b| b as i8).collect())
				}
				TagID::Short => ListTag::Short(self.read_elements(count, 2, Self::read_i16)?),
				TagID::Int => ListTag::Int(self.read_elements(count, 4, Self::read_i32)?),
				TagID::Long => ListTag::Long(self.read_elements(count, 8, Self::read_i64)?),
				TagID::Float => ListTag::Float(self.read_elements(count, 4, Self::read_f32)?),
				TagID::Double => ListTag::Double(self.read_elements(count, 8, Self::read_f64)?),
				TagID::ByteArray => ListTag::ByteArray(self.read_elements(count, 4, |r| {
					let count = r.read_i32()?;
					let count = r.checked_count(count as i64, 1)?;
					Ok(r.take(count)?.iter().map(|&b| b as i8).collect())
				})?),
				TagID::String => ListTag::String(self.read_elements(count, 2, Self::read_string)?),
				TagID::List => ListTag::List(self.read_elements(count, 5, Self::read_list)?),
				TagID::Compound => ListTag::Compound(self.read_elements(count, 1, Self::read_compound)?),
				TagID::IntArray => ListTag::IntArray(self.read_elements(count, 4, |r| {
					let count = r.read_i32()?;
					let count = r.checked_count(count as i64, 4)?;
					let mut array = Vec::with_capacity(count);
					for _ in 0..count {
						array.push(r.read_i32()?);
					}
					Ok(array)
				})?),
				TagID::LongArray => ListTag::LongArray(self.read_elements(count, 4, |r| {
					let count = r.read_i32()?;
					let count = r.checked_count(count as i64, 8)?;
					let mut array = Vec::with_capacity(count);
					for _ in 0..count {
						array.push(r.read_i64()?);
					}
					Ok(array)
				})?),
			}
		};
		self.depth -= 1;
		Ok(list)
	}

	fn read_elements<T, F>(&mut self, count: i64, min_width: usize, mut read: F) -> McResult<Vec<T>>
	where
	F: FnMut(&mut Self) -> McResult<T> {
		let count = self.checked_count(count, min_width)?;
		let mut elements = Vec::with_capacity(count);
		for _ in 0..count {
			elements.push(read(self)?);
		}
		Ok(elements)
	}

	fn read_compound(&mut self) -> McResult<Map> {
		self.descend()?;
		let mut map = Map::new();
		loop {
			let kind = self.read_u8()?;
			if kind == TagID::End.value() {
				break;
			}
			let id = TagID::try_from(kind)?;
			let name = self.read_name()?.ok_or(McError::MissingCompoundName)?;
			let tag = self.read_payload(id)?;
			map.insert(name, tag);
		}
		self.depth -= 1;
		Ok(map)
	}
}
