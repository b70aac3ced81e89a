use thiserror::Error;

/// The master error type.
#[derive(Debug, Error)]
pub enum McError {
	#[error("IO Error: {0}")]
	IoError(#[from] std::io::Error),
	#[error("Invalid Compression value: {0}")]
	InvalidCompressionScheme(u8),
	#[error("Unexpected end of buffer at offset {0}.")]
	UnexpectedEof(usize),
	#[error("Invalid element count: {0}")]
	InvalidLength(i64),
	#[error("Out of range error.")]
	OutOfRange,
	#[error("Failed to convert to UTF-8 string.")]
	FromUtf8Error(#[from] std::string::FromUtf8Error),
	#[error("Unsupported Tag ID: {0}")]
	UnsupportedTagId(u8),
	#[error("Encountered the End Tag ID marker.")]
	EndTagMarker,
	#[error("Missing name in Compound entry.")]
	MissingCompoundName,
	#[error("Region file is too small to contain a header.")]
	InvalidRegionFile,
	#[error("Tag nesting exceeds the depth limit.")]
	DepthLimit,
}

/// Coarse classification of [McError] so that callers can tell a
/// structurally malformed input apart from a truncated one without
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
	/// The bytes were readable but do not form valid NBT/region structure.
	Format,
	/// A read ran past the end of the input, or a length field asked for
	/// more bytes than exist.
	Bounds,
	/// An error bubbled up from IO (decompression).
	Io,
}

impl McError {
	pub fn class(&self) -> ErrorClass {
		match self {
			McError::InvalidCompressionScheme(_)
			| McError::FromUtf8Error(_)
			| McError::UnsupportedTagId(_)
			| McError::EndTagMarker
			| McError::MissingCompoundName => ErrorClass::Format,
			McError::UnexpectedEof(_)
			| McError::InvalidLength(_)
			| McError::OutOfRange
			| McError::InvalidRegionFile
			| McError::DepthLimit => ErrorClass::Bounds,
			McError::IoError(_) => ErrorClass::Io,
		}
	}
}

pub type McResult<T> = Result<T, McError>;
