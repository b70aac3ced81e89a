use chrono::{NaiveDateTime, DateTime, Utc, TimeZone};

/// A 32-bit Unix timestamp, as stored in the second header table of a
/// region file (last modification time of the chunk).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Timestamp(u32);

impl Timestamp {
	pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::try_from(*self).ok()
	}

	pub fn seconds(&self) -> u32 {
		self.0
	}
}

impl From<u32> for Timestamp {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

impl From<Timestamp> for u32 {
	fn from(value: Timestamp) -> Self {
		value.0
	}
}

impl From<[u8; 4]> for Timestamp {
	fn from(entry: [u8; 4]) -> Self {
		Self(u32::from_be_bytes(entry))
	}
}

impl TryFrom<Timestamp> for DateTime<Utc> {
	type Error = ();

	fn try_from(value: Timestamp) -> Result<Self, Self::Error> {
		let naive = NaiveDateTime::from_timestamp_opt(value.0 as i64, 0);
		if let Some(naive) = naive {
			Ok(Utc.from_utc_datetime(&naive))
		} else {
			Err(())
		}
	}
}
