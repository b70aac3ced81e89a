use std::io::Read;

use flate2::read::ZlibDecoder;
use log::debug;

use crate::{McError, McResult};
use crate::nbt::{self, NamedTag, SnbtOptions};

use super::coord::RegionCoord;
use super::header::{SectorTable, TimestampTable};
use super::sector::RegionSector;
use super::pad_size;

/// Supported compression scheme for chunk data. The format also defines
/// GZip (1) and Uncompressed (3), but chunks are only ever written with
/// ZLib; anything other than 2 is rejected.
pub const COMPRESSION_ZLIB: u8 = 2;

/// A compressed chunk payload extracted from a region file.
///
/// `length` is the on-disk length field (payload plus the compression
/// byte); `data` borrows `length + padding` bytes from the region buffer,
/// where the padding rounds `length` up to the 4KiB sector boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBlob<'a> {
    pub length: u32,
    pub compression: u8,
    data: &'a [u8],
}

impl<'a> ChunkBlob<'a> {
    /// The raw compressed bytes (sector padding included).
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Decompress the payload. The zlib stream ends before the sector
    /// padding; trailing pad bytes are ignored by the decoder.
    pub fn inflate(&self) -> McResult<Vec<u8>> {
        let mut raw = Vec::new();
        ZlibDecoder::new(self.data).read_to_end(&mut raw)?;
        Ok(raw)
    }

    /// Decompress and decode the tag tree.
    pub fn read_named_tag(&self) -> McResult<NamedTag> {
        let raw = self.inflate()?;
        nbt::read_named_tag(&raw)
    }

    /// Decompress, decode and render SNBT with the default indent.
    pub fn to_snbt(&self) -> McResult<String> {
        Ok(nbt::to_snbt(&self.read_named_tag()?))
    }

    pub fn to_snbt_with(&self, options: &SnbtOptions) -> McResult<String> {
        Ok(nbt::to_snbt_with(&self.read_named_tag()?, options))
    }

    /// Decompress, decode and project to plain values.
    pub fn to_value(&self) -> McResult<serde_json::Value> {
        Ok(nbt::project(&self.read_named_tag()?))
    }
}

/// An abstraction for reading a region file that has been loaded into
/// memory. Every access is a pure function over the buffer, so one slot
/// failing to extract or decode has no effect on any other slot.
pub struct RegionReader<'a> {
    buf: &'a [u8],
}

impl<'a> RegionReader<'a> {
    /// Wrap a full region-file buffer. The buffer must at least hold the
    /// sector table.
    pub fn new(buf: &'a [u8]) -> McResult<Self> {
        if buf.len() < 4096 {
            return Err(McError::InvalidRegionFile);
        }
        Ok(Self { buf })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// Read one [RegionSector] entry from the header table.
    pub fn read_offset<C: Into<RegionCoord>>(&self, coord: C) -> RegionSector {
        let coord: RegionCoord = coord.into();
        let at = RegionSector::table_offset(coord);
        // new() checked that the whole table is present.
        RegionSector::from([
            self.buf[at],
            self.buf[at + 1],
            self.buf[at + 2],
            self.buf[at + 3],
        ])
    }

    /// Decode the entire sector table.
    pub fn sector_table(&self) -> McResult<SectorTable> {
        SectorTable::read_from(self.buf)
    }

    /// Decode the timestamp table (the second 4096 bytes of the header).
    pub fn timestamp_table(&self) -> McResult<TimestampTable> {
        TimestampTable::read_from(self.buf)
    }

    /// Extract the compressed blob for one chunk slot. An all-zero header
    /// entry means the chunk was never written; that is `Ok(None)`, not an
    /// error, and nothing is read beyond the header for it.
    pub fn blob_at<C: Into<RegionCoord>>(&self, coord: C) -> McResult<Option<ChunkBlob<'a>>> {
        let coord: RegionCoord = coord.into();
        let sector = self.read_offset(coord);
        if sector.is_empty() {
            return Ok(None);
        }
        let blob = self.extract_blob(sector.offset() as usize)?;
        debug!(
            "extracted chunk {} at byte offset {} ({} bytes)",
            coord,
            sector.offset(),
            blob.data().len()
        );
        Ok(Some(blob))
    }

    /// Iterate all 1024 chunk slots in header order. Each item is that
    /// slot's own extraction result.
    pub fn blobs(&self) -> impl Iterator<Item = McResult<Option<ChunkBlob<'a>>>> + '_ {
        (0..1024usize).map(|index| self.blob_at(index))
    }

    /// Extract the blob found at `offset`: a 4-byte big-endian length
    /// (counting everything after the length field, compression byte
    /// included), one compression byte, then the compressed payload padded
    /// out to the 4KiB sector boundary.
    fn extract_blob(&self, offset: usize) -> McResult<ChunkBlob<'a>> {
        let Some(header) = self.buf.get(offset..offset + 5) else {
            return Err(McError::OutOfRange);
        };
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let compression = header[4];
        if compression != COMPRESSION_ZLIB {
            return Err(McError::InvalidCompressionScheme(compression));
        }
        // The padding is computed from the length field as-is; the
        // compression byte it covers is not subtracted first.
        let padded = length as usize + pad_size(length as u64) as usize;
        let data_offset = offset + 5;
        let Some(data) = self.buf.get(data_offset..data_offset + padded) else {
            return Err(McError::OutOfRange);
        };
        Ok(ChunkBlob {
            length,
            compression,
            data,
        })
    }
}
