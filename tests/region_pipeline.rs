use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use serde_json::json;

use anvilnbt::McError;
use anvilnbt::nbt::{Tag, TagID, ListTag};
use anvilnbt::region::{RegionReader, RegionCoord, COMPRESSION_ZLIB};

/// Appends a 2-byte length prefix and UTF-8 bytes.
fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend((s.len() as u16).to_be_bytes());
    buf.extend(s.as_bytes());
}

/// Appends a named tag header (kind byte plus name).
fn put_named(buf: &mut Vec<u8>, id: u8, name: &str) {
    buf.push(id);
    put_str(buf, name);
}

/// A minimal but realistically-shaped chunk document:
///
/// ```text
/// "" {
///   DataVersion: 3700
///   xPos: 3, zPos: -1
///   Status: "minecraft:full"
///   sections: [ { Y: -4b, block_states: { palette: [ { Name: ... } ] } } ]
///   Heightmaps: { MOTION_BLOCKING: [L; 37L] }
/// }
/// ```
fn chunk_nbt() -> Vec<u8> {
    let mut buf = Vec::new();
    put_named(&mut buf, 10, ""); // root compound

    put_named(&mut buf, 3, "DataVersion");
    buf.extend(3700i32.to_be_bytes());
    put_named(&mut buf, 3, "xPos");
    buf.extend(3i32.to_be_bytes());
    put_named(&mut buf, 3, "zPos");
    buf.extend((-1i32).to_be_bytes());
    put_named(&mut buf, 8, "Status");
    put_str(&mut buf, "minecraft:full");

    put_named(&mut buf, 9, "sections");
    buf.push(10); // element kind: Compound
    buf.extend(1u32.to_be_bytes());
    {
        // section element (nameless)
        put_named(&mut buf, 1, "Y");
        buf.push((-4i8) as u8);
        put_named(&mut buf, 10, "block_states");
        {
            put_named(&mut buf, 9, "palette");
            buf.push(10);
            buf.extend(1u32.to_be_bytes());
            {
                put_named(&mut buf, 8, "Name");
                put_str(&mut buf, "minecraft:bedrock");
                buf.push(0);
            }
            buf.push(0); // end of block_states
        }
        buf.push(0); // end of section element
    }

    put_named(&mut buf, 10, "Heightmaps");
    put_named(&mut buf, 12, "MOTION_BLOCKING");
    buf.extend(1i32.to_be_bytes());
    buf.extend(37i64.to_be_bytes());
    buf.push(0); // end of Heightmaps

    buf.push(0); // end of root
    buf
}

fn deflate(raw: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

/// Region buffer with one chunk at coordinate (3, 0) stored in sector 2 and
/// a timestamp for the same slot.
fn region_with_chunk(compression: u8) -> Vec<u8> {
    let payload = deflate(&chunk_nbt());
    let slot = RegionCoord::new(3, 0).index();
    let mut buf = vec![0u8; 8192];
    buf[slot * 4..slot * 4 + 4].copy_from_slice(&[0, 0, 2, 1]);
    buf[4096 + slot * 4..4096 + slot * 4 + 4].copy_from_slice(&1_700_000_000u32.to_be_bytes());
    buf.resize(8192 + 4096, 0);
    let length = (payload.len() + 1) as u32;
    buf[8192..8196].copy_from_slice(&length.to_be_bytes());
    buf[8196] = compression;
    buf[8197..8197 + payload.len()].copy_from_slice(&payload);
    // One extra sector so the padded blob slice exists.
    buf.resize(buf.len() + 4096, 0);
    buf
}

#[test]
fn decodes_tags_from_region() {
    let buf = region_with_chunk(COMPRESSION_ZLIB);
    let region = RegionReader::new(&buf).unwrap();
    let blob = region.blob_at((3, 0)).unwrap().unwrap();
    let root = blob.read_named_tag().unwrap();
    assert_eq!(root.name, None);

    let Tag::Compound(chunk) = &root.tag else {
        panic!("expected compound root");
    };
    assert_eq!(chunk.get("DataVersion"), Some(&Tag::Int(3700)));
    assert_eq!(chunk.get("zPos"), Some(&Tag::Int(-1)));

    let Some(Tag::List(sections)) = chunk.get("sections") else {
        panic!("expected sections list");
    };
    assert_eq!(sections.id(), TagID::Compound);
    let ListTag::Compound(sections) = sections else {
        panic!("expected compound sections");
    };
    assert_eq!(sections[0].get("Y"), Some(&Tag::Byte(-4)));
}

#[test]
fn projects_plain_values() {
    let buf = region_with_chunk(COMPRESSION_ZLIB);
    let region = RegionReader::new(&buf).unwrap();
    let blob = region.blob_at((3, 0)).unwrap().unwrap();
    assert_eq!(
        blob.to_value().unwrap(),
        json!({
            "DataVersion": 3700,
            "xPos": 3,
            "zPos": -1,
            "Status": "minecraft:full",
            "sections": [
                {
                    "Y": -4,
                    "block_states": {
                        "palette": [ { "Name": "minecraft:bedrock" } ],
                    },
                }
            ],
            "Heightmaps": { "MOTION_BLOCKING": [37] },
        })
    );
}

#[test]
fn renders_snbt() {
    let buf = region_with_chunk(COMPRESSION_ZLIB);
    let region = RegionReader::new(&buf).unwrap();
    let blob = region.blob_at((3, 0)).unwrap().unwrap();
    let text = blob.to_snbt().unwrap();
    assert!(text.starts_with("{\n"));
    assert!(text.ends_with("\n}"));
    assert!(text.contains("  DataVersion: 3700,\n"));
    assert!(text.contains("  Status: \"minecraft:full\",\n"));
    assert!(text.contains("MOTION_BLOCKING: [L; 37L]"));
    // List elements keep a trailing comma; this closes the sections list.
    assert!(text.contains("},\n  ],\n"));
}

#[test]
fn raw_mode_returns_decompressed_bytes() {
    let buf = region_with_chunk(COMPRESSION_ZLIB);
    let region = RegionReader::new(&buf).unwrap();
    let blob = region.blob_at((3, 0)).unwrap().unwrap();
    assert_eq!(blob.inflate().unwrap(), chunk_nbt());
}

#[test]
fn other_slots_are_absent() {
    let buf = region_with_chunk(COMPRESSION_ZLIB);
    let region = RegionReader::new(&buf).unwrap();
    let present: Vec<usize> = region
        .blobs()
        .enumerate()
        .filter_map(|(i, blob)| blob.unwrap().map(|_| i))
        .collect();
    assert_eq!(present, [RegionCoord::new(3, 0).index()]);
}

#[test]
fn timestamps_decode() {
    let buf = region_with_chunk(COMPRESSION_ZLIB);
    let region = RegionReader::new(&buf).unwrap();
    let timestamps = region.timestamp_table().unwrap();
    let timestamp = timestamps[(3, 0)];
    assert_eq!(timestamp.seconds(), 1_700_000_000);
    assert!(timestamp.to_datetime().is_some());
}

#[test]
fn unsupported_compression_is_fatal_per_slot() {
    // Same region, but the chunk claims gzip compression.
    let buf = region_with_chunk(1);
    let region = RegionReader::new(&buf).unwrap();
    assert!(matches!(
        region.blob_at((3, 0)),
        Err(McError::InvalidCompressionScheme(1))
    ));
    // Every other slot still reads cleanly as absent.
    assert_eq!(
        region.blobs().filter(|blob| blob.is_err()).count(),
        1
    );
}
