//! Decoder half of the binary persistence codec.

use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::HashSet;
use std::io::{self, Cursor, Read};

use crate::config::Config;
use crate::consts::{FORMAT_VERSION, MAGIC};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::overlay::Overlay;
use crate::snapshot::Snapshot;

pub(super) fn decode(bytes: &[u8]) -> Result<Filter> {
    let mut cursor = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    read_exact(&mut cursor, &mut magic)?;
    if &magic != MAGIC {
        return Err(Error::InvalidFormat { found: magic });
    }

    let version = read_u32(&mut cursor)?;
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion { version });
    }

    let seed = read_u64(&mut cursor)?;
    let bits = read_u8(&mut cursor)?;
    let m = read_u64(&mut cursor)?;

    if !(4..=16).contains(&bits) {
        return Err(Error::corrupt(format!("fingerprint_bits out of range: {}", bits)));
    }

    let mut table = Vec::with_capacity(m as usize);
    for _ in 0..m {
        table.push(read_u16(&mut cursor)?);
    }

    let keys = read_key_blob(&mut cursor)?;
    let pending_adds = read_key_blob(&mut cursor)?;
    let pending_removes = read_key_blob(&mut cursor)?;

    let mask = (1u32 << bits) - 1;
    let snapshot = Snapshot {
        seed,
        bits,
        mask,
        m,
        table,
        keys,
    };
    let overlay = Overlay {
        pending_adds,
        pending_removes,
    };

    let config = Config::default().with_fingerprint_bits(bits);
    Ok(Filter::from_parts(snapshot, overlay, config))
}

fn read_key_blob(cursor: &mut Cursor<&[u8]>) -> Result<HashSet<Vec<u8>>> {
    let blob_len = read_u64(cursor)?;
    let start = cursor.position();
    let count = read_u64(cursor)?;
    let mut keys = HashSet::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_u64(cursor)?;
        let mut buf = vec![0u8; len as usize];
        read_exact(cursor, &mut buf)?;
        keys.insert(buf);
    }
    let consumed = cursor.position() - start;
    if consumed != blob_len {
        return Err(Error::corrupt(format!(
            "key blob length mismatch: declared {} consumed {}",
            blob_len, consumed
        )));
    }
    Ok(keys)
}

fn map_eof(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::corrupt("unexpected end of file")
    } else {
        Error::Io(err)
    }
}

fn read_exact(cursor: &mut Cursor<&[u8]>, buf: &mut [u8]) -> Result<()> {
    cursor.read_exact(buf).map_err(map_eof)
}

fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    cursor.read_u8().map_err(map_eof)
}

fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16> {
    cursor.read_u16::<LittleEndian>().map_err(map_eof)
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    cursor.read_u32::<LittleEndian>().map_err(map_eof)
}

fn read_u64(cursor: &mut Cursor<&[u8]>) -> Result<u64> {
    cursor.read_u64::<LittleEndian>().map_err(map_eof)
}
