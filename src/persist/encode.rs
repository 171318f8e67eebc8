//! Encoder half of the binary persistence codec.

use byteorder::{LittleEndian, WriteBytesExt};
use std::collections::HashSet;
use std::io::Write;

use crate::consts::{FORMAT_VERSION, MAGIC};
use crate::error::Result;
use crate::filter::Filter;

pub(super) fn encode(filter: &Filter) -> Result<Vec<u8>> {
    let snapshot = filter.current_snapshot();
    let overlay = filter.current_overlay();

    let mut out = Vec::new();
    out.write_all(MAGIC)?;
    out.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    out.write_u64::<LittleEndian>(snapshot.seed())?;
    out.write_u8(snapshot.bits())?;
    out.write_u64::<LittleEndian>(snapshot.m())?;
    for &slot in snapshot.table() {
        out.write_u16::<LittleEndian>(slot)?;
    }

    write_key_blob(&mut out, snapshot.keys())?;
    write_key_blob(&mut out, overlay.pending_adds())?;
    write_key_blob(&mut out, overlay.pending_removes())?;

    Ok(out)
}

/// `blob_len (u64) || count (u64) || count * (len (u64), bytes)`.
fn write_key_blob(out: &mut Vec<u8>, keys: &HashSet<Vec<u8>>) -> Result<()> {
    let mut blob = Vec::new();
    blob.write_u64::<LittleEndian>(keys.len() as u64)?;
    for k in keys {
        blob.write_u64::<LittleEndian>(k.len() as u64)?;
        blob.write_all(k)?;
    }
    out.write_u64::<LittleEndian>(blob.len() as u64)?;
    out.write_all(&blob)?;
    Ok(())
}
