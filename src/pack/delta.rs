//! Delta payloads: copy/insert instructions against a base object, and the
//! fixed-point resolver that turns a parsed pack into whole objects.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::object::{self, ObjectId, ObjectKind};

use super::parse::{BaseRef, PackRecord};

/// A fully reconstructed object from a pack.
#[derive(Debug, Clone)]
pub struct ResolvedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub data: Vec<u8>,
}

/// Apply delta instructions to a base payload.
pub fn apply(base: &[u8], delta: &[u8]) -> Result<Vec<u8>> {
    let mut pos = 0;
    let source_size = read_varint(delta, &mut pos)?;
    let target_size = read_varint(delta, &mut pos)?;

    if source_size != base.len() {
        return Err(Error::CorruptDelta(format!(
            "declared source size {} but base is {} bytes",
            source_size,
            base.len()
        )));
    }

    let mut target = Vec::with_capacity(target_size);
    while pos < delta.len() {
        let cmd = delta[pos];
        pos += 1;

        if cmd & 0x80 != 0 {
            // Copy: offset/size bytes gated by the low bits, LSB first.
            let mut offset = 0usize;
            for (i, bit) in [0x01u8, 0x02, 0x04, 0x08].into_iter().enumerate() {
                if cmd & bit != 0 {
                    offset |= (take(delta, &mut pos)? as usize) << (8 * i);
                }
            }
            let mut size = 0usize;
            for (i, bit) in [0x10u8, 0x20, 0x40].into_iter().enumerate() {
                if cmd & bit != 0 {
                    size |= (take(delta, &mut pos)? as usize) << (8 * i);
                }
            }
            if size == 0 {
                size = 0x10000;
            }

            let end = offset.checked_add(size).ok_or_else(|| {
                Error::CorruptDelta("copy range overflows".to_string())
            })?;
            let slice = base.get(offset..end).ok_or_else(|| {
                Error::CorruptDelta(format!(
                    "copy of {} bytes at {} outside base of {}",
                    size,
                    offset,
                    base.len()
                ))
            })?;
            target.extend_from_slice(slice);
        } else if cmd != 0 {
            // Insert: the next `cmd` delta bytes verbatim.
            let count = cmd as usize;
            let slice = delta.get(pos..pos + count).ok_or_else(|| {
                Error::CorruptDelta("insert runs past end of delta".to_string())
            })?;
            target.extend_from_slice(slice);
            pos += count;
        } else {
            return Err(Error::CorruptDelta(
                "reserved zero instruction".to_string(),
            ));
        }
    }

    if target.len() != target_size {
        return Err(Error::CorruptDelta(format!(
            "declared target size {}, produced {}",
            target_size,
            target.len()
        )));
    }
    Ok(target)
}

fn take(delta: &[u8], pos: &mut usize) -> Result<u8> {
    let byte = delta
        .get(*pos)
        .copied()
        .ok_or_else(|| Error::CorruptDelta("instruction runs past end of delta".to_string()))?;
    *pos += 1;
    Ok(byte)
}

/// Standard little-endian base-128 varint (shifts 0, 7, 14, ...), used for
/// the delta's declared source and target sizes.
fn read_varint(data: &[u8], pos: &mut usize) -> Result<usize> {
    let mut value = 0usize;
    let mut shift = 0;
    loop {
        let byte = take(data, pos)
            .map_err(|_| Error::CorruptDelta("truncated size header".to_string()))?;
        value |= ((byte & 0x7f) as usize) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
}

/// Resolve every delta in a parsed pack to a whole object.
///
/// Non-delta records publish immediately, indexed by digest and by pack
/// offset. Each pass then resolves the deltas whose base has been
/// published, inheriting the base's kind; a delta only gets its digest once
/// its base is known. The loop stops when a pass makes no progress, and any
/// record still pending means the pack needed an external base.
pub fn resolve(records: Vec<PackRecord>) -> Result<Vec<ResolvedObject>> {
    let mut resolved: Vec<Option<ResolvedObject>> = Vec::with_capacity(records.len());
    let mut by_id: HashMap<ObjectId, usize> = HashMap::new();
    let mut by_offset: HashMap<usize, usize> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        match record.kind {
            Some(kind) => {
                let id = object::hash_framed(kind, &record.data);
                by_id.insert(id, idx);
                by_offset.insert(record.offset, idx);
                resolved.push(Some(ResolvedObject {
                    id,
                    kind,
                    data: record.data.clone(),
                }));
            }
            None => resolved.push(None),
        }
    }

    loop {
        let mut progress = false;

        for idx in 0..records.len() {
            if resolved[idx].is_some() {
                continue;
            }
            let Some(base_ref) = &records[idx].base else {
                continue;
            };
            let base_idx = match base_ref {
                BaseRef::Offset(offset) => by_offset.get(offset).copied(),
                BaseRef::Id(id) => by_id.get(id).copied(),
            };
            let Some(base_idx) = base_idx else {
                continue;
            };
            let Some(base) = resolved[base_idx].clone() else {
                continue;
            };

            let data = apply(&base.data, &records[idx].data)?;
            let id = object::hash_framed(base.kind, &data);
            by_id.insert(id, idx);
            by_offset.insert(records[idx].offset, idx);
            resolved[idx] = Some(ResolvedObject {
                id,
                kind: base.kind,
                data,
            });
            progress = true;
        }

        if !progress {
            break;
        }
    }

    let mut objects = Vec::with_capacity(records.len());
    for (idx, slot) in resolved.into_iter().enumerate() {
        match slot {
            Some(obj) => objects.push(obj),
            None => {
                let what = match &records[idx].base {
                    Some(BaseRef::Id(id)) => format!("base {} never appeared", id),
                    Some(BaseRef::Offset(offset)) => {
                        format!("base at offset {} never resolved", offset)
                    }
                    None => format!("record at offset {} never resolved", records[idx].offset),
                };
                return Err(Error::UnresolvedDelta(what));
            }
        }
    }
    Ok(objects)
}
