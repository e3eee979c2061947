// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Hand-written binary layout for [`Media`].
//!
//! Wire format (all integers big-endian):
//!
//! ```text
//! [version:u8][player:u8]
//! [uri:str][title:str][format:str]
//! [width:i32][height:i32][duration:i64][size:i64][bitrate:i32]
//! [person_count:u32][person:str]*
//! [has_copyright:u8][copyright:str]?
//! ```
//!
//! where `str` is `[len:u32][utf8 bytes]`.

use crate::codec::{CodecFamily, ObjectCodec};
use crate::error::{CodecError, CodecResult};
use crate::payload::{Media, Player};

/// Layout version written as the first byte.
const VERSION: u8 = 1;

/// Fixed-width portion of the layout, used to pre-size the output buffer.
const FIXED_LEN: usize = 2 + 4 * 3 + 4 * 3 + 8 * 2 + 4 + 1;

/// Field-by-field codec with no reflection or schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualCodec;

impl ObjectCodec for ManualCodec {
    fn name(&self) -> &str {
        "manual"
    }

    fn family(&self) -> CodecFamily {
        CodecFamily::Native
    }

    fn serialize(&self, media: &Media) -> CodecResult<Vec<u8>> {
        let variable: usize = [&media.uri, &media.title, &media.format]
            .iter()
            .map(|s| s.len())
            .chain(media.persons.iter().map(|p| 4 + p.len()))
            .chain(media.copyright.iter().map(|c| 4 + c.len()))
            .sum();

        let mut buf = Vec::with_capacity(FIXED_LEN + variable);
        buf.push(VERSION);
        buf.push(media.player.ordinal());
        put_str(&mut buf, &media.uri)?;
        put_str(&mut buf, &media.title)?;
        put_str(&mut buf, &media.format)?;
        buf.extend_from_slice(&media.width.to_be_bytes());
        buf.extend_from_slice(&media.height.to_be_bytes());
        buf.extend_from_slice(&media.duration.to_be_bytes());
        buf.extend_from_slice(&media.size.to_be_bytes());
        buf.extend_from_slice(&media.bitrate.to_be_bytes());

        put_len(&mut buf, media.persons.len())?;
        for person in &media.persons {
            put_str(&mut buf, person)?;
        }

        match &media.copyright {
            Some(copyright) => {
                buf.push(1);
                put_str(&mut buf, copyright)?;
            }
            None => buf.push(0),
        }

        Ok(buf)
    }

    fn deserialize(&self, bytes: &[u8]) -> CodecResult<Media> {
        let mut reader = Reader::new(bytes);

        let version = reader.u8()?;
        if version != VERSION {
            return Err(CodecError::deserialize(format!(
                "unsupported layout version {} (expected {})",
                version, VERSION
            )));
        }

        let ordinal = reader.u8()?;
        let player = Player::from_ordinal(ordinal)
            .ok_or_else(|| CodecError::deserialize(format!("unknown player ordinal {}", ordinal)))?;

        let uri = reader.string()?;
        let title = reader.string()?;
        let format = reader.string()?;
        let width = reader.i32()?;
        let height = reader.i32()?;
        let duration = reader.i64()?;
        let size = reader.i64()?;
        let bitrate = reader.i32()?;

        let count = reader.u32()? as usize;
        // Each person needs at least its 4-byte length prefix.
        let mut persons = Vec::with_capacity(count.min(reader.remaining() / 4));
        for _ in 0..count {
            persons.push(reader.string()?);
        }

        let copyright = match reader.u8()? {
            0 => None,
            1 => Some(reader.string()?),
            flag => {
                return Err(CodecError::deserialize(format!(
                    "invalid copyright flag {}",
                    flag
                )))
            }
        };

        if reader.remaining() != 0 {
            return Err(CodecError::deserialize(format!(
                "{} trailing bytes after payload",
                reader.remaining()
            )));
        }

        Ok(Media {
            player,
            uri,
            title,
            width,
            height,
            format,
            duration,
            size,
            bitrate,
            persons,
            copyright,
        })
    }
}

fn put_len(buf: &mut Vec<u8>, len: usize) -> CodecResult<()> {
    let len = u32::try_from(len)
        .map_err(|_| CodecError::serialize(format!("length {} exceeds u32::MAX", len)))?;
    buf.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn put_str(buf: &mut Vec<u8>, value: &str) -> CodecResult<()> {
    put_len(buf, value.len())?;
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Bounds-checked cursor over an input buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::deserialize(format!(
                "unexpected end of input at offset {}: need {} bytes, have {}",
                self.pos,
                n,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> CodecResult<u32> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn i32(&mut self) -> CodecResult<i32> {
        Ok(i32::from_be_bytes(self.array()?))
    }

    fn i64(&mut self) -> CodecResult<i64> {
        Ok(i64::from_be_bytes(self.array()?))
    }

    fn string(&mut self) -> CodecResult<String> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(CodecError::deserialize)
    }
}
