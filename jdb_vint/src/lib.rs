#![cfg_attr(docsrs, feature(doc_cfg))]

//! Canonical prefix varint for u64
//! u64 规范前缀变长整数
//!
//! The first byte decides the total length, so decode never scans for a
//! terminator. Small values take one byte.
//! 首字节决定总长度，解码无需扫描终止符。小值只占一个字节。
//!
//! | first byte | bytes | value                       |
//! |------------|-------|-----------------------------|
//! | 0..=240    | 1     | first byte                  |
//! | 241..=248  | 2     | 240 + 256 * (b0 - 241) + b1 |
//! | 249        | 3     | 2288 + 256 * b1 + b2        |
//! | 250..=255  | 4..=9 | (b0 - 247) bytes big-endian |
//!
//! Every value has exactly one encoding: decode rejects a value stored in a
//! longer form than [`len`] picks.
//! 每个值只有唯一编码：若值以长于 [`len`] 的形式存储，解码拒绝。

mod error;

pub use error::{Error, Result};

/// Max encoded size
/// 最大编码长度
pub const MAX_SIZE: usize = 9;

const ONE_MAX: u64 = 240;
const TWO_MAX: u64 = 2287;
const THREE_MAX: u64 = 67823;
const THREE_BASE: u64 = TWO_MAX + 1;
const TWO_MARKER: u8 = 241;
const THREE_MARKER: u8 = 249;
// marker = BE_MARKER_BASE + total bytes
const BE_MARKER_BASE: u8 = 246;

/// Encoded length of `v`, never decreases as `v` grows
/// `v` 的编码长度，随 `v` 增大单调不减
#[inline]
pub const fn len(v: u64) -> usize {
  if v <= ONE_MAX {
    1
  } else if v <= TWO_MAX {
    2
  } else if v <= THREE_MAX {
    3
  } else {
    // significant bytes + marker
    (71 - v.leading_zeros() as usize) / 8 + 1
  }
}

/// Write `v` at `pos`, return position after it
/// 在 `pos` 写入 `v`，返回其后的位置
///
/// Nothing is written when `buf` is too short.
/// `buf` 空间不足时不写入任何字节。
pub fn pack(buf: &mut [u8], pos: usize, v: u64) -> Result<usize> {
  let need = len(v);
  let cap = buf.len();
  let end = pos
    .checked_add(need)
    .filter(|&end| end <= cap)
    .ok_or(Error::Overflow { pos, need, cap })?;

  let out = &mut buf[pos..end];
  match need {
    1 => out[0] = v as u8,
    2 => {
      let d = v - ONE_MAX;
      out[0] = TWO_MARKER + (d >> 8) as u8;
      out[1] = d as u8;
    }
    3 => {
      let d = v - THREE_BASE;
      out[0] = THREE_MARKER;
      out[1] = (d >> 8) as u8;
      out[2] = d as u8;
    }
    n => {
      out[0] = BE_MARKER_BASE + n as u8;
      out[1..].copy_from_slice(&v.to_be_bytes()[MAX_SIZE - n..]);
    }
  }
  Ok(end)
}

/// Read a value at `pos`, return it with the position after it
/// 从 `pos` 读取一个值，返回值及其后的位置
pub fn unpack(buf: &[u8], pos: usize) -> Result<(u64, usize)> {
  let Some(&b0) = buf.get(pos) else {
    return Err(Error::Truncated { pos });
  };

  let n = match b0 {
    0..=240 => return Ok((b0 as u64, pos + 1)),
    241..=248 => 2,
    THREE_MARKER => 3,
    _ => (b0 - BE_MARKER_BASE) as usize,
  };

  let tail = buf
    .get(pos + 1..pos + n)
    .ok_or(Error::Truncated { pos })?;

  let v = match n {
    2 => ONE_MAX + (((b0 - TWO_MARKER) as u64) << 8) + tail[0] as u64,
    3 => THREE_BASE + ((tail[0] as u64) << 8) + tail[1] as u64,
    _ => tail.iter().fold(0u64, |v, &b| (v << 8) | b as u64),
  };

  if len(v) != n {
    return Err(Error::NonCanonical { pos });
  }
  Ok((v, pos + n))
}
