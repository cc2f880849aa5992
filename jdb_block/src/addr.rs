//! Decoded block address
//! 解码后的块地址

use std::fmt;

/// Non-empty block range, offset and size aligned to the alloc size
/// 非空块区间，offset 与 size 均按分配单位对齐
///
/// Only built by [`crate::Codec`], so alignment always holds.
/// 仅由 [`crate::Codec`] 构造，对齐始终成立。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
  pub(crate) offset: u64,
  pub(crate) size: u32,
  pub(crate) checksum: u32,
}

impl Extent {
  #[inline]
  pub const fn offset(&self) -> u64 {
    self.offset
  }

  #[inline]
  pub const fn size(&self) -> u32 {
    self.size
  }

  #[inline]
  pub const fn checksum(&self) -> u32 {
    self.checksum
  }
}

/// Block address
/// 块地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Addr {
  /// Null reference, reads as offset 0 / size 0 / checksum 0
  /// 空引用，offset / size / checksum 均视为 0
  #[default]
  Empty,
  Extent(Extent),
}

impl Addr {
  #[inline]
  pub const fn is_empty(&self) -> bool {
    matches!(self, Self::Empty)
  }

  #[inline]
  pub const fn offset(&self) -> u64 {
    match self {
      Self::Empty => 0,
      Self::Extent(e) => e.offset,
    }
  }

  #[inline]
  pub const fn size(&self) -> u32 {
    match self {
      Self::Empty => 0,
      Self::Extent(e) => e.size,
    }
  }

  #[inline]
  pub const fn checksum(&self) -> u32 {
    match self {
      Self::Empty => 0,
      Self::Extent(e) => e.checksum,
    }
  }

  /// End offset, None on u64 overflow
  /// 结束偏移，u64 溢出时为 None
  #[inline]
  pub const fn end(&self) -> Option<u64> {
    self.offset().checked_add(self.size() as u64)
  }

  /// Whether the range lies inside a file of `file_size` bytes
  /// 区间是否落在长度为 `file_size` 的文件内
  ///
  /// Catches truncated files and stale cookies; a plausible address can
  /// still point at another object's data.
  /// 可发现截断文件与过期 cookie；合理的地址仍可能指向其他对象的数据。
  #[inline]
  pub fn is_plausible(&self, file_size: u64) -> bool {
    self.end().is_some_and(|end| end <= file_size)
  }
}

impl From<Extent> for Addr {
  #[inline]
  fn from(e: Extent) -> Self {
    Self::Extent(e)
  }
}

/// `[start-end, size, checksum]`
impl fmt::Display for Addr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let offset = self.offset();
    write!(
      f,
      "[{}-{}, {}, {}]",
      offset,
      offset as u128 + self.size() as u128,
      self.size(),
      self.checksum()
    )
  }
}
