//! Error types for block address and checkpoint codec
//! 块地址与检查点编解码的错误类型

use thiserror::Error;

use crate::CKP_VERSION;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Target buffer too small
  /// 目标缓冲区不足
  #[error("buffer overflow at {pos}: need {need} bytes, capacity {cap}")]
  Overflow { pos: usize, need: usize, cap: usize },

  /// Short or malformed varint
  /// 变长整数过短或格式错误
  #[error("format: {0}")]
  Format(jdb_vint::Error),

  /// Decoded units do not fit offset / size
  /// 解码出的单位数超出 offset / size 范围
  #[error("address out of range at {pos}")]
  Range { pos: usize },

  #[error("unsupported checkpoint version {0}, expect {expect}", expect = CKP_VERSION)]
  UnsupportedVersion(u8),

  /// Not aligned to alloc size, or offset inside the first unit
  /// 未按分配单位对齐，或 offset 落在首个单位内
  #[error("invalid extent: offset {offset}, size {size}")]
  Extent { offset: u64, size: u32 },

  #[error("invalid alloc size {0}")]
  AllocSize(u32),
}

impl From<jdb_vint::Error> for Error {
  fn from(e: jdb_vint::Error) -> Self {
    match e {
      jdb_vint::Error::Overflow { pos, need, cap } => Self::Overflow { pos, need, cap },
      e => Self::Format(e),
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
