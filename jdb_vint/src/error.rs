//! Error types for varint operations
//! 变长整数操作的错误类型

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error("varint overflow at {pos}: need {need} bytes, capacity {cap}")]
  Overflow { pos: usize, need: usize, cap: usize },

  #[error("varint truncated at {pos}")]
  Truncated { pos: usize },

  #[error("varint not canonical at {pos}")]
  NonCanonical { pos: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
