//! Checkpoint record
//! 检查点记录
//!
//! Disk format: version(1) + root + alloc + avail + discard + varint(file_size) + varint(ckp_size)
//! 磁盘格式：version(1) + root + alloc + avail + discard + varint(file_size) + varint(ckp_size)
//!
//! The version is a raw byte and is checked before any other byte is read.
//! 版本号为原始字节，在读取其他字节前先行校验。

use std::fmt;

use log::warn;

use crate::{
  Addr, Codec,
  codec::{ADDR_MAX_SIZE, put},
  error::{Error, Result},
};

/// Supported record version
/// 支持的记录版本
pub const CKP_VERSION: u8 = 1;

/// Max encoded record size
/// 记录最大编码长度
pub const CKP_MAX_SIZE: usize = 1 + 4 * ADDR_MAX_SIZE + 2 * jdb_vint::MAX_SIZE;

/// Checkpoint record
/// 检查点记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ckp {
  pub version: u8,
  /// Root page
  /// 根页
  pub root: Addr,
  /// Allocation list
  /// 分配列表
  pub alloc: Addr,
  /// Available space list
  /// 可用空间列表
  pub avail: Addr,
  /// Blocks to free once the checkpoint is dropped
  /// 检查点删除后待释放的块
  pub discard: Addr,
  /// Logical end of file
  /// 文件逻辑末尾
  pub file_size: u64,
  /// Bytes held by this checkpoint's objects
  /// 本检查点对象占用的字节数
  pub ckp_size: u64,
}

impl Default for Ckp {
  fn default() -> Self {
    Self::new(Addr::Empty, Addr::Empty, Addr::Empty, Addr::Empty, 0, 0)
  }
}

impl Ckp {
  /// New record at the supported version
  /// 以当前支持版本创建记录
  pub const fn new(
    root: Addr,
    alloc: Addr,
    avail: Addr,
    discard: Addr,
    file_size: u64,
    ckp_size: u64,
  ) -> Self {
    Self {
      version: CKP_VERSION,
      root,
      alloc,
      avail,
      discard,
      file_size,
      ckp_size,
    }
  }

  #[inline]
  const fn addrs(&self) -> [Addr; 4] {
    [self.root, self.alloc, self.avail, self.discard]
  }

  /// Write record at `pos`, return position after it
  /// 在 `pos` 写入记录，返回其后的位置
  ///
  /// On error `buf` is left untouched.
  /// 出错时 `buf` 保持不变。
  pub fn encode(&self, codec: &Codec, buf: &mut [u8], pos: usize) -> Result<usize> {
    if self.version != CKP_VERSION {
      return Err(Error::UnsupportedVersion(self.version));
    }

    let mut tmp = [0u8; CKP_MAX_SIZE];
    tmp[0] = self.version;
    let mut n = 1;
    for addr in self.addrs() {
      n = codec.pack(&mut tmp, n, addr)?;
    }
    n = jdb_vint::pack(&mut tmp, n, self.file_size)?;
    n = jdb_vint::pack(&mut tmp, n, self.ckp_size)?;

    put(buf, pos, &tmp[..n])
  }

  /// Serialize to owned bytes
  /// 序列化为独立字节
  pub fn to_vec(&self, codec: &Codec) -> Result<Vec<u8>> {
    let mut buf = [0u8; CKP_MAX_SIZE];
    let n = self.encode(codec, &mut buf, 0)?;
    Ok(buf[..n].to_vec())
  }

  /// Read record at `pos`, return it with the position after it
  /// 从 `pos` 读取记录，返回记录及其后的位置
  pub fn decode(codec: &Codec, buf: &[u8], pos: usize) -> Result<(Self, usize)> {
    let Some(&version) = buf.get(pos) else {
      return Err(Error::Format(jdb_vint::Error::Truncated { pos }));
    };
    if version != CKP_VERSION {
      warn!("checkpoint at {pos}: unsupported version {version}");
      return Err(Error::UnsupportedVersion(version));
    }

    let (root, next) = codec.decode(buf, pos + 1)?;
    let (alloc, next) = codec.decode(buf, next)?;
    let (avail, next) = codec.decode(buf, next)?;
    let (discard, next) = codec.decode(buf, next)?;
    let (file_size, next) = jdb_vint::unpack(buf, next)?;
    let (ckp_size, next) = jdb_vint::unpack(buf, next)?;

    Ok((
      Self {
        version,
        root,
        alloc,
        avail,
        discard,
        file_size,
        ckp_size,
      },
      next,
    ))
  }

  /// Deserialize from the start of `buf`, trailing bytes ignored
  /// 从 `buf` 起始处反序列化，忽略尾部字节
  #[inline]
  pub fn load(codec: &Codec, buf: &[u8]) -> Result<Self> {
    Ok(Self::decode(codec, buf, 0)?.0)
  }

  /// All four addresses end within `file_size`
  /// 四个地址均在 `file_size` 之内结束
  pub fn is_plausible(&self, file_size: u64) -> bool {
    self.addrs().iter().all(|a| a.is_plausible(file_size))
  }
}

impl fmt::Display for Ckp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "version={}, root={}, alloc={}, avail={}, discard={}, file size={}, checkpoint size={}",
      self.version,
      self.root,
      self.alloc,
      self.avail,
      self.discard,
      self.file_size,
      self.ckp_size
    )
  }
}
