//! Block address transcoder
//! 块地址编解码
//!
//! Cookie: varint(o) + varint(s) + varint(c)
//! - empty: o = SENTINEL, s = 0, c = 0
//! - else: o = offset / alloc_size - 1, s = size / alloc_size, c = checksum
//!
//! Offsets and sizes are always aligned, so dividing drops the zero low bits,
//! and the `- 1` puts the first usable unit at 0, the one-byte varint range.
//! offset 与 size 总是对齐的，除法去掉低位零，`- 1` 让首个可用单位落在 0，即单字节 varint 区间。

use log::debug;

use crate::{
  Addr, Conf, Extent,
  conf::{ALLOC_SIZE_MAX, ALLOC_SIZE_MIN, DEFAULT_ALLOC_SIZE},
  error::{Error, Result},
};

/// Offset term of an empty address
/// 空地址的 offset 项
pub const SENTINEL: u64 = u64::MAX;

/// Max cookie size
/// cookie 最大长度
pub const ADDR_MAX_SIZE: usize = 3 * jdb_vint::MAX_SIZE;

/// Copy `src` into `buf` at `pos`, all or nothing
/// 将 `src` 整体拷贝到 `buf` 的 `pos` 处，不足则不写
pub(crate) fn put(buf: &mut [u8], pos: usize, src: &[u8]) -> Result<usize> {
  let need = src.len();
  let cap = buf.len();
  let end = pos
    .checked_add(need)
    .filter(|&end| end <= cap)
    .ok_or(Error::Overflow { pos, need, cap })?;
  buf[pos..end].copy_from_slice(src);
  Ok(end)
}

/// Address codec bound to one file's allocation unit
/// 绑定单个文件分配单位的地址编解码器
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec {
  alloc_size: u32,
}

impl Default for Codec {
  fn default() -> Self {
    Self {
      alloc_size: DEFAULT_ALLOC_SIZE,
    }
  }
}

impl Codec {
  /// `alloc_size` must be a power of two in `[ALLOC_SIZE_MIN, ALLOC_SIZE_MAX]`
  /// `alloc_size` 须为 `[ALLOC_SIZE_MIN, ALLOC_SIZE_MAX]` 内的 2 的幂
  pub fn new(alloc_size: u32) -> Result<Self> {
    if !alloc_size.is_power_of_two() || !(ALLOC_SIZE_MIN..=ALLOC_SIZE_MAX).contains(&alloc_size) {
      return Err(Error::AllocSize(alloc_size));
    }
    Ok(Self { alloc_size })
  }

  /// Build from options, later ones win
  /// 由配置项构建，后者覆盖前者
  pub fn open(conf: &[Conf]) -> Result<Self> {
    let mut alloc_size = DEFAULT_ALLOC_SIZE;
    for c in conf {
      match c {
        Conf::AllocSize(n) => alloc_size = *n,
      }
    }
    Self::new(alloc_size)
  }

  #[inline]
  pub const fn alloc_size(&self) -> u32 {
    self.alloc_size
  }

  /// Validate and build an address
  /// 校验并构造地址
  ///
  /// `size == 0` gives [`Addr::Empty`] whatever `offset` and `checksum` are.
  /// `size == 0` 时无论 `offset` 与 `checksum` 为何，均得到 [`Addr::Empty`]。
  pub fn addr(&self, offset: u64, size: u32, checksum: u32) -> Result<Addr> {
    if size == 0 {
      return Ok(Addr::Empty);
    }
    let unit = self.alloc_size as u64;
    if offset < unit || offset % unit != 0 || size % self.alloc_size != 0 {
      return Err(Error::Extent { offset, size });
    }
    Ok(Addr::Extent(Extent {
      offset,
      size,
      checksum,
    }))
  }

  fn units(&self, addr: Addr) -> Result<[u64; 3]> {
    let Addr::Extent(e) = addr else {
      return Ok([SENTINEL, 0, 0]);
    };
    // Extent may come from a codec with another alloc size
    // Extent 可能来自分配单位不同的编解码器
    self.addr(e.offset, e.size, e.checksum)?;
    let unit = self.alloc_size as u64;
    Ok([
      e.offset / unit - 1,
      (e.size / self.alloc_size) as u64,
      e.checksum as u64,
    ])
  }

  /// Pack into a buffer already sized for the worst case
  /// 写入已按最坏情况分配的缓冲区
  pub(crate) fn pack(&self, buf: &mut [u8], pos: usize, addr: Addr) -> Result<usize> {
    let [o, s, c] = self.units(addr)?;
    let pos = jdb_vint::pack(buf, pos, o)?;
    let pos = jdb_vint::pack(buf, pos, s)?;
    Ok(jdb_vint::pack(buf, pos, c)?)
  }

  /// Write cookie at `pos`, return position after it
  /// 在 `pos` 写入 cookie，返回其后的位置
  ///
  /// On [`Error::Overflow`] `buf` is left untouched.
  /// 返回 [`Error::Overflow`] 时 `buf` 保持不变。
  pub fn encode(&self, buf: &mut [u8], pos: usize, addr: Addr) -> Result<usize> {
    let mut tmp = [0u8; ADDR_MAX_SIZE];
    let n = self.pack(&mut tmp, 0, addr)?;
    put(buf, pos, &tmp[..n])
  }

  /// Validate raw parts then encode
  /// 校验原始字段后编码
  pub fn encode_raw(
    &self,
    buf: &mut [u8],
    pos: usize,
    offset: u64,
    size: u32,
    checksum: u32,
  ) -> Result<usize> {
    let addr = self.addr(offset, size, checksum)?;
    self.encode(buf, pos, addr)
  }

  /// Cookie as owned bytes
  /// 以独立字节返回 cookie
  pub fn cookie(&self, addr: Addr) -> Result<Vec<u8>> {
    let mut tmp = [0u8; ADDR_MAX_SIZE];
    let n = self.pack(&mut tmp, 0, addr)?;
    Ok(tmp[..n].to_vec())
  }

  /// Read cookie at `pos`, return address and position after it
  /// 从 `pos` 读取 cookie，返回地址及其后的位置
  pub fn decode(&self, buf: &[u8], pos: usize) -> Result<(Addr, usize)> {
    let (o, next) = jdb_vint::unpack(buf, pos)?;
    let (s, next) = jdb_vint::unpack(buf, next)?;
    let (c, next) = jdb_vint::unpack(buf, next)?;

    // size 0 decides emptiness, o and c are ignored
    // 仅由 size 0 判定为空，忽略 o 与 c
    if s == 0 {
      return Ok((Addr::Empty, next));
    }

    let unit = self.alloc_size as u64;
    let offset = o.checked_add(1).and_then(|o| o.checked_mul(unit));
    let size = s
      .checked_mul(unit)
      .and_then(|s| u32::try_from(s).ok());
    let (Some(offset), Some(size)) = (offset, size) else {
      return Err(Error::Range { pos });
    };

    Ok((
      Addr::Extent(Extent {
        offset,
        size,
        checksum: c as u32,
      }),
      next,
    ))
  }

  /// Whether the cookie's range ends within `file_size`
  /// cookie 的区间是否在 `file_size` 之内结束
  pub fn is_plausible(&self, cookie: &[u8], file_size: u64) -> Result<bool> {
    let (addr, _) = self.decode(cookie, 0)?;
    let ok = addr.is_plausible(file_size);
    if !ok {
      debug!("implausible address {addr}, file size {file_size}");
    }
    Ok(ok)
  }

  /// Render cookie as `[start-end, size, checksum]`
  /// 将 cookie 渲染为 `[start-end, size, checksum]`
  pub fn render(&self, cookie: &[u8]) -> Result<String> {
    let (addr, _) = self.decode(cookie, 0)?;
    Ok(addr.to_string())
  }
}
