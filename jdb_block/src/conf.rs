/// Codec configuration
/// 编解码配置
#[derive(Clone, Copy, Debug)]
pub enum Conf {
  /// File allocation unit in bytes, power of two
  /// 文件分配单位（字节），须为 2 的幂
  AllocSize(u32),
}

/// Default allocation unit
/// 默认分配单位
pub const DEFAULT_ALLOC_SIZE: u32 = 4096;

pub const ALLOC_SIZE_MIN: u32 = 512;
pub const ALLOC_SIZE_MAX: u32 = 128 * 1024 * 1024;
