#![cfg_attr(docsrs, feature(doc_cfg))]

//! Block address cookies and checkpoint records for JDB
//! JDB 块地址 cookie 与检查点记录
//!
//! A cookie is the compact on-disk form of `(offset, size, checksum)`, relative
//! to the file's allocation unit. A checkpoint record packs four cookies and
//! two sizes behind a version byte. All operations are pure: positions go in
//! and come out by value, buffers stay with the caller.
//! cookie 是 `(offset, size, checksum)` 相对文件分配单位的紧凑磁盘形式。
//! 检查点记录在版本字节后打包四个 cookie 与两个长度。所有操作均为纯函数：
//! 位置按值传入传出，缓冲区归调用方所有。

mod addr;
mod ckp;
mod codec;
mod conf;
pub mod error;

pub use addr::{Addr, Extent};
pub use ckp::{CKP_MAX_SIZE, CKP_VERSION, Ckp};
pub use codec::{ADDR_MAX_SIZE, Codec, SENTINEL};
pub use conf::{ALLOC_SIZE_MAX, ALLOC_SIZE_MIN, Conf, DEFAULT_ALLOC_SIZE};
pub use error::{Error, Result};
