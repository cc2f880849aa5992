use aok::{OK, Void};
use jdb_vint::{Error, MAX_SIZE, len, pack, unpack};
use log::info;
use proptest::prelude::*;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

/// Boundary values with their encoded length
/// 边界值及其编码长度
const BOUNDS: &[(u64, usize)] = &[
  (0, 1),
  (240, 1),
  (241, 2),
  (2287, 2),
  (2288, 3),
  (67823, 3),
  (67824, 4),
  (0xFF_FFFF, 4),
  (0x100_0000, 5),
  (0xFFFF_FFFF, 5),
  (0x1_0000_0000, 6),
  (0xFF_FFFF_FFFF, 6),
  (0x100_0000_0000, 7),
  (0xFFFF_FFFF_FFFF, 7),
  (0x1_0000_0000_0000, 8),
  (0xFF_FFFF_FFFF_FFFF, 8),
  (0x100_0000_0000_0000, 9),
  (u64::MAX, 9),
];

#[test]
fn test_bounds() -> Void {
  for &(v, n) in BOUNDS {
    assert_eq!(len(v), n, "len {v}");
    let mut buf = [0u8; MAX_SIZE];
    let end = pack(&mut buf, 0, v)?;
    assert_eq!(end, n, "pack {v}");
    assert_eq!(unpack(&buf, 0)?, (v, n), "unpack {v}");
  }
  info!("bounds ok");
  OK
}

#[test]
fn test_known_bytes() -> Void {
  let mut buf = [0u8; MAX_SIZE];

  pack(&mut buf, 0, 241)?;
  assert_eq!(&buf[..2], &[241, 1]);

  pack(&mut buf, 0, 2288)?;
  assert_eq!(&buf[..3], &[249, 0, 0]);

  pack(&mut buf, 0, 67824)?;
  assert_eq!(&buf[..4], &[250, 0x01, 0x08, 0xF0]);

  let end = pack(&mut buf, 0, u64::MAX)?;
  assert_eq!(end, 9);
  assert_eq!(buf, [255; 9]);
  OK
}

#[test]
fn test_sequence() -> Void {
  let vals = [7u64, 300, 70000, u64::MAX, 0];
  let mut buf = [0u8; 64];
  let mut pos = 3;
  for v in vals {
    pos = pack(&mut buf, pos, v)?;
  }

  let mut pos = 3;
  for v in vals {
    let (got, next) = unpack(&buf, pos)?;
    assert_eq!(got, v);
    pos = next;
  }
  assert_eq!(pos, 3 + 1 + 2 + 4 + 9 + 1);
  OK
}

#[test]
fn test_overflow_writes_nothing() -> Void {
  let mut buf = [0xAAu8; 4];
  let err = pack(&mut buf, 1, 0x1_0000_0000).unwrap_err();
  assert_eq!(
    err,
    Error::Overflow {
      pos: 1,
      need: 6,
      cap: 4
    }
  );
  assert_eq!(buf, [0xAA; 4]);

  let err = pack(&mut buf, usize::MAX, 1).unwrap_err();
  assert!(matches!(err, Error::Overflow { .. }));
  OK
}

#[test]
fn test_truncated() -> Void {
  assert_eq!(unpack(&[0u8; 0], 0), Err(Error::Truncated { pos: 0 }));
  assert_eq!(unpack(&[1, 2], 2), Err(Error::Truncated { pos: 2 }));
  assert_eq!(unpack(&[245], 0), Err(Error::Truncated { pos: 0 }));
  assert_eq!(unpack(&[0, 255, 1, 2, 3], 1), Err(Error::Truncated { pos: 1 }));
  OK
}

#[test]
fn test_non_canonical() -> Void {
  // 240 in two bytes
  assert_eq!(unpack(&[241, 0], 0), Err(Error::NonCanonical { pos: 0 }));
  // 5 in four bytes
  assert_eq!(
    unpack(&[250, 0, 0, 5], 0),
    Err(Error::NonCanonical { pos: 0 })
  );
  // u32::MAX in nine bytes
  assert_eq!(
    unpack(&[255, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF], 0),
    Err(Error::NonCanonical { pos: 0 })
  );
  OK
}

proptest! {
  #[test]
  fn prop_roundtrip(v in any::<u64>(), pre in 0usize..8) {
    let mut buf = [0u8; 8 + MAX_SIZE];
    let end = pack(&mut buf, pre, v).unwrap();
    prop_assert_eq!(end - pre, len(v));
    prop_assert_eq!(unpack(&buf, pre).unwrap(), (v, end));
  }

  #[test]
  fn prop_len_monotonic(a in any::<u64>(), b in any::<u64>()) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    prop_assert!(len(lo) <= len(hi));
  }

  #[test]
  fn prop_unpack_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..12)) {
    if let Ok((v, end)) = unpack(&bytes, 0) {
      prop_assert_eq!(end, len(v));
      let mut buf = [0u8; MAX_SIZE];
      pack(&mut buf, 0, v).unwrap();
      prop_assert_eq!(&buf[..end], &bytes[..end]);
    }
  }
}
