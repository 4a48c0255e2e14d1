//! # Binary Encoding Primitives
//!
//! This module provides the sequential byte cursors the record layer encodes
//! into and decodes from. All multi-byte integers use big-endian (network)
//! order, which is what makes the record encoding canonical: the same fields
//! in the same order always produce the same bytes.
//!
//! - `cursor`: `WriteCursor` / `ReadCursor` with typed put/get primitives and
//!   the variable-length prefix format

pub mod cursor;

pub use cursor::{ReadCursor, WriteCursor, MAX_VL_LEN};
