//! Byte scanning and text encoding primitives for terminal emulators.
//!
//! A terminal emulator runs a handful of byte-level questions on every
//! chunk a child process writes: where is the next escape sequence, how
//! much of this buffer is plain printable text, is it valid UTF-8, where
//! does this line move inside the scrollback. This crate answers those
//! questions with operations that are vectorized for the widest
//! instruction set the running CPU supports, selected once per process at
//! first use — no recompilation, no per-call feature probing, and a scalar
//! fallback that keeps every operation correct everywhere.
//!
//! The crate is split along those lines:
//!
//! * [`simd`] — the dispatched operations: byte search forward and
//!   backward, byte-set search, equality, overlap-safe buffer movement,
//!   ASCII case folding and byte-class scans.
//! * [`ansi`] — composite scanners for the escape-sequence front end:
//!   CSI boundary detection and extraction, printable-run measurement,
//!   needs-escaping checks.
//! * [`encoding`] — UTF-8/ASCII validation, encoding detection, UTF-8 ↔
//!   UTF-32 conversion and base64 decoding.
//! * [`config`] — the appearance defaults the surrounding emulator reads.
//!
//! Search operations return the input length when nothing is found, so the
//! result is always usable directly as a slice bound:
//!
//! ```
//! let chunk = b"error: \x1b[31mred\x1b[0m";
//! let plain = &chunk[..farol::ansi::find_csi_start(chunk)];
//! assert_eq!(plain, b"error: ");
//! ```
//!
//! Everything operates on caller-owned ranges; nothing here allocates or
//! holds state beyond the one-time kernel binding.

#![deny(clippy::if_not_else, clippy::enum_glob_use)]

pub mod ansi;
pub mod config;
pub mod encoding;
pub mod simd;

pub use ansi::{extract_csi_sequence, find_csi_start, needs_escaping, printable_ascii_run};
pub use encoding::{Charset, EncodingError};
pub use simd::{
    bytes_equal, copy_bytes, find_any_byte, find_byte, find_byte_class, find_last_byte,
    is_all_ascii, move_bytes, to_upper_ascii, ByteClass, Target,
};
