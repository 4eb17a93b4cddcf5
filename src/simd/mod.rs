//! Runtime-dispatched byte scanning primitives.
//!
//! Every operation here exists in a scalar form plus one or more vector
//! kernels compiled for a specific instruction set. On first use the
//! executing CPU is probed once and a function-pointer table is bound to
//! the widest kernels it supports; after that every call is a single
//! indirection. There is no failure mode: a CPU with none of the compiled
//! extensions binds the scalar table and only loses throughput.
//!
//! All operations are pure over caller-owned byte ranges and freely
//! callable from any thread. The binding step itself is establish-once
//! (`OnceLock`), so concurrent first calls observe one fully-formed table.

pub mod scalar;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod sse2;

#[cfg(target_arch = "aarch64")]
mod neon;

use std::ops::Range;
use std::sync::OnceLock;

use tracing::debug;

/// Instruction set the dispatch table was bound against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Target {
    Scalar,
    Sse2,
    Avx2,
    Neon,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Scalar => write!(f, "scalar"),
            Target::Sse2 => write!(f, "sse2"),
            Target::Avx2 => write!(f, "avx2"),
            Target::Neon => write!(f, "neon"),
        }
    }
}

/// Byte classes recognized by [`find_byte_class`].
///
/// These are the three classifications the terminal front end needs on its
/// hot path; each maps to a fixed set of broadcast compares in the vector
/// kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// Space and everything at or below it, plus anything outside 7-bit
    /// ASCII: `b <= 0x20 || b > 0x7F`. The complement is the "safe to print
    /// verbatim" range.
    SpaceOrNonAscii,
    /// C0 controls, non-ASCII, or a double quote:
    /// `b < 0x20 || b > 0x7F || b == b'"'`.
    ControlOrNonAsciiOrQuote,
    /// ASCII letters, `A-Z` or `a-z`. CSI sequences terminate on these.
    AsciiAlpha,
}

impl ByteClass {
    /// Scalar membership predicate; the reference for every kernel.
    #[inline]
    pub(crate) fn matches(self, byte: u8) -> bool {
        match self {
            ByteClass::SpaceOrNonAscii => byte <= 0x20 || byte > 0x7F,
            ByteClass::ControlOrNonAsciiOrQuote => {
                byte < 0x20 || byte > 0x7F || byte == b'"'
            }
            ByteClass::AsciiAlpha => byte.is_ascii_alphabetic(),
        }
    }
}

/// One bound implementation per operation.
///
/// The `unsafe` in the signatures carries the CPU-feature obligation: a
/// pointer stored here is only ever a kernel whose required extension was
/// verified at binding time.
pub(crate) struct Kernels {
    pub(crate) target: Target,
    pub(crate) find_byte: unsafe fn(&[u8], u8) -> usize,
    pub(crate) find_any_byte: unsafe fn(&[u8], &[u8]) -> usize,
    pub(crate) find_last_byte: unsafe fn(&[u8], u8) -> usize,
    pub(crate) bytes_equal: unsafe fn(&[u8], &[u8]) -> bool,
    pub(crate) copy_forward: unsafe fn(*const u8, *mut u8, usize),
    pub(crate) copy_backward: unsafe fn(*const u8, *mut u8, usize),
    pub(crate) to_upper_ascii: unsafe fn(&mut [u8]),
    pub(crate) find_byte_class: unsafe fn(&[u8], ByteClass) -> usize,
    pub(crate) is_all_ascii: unsafe fn(&[u8]) -> bool,
}

static KERNELS: OnceLock<Kernels> = OnceLock::new();

#[inline]
fn kernels() -> &'static Kernels {
    KERNELS.get_or_init(|| {
        let table = select();
        debug!(isa = %table.target, "bound byte scanning kernels");
        table
    })
}

fn select() -> Kernels {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return avx2::kernels();
        }
        // SSE2 is part of the x86_64 baseline.
        sse2::kernels()
    }

    #[cfg(target_arch = "aarch64")]
    {
        neon::kernels()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        scalar::kernels()
    }
}

/// The instruction set selected for this process.
///
/// Binds the dispatch table if it is not bound yet.
#[inline]
pub fn target() -> Target {
    kernels().target
}

/// Offset of the first occurrence of `needle`, or `haystack.len()` when
/// absent. The length sentinel can be used directly as a slice bound.
#[inline]
pub fn find_byte(haystack: &[u8], needle: u8) -> usize {
    unsafe { (kernels().find_byte)(haystack, needle) }
}

/// Offset of the first occurrence of any byte in `needles`, or
/// `haystack.len()` when none occurs. The lowest offset wins regardless of
/// which needle matched; an empty needle set never matches.
#[inline]
pub fn find_any_byte(haystack: &[u8], needles: &[u8]) -> usize {
    match needles.len() {
        0 => haystack.len(),
        1 => find_byte(haystack, needles[0]),
        _ => unsafe { (kernels().find_any_byte)(haystack, needles) },
    }
}

/// Offset of the rightmost occurrence of `needle`, or `None` when absent.
///
/// `haystack` must be non-empty; this is debug-asserted and an empty
/// haystack in release builds simply reports `None`.
#[inline]
pub fn find_last_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    debug_assert!(!haystack.is_empty(), "find_last_byte over empty haystack");
    let at = unsafe { (kernels().find_last_byte)(haystack, needle) };
    (at < haystack.len()).then_some(at)
}

/// Byte-exact equality. Mismatched lengths are `false` without a scan.
#[inline]
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    unsafe { (kernels().bytes_equal)(a, b) }
}

/// Copies `src` into `dst` front to back.
///
/// Non-overlap is guaranteed by the borrows. Panics if the lengths differ.
#[inline]
pub fn copy_bytes(src: &[u8], dst: &mut [u8]) {
    assert_eq!(
        src.len(),
        dst.len(),
        "copy_bytes length mismatch: src {} vs dst {}",
        src.len(),
        dst.len()
    );
    unsafe { (kernels().copy_forward)(src.as_ptr(), dst.as_mut_ptr(), src.len()) }
}

/// Moves `buf[src]` so it starts at `dst`, within the same buffer.
///
/// Overlap-safe in every configuration: when the destination starts inside
/// the source range the copy runs backward from the high end, otherwise a
/// forward copy is used. Reading `buf[dst..dst + len]` afterwards yields
/// exactly the bytes `buf[src]` held at call time.
///
/// Panics if `src` or the destination range is out of bounds.
pub fn move_bytes(buf: &mut [u8], src: Range<usize>, dst: usize) {
    assert!(src.start <= src.end && src.end <= buf.len(), "source range out of bounds");
    let len = src.end - src.start;
    assert!(dst <= buf.len() - len, "destination range out of bounds");
    if len == 0 || dst == src.start {
        return;
    }

    let table = kernels();
    let base = buf.as_mut_ptr();
    unsafe {
        let from = base.add(src.start) as *const u8;
        let to = base.add(dst);
        // A forward copy only corrupts data when the destination starts
        // strictly inside the source range.
        if dst <= src.start || dst >= src.end {
            (table.copy_forward)(from, to, len);
        } else {
            (table.copy_backward)(from, to, len);
        }
    }
}

/// Folds ASCII `a-z` to `A-Z` in place. All other bytes, including
/// non-ASCII, pass through unmodified. Idempotent.
#[inline]
pub fn to_upper_ascii(buf: &mut [u8]) {
    unsafe { (kernels().to_upper_ascii)(buf) }
}

/// Offset of the first byte belonging to `class`, or `haystack.len()` when
/// the whole range is outside the class.
#[inline]
pub fn find_byte_class(haystack: &[u8], class: ByteClass) -> usize {
    unsafe { (kernels().find_byte_class)(haystack, class) }
}

/// Whether every byte is 7-bit ASCII. Empty input is ASCII.
#[inline]
pub fn is_all_ascii(bytes: &[u8]) -> bool {
    unsafe { (kernels().is_all_ascii)(bytes) }
}
