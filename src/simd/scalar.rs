//! Scalar reference implementations.
//!
//! Bound as the dispatch table on targets with no compiled vector kernel,
//! and used by the tests as the behavioral reference for every vector
//! variant. Single-byte forward and backward search lean on `memchr`,
//! which already ships tuned search loops for every target this crate
//! doesn't hand-vectorize.

use super::ByteClass;

/// First occurrence of `needle`, length sentinel when absent.
#[inline]
pub fn find_byte(haystack: &[u8], needle: u8) -> usize {
    memchr::memchr(needle, haystack).unwrap_or(haystack.len())
}

/// First occurrence of any needle. Callers have already handled the empty
/// and single-needle sets.
pub fn find_any_byte(haystack: &[u8], needles: &[u8]) -> usize {
    match *needles {
        [a, b] => memchr::memchr2(a, b, haystack).unwrap_or(haystack.len()),
        [a, b, c] => memchr::memchr3(a, b, c, haystack).unwrap_or(haystack.len()),
        _ => haystack
            .iter()
            .position(|b| needles.contains(b))
            .unwrap_or(haystack.len()),
    }
}

/// Rightmost occurrence of `needle`, length sentinel when absent.
#[inline]
pub fn find_last_byte(haystack: &[u8], needle: u8) -> usize {
    memchr::memrchr(needle, haystack).unwrap_or(haystack.len())
}

/// Byte equality over equal-length ranges.
#[inline]
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    a == b
}

/// Forward byte-at-a-time copy.
///
/// # Safety
///
/// `src` and `dst` must each be valid for `len` bytes; regions may overlap
/// only if `dst <= src`.
pub unsafe fn copy_forward(src: *const u8, dst: *mut u8, len: usize) {
    for i in 0..len {
        *dst.add(i) = *src.add(i);
    }
}

/// Backward byte-at-a-time copy, for destinations inside the source range.
///
/// # Safety
///
/// `src` and `dst` must each be valid for `len` bytes.
pub unsafe fn copy_backward(src: *const u8, dst: *mut u8, len: usize) {
    for i in (0..len).rev() {
        *dst.add(i) = *src.add(i);
    }
}

/// In-place ASCII uppercase fold.
#[inline]
pub fn to_upper_ascii(buf: &mut [u8]) {
    buf.make_ascii_uppercase();
}

/// First byte belonging to `class`, length sentinel when absent.
#[inline]
pub fn find_byte_class(haystack: &[u8], class: ByteClass) -> usize {
    haystack
        .iter()
        .position(|&b| class.matches(b))
        .unwrap_or(haystack.len())
}

/// Whether every byte is 7-bit ASCII.
#[inline]
pub fn is_all_ascii(bytes: &[u8]) -> bool {
    bytes.is_ascii()
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) fn kernels() -> super::Kernels {
    super::Kernels {
        target: super::Target::Scalar,
        find_byte,
        find_any_byte,
        find_last_byte,
        bytes_equal,
        copy_forward,
        copy_backward,
        to_upper_ascii,
        find_byte_class,
        is_all_ascii,
    }
}
