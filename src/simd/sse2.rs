//! SSE2 kernels, 16 bytes per lane group.
//!
//! SSE2 is part of the x86_64 baseline, so this table is the floor for
//! every x86_64 machine; AVX2 replaces it when the CPU allows.
//!
//! Range classifications use signed byte compares: ASCII sits in the
//! positive half, so `0x80..=0xFF` fall below zero and a single signed
//! bound test covers the "or non-ASCII" part of each class.

use std::arch::x86_64::*;

use super::{ByteClass, Kernels, Target};

pub(crate) fn kernels() -> Kernels {
    Kernels {
        target: Target::Sse2,
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

#[target_feature(enable = "sse2")]
unsafe fn find_byte(haystack: &[u8], needle: u8) -> usize {
    let len = haystack.len();
    let ptr = haystack.as_ptr();
    let wanted = _mm_set1_epi8(needle as i8);

    let mut i = 0;
    while i + 16 <= len {
        let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
        let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(chunk, wanted));
        if mask != 0 {
            return i + mask.trailing_zeros() as usize;
        }
        i += 16;
    }
    while i < len {
        if *ptr.add(i) == needle {
            return i;
        }
        i += 1;
    }
    len
}

#[target_feature(enable = "sse2")]
unsafe fn find_any_byte(haystack: &[u8], needles: &[u8]) -> usize {
    let len = haystack.len();
    let ptr = haystack.as_ptr();

    if let [a, b] = *needles {
        let va = _mm_set1_epi8(a as i8);
        let vb = _mm_set1_epi8(b as i8);
        let mut i = 0;
        while i + 16 <= len {
            let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
            let hit =
                _mm_or_si128(_mm_cmpeq_epi8(chunk, va), _mm_cmpeq_epi8(chunk, vb));
            let mask = _mm_movemask_epi8(hit);
            if mask != 0 {
                return i + mask.trailing_zeros() as usize;
            }
            i += 16;
        }
        while i < len {
            let c = *ptr.add(i);
            if c == a || c == b {
                return i;
            }
            i += 1;
        }
        return len;
    }

    // Preload up to the cap as broadcast comparators; needles past the cap
    // are broadcast on the fly inside the loop, so results do not depend on
    // the set size.
    const PRELOAD_CAP: usize = 16;
    let preload = needles.len().min(PRELOAD_CAP);
    let mut wanted = [_mm_setzero_si128(); PRELOAD_CAP];
    for (slot, &n) in wanted.iter_mut().zip(needles) {
        *slot = _mm_set1_epi8(n as i8);
    }

    let mut i = 0;
    while i + 16 <= len {
        let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
        let mut hit = _mm_setzero_si128();
        for vec in &wanted[..preload] {
            hit = _mm_or_si128(hit, _mm_cmpeq_epi8(chunk, *vec));
        }
        for &n in &needles[preload..] {
            hit = _mm_or_si128(hit, _mm_cmpeq_epi8(chunk, _mm_set1_epi8(n as i8)));
        }
        let mask = _mm_movemask_epi8(hit);
        if mask != 0 {
            return i + mask.trailing_zeros() as usize;
        }
        i += 16;
    }
    while i < len {
        if needles.contains(&*ptr.add(i)) {
            return i;
        }
        i += 1;
    }
    len
}

#[target_feature(enable = "sse2")]
unsafe fn find_last_byte(haystack: &[u8], needle: u8) -> usize {
    let len = haystack.len();
    let ptr = haystack.as_ptr();
    let wanted = _mm_set1_epi8(needle as i8);

    let mut i = len;
    while i >= 16 {
        i -= 16;
        let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
        let mask = _mm_movemask_epi8(_mm_cmpeq_epi8(chunk, wanted)) as u32;
        if mask != 0 {
            return i + (31 - mask.leading_zeros() as usize);
        }
    }
    while i > 0 {
        i -= 1;
        if *ptr.add(i) == needle {
            return i;
        }
    }
    len
}

#[target_feature(enable = "sse2")]
unsafe fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    // Lengths were compared before dispatch.
    let len = a.len();
    let pa = a.as_ptr();
    let pb = b.as_ptr();

    let mut i = 0;
    while i + 16 <= len {
        let va = _mm_loadu_si128(pa.add(i) as *const __m128i);
        let vb = _mm_loadu_si128(pb.add(i) as *const __m128i);
        if _mm_movemask_epi8(_mm_cmpeq_epi8(va, vb)) != 0xFFFF {
            return false;
        }
        i += 16;
    }
    while i < len {
        if *pa.add(i) != *pb.add(i) {
            return false;
        }
        i += 1;
    }
    true
}

#[target_feature(enable = "sse2")]
unsafe fn copy_forward(src: *const u8, dst: *mut u8, len: usize) {
    let mut i = 0;
    while i + 16 <= len {
        let v = _mm_loadu_si128(src.add(i) as *const __m128i);
        _mm_storeu_si128(dst.add(i) as *mut __m128i, v);
        i += 16;
    }
    while i < len {
        *dst.add(i) = *src.add(i);
        i += 1;
    }
}

#[target_feature(enable = "sse2")]
unsafe fn copy_backward(src: *const u8, dst: *mut u8, len: usize) {
    // High end first; each chunk is fully loaded before its store, so a
    // destination inside the source range never reads clobbered bytes.
    let mut i = len;
    while i >= 16 {
        i -= 16;
        let v = _mm_loadu_si128(src.add(i) as *const __m128i);
        _mm_storeu_si128(dst.add(i) as *mut __m128i, v);
    }
    while i > 0 {
        i -= 1;
        *dst.add(i) = *src.add(i);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn to_upper_ascii(buf: &mut [u8]) {
    let len = buf.len();
    let ptr = buf.as_mut_ptr();
    let floor = _mm_set1_epi8(b'a' as i8 - 1);
    let ceil = _mm_set1_epi8(b'z' as i8 + 1);
    let case_bit = _mm_set1_epi8(0x20);

    let mut i = 0;
    while i + 16 <= len {
        let v = _mm_loadu_si128(ptr.add(i) as *const __m128i);
        let is_lower =
            _mm_and_si128(_mm_cmpgt_epi8(v, floor), _mm_cmplt_epi8(v, ceil));
        let folded = _mm_xor_si128(v, _mm_and_si128(is_lower, case_bit));
        _mm_storeu_si128(ptr.add(i) as *mut __m128i, folded);
        i += 16;
    }
    buf[i..].make_ascii_uppercase();
}

#[target_feature(enable = "sse2")]
unsafe fn find_byte_class(haystack: &[u8], class: ByteClass) -> usize {
    let len = haystack.len();
    let ptr = haystack.as_ptr();

    let mut i = 0;
    match class {
        ByteClass::SpaceOrNonAscii => {
            let bound = _mm_set1_epi8(0x21);
            while i + 16 <= len {
                let v = _mm_loadu_si128(ptr.add(i) as *const __m128i);
                let mask = _mm_movemask_epi8(_mm_cmplt_epi8(v, bound));
                if mask != 0 {
                    return i + mask.trailing_zeros() as usize;
                }
                i += 16;
            }
        }
        ByteClass::ControlOrNonAsciiOrQuote => {
            let bound = _mm_set1_epi8(0x20);
            let quote = _mm_set1_epi8(b'"' as i8);
            while i + 16 <= len {
                let v = _mm_loadu_si128(ptr.add(i) as *const __m128i);
                let hit =
                    _mm_or_si128(_mm_cmplt_epi8(v, bound), _mm_cmpeq_epi8(v, quote));
                let mask = _mm_movemask_epi8(hit);
                if mask != 0 {
                    return i + mask.trailing_zeros() as usize;
                }
                i += 16;
            }
        }
        ByteClass::AsciiAlpha => {
            // Setting the case bit folds `A-Z` onto `a-z`; non-ASCII stays
            // negative and fails the signed floor test.
            let floor = _mm_set1_epi8(b'a' as i8 - 1);
            let ceil = _mm_set1_epi8(b'z' as i8 + 1);
            let case_bit = _mm_set1_epi8(0x20);
            while i + 16 <= len {
                let v = _mm_loadu_si128(ptr.add(i) as *const __m128i);
                let folded = _mm_or_si128(v, case_bit);
                let hit = _mm_and_si128(
                    _mm_cmpgt_epi8(folded, floor),
                    _mm_cmplt_epi8(folded, ceil),
                );
                let mask = _mm_movemask_epi8(hit);
                if mask != 0 {
                    return i + mask.trailing_zeros() as usize;
                }
                i += 16;
            }
        }
    }
    while i < len {
        if class.matches(*ptr.add(i)) {
            return i;
        }
        i += 1;
    }
    len
}

#[target_feature(enable = "sse2")]
unsafe fn is_all_ascii(bytes: &[u8]) -> bool {
    let len = bytes.len();
    let ptr = bytes.as_ptr();

    let mut i = 0;
    while i + 16 <= len {
        let chunk = _mm_loadu_si128(ptr.add(i) as *const __m128i);
        if _mm_movemask_epi8(chunk) != 0 {
            return false;
        }
        i += 16;
    }
    bytes[i..].is_ascii()
}
