// Integration coverage for the PTY-input pipeline shape: scan a raw chunk
// for escape sequences, hand printable runs to the screen, transcode text
// and decode base64 payloads, and shuttle lines inside a scrollback
// buffer.

use farol::ansi;
use farol::encoding;
use farol::simd;

/// Splits a chunk the way the input pipeline does: printable text out,
/// CSI sequences collected separately, other bytes handled one at a time.
fn split_chunk(input: &[u8]) -> (Vec<u8>, Vec<Vec<u8>>) {
    let mut text = Vec::new();
    let mut sequences = Vec::new();
    let mut at = 0;
    while at < input.len() {
        let run = ansi::printable_ascii_run(&input[at..]);
        text.extend_from_slice(&input[at..at + run]);
        at += run;
        if at == input.len() {
            break;
        }
        if input[at] == ansi::ESC {
            if let Some(seq) = ansi::extract_csi_sequence(input, at) {
                sequences.push(input[seq.clone()].to_vec());
                at = seq.end;
                continue;
            }
        }
        // Space, control, or non-ASCII: the emulator handles it, we skip it.
        at += 1;
    }
    (text, sequences)
}

#[test]
fn colored_ls_output_splits_into_text_and_sequences() {
    let chunk = b"total 42\r\n\x1b[1;34msrc\x1b[0m  \x1b[32mCargo.toml\x1b[0m\r\n";
    let (text, sequences) = split_chunk(chunk);

    assert_eq!(text, b"total42srcCargo.toml");
    assert_eq!(
        sequences,
        vec![
            b"\x1b[1;34m".to_vec(),
            b"\x1b[0m".to_vec(),
            b"\x1b[32m".to_vec(),
            b"\x1b[0m".to_vec(),
        ]
    );
}

#[test]
fn incomplete_sequence_at_chunk_end_is_left_alone() {
    // A read boundary can split a sequence; the scanner must not invent a
    // terminator.
    let chunk = b"ok \x1b[38;5";
    let start = ansi::find_csi_start(chunk);
    assert_eq!(start, 3);
    assert_eq!(ansi::extract_csi_sequence(chunk, start), None);

    // Once the rest arrives, the same introducer extracts cleanly.
    let complete = b"ok \x1b[38;5;208m";
    let seq = ansi::extract_csi_sequence(complete, start).unwrap();
    assert_eq!(&complete[seq], b"\x1b[38;5;208m");
}

#[test]
fn utf8_payload_roundtrips_through_utf32() {
    let chunk = "ls \u{1F4C1} caf\u{e9}/".as_bytes();
    assert_eq!(encoding::detect(chunk), encoding::Charset::Utf8);
    assert!(encoding::validate_utf8(chunk));

    let mut units = vec![0u32; encoding::utf32_len_from_utf8(chunk).unwrap()];
    encoding::convert_utf8_to_utf32(chunk, &mut units).unwrap();

    let mut back = vec![0u8; encoding::utf8_len_from_utf32(&units).unwrap()];
    let written = encoding::convert_utf32_to_utf8(&units, &mut back).unwrap();
    assert_eq!(&back[..written], chunk);
}

#[test]
fn kitty_style_base64_payload_decodes_with_estimate() {
    // The graphics protocols ship pixel data base64-encoded inside escape
    // sequences; the decode side sizes its buffer from the estimate.
    let payload = b"/wAA/w=="; // one RGBA pixel
    let mut decoded = vec![0u8; encoding::base64_decoded_len(payload)];
    let written = encoding::base64_decode(payload, &mut decoded).unwrap();
    assert_eq!(&decoded[..written], &[0xFF, 0x00, 0x00, 0xFF]);

    // Corrupt payloads must error out, not truncate.
    assert_eq!(
        encoding::base64_decode(b"/wAA\xFFw==", &mut decoded),
        Err(encoding::EncodingError::InvalidBase64)
    );
}

#[test]
fn scrollback_line_shuffle_preserves_bytes() {
    // A 4-line scrollback of 16-byte rows, scrolled up by one line: rows
    // 1..4 move to rows 0..3. Source and destination overlap.
    const ROW: usize = 16;
    let mut buffer: Vec<u8> = (0..4 * ROW).map(|i| i as u8).collect();
    let expected: Vec<u8> = buffer[ROW..].to_vec();

    simd::move_bytes(&mut buffer, ROW..4 * ROW, 0);
    assert_eq!(&buffer[..3 * ROW], &expected[..]);

    // And the inverse direction: make room at the top (dst inside src).
    let mut buffer: Vec<u8> = (0..4 * ROW).map(|i| (i * 3) as u8).collect();
    let expected: Vec<u8> = buffer[..3 * ROW].to_vec();
    simd::move_bytes(&mut buffer, 0..3 * ROW, ROW);
    assert_eq!(&buffer[ROW..], &expected[..]);
}

#[test]
fn search_results_are_valid_slice_bounds() {
    let chunk = b"no escapes in this chunk at all";
    // Not-found results equal the length, so slicing with them is safe.
    let upto = simd::find_byte(chunk, 0x1B);
    assert_eq!(&chunk[..upto], &chunk[..]);

    let upto = ansi::find_csi_start(chunk);
    assert_eq!(&chunk[..upto], &chunk[..]);
}

#[test]
fn prompt_line_editing_uses_backward_search() {
    // Shells re-render the line left of the cursor; finding the last
    // space is a backward search.
    let line = b"git commit -m \"fix scanner\"";
    let cursor = line.len();
    let word_start = simd::find_last_byte(&line[..cursor], b' ').map_or(0, |at| at + 1);
    assert_eq!(&line[word_start..cursor], b"scanner\"");
}

#[test]
fn uppercase_fold_for_case_insensitive_matching() {
    let mut needle = b"Esc".to_vec();
    let mut candidate = b"esc".to_vec();
    simd::to_upper_ascii(&mut needle);
    simd::to_upper_ascii(&mut candidate);
    assert!(simd::bytes_equal(&needle, &candidate));
}
