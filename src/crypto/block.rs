use super::hash::keccak256_with_counter;
use crate::error::{AppError, Result};

/// Digest width; one keystream block can cover at most this many bytes.
const MAX_BLOCK_SIZE: usize = 32;

/// Pads `data` with `pad_byte` until its length is a multiple of `n`.
///
/// Always appends at least one byte, so an already aligned input grows by a
/// whole block. That keeps the padding unambiguous to strip.
pub fn pad(data: &[u8], n: usize, pad_byte: u8) -> Result<Vec<u8>> {
    if n == 0 {
        return Err(AppError::Internal("block size must be non-zero".to_string()));
    }

    let fill = n - data.len() % n;
    let mut padded = Vec::with_capacity(data.len() + fill);
    padded.extend_from_slice(data);
    padded.resize(data.len() + fill, pad_byte);
    Ok(padded)
}

/// Removes every trailing `pad_byte`.
pub fn strip_padding(data: &[u8], pad_byte: u8) -> &[u8] {
    let end = data
        .iter()
        .rposition(|b| *b != pad_byte)
        .map(|i| i + 1)
        .unwrap_or(0);
    &data[..end]
}

/// XORs `data` in place with a keystream derived from `key`, one block at a time.
///
/// Deterministic and unauthenticated: the same key and input always produce
/// the same output, and applying it twice restores the input. This hides a
/// word from a casual reader and nothing more.
pub fn apply_keystream(key: &[u8], data: &mut [u8], block_size: usize) -> Result<()> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(AppError::Internal(format!(
            "unsupported keystream block size {}",
            block_size
        )));
    }

    for (index, chunk) in data.chunks_mut(block_size).enumerate() {
        let stream = keccak256_with_counter(key, index as u64);
        for (byte, mask) in chunk.iter_mut().zip(stream.iter()) {
            *byte ^= mask;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_reaches_a_multiple_of_n() {
        for n in 1..=32 {
            for len in 0..40 {
                let data = vec![b'a'; len];
                let padded = pad(&data, n, b'=').expect("n is non-zero");
                assert_eq!(padded.len() % n, 0);
                assert!(padded.len() > len);
                assert_eq!(padded.last(), Some(&b'='));
                assert_eq!(&padded[..len], data.as_slice());
            }
        }
    }

    #[test]
    fn pad_adds_full_block_when_aligned() {
        let padded = pad(b"abcd", 4, b'.').expect("n is non-zero");
        assert_eq!(padded, b"abcd....");
    }

    #[test]
    fn pad_rejects_zero_block_size() {
        assert!(pad(b"abc", 0, b'=').is_err());
    }

    #[test]
    fn strip_padding_removes_only_trailing_bytes() {
        assert_eq!(strip_padding(b"a=b===", b'='), b"a=b");
        assert_eq!(strip_padding(b"====", b'='), b"");
        assert_eq!(strip_padding(b"abc", b'='), b"abc");
    }

    #[test]
    fn keystream_is_an_involution() {
        let original = b"print;pr".to_vec();
        let mut data = original.clone();
        apply_keystream(b"key", &mut data, 16).expect("valid block size");
        assert_ne!(data, original);
        apply_keystream(b"key", &mut data, 16).expect("valid block size");
        assert_eq!(data, original);
    }

    #[test]
    fn keystream_depends_on_key() {
        let mut a = vec![0u8; 32];
        let mut b = vec![0u8; 32];
        apply_keystream(b"one", &mut a, 16).expect("valid block size");
        apply_keystream(b"two", &mut b, 16).expect("valid block size");
        assert_ne!(a, b);
    }

    #[test]
    fn keystream_rejects_oversized_blocks() {
        let mut data = vec![0u8; 64];
        assert!(apply_keystream(b"key", &mut data, 64).is_err());
    }
}
