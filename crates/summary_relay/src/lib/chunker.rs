//! # Chunker
//!
//! Splits a transcript into fixed-size, overlapping windows small enough for
//! the hosted summarization model's input limit.
//!
//! Offsets and lengths count `char`s, never bytes, so a window boundary can not
//! fall inside a multi-byte code point.

use crate::error::Error;

/// A window of the source transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position of the chunk in the ordered sequence
    pub index: usize,
    /// Offset of the first char within the transcript
    pub start: usize,
    /// Length in chars
    pub len: usize,
    pub text: &'a str,
}

/// Validated window size and overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    max_length: usize,
    overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        ChunkingConfig {
            max_length: Self::DEFAULT_MAX_LENGTH,
            overlap: Self::DEFAULT_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    pub const DEFAULT_MAX_LENGTH: usize = 1000;
    pub const DEFAULT_OVERLAP: usize = 100;

    /// Rejects settings under which the cursor would stall or move backwards.
    pub fn new(max_length: usize, overlap: usize) -> Result<Self, Error> {
        if max_length == 0 {
            return Err(Error::ZeroChunkLength);
        }
        if overlap >= max_length {
            return Err(Error::OverlapTooLarge {
                max_length,
                overlap,
            });
        }

        Ok(ChunkingConfig {
            max_length,
            overlap,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    fn step(&self) -> usize {
        self.max_length - self.overlap
    }

    /// Splits `text` into ordered windows of at most `max_length` chars where
    /// each window after the first starts `overlap` chars before the end of
    /// its predecessor.
    ///
    /// Emission stops at the first window that reaches the end of the text, so
    /// no trailing window is ever fully contained in the one before it.
    pub fn split<'a>(&self, text: &'a str) -> Vec<Chunk<'a>> {
        // byte offset of every char, plus the end of the string
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect::<Vec<_>>();
        let char_len = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut cursor = 0;

        while cursor < char_len {
            let end = (cursor + self.max_length).min(char_len);
            chunks.push(Chunk {
                index: chunks.len(),
                start: cursor,
                len: end - cursor,
                text: &text[boundaries[cursor]..boundaries[end]],
            });

            if end == char_len {
                break;
            }
            cursor += self.step();
        }

        chunks
    }
}

/// Convenience wrapper validating the parameters and splitting in one go.
pub fn split(text: &str, max_length: usize, overlap: usize) -> Result<Vec<Chunk<'_>>, Error> {
    Ok(ChunkingConfig::new(max_length, overlap)?.split(text))
}
