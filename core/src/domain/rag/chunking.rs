//! Paragraph-boundary chunking for uploaded documents.
//!
//! Paragraphs are separated by blank (or whitespace-only) lines and packed
//! greedily into chunks joined by `"\n\n"`. Sizes are measured in bytes,
//! so a chunk never holds more than `max_chars` characters. A paragraph
//! that alone exceeds the limit is hard-split at the last whitespace
//! before the limit, or at the limit itself, on a UTF-8 boundary.

use crate::domain::rag::entities::DocumentChunk;

pub const DEFAULT_MAX_CHUNK_CHARS: usize = 800;

fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }

    paragraphs
}

fn snap_to_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn hard_split(paragraph: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut remaining = paragraph;

    while !remaining.is_empty() {
        if remaining.len() <= max_chars {
            pieces.push(remaining.to_string());
            break;
        }

        let limit = snap_to_char_boundary(remaining, max_chars);
        let limit = if limit == 0 {
            remaining
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(remaining.len())
        } else {
            limit
        };

        let split_at = remaining[..limit]
            .rfind(char::is_whitespace)
            .filter(|&pos| pos > 0)
            .unwrap_or(limit);

        let piece = remaining[..split_at].trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
        remaining = remaining[split_at..].trim_start();
    }

    pieces
}

/// Split `text` into non-empty chunks of at most `max_chars`.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut buffer = String::new();

    for paragraph in paragraphs(text) {
        if paragraph.len() > max_chars {
            if !buffer.is_empty() {
                chunks.push(std::mem::take(&mut buffer));
            }
            chunks.extend(hard_split(&paragraph, max_chars));
            continue;
        }

        let would_be = if buffer.is_empty() {
            paragraph.len()
        } else {
            buffer.len() + 2 + paragraph.len()
        };

        if would_be > max_chars && !buffer.is_empty() {
            chunks.push(std::mem::take(&mut buffer));
        }

        if !buffer.is_empty() {
            buffer.push_str("\n\n");
        }
        buffer.push_str(&paragraph);
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

/// Chunks of one file with contiguous indices from 0.
pub fn chunk_document(source: &str, text: &str, max_chars: usize) -> Vec<DocumentChunk> {
    chunk_text(text, max_chars)
        .into_iter()
        .enumerate()
        .map(|(index, text)| DocumentChunk {
            text,
            source: source.to_string(),
            chunk_index: index as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_single_chunk() {
        assert_eq!(chunk_text("Hello, world!", 800), vec!["Hello, world!"]);
    }

    #[test]
    fn test_empty_and_blank_text_yield_nothing() {
        assert!(chunk_text("", 800).is_empty());
        assert!(chunk_text(" \n\n \t\n", 800).is_empty());
    }

    #[test]
    fn test_paragraphs_are_packed_until_limit() {
        let text = "aaaa\n\nbbbb\n\ncccc";
        assert_eq!(chunk_text(text, 10), vec!["aaaa\n\nbbbb", "cccc"]);
    }

    #[test]
    fn test_whitespace_only_lines_separate_paragraphs() {
        let text = "first line\nsecond line\n   \nnext";
        assert_eq!(chunk_text(text, 25), vec!["first line\nsecond line", "next"]);
    }

    #[test]
    fn test_long_paragraph_split_on_whitespace() {
        let chunks = chunk_text("alpha beta gamma delta", 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
        assert!(chunks.iter().all(|c| c.len() <= 11));
    }

    #[test]
    fn test_long_word_split_at_limit() {
        assert_eq!(chunk_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundary() {
        let text = "नमस्ते दुनिया नमस्ते दुनिया";
        let chunks = chunk_text(text, 10);

        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= 10));
        assert_eq!(chunks.concat().replace(' ', ""), text.replace(' ', ""));
    }

    #[test]
    fn test_chunk_document_indices_are_contiguous() {
        let chunks = chunk_document("notes.pdf", "one\n\ntwo\n\nthree", 5);

        let indices: Vec<u32> = chunks.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(chunks.iter().all(|c| c.source == "notes.pdf"));
    }
}
