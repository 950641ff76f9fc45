//! Greedy proportional line wrapping for HUD text.
//!
//! Text is broken into paragraphs on newline runs, then each paragraph is
//! packed word by word against a pixel budget using the font metrics from
//! [`crate::text::metrics`]. Output lines are separated by `'\n'` and the
//! wrapped text lands in a caller-sized [`LineBuffer`].

use crate::text::metrics::{char_width, string_width};

/// Paragraphs are maximal runs of text between `\r`/`\n` characters.
/// Consecutive newlines collapse; there are no empty paragraphs.
fn paragraphs(input: &str) -> impl Iterator<Item = &str> {
    input.split(['\r', '\n']).filter(|p| !p.is_empty())
}

/// Tokens are maximal runs of non-space characters within a paragraph.
fn tokens(paragraph: &str) -> impl Iterator<Item = &str> {
    paragraph.split(' ').filter(|t| !t.is_empty())
}

/// A bounded output buffer for wrapped text.
///
/// A buffer created with capacity `n` accepts at most `n - 1` bytes; anything
/// pushed past that is dropped silently, cut at a character boundary. The
/// wrapped text can therefore never outgrow the space its caller reserved.
#[derive(Debug)]
pub struct LineBuffer {
    text: String,
    budget: usize,
}

impl LineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::new(),
            budget: capacity.saturating_sub(1),
        }
    }

    /// Appends as much of `s` as the remaining budget allows.
    pub fn push_str(&mut self, s: &str) {
        let remaining = self.budget - self.text.len();
        if s.len() <= remaining {
            self.text.push_str(s);
        } else {
            let mut cut = remaining;
            while cut > 0 && !s.is_char_boundary(cut) {
                cut -= 1;
            }
            self.text.push_str(&s[..cut]);
        }
    }

    /// Empties the buffer, keeping its budget.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Wraps `input` to `max_width` font pixels, writing the result into `out`.
///
/// Any previous contents of `out` are discarded. Words are packed greedily:
/// a word is appended to the current line while the accumulated width, plus
/// one space per word already placed, stays within `max_width`; otherwise a
/// break is emitted and the word starts the next line. A word wider than
/// `max_width` is never split and overflows its own line. Every paragraph
/// ends with a break.
///
/// Returns the number of lines produced by the full layout. The count is not
/// affected by `out` running out of room.
pub fn wrap_into(input: &str, max_width: u32, out: &mut LineBuffer) -> usize {
    out.clear();
    let space_width = char_width(' ');
    let mut line_count = 0;
    for paragraph in paragraphs(input) {
        let mut line_width = 0;
        for token in tokens(paragraph) {
            let token_width = string_width(token);
            // line_width carries a trailing space from the previous token,
            // so this comparison already accounts for the separator.
            if line_width > 0 {
                if line_width + token_width > max_width {
                    line_width = 0;
                    line_count += 1;
                    out.push_str("\n");
                } else {
                    out.push_str(" ");
                }
            }
            out.push_str(token);
            line_width += token_width + space_width;
        }
        line_count += 1;
        out.push_str("\n");
    }
    line_count
}

/// Wraps `input` to `max_width` font pixels into a buffer of `capacity`
/// bytes, returning the wrapped text and its line count.
pub fn wrap(input: &str, max_width: u32, capacity: usize) -> (String, usize) {
    let mut out = LineBuffer::with_capacity(capacity);
    let line_count = wrap_into(input, max_width, &mut out);
    (out.into_string(), line_count)
}
