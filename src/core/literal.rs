//! Literal-aware line scanner.
//!
//! Splits a single line into [`Segment`]s so the pipeline only ever rewrites
//! code and never touches the contents of a quoted string.
//!
//! Rules:
//! - `"` and `'` open a literal; only the same character closes it.
//! - A delimiter preceded by a backslash does not close the literal
//!   (single-character look-back; `\\"` is not treated specially).
//! - An unterminated literal stays part of the trailing code segment.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Code,
    Literal,
}

/// A contiguous span of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Code,
            text: text.into(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Literal,
            text: text.into(),
        }
    }

    pub fn is_code(&self) -> bool {
        self.kind == SegmentKind::Code
    }

    /// Literal contents without the delimiters, with the opening delimiter.
    pub fn literal_body(&self) -> Option<(char, &str)> {
        if self.kind != SegmentKind::Literal {
            return None;
        }
        let quote = self.text.chars().next()?;
        let body = self
            .text
            .get(quote.len_utf8()..self.text.len() - quote.len_utf8())?;
        Some((quote, body))
    }
}

/// Partition a line into code and literal segments.
///
/// Concatenating the `text` of the returned segments yields `line` unchanged.
pub fn partition_line(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut code_start = 0;
    let mut open: Option<(char, usize)> = None;
    let mut prev: Option<char> = None;

    for (idx, ch) in line.char_indices() {
        match open {
            None if ch == '"' || ch == '\'' => open = Some((ch, idx)),
            Some((quote, start)) if ch == quote && prev != Some('\\') => {
                if code_start < start {
                    segments.push(Segment::code(&line[code_start..start]));
                }
                let end = idx + ch.len_utf8();
                segments.push(Segment::literal(&line[start..end]));
                code_start = end;
                open = None;
            }
            _ => {}
        }
        prev = Some(ch);
    }

    if code_start < line.len() {
        segments.push(Segment::code(&line[code_start..]));
    }

    segments
}
