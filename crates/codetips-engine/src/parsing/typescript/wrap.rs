use std::ops::Range;

pub const WRAPPER_PREFIX: &str = "(() => {\n";
pub const WRAPPER_SUFFIX: &str = "\n})();";

/// A block wrapped in an IIFE so that statements, declarations and bare
/// expressions all parse as a function body.
#[derive(Debug)]
pub struct Wrapped<'s> {
    source: &'s str,
    text: String,
}

impl<'s> Wrapped<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut text =
            String::with_capacity(WRAPPER_PREFIX.len() + source.len() + WRAPPER_SUFFIX.len());
        text.push_str(WRAPPER_PREFIX);
        text.push_str(source);
        text.push_str(WRAPPER_SUFFIX);
        Self { source, text }
    }

    /// Index in the wrapped text where the original source begins.
    pub fn offset(&self) -> usize {
        WRAPPER_PREFIX.len()
    }

    /// Where the original source sits inside the wrapped text.
    pub fn source_range(&self) -> Range<usize> {
        self.offset()..self.offset() + self.source.len()
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Translates a wrapped-text range back to source coordinates. Ranges that
    /// are empty or touch the wrapper are rejected.
    pub fn to_source(&self, range: Range<usize>) -> Option<Range<usize>> {
        let offset = self.offset();
        if range.start >= range.end
            || range.start < offset
            || range.end > offset + self.source.len()
        {
            return None;
        }
        Some(range.start - offset..range.end - offset)
    }
}
