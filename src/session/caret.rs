//! Caret offset tracking independent of the rendered text
//!
//! The offset is a character index, not a byte index. It is recorded on every
//! input event and re-applied after a re-render; an offset that no longer fits
//! the text resolves to end-of-text.

/// Last observed caret position of an edit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaretTracker {
    last: Option<usize>,
}

impl CaretTracker {
    /// Record the caret position reported by the input surface
    pub fn observe(&mut self, offset: usize) {
        self.last = Some(offset);
    }

    /// Forget the position; the caret resolves to end-of-text
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Last recorded offset, if any
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        self.last
    }

    /// Where the caret belongs in `text`
    #[must_use]
    pub fn resolve(&self, text: &str) -> usize {
        let len = text.chars().count();
        match self.last {
            Some(offset) if offset <= len => offset,
            _ => len,
        }
    }

    /// Byte index of the resolved caret in `text`
    #[must_use]
    pub fn byte_index(&self, text: &str) -> usize {
        text.char_indices()
            .nth(self.resolve(text))
            .map_or(text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unobserved_resolves_to_end() {
        let caret = CaretTracker::default();
        assert_eq!(caret.resolve("Save"), 4);
        assert_eq!(caret.last(), None);
    }

    #[test]
    fn test_observed_offset_survives_rerender() {
        let mut caret = CaretTracker::default();
        caret.observe(2);
        assert_eq!(caret.resolve("Save"), 2);
        assert_eq!(caret.resolve("Saved!"), 2);
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_end() {
        let mut caret = CaretTracker::default();
        caret.observe(10);
        assert_eq!(caret.resolve("Save"), 4);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let mut caret = CaretTracker::default();
        caret.observe(3);
        assert_eq!(caret.resolve("Réglé"), 3);
        assert_eq!(caret.byte_index("Réglé"), 4);
    }

    #[test]
    fn test_reset() {
        let mut caret = CaretTracker::default();
        caret.observe(1);
        caret.reset();
        assert_eq!(caret.resolve("abc"), 3);
    }
}
