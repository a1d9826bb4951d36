//! Line-scrollable viewport for generated text larger than the terminal.

#[derive(Debug, Clone)]
pub struct Viewport {
    content: String,
    line_count: usize,
    height: u16,
    /// Top-line offset, always within `[0, max_offset()]`.
    offset: usize,
}

impl Viewport {
    pub fn new(height: u16) -> Self {
        Self {
            content: String::new(),
            line_count: 0,
            height,
            offset: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.line_count = self.content.lines().count();
        self.offset = 0;
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    /// Updates the visible height. The offset is preserved unless it now
    /// exceeds the new clamp, in which case it is pulled back into range.
    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn max_offset(&self) -> usize {
        self.line_count.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(lines: usize, height: u16) -> Viewport {
        let mut vp = Viewport::new(height);
        let content: Vec<String> = (0..lines).map(|i| format!("line {}", i)).collect();
        vp.set_content(&content.join("\n"));
        vp
    }

    #[test]
    fn scroll_clamps_at_both_ends() {
        let mut vp = filled(10, 4);
        vp.scroll_up();
        assert_eq!(vp.offset(), 0);
        for _ in 0..100 {
            vp.scroll_down();
        }
        assert_eq!(vp.offset(), 6);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut vp = filled(3, 10);
        vp.scroll_down();
        vp.scroll_down();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn growing_the_window_reclamps_the_offset() {
        let mut vp = filled(10, 4);
        for _ in 0..6 {
            vp.scroll_down();
        }
        assert_eq!(vp.offset(), 6);
        vp.resize(8);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn shrinking_the_window_preserves_a_valid_offset() {
        let mut vp = filled(10, 8);
        vp.scroll_down();
        vp.resize(4);
        assert_eq!(vp.offset(), 1);
        assert!(vp.offset() <= vp.max_offset());
    }

    #[test]
    fn new_content_resets_the_offset() {
        let mut vp = filled(10, 4);
        vp.scroll_down();
        vp.set_content("one\ntwo");
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.line_count(), 2);
    }

    proptest! {
        #[test]
        fn offset_always_within_clamp(
            lines in 0usize..50,
            ops in proptest::collection::vec((0u8..3, 1u16..30), 0..128),
        ) {
            let mut vp = filled(lines, 6);
            for (op, dim) in ops {
                match op {
                    0 => vp.scroll_up(),
                    1 => vp.scroll_down(),
                    _ => vp.resize(dim),
                }
                prop_assert!(vp.offset() <= vp.max_offset());
            }
        }
    }
}
