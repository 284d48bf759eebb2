/// Vertical extent of a page section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Index of the section the "next section" button should point at, or `None`
/// when the viewport center is already in the last section.
///
/// The current section is the first one containing the viewport center;
/// when none does, the first section is assumed.
pub fn next_section_target(sections: &[SectionSpan], scroll_y: f64, viewport_h: f64) -> Option<usize> {
    if sections.is_empty() {
        return None;
    }
    let center = scroll_y + viewport_h / 2.0;
    let current = sections.iter().position(|s| s.contains(center)).unwrap_or(0);
    (current + 1 < sections.len()).then_some(current + 1)
}
