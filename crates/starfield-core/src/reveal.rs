//! One-shot fade-and-rise reveals for page content.
//!
//! Hero lines play in on load with fixed delays; everything else plays the
//! first time its trigger element scrolls past a start line. Once revealed an
//! element stays revealed.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealTrigger {
    Load,
    /// Fires when the trigger's top is at or above `start_fraction` of the
    /// viewport height.
    Scroll { start_fraction: f64 },
}

/// Every element matching `selector` reveals the same way; the n-th match
/// waits `delay_secs + n * stagger_secs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGroup {
    pub selector: &'static str,
    /// Shared trigger element; `None` means each element triggers itself.
    pub trigger_selector: Option<&'static str>,
    pub trigger: RevealTrigger,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub stagger_secs: f64,
}

impl RevealGroup {
    const fn on_load(selector: &'static str, duration_secs: f64, delay_secs: f64) -> Self {
        Self {
            selector,
            trigger_selector: None,
            trigger: RevealTrigger::Load,
            duration_secs,
            delay_secs,
            stagger_secs: 0.0,
        }
    }

    const fn on_scroll(
        selector: &'static str,
        start_fraction: f64,
        duration_secs: f64,
        stagger_secs: f64,
    ) -> Self {
        Self {
            selector,
            trigger_selector: None,
            trigger: RevealTrigger::Scroll { start_fraction },
            duration_secs,
            delay_secs: 0.0,
            stagger_secs,
        }
    }

    const fn triggered_by(mut self, selector: &'static str, delay_secs: f64) -> Self {
        self.trigger_selector = Some(selector);
        self.delay_secs = delay_secs;
        self
    }

    /// Delay before the `index`-th matching element starts.
    pub fn delay_for(&self, index: usize) -> f64 {
        self.delay_secs + index as f64 * self.stagger_secs
    }
}

pub const SCROLL_REVEALS: [RevealGroup; 7] = [
    RevealGroup::on_scroll(".section-title", REVEAL_START_SECTION, 1.0, 0.0),
    RevealGroup::on_scroll(".text-block", REVEAL_START_ITEM, 1.0, 0.2),
    RevealGroup::on_scroll(".portfolio-item", REVEAL_START_ITEM, 0.8, 0.1),
    RevealGroup::on_scroll(".service-card", REVEAL_START_ITEM, 0.8, 0.15),
    RevealGroup::on_scroll(".contact-info-section", REVEAL_START_SECTION, 1.0, 0.0)
        .triggered_by(".contact-section", 0.0),
    RevealGroup::on_scroll(".contact-form-container", REVEAL_START_SECTION, 1.0, 0.0)
        .triggered_by(".contact-section", 0.2),
    RevealGroup::on_scroll(".contact-detail-item", REVEAL_START_ITEM, 0.8, 0.15),
];

/// Load-time hero sequence. Without a logo the title moves up into its slot.
pub fn hero_reveals(has_logo: bool) -> Vec<RevealGroup> {
    let title_delay = if has_logo {
        HERO_FIRST_DELAY_SECS * 2.0
    } else {
        HERO_FIRST_DELAY_SECS
    };
    let mut groups = Vec::with_capacity(4);
    if has_logo {
        groups.push(RevealGroup::on_load(".hero-logo-container", 1.5, HERO_FIRST_DELAY_SECS));
    }
    groups.extend([
        RevealGroup::on_load(".hero-title", 1.2, title_delay),
        RevealGroup::on_load(".hero-subtitle", 1.2, title_delay + HERO_LINE_STAGGER_SECS),
        RevealGroup::on_load(".hero-description", 1.2, title_delay + 2.0 * HERO_LINE_STAGGER_SECS),
    ]);
    groups
}

/// Hero sequence followed by the scroll-triggered groups.
pub fn page_reveals(has_hero_logo: bool) -> Vec<RevealGroup> {
    let mut groups = hero_reveals(has_hero_logo);
    groups.extend(SCROLL_REVEALS);
    groups
}

/// Whether a trigger whose top sits at `element_top` (viewport px) has
/// crossed the start line. Elements already scrolled past count as due.
#[inline]
pub fn reveal_due(element_top: f64, viewport_h: f64, start_fraction: f64) -> bool {
    element_top <= viewport_h * start_fraction
}

/// Per-element revealed flags. Flags only ever go from false to true.
#[derive(Clone, Debug, Default)]
pub struct RevealLatch {
    revealed: Vec<bool>,
}

impl RevealLatch {
    pub fn new(len: usize) -> Self {
        Self {
            revealed: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Records whether `index` is due; true only on the call that first
    /// reveals it. Out-of-range indices are ignored.
    pub fn observe(&mut self, index: usize, due: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(flag) if due && !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Nothing left to watch for.
    pub fn is_complete(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }
}
