//! Reading progress for the bar at the top of post pages.
//!
//! The percentage math is pure; where the numbers come from is hidden behind
//! [`ScrollSource`] so it can be driven by a browser binding or by tests.

/// Scroll geometry of the document at one instant, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub const fn new(offset: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            document_height,
            viewport_height,
        }
    }

    /// Percentage of the scrollable distance covered, in `[0, 100]`.
    ///
    /// A page that fits in the viewport has nothing to scroll and reports 0.
    pub fn progress(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable.is_nan() || scrollable <= 0.0 || self.offset.is_nan() {
            return 0.0;
        }
        (self.offset / scrollable * 100.0).clamp(0.0, 100.0)
    }
}

/// Where scroll geometry is read from.
pub trait ScrollSource {
    fn scroll_state(&self) -> ScrollState;
}

impl ScrollSource for ScrollState {
    fn scroll_state(&self) -> ScrollState {
        *self
    }
}

/// Progress meter bound to a [`ScrollSource`].
///
/// Computes once on mount and again on every scroll notification until it is
/// torn down; notifications after teardown are ignored.
#[derive(Debug)]
pub struct ProgressMeter<S> {
    source: S,
    progress: f64,
    listening: bool,
}

impl<S: ScrollSource> ProgressMeter<S> {
    pub fn mount(source: S) -> Self {
        let progress = source.scroll_state().progress();
        Self {
            source,
            progress,
            listening: true,
        }
    }

    /// Handle a scroll notification and return the current progress.
    pub fn on_scroll(&mut self) -> f64 {
        if self.listening {
            self.progress = self.source.scroll_state().progress();
        }
        self.progress
    }

    pub const fn progress(&self) -> f64 {
        self.progress
    }

    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Stop listening; the last computed value is kept.
    pub fn teardown(&mut self) {
        self.listening = false;
    }
}

/// Scroll distance after which the newsletter prompt is revealed.
pub const NEWSLETTER_SCROLL_THRESHOLD: f64 = 50.0;

/// One-shot trigger: fires the first time the page is scrolled past a
/// threshold and never again.
#[derive(Debug, Clone, Copy)]
pub struct RevealOnScroll {
    threshold: f64,
    revealed: bool,
}

impl Default for RevealOnScroll {
    fn default() -> Self {
        Self::new(NEWSLETTER_SCROLL_THRESHOLD)
    }
}

impl RevealOnScroll {
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: false,
        }
    }

    /// Returns true exactly once, on the first offset beyond the threshold.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if self.revealed || offset <= self.threshold {
            return false;
        }
        self.revealed = true;
        true
    }
}

/// Progress and newsletter state after one scroll notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub offset: f64,
    pub progress: f64,
    /// The newsletter prompt appears on this frame.
    pub reveals_newsletter: bool,
}

/// Run a recorded scroll session through a [`ProgressMeter`].
///
/// The meter mounts at the first offset, receives one notification per
/// later offset and is torn down at the end.
pub fn replay_session(document_height: f64, viewport_height: f64, offsets: &[f64]) -> Vec<ScrollFrame> {
    let Some((&first, rest)) = offsets.split_first() else {
        return Vec::new();
    };

    let mut meter = ProgressMeter::mount(ScrollState::new(first, document_height, viewport_height));
    let mut newsletter = RevealOnScroll::default();
    let mut frames = Vec::with_capacity(offsets.len());
    frames.push(ScrollFrame {
        offset: first,
        progress: meter.progress(),
        reveals_newsletter: newsletter.on_scroll(first),
    });

    for &offset in rest {
        meter.source_mut().offset = offset;
        frames.push(ScrollFrame {
            offset,
            progress: meter.on_scroll(),
            reveals_newsletter: newsletter.on_scroll(offset),
        });
    }

    meter.teardown();
    frames
}
