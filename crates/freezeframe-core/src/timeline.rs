//! Global timeline port and the captured instant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read access to the host's global timeline.
pub trait Timeline {
    /// Returns the current timeline position in frames.
    fn current_frame(&self) -> f64;

    /// Moves the timeline to `frame`.
    fn set_current_frame(&mut self, frame: f64);
}

/// A timeline position read exactly once at invocation.
///
/// Every step of a freeze that needs "now" uses the same captured value, so
/// all frozen image references of one camera agree on a single instant.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct CapturedFrame(f64);

impl CapturedFrame {
    /// Captures the current position of `timeline`.
    pub fn capture<T: Timeline + ?Sized>(timeline: &T) -> Self {
        Self(timeline.current_frame())
    }

    #[must_use]
    pub fn new(frame: f64) -> Self {
        Self(frame)
    }

    /// Returns the captured frame value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the frame truncated toward zero, as used in generated names.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn whole(self) -> i64 {
        self.0.trunc() as i64
    }
}

impl fmt::Display for CapturedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl Timeline for Fixed {
        fn current_frame(&self) -> f64 {
            self.0
        }

        fn set_current_frame(&mut self, frame: f64) {
            self.0 = frame;
        }
    }

    #[test]
    fn test_capture_is_a_value() {
        let mut timeline = Fixed(24.0);
        let captured = CapturedFrame::capture(&timeline);
        timeline.set_current_frame(50.0);
        assert_eq!(captured.value(), 24.0);
    }

    #[test]
    fn test_whole_truncates() {
        assert_eq!(CapturedFrame::new(24.75).whole(), 24);
        assert_eq!(CapturedFrame::new(-3.5).whole(), -3);
    }

    proptest::proptest! {
        #[test]
        fn whole_never_rounds_away_from_zero(frame in -1.0e6f64..1.0e6) {
            let whole = CapturedFrame::new(frame).whole();
            proptest::prop_assert!((whole as f64).abs() <= frame.abs());
            proptest::prop_assert!((frame - whole as f64).abs() < 1.0);
        }
    }
}
