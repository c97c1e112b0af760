/// One-way latch behind the simulated photo capture.
///
/// Once captured it stays captured; further triggers are no-ops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureLatch {
    captured: bool,
}

impl CaptureLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Capture and run `on_capture` if this is the first trigger.
    /// Returns whether the callback ran.
    pub fn trigger(&mut self, on_capture: impl FnOnce()) -> bool {
        if self.captured {
            return false;
        }
        self.captured = true;
        on_capture();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_fires_at_most_once() {
        let mut latch = CaptureLatch::new();
        let mut calls = 0;
        assert!(!latch.is_captured());

        assert!(latch.trigger(|| calls += 1));
        assert!(latch.is_captured());

        for _ in 0..3 {
            assert!(!latch.trigger(|| calls += 1));
        }
        assert!(latch.is_captured());
        assert_eq!(calls, 1);
    }
}
