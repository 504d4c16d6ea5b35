//! Sprite animation clock
//!
//! Sheets are laid out as rows of `frame_count` frames; the row picks the
//! facing, the column advances with time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimState {
    /// Index into the whole sheet, row offset included
    pub frame: usize,
    /// Seconds since the last frame change
    pub accumulator: f64,
}

impl AnimState {
    /// Advance the clock by `dt` and return the frame to draw.
    ///
    /// At most one frame per call: once the accumulator reaches a frame's
    /// duration it resets to zero, so slow ticks stretch the animation
    /// rather than skipping frames.
    pub fn advance(&mut self, dt: f64, frame_rate: f64, frame_count: usize, row: usize) -> usize {
        self.accumulator += dt;
        if self.accumulator >= 1.0 / frame_rate {
            self.frame += 1;
            self.accumulator = 0.0;
        }

        let first = row * frame_count;
        let last = first + frame_count.saturating_sub(1);
        if self.frame < first || self.frame > last {
            self.frame = first;
        }
        self.frame
    }

    /// Jump to the first frame of `row`, e.g. after a change of facing
    pub fn restart(&mut self, row: usize, frame_count: usize) {
        self.frame = row * frame_count;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_after_last_frame() {
        let mut anim = AnimState::default();
        let frames: Vec<usize> = (0..8).map(|_| anim.advance(1.0 / 12.0, 12.0, 8, 0)).collect();
        assert_eq!(frames, vec![1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn test_holds_frame_until_due() {
        let mut anim = AnimState::default();
        assert_eq!(anim.advance(0.03, 15.0, 12, 0), 0);
        assert_eq!(anim.advance(0.03, 15.0, 12, 0), 0);
        assert_eq!(anim.advance(0.03, 15.0, 12, 0), 1);
        assert_eq!(anim.accumulator, 0.0);
    }

    #[test]
    fn test_slow_tick_advances_one_frame() {
        let mut anim = AnimState::default();
        assert_eq!(anim.advance(1.0, 12.0, 8, 0), 1);
        assert_eq!(anim.accumulator, 0.0);
    }

    #[test]
    fn test_row_offset() {
        let mut anim = AnimState::default();
        // Frame 0 is not on row 2, so it snaps to the row start
        assert_eq!(anim.advance(0.0, 12.0, 8, 2), 16);

        let mut frames = Vec::new();
        for _ in 0..8 {
            frames.push(anim.advance(1.0 / 12.0, 12.0, 8, 2));
        }
        assert_eq!(frames, vec![17, 18, 19, 20, 21, 22, 23, 16]);
    }

    #[test]
    fn test_restart() {
        let mut anim = AnimState {
            frame: 5,
            accumulator: 0.05,
        };
        anim.restart(3, 12);
        assert_eq!(anim.frame, 36);
        assert_eq!(anim.accumulator, 0.0);
    }
}
