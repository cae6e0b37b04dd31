//! Per-frame size oscillation ("twinkle")
//!
//! - SizeOscillator: stateless `base + amplitude * sin(frequency * t + i)`
//! - SizeBuffer: owned current-size buffer with a dirty flag for re-upload

use super::config::OscillationConfig;

/// Stateless size transform keyed by elapsed time and point index.
/// The index doubles as a phase offset so points do not pulse in lockstep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeOscillator {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for SizeOscillator {
    fn default() -> Self {
        Self::from(OscillationConfig::default())
    }
}

impl From<OscillationConfig> for SizeOscillator {
    fn from(c: OscillationConfig) -> Self {
        Self {
            amplitude: c.amplitude,
            frequency: c.frequency,
        }
    }
}

impl SizeOscillator {
    /// Size of point `index` at `elapsed` seconds.
    #[inline]
    pub fn size_at(&self, base: f32, index: usize, elapsed: f64) -> f32 {
        let phase = self.frequency as f64 * elapsed + index as f64;
        base + self.amplitude * phase.sin() as f32
    }

    /// Overwrite every entry of `current` for time `elapsed`.
    ///
    /// Panics if the two slices differ in length.
    pub fn apply(&self, elapsed: f64, base: &[f32], current: &mut [f32]) {
        assert_eq!(
            base.len(),
            current.len(),
            "base and current size buffers must have equal length"
        );
        for (i, (out, &b)) in current.iter_mut().zip(base).enumerate() {
            *out = self.size_at(b, i, elapsed);
        }
    }
}

/// Current point sizes, owned by the field and read by the renderer.
/// The renderer consumes the dirty flag to decide on a re-upload.
#[derive(Debug, Clone, Default)]
pub struct SizeBuffer {
    values: Vec<f32>,
    dirty: bool,
}

impl SizeBuffer {
    /// Start at the resting sizes, flagged dirty for the first upload
    pub fn from_base(base: &[f32]) -> Self {
        Self {
            values: base.to_vec(),
            dirty: true,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// (min, max) of the current sizes, None when empty
    pub fn range(&self) -> Option<(f32, f32)> {
        let mut iter = self.values.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_at_time_zero_is_base() {
        let osc = SizeOscillator {
            amplitude: 0.02,
            frequency: 1.0,
        };
        let base = [0.1f32, 0.03, 0.03];
        let mut current = [0.0f32; 3];
        osc.apply(0.0, &base, &mut current);
        assert_eq!(current[0], base[0]);
        // Other indices carry their phase offset
        assert!((current[1] - (0.03 + 0.02 * 1f32.sin())).abs() < 1e-7);
        assert!((current[2] - (0.03 + 0.02 * 2f32.sin())).abs() < 1e-7);
    }

    #[test]
    fn same_time_same_output() {
        let osc = SizeOscillator::default();
        let base = vec![0.03f32; 100];
        let mut a = vec![0.0f32; 100];
        let mut b = vec![0.0f32; 100];
        osc.apply(12.345, &base, &mut a);
        osc.apply(12.345, &base, &mut b);
        assert_eq!(a, b);
        osc.apply(12.345, &base, &mut a);
        assert_eq!(a, b);
    }

    #[test]
    fn sizes_stay_within_amplitude() {
        let osc = SizeOscillator::default();
        let base = vec![0.03f32; 50];
        let mut current = vec![0.0f32; 50];
        for step in 0..100 {
            osc.apply(step as f64 * 0.1, &base, &mut current);
            for &s in &current {
                assert!((0.01 - 1e-6..=0.05 + 1e-6).contains(&s), "size {s}");
            }
        }
    }

    #[test]
    fn zero_amplitude_is_identity() {
        let osc = SizeOscillator {
            amplitude: 0.0,
            frequency: 3.0,
        };
        let base = [0.1f32, 0.03];
        let mut current = [0.0f32; 2];
        osc.apply(99.0, &base, &mut current);
        assert_eq!(current, base);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn length_mismatch_panics() {
        let osc = SizeOscillator::default();
        let mut current = [0.0f32; 2];
        osc.apply(0.0, &[0.1, 0.1, 0.1], &mut current);
    }

    #[test]
    fn empty_buffers_are_fine() {
        let osc = SizeOscillator::default();
        let mut current: [f32; 0] = [];
        osc.apply(1.0, &[], &mut current);
    }

    #[test]
    fn dirty_flag_is_consumed_once() {
        let mut buf = SizeBuffer::from_base(&[0.1, 0.03]);
        assert!(buf.is_dirty());
        assert!(buf.take_dirty());
        assert!(!buf.take_dirty());
        buf.mark_dirty();
        assert!(buf.take_dirty());
    }

    #[test]
    fn range_of_sizes() {
        let buf = SizeBuffer::from_base(&[0.1, 0.03, 0.05]);
        assert_eq!(buf.range(), Some((0.03, 0.1)));
        assert_eq!(SizeBuffer::default().range(), None);
    }
}
