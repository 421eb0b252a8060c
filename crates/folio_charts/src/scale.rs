/// Linear map from a data domain onto a pixel range.
///
/// A collapsed domain maps everything to the range start; a collapsed range
/// inverts to the domain start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain_min: f32, domain_max: f32, range_min: f32, range_max: f32) -> Self {
        Self {
            domain: (domain_min, domain_max),
            range: (range_min, range_max),
        }
    }

    pub fn map(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f32::EPSILON {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (r1 - r0).abs() < f32::EPSILON {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Evenly spaced bands (bar charts).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f32,
    step: f32,
    band_width: f32,
}

impl BandScale {
    pub fn new(
        count: usize,
        range_min: f32,
        range_max: f32,
        padding_inner: f32,
        padding_outer: f32,
    ) -> Self {
        if count == 0 {
            return Self {
                count: 0,
                start: range_min,
                step: 0.0,
                band_width: 0.0,
            };
        }
        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let padding_outer = padding_outer.max(0.0);
        let count_f = count as f32;
        let span = (range_max - range_min).max(0.0);
        let denom = (count_f - padding_inner + 2.0 * padding_outer).max(1e-6);
        let step = span / denom;
        let band_width = step * (1.0 - padding_inner).max(0.0);
        let start = range_min + step * padding_outer;
        Self {
            count,
            start,
            step,
            band_width,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn band_width(&self) -> f32 {
        self.band_width
    }

    pub fn band_start(&self, idx: usize) -> Option<f32> {
        if idx >= self.count {
            return None;
        }
        Some(self.start + self.step * idx as f32)
    }

    pub fn center(&self, idx: usize) -> Option<f32> {
        self.band_start(idx).map(|x| x + self.band_width * 0.5)
    }

    /// Band whose step slot contains `px`, clamped to the first/last band.
    ///
    /// Gaps between bands belong to the band on their left, so every pointer
    /// position resolves to some band.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if self.count == 0 || !px.is_finite() {
            return None;
        }
        if self.step <= 0.0 {
            return Some(0);
        }
        let raw = ((px - self.start) / self.step).floor();
        Some(raw.clamp(0.0, (self.count - 1) as f32) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_scale_bounds_indices() {
        let b = BandScale::new(3, 0.0, 300.0, 0.1, 0.05);
        assert!(b.band_start(2).is_some());
        assert!(b.band_start(3).is_none());
    }

    #[test]
    fn linear_invert_handles_descending_range() {
        let s = LinearScale::new(0.0, 100.0, 200.0, 100.0);
        assert!((s.invert(150.0) - 50.0).abs() < 1e-5);
    }

    #[test]
    fn band_scale_with_zero_count_has_no_band_width() {
        let b = BandScale::new(0, 0.0, 100.0, 0.1, 0.05);
        assert_eq!(b.band_width(), 0.0);
        assert!(b.band_start(0).is_none());
        assert!(b.index_at(50.0).is_none());
    }

    #[test]
    fn band_hit_test_clamps_to_edges() {
        let b = BandScale::new(4, 0.0, 400.0, 0.0, 0.0);
        assert_eq!(b.index_at(-20.0), Some(0));
        assert_eq!(b.index_at(150.0), Some(1));
        assert_eq!(b.index_at(399.0), Some(3));
        assert_eq!(b.index_at(1_000.0), Some(3));
    }
}
