//! Equal-width histograms rendered as glyph strings

/// Height ramp, lowest to highest
pub const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Bin counts over `[min, max]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<usize>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// A value equal to `max` lands in the last bin. When `min == max` every
    /// value goes to bin 0. Values outside the range are clamped to the end
    /// bins. `bins == 0` is treated as 1.
    pub fn from_values<I>(values: I, bins: usize, min: f64, max: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let bins = bins.max(1);
        let mut counts = vec![0usize; bins];
        // Halved so that `max - min` stays finite for any pair of finite bounds
        let half_range = max / 2.0 - min / 2.0;

        for v in values {
            let bin = if half_range <= 0.0 || half_range.is_nan() {
                0
            } else if v >= max {
                bins - 1
            } else {
                let scaled = ((v / 2.0 - min / 2.0) / half_range * bins as f64).floor();
                if scaled <= 0.0 {
                    0
                } else {
                    (scaled as usize).min(bins - 1)
                }
            };
            counts[bin] += 1;
        }

        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of values bucketed
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// One glyph per bin, scaled against the fullest bin; empty bins are spaces
    pub fn render(&self) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0);
        self.counts
            .iter()
            .map(|&count| {
                if count == 0 {
                    ' '
                } else {
                    let level = (count * BARS.len()).div_ceil(peak) - 1;
                    BARS[level.min(BARS.len() - 1)]
                }
            })
            .collect()
    }
}
