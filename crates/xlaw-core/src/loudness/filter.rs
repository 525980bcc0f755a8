//! Two-tap recursive K-weighting filter

/// Feed-forward gain for the current input
pub const KA: f64 = 1.535_124_859_586_97;
/// Feed-forward gain for the previous input
pub const KB: f64 = -2.691_696_189_406_38;
/// Feed-forward gain for the input two samples back
pub const KC: f64 = 1.198_392_810_852_85;
/// Feedback gain for the previous output
pub const KD: f64 = -1.690_659_293_182_41;
/// Feedback gain for the output two samples back
pub const KE: f64 = 0.732_480_774_215_85;

/// K-weighting filter state for one block
///
/// Direct form I, `w0 = KA·x0 + KB·x1 + KC·x2 − KD·w1 − KE·w2`. The first two
/// outputs after construction or [`reset`](Self::reset) are forced to zero
/// because the input history is not yet populated.
#[derive(Debug, Clone, Default)]
pub struct KWeightingFilter {
    x1: f64,
    x2: f64,
    w1: f64,
    w2: f64,
    index: usize,
}

impl KWeightingFilter {
    /// Create a filter with cleared memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter one normalized sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = if self.index >= 2 {
            KA * input + KB * self.x1 + KC * self.x2 - KD * self.w1 - KE * self.w2
        } else {
            0.0
        };

        self.x2 = self.x1;
        self.x1 = input;
        self.w2 = self.w1;
        self.w1 = output;
        self.index = self.index.saturating_add(1);

        output
    }

    /// Clear the filter memory
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Mean square of the K-weighted block, filtered from cleared memory
///
/// Returns 0 for an empty block.
pub fn mean_square(block: &[f64]) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let mut filter = KWeightingFilter::new();
    let sum: f64 = block
        .iter()
        .map(|&x| {
            let y = filter.process_sample(x);
            y * y
        })
        .sum();
    sum / block.len() as f64
}
