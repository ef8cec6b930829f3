//! Amplitude Histogram Display

use std::collections::BTreeMap;
use std::sync::Mutex;
use tmd_queue::{ObserverError, SampleObserver, TimeMarkedData};

#[derive(Debug, Default)]
struct HistogramState {
    /// Sample count per bin, keyed by the bin's lower bound
    bins: BTreeMap<i32, u64>,
    total: u64,
}

/// Bins sample amplitudes as they arrive.
///
/// Bins are keyed by their lower bound and created on demand, so the
/// display needs no prior knowledge of the amplitude range.
pub struct HistogramDisplay {
    bin_width: i32,
    state: Mutex<HistogramState>,
}

impl HistogramDisplay {
    /// Create a histogram with the given bin width (ADC counts).
    pub fn new(bin_width: i32) -> Self {
        Self {
            bin_width: bin_width.max(1),
            state: Mutex::new(HistogramState::default()),
        }
    }

    fn bin_for(&self, value: i32) -> i32 {
        value.div_euclid(self.bin_width) * self.bin_width
    }

    /// Total samples binned so far.
    pub fn total(&self) -> u64 {
        self.state.lock().map(|s| s.total).unwrap_or(0)
    }

    /// Count in the bin containing `value`.
    pub fn count_for(&self, value: i32) -> u64 {
        let bin = self.bin_for(value);
        self.state
            .lock()
            .map(|s| s.bins.get(&bin).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// (lower bound, count) per occupied bin, in amplitude order.
    pub fn bins(&self) -> Vec<(i32, u64)> {
        self.state
            .lock()
            .map(|s| s.bins.iter().map(|(&lo, &n)| (lo, n)).collect())
            .unwrap_or_default()
    }

    /// Render the distribution as one text row per occupied bin.
    pub fn render(&self) -> String {
        let bins = self.bins();
        let max = bins.iter().map(|&(_, n)| n).max().unwrap_or(1);
        let mut out = String::new();
        for (lo, n) in bins {
            let bar_len = (n * 40 / max) as usize;
            out.push_str(&format!(
                "{:>7}..{:<7} {:>7} {}\n",
                lo,
                lo + self.bin_width,
                n,
                "#".repeat(bar_len.max(1))
            ));
        }
        out
    }
}

impl SampleObserver for HistogramDisplay {
    fn on_sample(&self, sample: TimeMarkedData, _fill: usize) -> Result<(), ObserverError> {
        let bin = self.bin_for(sample.data_value());
        let mut state = self
            .state
            .lock()
            .map_err(|_| ObserverError::new("histogram state poisoned"))?;
        *state.bins.entry(bin).or_insert(0) += 1;
        state.total += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_count_amplitudes() {
        let histogram = HistogramDisplay::new(100);
        for (t, v) in [(0u64, 10), (4, 60), (8, 150), (12, -20)] {
            histogram.on_sample(TimeMarkedData::new(t, v), 0).unwrap();
        }

        assert_eq!(histogram.total(), 4);
        assert_eq!(histogram.count_for(10), 2); // bin 0..100 holds 10 and 60
        assert_eq!(histogram.count_for(150), 1);
        assert_eq!(histogram.count_for(-20), 1); // bin -100..0
    }

    #[test]
    fn test_negative_values_bin_below_zero() {
        let histogram = HistogramDisplay::new(50);
        histogram.on_sample(TimeMarkedData::new(0, -1), 0).unwrap();
        assert_eq!(histogram.bins(), vec![(-50, 1)]);
    }

    #[test]
    fn test_render_lists_occupied_bins_in_order() {
        let histogram = HistogramDisplay::new(100);
        for v in [250, -80, 30] {
            histogram.on_sample(TimeMarkedData::new(0, v), 0).unwrap();
        }
        let rendered = histogram.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("-100"));
        assert!(lines[2].trim_start().starts_with("200"));
    }

    #[test]
    fn test_empty_render_is_empty() {
        let histogram = HistogramDisplay::new(100);
        assert!(histogram.render().is_empty());
        assert_eq!(histogram.total(), 0);
    }
}
