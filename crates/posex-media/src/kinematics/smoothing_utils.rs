//! Smoothing helpers for derived signals.

/// Number of samples covered by a window of `window_seconds` at `sample_rate`.
///
/// Always at least 1.
pub fn window_samples(window_seconds: f64, sample_rate: f64) -> usize {
    let samples = (window_seconds * sample_rate).round();
    if samples.is_finite() && samples >= 1.0 {
        samples as usize
    } else {
        1
    }
}

/// Centered moving average with same-length output.
///
/// For a window of `w` samples, output `i` averages the input over
/// `[i - w/2, i + (w-1)/2]`, the alignment of a same-mode convolution with a
/// uniform kernel. At the edges the span is clipped to the series and the
/// average is taken over the samples actually present, so a series shorter
/// than the window still smooths with a smaller effective window.
///
/// # Arguments
/// * `data` - The input data series
/// * `window` - Window size in samples (0 is treated as 1)
pub fn centered_moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    if window == 1 || data.len() < 2 {
        return data.to_vec();
    }

    let before = window / 2;
    let after = (window - 1) / 2;

    // Prefix sums keep this linear in the series length.
    let mut prefix = Vec::with_capacity(data.len() + 1);
    prefix.push(0.0);
    for v in data {
        prefix.push(prefix[prefix.len() - 1] + v);
    }

    (0..data.len())
        .map(|i| {
            let start = i.saturating_sub(before);
            let end = (i + after + 1).min(data.len());
            (prefix[end] - prefix[start]) / (end - start) as f64
        })
        .collect()
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
