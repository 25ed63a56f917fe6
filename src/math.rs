//! Numeric helpers shared by extractors and scorers.

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Right-truncate or right-pad with zeros to exactly `len` values.
pub fn pad_sequence(seq: &[f64], len: usize) -> Vec<f64> {
    let mut out = vec![0.0; len];
    let copy = seq.len().min(len);
    out[..copy].copy_from_slice(&seq[..copy]);
    out
}

/// Logistic squash of an unbounded decision value into (0, 1).
pub fn squash(x: f64) -> f64 {
    // Split on sign so exp never overflows.
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
