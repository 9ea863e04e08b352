/// Percent move from `open` to `last`. Undefined when either price is
/// missing or the open is exactly zero.
pub fn pct_change(open: Option<f64>, last: Option<f64>) -> Option<f64> {
    let (open, last) = (open?, last?);
    if open == 0.0 {
        return None;
    }
    Some((last - open) / open * 100.0)
}

/// Portfolio percent move.
///
/// Weighted sum only when weights were accepted and every ticker produced a
/// move (weights must still sum to one). Otherwise the plain mean of the
/// moves that are available.
pub fn portfolio_pct(pcts: &[Option<f64>], weights: Option<&[f64]>) -> Option<f64> {
    let valid: Vec<f64> = pcts.iter().flatten().copied().collect();

    if let Some(weights) = weights {
        if valid.len() == pcts.len() && weights.len() == valid.len() && !valid.is_empty() {
            return Some(weights.iter().zip(&valid).map(|(w, p)| w * p).sum());
        }
    }

    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}
