//! Largest-remainder integerization.
//!
//! Turns a non-negative weight profile into integer counts that sum exactly
//! to a target total: normalize, floor each share, then hand the leftover
//! units to the entries with the largest fractional parts.  Ties go to the
//! lower index (the sort is stable), which is what makes repeated builds
//! byte-identical.

/// Allocate `total` units across `weights`, proportionally, summing exactly
/// to `total`.
///
/// Returns all zeros when `total` is 0 or the weights carry no mass.
pub fn integerize(weights: &[f64], total: u32) -> Vec<u32> {
    let mut counts = vec![0u32; weights.len()];
    if total == 0 || weights.is_empty() {
        return counts;
    }

    let mass: f64 = weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
    if mass <= 0.0 {
        return counts;
    }

    let mut fractions = vec![0f64; weights.len()];
    let mut floor_sum = 0u32;
    for (m, &w) in weights.iter().enumerate() {
        let share = if w.is_finite() && w > 0.0 {
            w / mass * total as f64
        } else {
            0.0
        };
        counts[m] = share.floor() as u32;
        fractions[m] = share - counts[m] as f64;
        floor_sum += counts[m];
    }

    let remainder = total - floor_sum;
    let mut order: Vec<usize> = (0..weights.len()).collect();
    // Stable sort: equal fractions keep ascending index order.
    order.sort_by(|&a, &b| fractions[b].total_cmp(&fractions[a]));

    for &m in order.iter().take(remainder as usize) {
        counts[m] += 1;
    }
    counts
}
