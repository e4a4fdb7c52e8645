use serde::Serialize;

/// Default maximum relative change between neighbors for a sequence to be
/// considered stable (5%).
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Classification of a numeric sequence, used to judge whether a seller's
/// profit develops steadily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub is_stable: bool,
    pub is_increasing: bool,
    pub is_decreasing: bool,
}

/// Analyzes `sequence` for stability and overall direction.
///
/// Direction is taken from the endpoints only; local dips do not matter.
/// Stability requires every adjacent pair to stay within `tolerance`
/// relative change, and the scan stops at the first violation. A zero
/// predecessor counts as a violation so the ratio is never formed.
pub fn analyze_sequence(sequence: &[f64], tolerance: f64) -> TrendSummary {
    let mut trends = TrendSummary {
        is_stable: true,
        is_increasing: false,
        is_decreasing: false,
    };

    if sequence.len() < 2 {
        // Too short to carry a trend.
        return trends;
    }

    for pair in sequence.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if previous == 0.0 {
            trends.is_stable = false;
            break;
        }
        let relative_change = (current - previous).abs() / previous.abs();
        if relative_change > tolerance {
            trends.is_stable = false;
            break;
        }
    }

    let total_change = sequence[sequence.len() - 1] - sequence[0];
    trends.is_increasing = total_change > 0.0;
    trends.is_decreasing = total_change < 0.0;

    trends
}
