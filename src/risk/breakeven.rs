use smallvec::SmallVec;

/// Break-even prices of a sampled expiration payoff curve.
///
/// Two ways a crossing is found while walking the ascending grid:
///   1. Adjacent samples with strictly opposite signs (product < 0): linear
///      interpolation between them. The strict comparison guarantees
///      payoff[i+1] != payoff[i], so the division is always safe.
///   2. An interior sample that is exactly 0 with strictly opposite-signed
///      neighbours: the grid price itself. Tangent zeros and zero plateaus
///      are not crossings and are not reported.
///
/// Output is ascending because the grid is. Pure function.
pub fn find_break_evens(grid: &[f64], payoff: &[f64]) -> SmallVec<[f64; 4]> {
    let n = grid.len().min(payoff.len());
    let mut break_evens: SmallVec<[f64; 4]> = SmallVec::new();

    for i in 0..n.saturating_sub(1) {
        let (y0, y1) = (payoff[i], payoff[i + 1]);

        if y0 * y1 < 0.0 {
            let be = grid[i] - y0 * (grid[i + 1] - grid[i]) / (y1 - y0);
            break_evens.push(be);
        } else if y1 == 0.0 && i + 2 < n && y0 * payoff[i + 2] < 0.0 {
            break_evens.push(grid[i + 1]);
        }
    }

    break_evens
}
