/// Scalar risk metrics from a sampled expiration payoff curve.
///
/// Values are bounded by the sampled window: a strategy with unlimited
/// profit or loss outside it is reported at the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RiskSummary {
    pub max_profit: f64,
    /// Signed; negative when the position can lose money.
    pub max_loss: f64,
    pub risk_reward_ratio: Option<f64>,
}

/// max / min of the curve plus the risk/reward ratio. An empty curve is flat.
pub fn summarize(expiration_payoff: &[f64]) -> RiskSummary {
    let Some(&first) = expiration_payoff.first() else {
        return RiskSummary {
            max_profit: 0.0,
            max_loss: 0.0,
            risk_reward_ratio: None,
        };
    };

    let (max_profit, max_loss) = expiration_payoff
        .iter()
        .fold((first, first), |(hi, lo), &v| (hi.max(v), lo.min(v)));

    RiskSummary {
        max_profit,
        max_loss,
        risk_reward_ratio: risk_reward_ratio(max_profit, max_loss),
    }
}

/// max_profit / |max_loss|, only defined when the position can both lose
/// (max_loss < 0) and gain (max_profit > 0).
#[inline]
pub fn risk_reward_ratio(max_profit: f64, max_loss: f64) -> Option<f64> {
    if max_loss < 0.0 && max_profit > 0.0 {
        Some(max_profit / max_loss.abs())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_spread() {
        let s = summarize(&[-200.0, -200.0, 100.0, 800.0, 800.0]);
        assert_eq!(s.max_profit, 800.0);
        assert_eq!(s.max_loss, -200.0);
        assert_eq!(s.risk_reward_ratio, Some(4.0));
    }

    #[test]
    fn test_ratio_absent_without_loss() {
        let s = summarize(&[200.0, 150.0, 300.0]);
        assert_eq!(s.max_loss, 150.0);
        assert!(s.risk_reward_ratio.is_none(), "no loss means no ratio, not infinity");
    }

    #[test]
    fn test_ratio_absent_without_profit() {
        assert!(risk_reward_ratio(0.0, -500.0).is_none());
        assert!(risk_reward_ratio(-10.0, -500.0).is_none());
        assert!(risk_reward_ratio(100.0, 0.0).is_none());
    }

    #[test]
    fn test_empty_curve() {
        let s = summarize(&[]);
        assert_eq!((s.max_profit, s.max_loss, s.risk_reward_ratio), (0.0, 0.0, None));
    }
}
