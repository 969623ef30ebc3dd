use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

/// Which standard normal CDF the pricer uses.
///
/// `Approximate` is the Zelen & Severo rational polynomial (about 7 decimal
/// places) and is what regression baselines were computed with. `Exact` uses
/// the error-function based CDF from statrs; prices differ from the
/// approximate mode by at most ~1e-7 per unit of notional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdfMode {
    #[default]
    Approximate,
    Exact,
}

impl std::fmt::Display for CdfMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approximate => write!(f, "approximate"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

impl std::str::FromStr for CdfMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approximate" | "approx" => Ok(Self::Approximate),
            "exact" => Ok(Self::Exact),
            other => Err(format!("unknown cdf mode `{other}` (expected approximate|exact)")),
        }
    }
}

/// Standard normal CDF, Zelen & Severo approximation.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let poly = 0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274)));
    let prob = d * t * poly;
    if x > 0.0 {
        1.0 - prob
    } else {
        prob
    }
}

/// Standard normal PDF (exact).
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal distribution with a selectable CDF.
/// Created once per pricer and reused.
#[derive(Debug, Clone)]
pub struct StandardNormal {
    mode: CdfMode,
    normal: Normal,
}

impl StandardNormal {
    pub fn new(mode: CdfMode) -> Self {
        Self {
            mode,
            normal: Normal::standard(),
        }
    }

    #[inline]
    pub fn mode(&self) -> CdfMode {
        self.mode
    }

    #[inline]
    pub fn cdf(&self, x: f64) -> f64 {
        match self.mode {
            CdfMode::Approximate => norm_cdf(x),
            CdfMode::Exact => self.normal.cdf(x),
        }
    }

    #[inline]
    pub fn pdf(&self, x: f64) -> f64 {
        norm_pdf(x)
    }
}

impl Default for StandardNormal {
    fn default() -> Self {
        Self::new(CdfMode::Approximate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdf_known_values() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-6, "cdf(0)={}", norm_cdf(0.0));
        assert!((norm_cdf(1.0) - 0.8413447).abs() < 1e-6, "cdf(1)={}", norm_cdf(1.0));
        assert!((norm_cdf(-1.96) - 0.0249979).abs() < 1e-6, "cdf(-1.96)={}", norm_cdf(-1.96));
        assert!(norm_cdf(10.0) > 0.999_999 && norm_cdf(-10.0) < 1e-6);
    }

    #[test]
    fn test_cdf_is_the_zelen_severo_polynomial() {
        for &x in &[-3.1, -1.0, -0.25, 0.0, 0.4, 1.0, 2.2, 5.0] {
            let t = 1.0 / (1.0 + 0.2316419 * f64::abs(x));
            let d = 0.3989423 * f64::exp(-x * x / 2.0);
            let p = d * t * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
            let expected = if x > 0.0 { 1.0 - p } else { p };
            assert!((norm_cdf(x) - expected).abs() < 1e-15, "x={x}: cdf={} expected={expected}", norm_cdf(x));
        }

        // Baselines depend on the approximation error, not just the shape
        let exact = Normal::standard();
        for &x in &[-1.0, 1.0] {
            let gap = (norm_cdf(x) - exact.cdf(x)).abs();
            assert!(gap > 0.0, "approximation indistinguishable from exact at x={x}");
        }
    }

    #[test]
    fn test_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 4.0] {
            let sum = norm_cdf(x) + norm_cdf(-x);
            assert!((sum - 1.0).abs() < 1e-12, "cdf({x}) + cdf(-{x}) = {sum}");
        }
    }

    #[test]
    fn test_approximation_close_to_exact() {
        let approx = StandardNormal::new(CdfMode::Approximate);
        let exact = StandardNormal::new(CdfMode::Exact);
        let mut x = -6.0;
        while x <= 6.0 {
            let diff = (approx.cdf(x) - exact.cdf(x)).abs();
            assert!(diff < 1e-6, "approx vs exact at x={x}: diff={diff}");
            x += 0.25;
        }
    }

    #[test]
    fn test_pdf_peak() {
        assert!((norm_pdf(0.0) - 0.398_942_280_4).abs() < 1e-10);
        assert!((norm_pdf(1.5) - norm_pdf(-1.5)).abs() < 1e-15);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("exact".parse::<CdfMode>().unwrap(), CdfMode::Exact);
        assert_eq!(" Approximate ".parse::<CdfMode>().unwrap(), CdfMode::Approximate);
        assert!("erf".parse::<CdfMode>().is_err());
    }
}
