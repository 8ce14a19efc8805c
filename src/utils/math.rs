use std::f64::consts::PI;

pub fn normal_density(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

/// `a * ln(x)`, defined as `0` when `a == 0` (so `0 * ln(0) = 0`).
#[inline]
pub fn xlogy(a: f64, x: f64) -> f64 {
    if a == 0.0 { 0.0 } else { a * x.ln() }
}

#[inline]
pub fn ln_gamma(x: f64) -> f64 {
    libm::lgamma(x)
}

/// `ln B(a, b)`.
#[inline]
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Fractional ranking (1-based). Tied values share the mean of the ranks they span.
///
/// Values are ordered with `f64::total_cmp`, so the result is deterministic even
/// when the input contains NaN.
pub fn tied_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // positions i..j (0-based) hold ranks i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        i = j;
    }
    ranks
}

/// Rate above which [`poisson_squared_l2`] switches to the asymptotic expansion.
pub const POISSON_ASYMPTOTIC_RATE: f64 = 1e4;

/// `Σ_k pmf(k)²` for a Poisson(λ) law, i.e. `e^(-2λ) I₀(2λ)`.
///
/// Small rates sum the series; above [`POISSON_ASYMPTOTIC_RATE`] the large-argument
/// expansion of `I₀` is used, whose first omitted term is below `1e-15` relative.
pub fn poisson_squared_l2(lambda: f64) -> f64 {
    if lambda == 0.0 {
        return 1.0;
    }
    if lambda > POISSON_ASYMPTOTIC_RATE {
        poisson_squared_l2_asymptotic(lambda)
    } else {
        poisson_squared_l2_series(lambda)
    }
}

// e^(-x) I₀(x) ~ (2πx)^(-1/2) (1 + 1/(8x) + 9/(128x²) + 225/(3072x³)) with x = 2λ
fn poisson_squared_l2_asymptotic(lambda: f64) -> f64 {
    let x = 2.0 * lambda;
    let inv = 1.0 / x;
    let correction = 1.0 + inv * (1.0 / 8.0 + inv * (9.0 / 128.0 + inv * (225.0 / 3072.0)));
    correction / (2.0 * PI * x).sqrt()
}

// Terms (e^(-λ) λ^k / k!)² are unimodal around ⌊λ⌋; summed outward from the mode
// until each side's next term no longer changes the sum.
fn poisson_squared_l2_series(lambda: f64) -> f64 {
    let log_term = |k: f64| 2.0 * (xlogy(k, lambda) - lambda - ln_gamma(k + 1.0));

    let mode = lambda.floor();
    let mut sum = log_term(mode).exp();

    let mut k = mode + 1.0;
    loop {
        let t = log_term(k).exp();
        sum += t;
        if t <= f64::EPSILON * sum {
            break;
        }
        k += 1.0;
    }

    let mut k = mode - 1.0;
    while k >= 0.0 {
        let t = log_term(k).exp();
        sum += t;
        if t <= f64::EPSILON * sum {
            break;
        }
        k -= 1.0;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn xlogy_is_zero_for_zero_coefficient() {
        assert_eq!(xlogy(0.0, 0.0), 0.0);
        assert!(xlogy(1.0, 0.0).is_infinite());
        assert!(approx_eq(xlogy(2.0, std::f64::consts::E), 2.0, 1e-12));
    }

    #[test]
    fn ln_beta_of_ones_is_zero() {
        assert!(approx_eq(ln_beta(1.0, 1.0), 0.0, 1e-12));
        // B(2, 3) = 1/12
        assert!(approx_eq(ln_beta(2.0, 3.0), (1.0f64 / 12.0).ln(), 1e-12));
    }

    #[test]
    fn tied_ranks_without_ties() {
        let r = tied_ranks(&[0.1, 0.4, 0.35, 0.8]);
        assert_eq!(r, vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn tied_ranks_average_ties() {
        let r = tied_ranks(&[0.5, 0.1, 0.5, 0.5, 0.9]);
        assert_eq!(r, vec![3.0, 1.0, 3.0, 3.0, 5.0]);
    }

    #[test]
    fn tied_ranks_empty() {
        assert!(tied_ranks(&[]).is_empty());
    }

    #[test]
    fn poisson_squared_l2_matches_direct_sum() {
        for &lambda in &[0.3, 1.0, 4.5, 30.0, 250.0] {
            let mut direct = 0.0;
            for k in 0..2000 {
                let kf = k as f64;
                let p = (xlogy(kf, lambda) - lambda - ln_gamma(kf + 1.0)).exp();
                direct += p * p;
            }
            let series = poisson_squared_l2(lambda);
            assert!(
                approx_eq(series, direct, 1e-12),
                "lambda={lambda}: {series} vs {direct}"
            );
        }
    }

    #[test]
    fn poisson_squared_l2_large_rates_terminate() {
        let at_switch = POISSON_ASYMPTOTIC_RATE;
        let series = poisson_squared_l2_series(at_switch);
        let expansion = poisson_squared_l2_asymptotic(at_switch);
        assert!(approx_eq(series / expansion, 1.0, 1e-8), "{series} vs {expansion}");

        for &lambda in &[1e6, 1e12, 1e17, 1e300] {
            let v = poisson_squared_l2(lambda);
            let leading = 1.0 / (4.0 * PI * lambda).sqrt();
            assert!(v.is_finite() && v > 0.0, "lambda={lambda}");
            assert!(approx_eq(v / leading, 1.0, 1e-6), "lambda={lambda}: {v}");
        }
    }

    #[test]
    fn poisson_squared_l2_degenerate_rate() {
        assert_eq!(poisson_squared_l2(0.0), 1.0);
    }

    #[test]
    fn normal_density_peak() {
        assert!(approx_eq(normal_density(0.0), 1.0 / (2.0 * PI).sqrt(), 1e-15));
        assert!(approx_eq(normal_density(1.0), normal_density(-1.0), 1e-15));
    }
}
