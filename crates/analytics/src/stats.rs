//! Descriptive statistics and independent two-sample t-tests.
//!
//! p-values come from the exact Student-t distribution, evaluated through the
//! regularized incomplete beta function.

use crate::error::AnalyticsError;
use core_types::TTestKind;
use serde::Serialize;

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> Result<f64, AnalyticsError> {
    if samples.is_empty() {
        return Err(AnalyticsError::EmptySample("mean".to_string()));
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Sum of squared deviations from the mean.
fn sum_of_squares(samples: &[f64], mean: f64) -> f64 {
    samples.iter().map(|x| (x - mean) * (x - mean)).sum()
}

/// Sample variance (n - 1 denominator).
pub fn variance(samples: &[f64]) -> Result<f64, AnalyticsError> {
    if samples.len() < 2 {
        return Err(AnalyticsError::NotEnoughData(format!(
            "sample variance needs at least 2 values, got {}",
            samples.len()
        )));
    }
    let m = mean(samples)?;
    Ok(sum_of_squares(samples, m) / (samples.len() - 1) as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(samples: &[f64]) -> Result<f64, AnalyticsError> {
    Ok(variance(samples)?.sqrt())
}

/// Outcome of a two-sided independent two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestResult {
    pub kind: TTestKind,
    /// `(mean(control) - mean(treatment)) / standard_error`.
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-sided p-value in `[0, 1]`.
    pub p_value: f64,
}

/// Runs a two-sided independent two-sample t-test. No pairing between the
/// samples is assumed.
///
/// # Errors
///
/// - `EmptySample` if either sample is empty.
/// - `NotEnoughData` if there are no degrees of freedom (Student needs three
///   values in total, Welch needs two per sample).
/// - `ZeroVariance` if the standard error is zero.
pub fn t_test(
    control: &[f64],
    treatment: &[f64],
    kind: TTestKind,
) -> Result<TTestResult, AnalyticsError> {
    if control.is_empty() {
        return Err(AnalyticsError::EmptySample("control".to_string()));
    }
    if treatment.is_empty() {
        return Err(AnalyticsError::EmptySample("treatment".to_string()));
    }

    let (n1, n2) = (control.len() as f64, treatment.len() as f64);
    let (m1, m2) = (mean(control)?, mean(treatment)?);

    let (standard_error, degrees_of_freedom) = match kind {
        TTestKind::Student => {
            if control.len() + treatment.len() < 3 {
                return Err(AnalyticsError::NotEnoughData(
                    "Student t-test needs at least 3 values in total".to_string(),
                ));
            }
            let df = n1 + n2 - 2.0;
            let pooled = (sum_of_squares(control, m1) + sum_of_squares(treatment, m2)) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        TTestKind::Welch => {
            let q1 = variance(control)? / n1;
            let q2 = variance(treatment)? / n2;
            let denominator = q1 * q1 / (n1 - 1.0) + q2 * q2 / (n2 - 1.0);
            if denominator == 0.0 {
                return Err(AnalyticsError::ZeroVariance);
            }
            ((q1 + q2).sqrt(), (q1 + q2) * (q1 + q2) / denominator)
        }
    };

    if standard_error == 0.0 || !standard_error.is_finite() {
        return Err(AnalyticsError::ZeroVariance);
    }

    let t_statistic = (m1 - m2) / standard_error;
    let p_value = two_sided_p_value(t_statistic, degrees_of_freedom);

    tracing::debug!(?kind, t_statistic, degrees_of_freedom, p_value, "Computed t-test.");

    Ok(TTestResult {
        kind,
        t_statistic,
        degrees_of_freedom,
        p_value,
    })
}

/// The p-value of a Student (pooled variance) t-test between two conditions.
pub fn p_value(control: &[f64], treatment: &[f64]) -> Result<f64, AnalyticsError> {
    Ok(t_test(control, treatment, TTestKind::Student)?.p_value)
}

/// `P(|T| >= |t|)` for a Student-t variable with `df` degrees of freedom.
pub fn two_sided_p_value(t: f64, df: f64) -> f64 {
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function (Lanczos approximation).
fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula.
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, c)| acc + c / (x + i as f64));
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// `I_x(a, b)`.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (-x).ln_1p();
    let front = ln_front.exp();

    // The continued fraction converges fastest below this point; use the
    // symmetry I_x(a, b) = 1 - I_{1-x}(b, a) above it.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

const MAX_ITERATIONS: usize = 300;
const EPSILON: f64 = 1e-15;
const TINY: f64 = 1e-300;

/// Continued fraction for the incomplete beta function (modified Lentz).
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let guard = |v: f64| if v.abs() < TINY { TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_mean_and_std_dev() {
        let times = [10.0, 12.5, 11.0];
        assert_close(mean(&times).unwrap(), 11.166_666_666_666_666, 1e-12);
        assert_close(std_dev(&times).unwrap(), 1.258_305_739_211_791_6, 1e-12);
    }

    #[test]
    fn test_empty_and_short_samples_are_errors() {
        assert!(matches!(mean(&[]), Err(AnalyticsError::EmptySample(_))));
        assert!(matches!(variance(&[1.0]), Err(AnalyticsError::NotEnoughData(_))));
    }

    #[test]
    fn test_p_value_closed_forms() {
        // df = 1 is the Cauchy distribution: P(|T| >= 1) = 0.5.
        assert_close(two_sided_p_value(1.0, 1.0), 0.5, 1e-12);
        // df = 2: p = 1 - t / sqrt(2 + t^2).
        assert_close(two_sided_p_value(2.0, 2.0), 1.0 - 2.0 / 6.0_f64.sqrt(), 1e-12);
        assert_close(two_sided_p_value(0.0, 5.0), 1.0, 1e-12);
        assert_close(two_sided_p_value(2.0, 10.0), 0.073_388_034_770_740_6, 1e-10);
    }

    #[test]
    fn test_student_t_test() {
        let result = t_test(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[2.0, 3.0, 4.0, 5.0, 6.0],
            TTestKind::Student,
        )
        .unwrap();

        assert_close(result.t_statistic, -1.0, 1e-12);
        assert_close(result.degrees_of_freedom, 8.0, 1e-12);
        assert_close(result.p_value, 0.346_593_507_087_334, 1e-10);
    }

    #[test]
    fn test_evacuation_times_differ_significantly() {
        let control = [10.0, 12.5, 11.0];
        let treatment = [14.0, 15.5, 13.0];

        let result = t_test(&control, &treatment, TTestKind::Student).unwrap();

        assert_close(result.t_statistic, -2.919_985_580_353_725_6, 1e-10);
        assert_close(result.p_value, 0.043_244_089_656_270_35, 1e-10);
        assert_close(p_value(&control, &treatment).unwrap(), result.p_value, 1e-15);
    }

    #[test]
    fn test_welch_t_test() {
        let result = t_test(
            &[10.0, 12.5, 11.0],
            &[14.0, 15.5, 13.0, 20.0],
            TTestKind::Welch,
        )
        .unwrap();

        assert_close(result.t_statistic, -2.609_756_097_560_976, 1e-10);
        assert_close(result.degrees_of_freedom, 4.166_246_713_974_62, 1e-10);
        assert_close(result.p_value, 0.057_057_919_681_007_24, 1e-9);
    }

    #[test]
    fn test_identical_samples_give_p_of_one() {
        let samples = [3.0, 4.0, 5.0];
        let result = t_test(&samples, &samples, TTestKind::Student).unwrap();
        assert_close(result.p_value, 1.0, 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_are_errors_not_nan() {
        assert!(matches!(
            t_test(&[], &[1.0, 2.0], TTestKind::Student),
            Err(AnalyticsError::EmptySample(_))
        ));
        assert!(matches!(
            t_test(&[1.0], &[2.0], TTestKind::Student),
            Err(AnalyticsError::NotEnoughData(_))
        ));
        assert!(matches!(
            t_test(&[1.0], &[2.0, 3.0], TTestKind::Welch),
            Err(AnalyticsError::NotEnoughData(_))
        ));
        assert_eq!(
            t_test(&[2.0, 2.0], &[2.0, 2.0], TTestKind::Student),
            Err(AnalyticsError::ZeroVariance)
        );
    }

    #[test]
    fn test_ln_gamma_matches_known_values() {
        assert_close(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), 1e-12);
        assert_close(ln_gamma(10.0), 362_880.0_f64.ln(), 1e-10);
    }
}
