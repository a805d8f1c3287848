//! Tests for regression models
//!
//! Covers the closed-form line, polynomial normal equations, logistic
//! gradient descent and the discriminator-based dispatch.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use pa_core::{RegressionDataPoint, ValidationError};

use crate::base::{ErrorKind, ModelError};
use crate::regression::{
    fit, linear_regression, logistic_regression, polynomial_regression, LogisticConfig,
    LogisticRegression, PolynomialConfig, RegressionKind, RegressionType,
};

// ==================== Test Fixtures ====================

fn points(pairs: &[(f64, f64)]) -> Vec<RegressionDataPoint> {
    pairs.iter().copied().map(RegressionDataPoint::from).collect()
}

/// y = 2x
fn doubling_data() -> Vec<RegressionDataPoint> {
    points(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)])
}

/// y = x² - 3x + 2
fn quadratic_data() -> Vec<RegressionDataPoint> {
    (-3..=4)
        .map(|i| {
            let x = i as f64;
            RegressionDataPoint::new(x, x * x - 3.0 * x + 2.0)
        })
        .collect()
}

/// y = 1 + 2x + N(0, 0.1), seeded
fn noisy_data() -> Vec<RegressionDataPoint> {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.1).unwrap();
    (0..100)
        .map(|i| {
            let x = i as f64 * 0.1;
            RegressionDataPoint::new(x, 1.0 + 2.0 * x + noise.sample(&mut rng))
        })
        .collect()
}

/// Binary outcome switching between x = 5 and x = 6
fn binary_data() -> Vec<RegressionDataPoint> {
    (1..=10)
        .map(|i| RegressionDataPoint::new(i as f64, if i > 5 { 1.0 } else { 0.0 }))
        .collect()
}

// ==================== Linear Regression ====================

#[test]
fn test_linear_regression_basic_fit() {
    let result = linear_regression(&doubling_data()).unwrap();

    assert_eq!(result.kind, RegressionKind::Linear);
    assert_abs_diff_eq!(result.slope().unwrap(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.intercept.unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.r_squared, 1.0, epsilon = 1e-9);
    assert_eq!(result.equation, "y = 2.00x + 0.00");

    for (fitted, expected) in result.predictions.iter().zip([2.0, 4.0, 6.0]) {
        assert_abs_diff_eq!(*fitted, expected, epsilon = 1e-12);
    }
    for residual in &result.residuals {
        assert_abs_diff_eq!(*residual, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_linear_regression_negative_intercept_equation() {
    // y = 0.5x - 1.25
    let data = points(&[(0.0, -1.25), (2.0, -0.25), (4.0, 0.75)]);
    let result = linear_regression(&data).unwrap();

    assert_abs_diff_eq!(result.slope().unwrap(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(result.intercept.unwrap(), -1.25, epsilon = 1e-12);
    assert_eq!(result.equation, "y = 0.50x - 1.25");
    assert_abs_diff_eq!(result.predict(10.0), 3.75, epsilon = 1e-12);
}

#[test]
fn test_linear_regression_perfect_fit_large_offsets() {
    let data: Vec<_> = (0..20)
        .map(|i| {
            let x = 1.0e6 + i as f64;
            RegressionDataPoint::new(x, -3.0 * x + 7.0)
        })
        .collect();
    let result = linear_regression(&data).unwrap();

    assert_abs_diff_eq!(result.slope().unwrap(), -3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(result.r_squared, 1.0, epsilon = 1e-9);
}

#[test]
fn test_linear_regression_small_spread_large_offset() {
    let data = points(&[(1.0, 1e6), (2.0, 1e6 + 1.0), (3.0, 1e6 + 0.5)]);
    let result = linear_regression(&data).unwrap();

    assert_abs_diff_eq!(result.slope().unwrap(), 0.25, epsilon = 1e-9);
    assert_abs_diff_eq!(result.statistics.rss, 0.375, epsilon = 1e-9);
    assert_abs_diff_eq!(result.statistics.tss, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(result.r_squared, 0.25, epsilon = 1e-9);
}

#[test]
fn test_linear_regression_noisy() {
    let result = linear_regression(&noisy_data()).unwrap();

    assert_abs_diff_eq!(result.slope().unwrap(), 2.0, epsilon = 0.05);
    assert_abs_diff_eq!(result.intercept.unwrap(), 1.0, epsilon = 0.1);
    assert!(result.r_squared > 0.99 && result.r_squared < 1.0);
    assert_abs_diff_eq!(result.residuals.iter().sum::<f64>(), 0.0, epsilon = 1e-9);

    let stats = result.statistics;
    assert_eq!(stats.n_obs, 100);
    assert!(stats.adj_r_squared.unwrap() <= result.r_squared);
    assert_abs_diff_eq!(stats.residual_std_error.unwrap(), 0.1, epsilon = 0.03);
}

#[test]
fn test_linear_regression_constant_response() {
    let data = points(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]);
    let result = linear_regression(&data).unwrap();

    assert_abs_diff_eq!(result.slope().unwrap(), 0.0, epsilon = 1e-12);
    assert_eq!(result.r_squared, 1.0);
}

#[test]
fn test_linear_regression_identical_x() {
    let data = points(&[(2.0, 1.0), (2.0, 3.0), (2.0, 5.0)]);
    let err = linear_regression(&data).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Numerical);
    assert!(matches!(err, ModelError::NumericalError { .. }));
}

#[test]
fn test_linear_regression_single_observation() {
    let err = linear_regression(&points(&[(1.0, 2.0)])).unwrap_err();
    assert_eq!(
        err,
        ModelError::Validation(ValidationError::InsufficientData {
            context: "linear regression",
            required: 2,
            actual: 1
        })
    );
}

#[test]
fn test_linear_regression_rejects_non_finite() {
    let data = points(&[(1.0, 2.0), (2.0, f64::NAN)]);
    let err = linear_regression(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ==================== Polynomial Regression ====================

#[test]
fn test_polynomial_regression_recovers_quadratic() {
    let result = polynomial_regression(&quadratic_data(), None).unwrap();

    assert_eq!(result.kind, RegressionKind::Polynomial);
    assert_eq!(result.degree(), 2);
    assert_abs_diff_eq!(result.intercept.unwrap(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.coefficients[0], -3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.coefficients[1], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.r_squared, 1.0, epsilon = 1e-9);
    assert_eq!(result.equation, "y = 1.00x^2 - 3.00x + 2.00");
    assert_abs_diff_eq!(result.predict(10.0), 72.0, epsilon = 1e-6);
    assert!(result.slope().is_none());
}

#[test]
fn test_polynomial_degree_one_matches_linear() {
    let data = noisy_data();
    let poly = polynomial_regression(&data, Some(1)).unwrap();
    let line = linear_regression(&data).unwrap();

    assert_abs_diff_eq!(poly.coefficients[0], line.slope().unwrap(), epsilon = 1e-8);
    assert_abs_diff_eq!(poly.intercept.unwrap(), line.intercept.unwrap(), epsilon = 1e-8);
    assert_abs_diff_eq!(poly.r_squared, line.r_squared, epsilon = 1e-10);
}

#[test]
fn test_polynomial_cubic_with_exact_points() {
    // Four points determine a cubic exactly
    let data = points(&[(0.0, 1.0), (1.0, 0.0), (2.0, 3.0), (3.0, 16.0)]);
    let result = polynomial_regression(&data, Some(3)).unwrap();

    for residual in &result.residuals {
        assert_abs_diff_eq!(*residual, 0.0, epsilon = 1e-8);
    }
    assert!(result.statistics.residual_std_error.is_none());
}

#[test]
fn test_polynomial_degree_not_below_sample_count() {
    let data = points(&[(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]);

    for degree in [3, 4, 10] {
        let err = polynomial_regression(&data, Some(degree)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Numerical, "degree {}", degree);
    }

    let err = polynomial_regression(&data[..1], Some(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Numerical);
}

#[test]
fn test_polynomial_duplicate_x_is_singular() {
    let data = points(&[(1.0, 1.0), (1.0, 2.0)]);
    let err = polynomial_regression(&data, Some(1)).unwrap_err();

    assert!(matches!(err, ModelError::SingularMatrix { .. }));
    assert_eq!(err.kind(), ErrorKind::Numerical);
}

#[test]
fn test_polynomial_invalid_degree() {
    let err = polynomial_regression(&quadratic_data(), Some(0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_polynomial_empty_input() {
    let err = polynomial_regression(&[], Some(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ==================== Logistic Regression ====================

#[test]
fn test_logistic_regression_separates_classes() {
    let data = binary_data();
    let result = logistic_regression(&data).unwrap();

    assert_eq!(result.kind, RegressionKind::Logistic);
    assert!(result.slope().unwrap() > 0.0);
    assert!(result.predict(1.0) < 0.2);
    assert!(result.predict(10.0) > 0.8);
    assert_abs_diff_eq!(result.predict(5.5), 0.5, epsilon = 0.05);

    for (p, point) in result.predictions.iter().zip(&data) {
        assert!((0.0..=1.0).contains(p));
        assert_eq!(*p > 0.5, point.y == 1.0);
    }

    let stats = result.statistics;
    assert_eq!(stats.iterations, Some(1000));
    assert!(stats.log_loss.unwrap() < 0.3);
    assert!(result.equation.starts_with("p = 1 / (1 + e^-("));
}

#[test]
fn test_logistic_regression_is_deterministic() {
    let data = binary_data();
    let first = logistic_regression(&data).unwrap();
    let second = logistic_regression(&data).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.coefficients[0].to_bits(), second.coefficients[0].to_bits());
}

#[test]
fn test_logistic_regression_accepts_probabilities() {
    let data = points(&[(0.0, 0.1), (1.0, 0.5), (2.0, 0.9)]);
    let result = logistic_regression(&data).unwrap();
    assert!(result.predict(0.0) < result.predict(2.0));
}

#[test]
fn test_logistic_regression_rejects_out_of_range() {
    let data = points(&[(0.0, 0.0), (1.0, 1.5)]);
    let err = logistic_regression(&data).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(
        err,
        ModelError::Validation(ValidationError::OutOfRange { index: 1, .. })
    ));
}

#[test]
fn test_logistic_regression_constant_x() {
    let data = points(&[(3.0, 0.0), (3.0, 1.0), (3.0, 1.0), (3.0, 1.0)]);
    let result = logistic_regression(&data).unwrap();

    assert_eq!(result.slope(), Some(0.0));
    // Intercept drifts toward logit(0.75)
    assert!(result.predict(3.0) > 0.5);
}

#[test]
fn test_logistic_custom_config() {
    let model = LogisticRegression::new()
        .with_learning_rate(0.5)
        .with_max_iterations(50);
    let result = model.fit(&binary_data()).unwrap();
    assert!(result.statistics.iterations.unwrap() <= 50);

    let err = LogisticRegression::new()
        .with_learning_rate(-1.0)
        .fit(&binary_data())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ==================== Dispatch ====================

#[test]
fn test_regression_kind_parsing() {
    assert_eq!("linear".parse::<RegressionKind>().unwrap(), RegressionKind::Linear);
    assert_eq!(" Polynomial ".parse::<RegressionKind>().unwrap(), RegressionKind::Polynomial);
    assert_eq!("logistic".parse::<RegressionKind>().unwrap(), RegressionKind::Logistic);

    let err = "cubic".parse::<RegressionKind>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_regression_type_dispatch() {
    let data = quadratic_data();

    let linear = fit(&data, &RegressionType::from(RegressionKind::Linear)).unwrap();
    assert_eq!(linear.kind, RegressionKind::Linear);

    let cubic = fit(&data, &RegressionType::Polynomial(PolynomialConfig { degree: 3 })).unwrap();
    assert_eq!(cubic.degree(), 3);
    assert_abs_diff_eq!(cubic.coefficients[2], 0.0, epsilon = 1e-6);

    let logistic = RegressionType::Logistic(LogisticConfig::default())
        .fit(&binary_data())
        .unwrap();
    assert_eq!(logistic.kind, RegressionKind::Logistic);
}

#[test]
fn test_regression_type_deserialize() {
    let ty: RegressionType = serde_json::from_str(r#"{"type":"polynomial","degree":4}"#).unwrap();
    assert_eq!(ty, RegressionType::Polynomial(PolynomialConfig { degree: 4 }));

    let ty: RegressionType = serde_json::from_str(r#"{"type":"polynomial"}"#).unwrap();
    assert_eq!(ty, RegressionType::Polynomial(PolynomialConfig::default()));

    let ty: RegressionType = serde_json::from_str(r#"{"type":"linear"}"#).unwrap();
    assert_eq!(ty, RegressionType::Linear);

    assert!(serde_json::from_str::<RegressionType>(r#"{"type":"spline"}"#).is_err());
}

// ==================== Serialization & Display ====================

#[test]
fn test_regression_result_json_shape() {
    let result = linear_regression(&doubling_data()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["type"], "linear");
    assert_eq!(json["equation"], "y = 2.00x + 0.00");
    assert!(json["rSquared"].is_number());
    assert!(json["coefficients"].is_array());
    assert!(json["intercept"].is_number());
    assert_eq!(json["predictions"].as_array().unwrap().len(), 3);
    assert_eq!(json["residuals"].as_array().unwrap().len(), 3);
    assert_eq!(json["statistics"]["nObs"], 3);
    assert!(json["statistics"].get("iterations").is_none());
}

#[test]
fn test_regression_summary_display() {
    let result = polynomial_regression(&quadratic_data(), Some(2)).unwrap();
    let summary = result.summary();

    assert_eq!(summary.coefficients.len(), 3);
    assert!(summary.coefficients[0].is_intercept);
    assert_eq!(summary.coefficients[2].name, "x^2");

    let display = format!("{}", summary);
    assert!(display.contains("Model Summary"));
    assert!(display.contains("Model Type: polynomial"));
    assert!(display.contains("(Intercept)"));
    assert!(display.contains("R-squared"));
}

// ==================== Property-Based Tests ====================

#[cfg(feature = "proptest")]
mod proptest_tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_linear_regression_r_squared_bounds(
            data in vec((-100.0f64..100.0, -100.0f64..100.0), 3..40)
        ) {
            let data = points(&data);
            if let Ok(result) = linear_regression(&data) {
                prop_assert!(result.r_squared <= 1.0 + 1e-9);
                prop_assert!(result.r_squared >= -1e-9);
            }
        }

        #[test]
        fn test_collinear_points_fit_perfectly(
            slope in -50.0f64..50.0,
            intercept in -50.0f64..50.0,
            xs in vec(-100.0f64..100.0, 2..30)
        ) {
            let data: Vec<_> = xs
                .iter()
                .map(|&x| RegressionDataPoint::new(x, slope * x + intercept))
                .collect();
            if let Ok(result) = linear_regression(&data) {
                prop_assert!((result.r_squared - 1.0).abs() < 1e-9);
                for r in &result.residuals {
                    prop_assert!(r.abs() < 1e-6);
                }
            }
        }

        #[test]
        fn test_regression_is_deterministic(
            data in vec((-10.0f64..10.0, 0.0f64..1.0), 2..20)
        ) {
            let data = points(&data);
            for ty in [
                RegressionType::Linear,
                RegressionType::Polynomial(PolynomialConfig { degree: 1 }),
                RegressionType::Logistic(LogisticConfig::default()),
            ] {
                let first = ty.fit(&data);
                let second = ty.fit(&data);
                prop_assert_eq!(first, second);
            }
        }
    }
}
