use crate::symbolic::Expr;

/// Assert `result` is within `relative_error` of `expected`. NaN matches NaN;
/// a zero expectation is compared absolutely.
pub(crate) fn test_rel(result: f64, expected: f64, relative_error: f64) {
    let ok = if result.is_nan() || expected.is_nan() {
        result.is_nan() && expected.is_nan()
    } else if expected == 0.0 {
        result.abs() <= relative_error
    } else {
        ((result - expected) / expected).abs() <= relative_error
    };
    assert!(ok, "observed: {:?}, expected: {:?}", result, expected);
}

pub(crate) fn test_abs(result: f64, expected: f64, absolute_error: f64) {
    assert!(
        (result - expected).abs() <= absolute_error,
        "observed: {:?}, expected: {:?}",
        result,
        expected
    );
}

/// Exact integral of `x^p` over `[a, b]`.
pub(crate) fn monomial_integral(p: i32, a: f64, b: f64) -> f64 {
    (b.powi(p + 1) - a.powi(p + 1)) / f64::from(p + 1)
}

/// Integrand 1 for integration testing: x^7 + 2xy
pub(crate) fn f1(x: &Expr, y: &Expr) -> Expr {
    x.powi(7) + 2.0 * x * y
}

/// Integrand 2 for integration testing: sin(x) cos(y)
pub(crate) fn f2(x: &Expr, y: &Expr) -> Expr {
    x.sin() * y.cos()
}
