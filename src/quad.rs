use crate::error::QuadratureError;
use crate::legendre::{GaussLegendreRule, MAX_ORDERS};
use crate::result::OrderEstimate;
use crate::symbolic::Expr;
use log::info;
use num::Zero;
use std::ops::Mul;

/// Weighted sum `Σ f(t_i) w_i (b - a) / 2` over every row of `rule`,
/// padding included. Shared by the numeric and the symbolic passes.
fn weighted_sum<S, F>(rule: &GaussLegendreRule, a: f64, b: f64, mut f: F) -> S
where
    S: Zero + Mul<f64, Output = S>,
    F: FnMut(f64) -> S,
{
    let mut sum = S::zero();
    for (t, w) in rule.points_on(a, b) {
        sum = sum + f(t) * w;
    }
    sum * ((b - a) / 2.0)
}

/// Integrate `f` from `a` to `b` with the `k + 2` point Gauss-Legendre rule.
/// Exact for polynomials of degree `2k + 3` or less.
///
/// # Examples
///
/// ```
/// use gauss_double_integral::prelude::gauss_legendre;
/// let res = gauss_legendre(0.0, 1.0, |x: f64| x * x, 0).unwrap();
/// assert!((res - 1.0 / 3.0).abs() < 1e-14);
/// ```
pub fn gauss_legendre<F>(a: f64, b: f64, f: F, k: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let rule = GaussLegendreRule::new(k)?;
    Ok(weighted_sum(&rule, a, b, f))
}

/// Integrate `f(x, y)` over `x` from `a` to `b` with the `k + 2` point rule,
/// keeping the symbol `free` unevaluated. Returns the partial integral as an
/// expression in `free`, collected into polynomial form when possible.
pub fn gauss_legendre_partial<F>(
    a: f64,
    b: f64,
    f: F,
    k: usize,
    free: &str,
) -> Result<Expr, QuadratureError>
where
    F: Fn(&Expr, &Expr) -> Expr,
{
    let rule = GaussLegendreRule::new(k)?;
    let y = Expr::symbol(free);
    let partial: Expr = weighted_sum(&rule, a, b, |t| f(&Expr::Const(t), &y));
    let partial = partial.collect(free);
    info!("N: {}, F({}) = {}", rule.order(), free, partial);
    Ok(partial)
}

/// Approximate the double integral of `f(x, y)` over `[a, b] x [c, d]`.
///
/// The inner integral over `x` is taken symbolically in `y`, compiled into a
/// numeric function and integrated over `y`, both with the `k + 2` point rule.
///
/// # Examples
///
/// ```
/// use gauss_double_integral::prelude::{gauss_legendre_double, Expr};
/// let f = |x: &Expr, y: &Expr| 2.0 * x * y;
/// let res = gauss_legendre_double(f, 0.0, 1.0, 0.0, 1.0, 0).unwrap();
/// assert!((res - 0.5).abs() < 1e-14);
/// ```
pub fn gauss_legendre_double<F>(
    f: F,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    k: usize,
) -> Result<f64, QuadratureError>
where
    F: Fn(&Expr, &Expr) -> Expr,
{
    nested(f, (a, b), (c, d), k, "y")
}

/// Symbolic pass over the inner bounds keeping `free`, then numeric pass over
/// the outer bounds.
fn nested<F>(
    f: F,
    inner: (f64, f64),
    outer: (f64, f64),
    k: usize,
    free: &str,
) -> Result<f64, QuadratureError>
where
    F: Fn(&Expr, &Expr) -> Expr,
{
    let g = gauss_legendre_partial(inner.0, inner.1, f, k, free)?;
    let g = g.lambdify(free)?;
    gauss_legendre(outer.0, outer.1, g, k)
}

/// Purely numeric tensor-product rule for a binary integrand over
/// `[a, b] x [c, d]`.
pub fn gauss_legendre_tensor<F>(
    f: F,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    k: usize,
) -> Result<f64, QuadratureError>
where
    F: Fn(f64, f64) -> f64,
{
    let rule = GaussLegendreRule::new(k)?;
    Ok(weighted_sum(&rule, c, d, |y| {
        weighted_sum(&rule, a, b, |x| f(x, y))
    }))
}

#[derive(Clone, Debug)]
/// Double integrator over a fixed rectangle `[a, b] x [c, d]`.
pub struct DoubleIntegrator {
    /// Bounds of the inner variable.
    pub inner: (f64, f64),
    /// Bounds of the outer variable.
    pub outer: (f64, f64),
    /// Name of the inner variable, used in diagnostics.
    pub inner_var: String,
    /// Name of the outer variable, kept symbolic during the inner pass.
    pub outer_var: String,
}

impl DoubleIntegrator {
    /// Integrate `f` with order index `k`.
    pub fn integrate<F>(&self, f: &F, k: usize) -> Result<f64, QuadratureError>
    where
        F: Fn(&Expr, &Expr) -> Expr,
    {
        let (a, b) = self.inner;
        let (c, d) = self.outer;
        info!(
            "Integrating over {} in [{}, {}] and {} in [{}, {}]",
            self.inner_var, a, b, self.outer_var, c, d
        );
        nested(f, self.inner, self.outer, k, &self.outer_var)
    }

    /// Integrate `f` with the order indices `0..orders`, one row per order.
    pub fn sweep<F>(&self, f: &F, orders: usize) -> Result<Vec<OrderEstimate>, QuadratureError>
    where
        F: Fn(&Expr, &Expr) -> Expr,
    {
        if orders > MAX_ORDERS {
            return Err(QuadratureError::InvalidOrder(MAX_ORDERS));
        }
        let mut rows: Vec<OrderEstimate> = Vec::with_capacity(orders);
        for k in 0..orders {
            let val = self.integrate(f, k)?;
            let row = OrderEstimate::new(k, val, rows.last());
            row.issue_warning(rows.last());
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Builder struct used to construct an integrator with wanted parameters.
#[derive(Default)]
pub struct DoubleIntegratorBuilder {
    /// Bounds of the inner variable.
    inner: Option<(f64, f64)>,
    /// Bounds of the outer variable.
    outer: Option<(f64, f64)>,
    /// Names of the inner and outer variables.
    variables: Option<(String, String)>,
}

impl DoubleIntegratorBuilder {
    /// Set the bounds of the inner integral.
    pub fn inner_bounds(mut self, a: f64, b: f64) -> Self {
        self.inner = Some((a, b));
        self
    }
    /// Set the bounds of the outer integral.
    pub fn outer_bounds(mut self, c: f64, d: f64) -> Self {
        self.outer = Some((c, d));
        self
    }
    /// Set the names of the inner and outer variables.
    pub fn variables(mut self, inner: &str, outer: &str) -> Self {
        self.variables = Some((inner.to_string(), outer.to_string()));
        self
    }
    /// Build the integrator.
    pub fn build(self) -> DoubleIntegrator {
        let (inner_var, outer_var) = self
            .variables
            .unwrap_or_else(|| ("x".to_string(), "y".to_string()));
        DoubleIntegrator {
            inner: self.inner.unwrap_or((-1.0, 1.0)),
            outer: self.outer.unwrap_or((-1.0, 1.0)),
            inner_var,
            outer_var,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_single_polynomial() {
        // x^3 + x^2 + x + 1 on [-3, 4] is exact with two points
        let exp_result = (64.0 + 64.0 / 3.0 + 8.0 + 4.0) - (81.0 / 4.0 - 27.0 / 3.0 + 9.0 / 2.0 - 3.0);
        for k in 0..MAX_ORDERS {
            let result = gauss_legendre(-3.0, 4.0, |x| x * x * x + x * x + x + 1.0, k).unwrap();
            test_rel(result, exp_result, 1e-13);
        }
    }

    #[test]
    fn test_single_exact_degree() {
        for k in 0..MAX_ORDERS {
            let p = (2 * k + 3) as i32;
            let result = gauss_legendre(0.5, 2.0, |x: f64| x.powi(p), k).unwrap();
            test_rel(result, monomial_integral(p, 0.5, 2.0), 1e-12);

            // one degree more is no longer exact
            let result = gauss_legendre(0.5, 2.0, |x: f64| x.powi(p + 1), k).unwrap();
            assert!((result - monomial_integral(p + 1, 0.5, 2.0)).abs() > 1e-8);
        }
    }

    #[test]
    fn test_single_smooth() {
        let result = gauss_legendre(0.0, 1.0, |x: f64| x.exp(), 3).unwrap();
        test_rel(result, 1f64.exp() - 1.0, 1e-9);
    }

    #[test]
    fn test_invalid_order() {
        assert_eq!(
            gauss_legendre(0.0, 1.0, |x| x, 4),
            Err(QuadratureError::InvalidOrder(4))
        );
        assert_eq!(
            gauss_legendre_double(f1, 0.0, 2.0, -1.0, 1.0, 10),
            Err(QuadratureError::InvalidOrder(10))
        );
        assert_eq!(
            gauss_legendre_tensor(|x, y| x * y, 0.0, 1.0, 0.0, 1.0, 4),
            Err(QuadratureError::InvalidOrder(4))
        );
    }

    #[test]
    fn test_partial() {
        // int_0^2 x^7 + 2xy dx = 32 + 4y
        let g = gauss_legendre_partial(0.0, 2.0, f1, 3, "y").unwrap();
        let coeffs = g.to_polynomial("y").unwrap();
        assert_eq!(coeffs.len(), 2);
        test_rel(coeffs[0], 32.0, 1e-12);
        test_rel(coeffs[1], 4.0, 1e-12);
        assert_eq!(g.free_symbols().len(), 1);
    }

    #[test]
    fn test_partial_non_polynomial() {
        let g = gauss_legendre_partial(0.0, 1.0, f2, 3, "y").unwrap();
        assert_eq!(g.to_polynomial("y"), None);
        let h = g.lambdify("y").unwrap();
        test_rel(h(0.0), 1.0 - 1f64.cos(), 1e-9);
    }

    #[test]
    fn test_constant() {
        let f = |_: &Expr, _: &Expr| Expr::constant(1.0);
        for k in 0..MAX_ORDERS {
            let result = gauss_legendre_double(f, 0.0, 2.0, -1.0, 1.0, k).unwrap();
            test_rel(result, 4.0, 1e-13);
        }
    }

    #[test]
    fn test_linear() {
        let f = |x: &Expr, _: &Expr| x.clone();
        for k in 0..MAX_ORDERS {
            let result = gauss_legendre_double(f, 0.0, 2.0, 0.0, 1.0, k).unwrap();
            test_rel(result, 2.0, 1e-13);
        }
    }

    #[test]
    fn test_demo_polynomial() {
        let result = gauss_legendre_double(f1, 0.0, 2.0, -1.0, 1.0, 3).unwrap();
        test_rel(result, 64.0, 1e-12);

        // the two point rule integrates x^7 poorly
        let result = gauss_legendre_double(f1, 0.0, 2.0, -1.0, 1.0, 0).unwrap();
        assert!((result - 64.0).abs() > 1.0);
    }

    #[test]
    fn test_exactness() {
        let (a, b, c, d) = (0.5, 2.0, -1.0, 1.5);
        for k in 0..MAX_ORDERS {
            let max_degree = (2 * k + 3) as i32;
            for p in 0..=max_degree {
                for q in 0..=max_degree {
                    let f = |x: &Expr, y: &Expr| x.powi(p) * y.powi(q);
                    let exp_result = monomial_integral(p, a, b) * monomial_integral(q, c, d);
                    let result = gauss_legendre_double(f, a, b, c, d, k).unwrap();
                    test_rel(result, exp_result, 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_monotonic_accuracy() {
        // int_0^2 sin(x) dx * int_{-1}^1 cos(y) dy
        let exp_result = (1.0 - 2f64.cos()) * 2.0 * 1f64.sin();
        let mut last_err = f64::INFINITY;
        for k in 0..MAX_ORDERS {
            let result = gauss_legendre_double(f2, 0.0, 2.0, -1.0, 1.0, k).unwrap();
            let err = (result - exp_result).abs();
            assert!(err <= last_err + 1e-12, "error grew at k = {}", k);
            last_err = err;
        }
        assert!(last_err < 1e-6);
    }

    #[test]
    fn test_tensor_matches_symbolic() {
        let g = |x: f64, y: f64| x.powi(7) + 2.0 * x * y;
        for k in 0..MAX_ORDERS {
            let numeric = gauss_legendre_tensor(g, 0.0, 2.0, -1.0, 1.0, k).unwrap();
            let symbolic = gauss_legendre_double(f1, 0.0, 2.0, -1.0, 1.0, k).unwrap();
            test_rel(numeric, symbolic, 1e-12);
        }
    }

    #[test]
    fn test_singular_midpoint() {
        // y / x is infinite at the midpoint of [-1, 1], where the padded rows
        // of the two point rule are evaluated
        let f = |x: &Expr, y: &Expr| y / x;
        let g = |x: f64, y: f64| y / x;
        let symbolic = gauss_legendre_double(f, -1.0, 1.0, 0.0, 1.0, 0).unwrap();
        let numeric = gauss_legendre_tensor(g, -1.0, 1.0, 0.0, 1.0, 0).unwrap();
        assert!(symbolic.is_nan(), "symbolic = {}", symbolic);
        assert!(numeric.is_nan(), "numeric = {}", numeric);

        // away from the midpoint both paths stay finite and agree
        let symbolic = gauss_legendre_double(f, 1.0, 2.0, 0.0, 1.0, 1).unwrap();
        let numeric = gauss_legendre_tensor(g, 1.0, 2.0, 0.0, 1.0, 1).unwrap();
        test_rel(symbolic, numeric, 1e-12);
    }

    #[test]
    fn test_unbound_symbol() {
        let f = |x: &Expr, y: &Expr| x * y * Expr::symbol("z");
        assert_eq!(
            gauss_legendre_double(f, 0.0, 1.0, 0.0, 1.0, 1),
            Err(QuadratureError::UnboundSymbol("z".to_string()))
        );
    }

    #[test]
    fn test_builder_defaults() {
        let integrator = DoubleIntegratorBuilder::default().build();
        assert_eq!(integrator.inner, (-1.0, 1.0));
        assert_eq!(integrator.outer, (-1.0, 1.0));
        assert_eq!(integrator.outer_var, "y");

        let result = integrator.integrate(&f1, 0).unwrap();
        // odd in x over a symmetric interval
        test_abs(result, 0.0, 1e-12);
    }

    #[test]
    fn test_integrator_variables() {
        let integrator = DoubleIntegratorBuilder::default()
            .inner_bounds(0.0, 1.0)
            .outer_bounds(0.0, 3.0)
            .variables("u", "v")
            .build();
        let f = |u: &Expr, v: &Expr| u * v.powi(2);
        let result = integrator.integrate(&f, 1).unwrap();
        test_rel(result, 0.5 * 9.0, 1e-13);
    }

    #[test]
    fn test_sweep() {
        let integrator = DoubleIntegratorBuilder::default()
            .inner_bounds(0.0, 2.0)
            .outer_bounds(-1.0, 1.0)
            .build();
        let rows = integrator.sweep(&f1, MAX_ORDERS).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].change, None);
        for (k, row) in rows.iter().enumerate() {
            assert_eq!(row.order, k);
            assert_eq!(row.points, k + 2);
        }
        test_rel(rows[3].val, 64.0, 1e-12);
        test_abs(rows[3].change.unwrap(), 0.0, 1e-2);

        assert_eq!(
            integrator.sweep(&f1, 5),
            Err(QuadratureError::InvalidOrder(4))
        );
    }
}
