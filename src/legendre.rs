//! Tabulated Gauss-Legendre rules of order 2 to 5 on the reference interval
//! `[-1, 1]`.
//!
//! Column `k` of [`NODES`] and [`WEIGHTS`] holds the rule with `k + 2` points.
//! Unused rows are padded with zeros so every rule can be summed over all
//! [`MAX_POINTS`] rows.

use crate::error::QuadratureError;
use lazy_static::lazy_static;
use log::debug;
use ndarray::{arr2, Array2, ArrayView1};

/// Number of rows in the tables (points of the largest rule).
pub const MAX_POINTS: usize = 5;
/// Number of tabulated rules (columns).
pub const MAX_ORDERS: usize = 4;

lazy_static! {
    /// Abscissas of the tabulated rules, one rule per column.
    pub static ref NODES: Array2<f64> = arr2(&[
        [-0.577_350_269_189_625_8, -0.774_596_669_241_483_4, -0.861_136_311_594_052_6, -0.906_179_845_938_664_0],
        [ 0.577_350_269_189_625_8,  0.000_000_000_000_000_0, -0.339_981_043_584_856_3, -0.538_469_310_105_683_1],
        [ 0.000_000_000_000_000_0,  0.774_596_669_241_483_4,  0.339_981_043_584_856_3,  0.000_000_000_000_000_0],
        [ 0.000_000_000_000_000_0,  0.000_000_000_000_000_0,  0.861_136_311_594_052_6,  0.538_469_310_105_683_1],
        [ 0.000_000_000_000_000_0,  0.000_000_000_000_000_0,  0.000_000_000_000_000_0,  0.906_179_845_938_664_0],
    ]);

    /// Weights of the tabulated rules, one rule per column.
    pub static ref WEIGHTS: Array2<f64> = arr2(&[
        [1.000_000_000_000_000_0, 0.555_555_555_555_555_6, 0.347_854_845_137_453_8, 0.236_926_885_056_189_1],
        [1.000_000_000_000_000_0, 0.888_888_888_888_888_9, 0.652_145_154_862_546_1, 0.478_628_670_499_366_5],
        [0.000_000_000_000_000_0, 0.555_555_555_555_555_6, 0.652_145_154_862_546_1, 0.568_888_888_888_888_9],
        [0.000_000_000_000_000_0, 0.000_000_000_000_000_0, 0.347_854_845_137_453_8, 0.478_628_670_499_366_5],
        [0.000_000_000_000_000_0, 0.000_000_000_000_000_0, 0.000_000_000_000_000_0, 0.236_926_885_056_189_1],
    ]);
}

/// A view on one column of the tables: the `k + 2` point rule, zero padded to
/// [`MAX_POINTS`] rows.
#[derive(Clone, Debug)]
pub struct GaussLegendreRule {
    order: usize,
    nodes: ArrayView1<'static, f64>,
    weights: ArrayView1<'static, f64>,
}

impl GaussLegendreRule {
    /// Select the rule with order index `k`, i.e. `k + 2` points.
    pub fn new(k: usize) -> Result<GaussLegendreRule, QuadratureError> {
        if k >= MAX_ORDERS {
            return Err(QuadratureError::InvalidOrder(k));
        }
        let nodes: &'static Array2<f64> = &NODES;
        let weights: &'static Array2<f64> = &WEIGHTS;
        let rule = GaussLegendreRule {
            order: k,
            nodes: nodes.column(k),
            weights: weights.column(k),
        };
        debug!(
            "selected {}-point Gauss-Legendre rule, exact up to degree {}",
            rule.points(),
            rule.exact_degree()
        );
        Ok(rule)
    }

    /// Order index of the rule.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of non-padded points.
    pub fn points(&self) -> usize {
        self.order + 2
    }

    /// Highest polynomial degree integrated exactly.
    pub fn exact_degree(&self) -> usize {
        2 * self.order + 3
    }

    pub fn nodes(&self) -> ArrayView1<'static, f64> {
        self.nodes
    }

    pub fn weights(&self) -> ArrayView1<'static, f64> {
        self.weights
    }

    /// Map the reference nodes onto `[a, b]`, returning `(t_i, w_i)` for every
    /// row, padding included.
    pub fn points_on(&self, a: f64, b: f64) -> impl Iterator<Item = (f64, f64)> {
        let half_len = (b - a) / 2.0;
        let center = (b + a) / 2.0;
        self.nodes
            .into_iter()
            .zip(self.weights.into_iter())
            .map(move |(node, weight)| (half_len * *node + center, *weight))
    }
}
