pub use crate::error::QuadratureError;
pub use crate::legendre::{GaussLegendreRule, MAX_ORDERS, MAX_POINTS};
pub use crate::quad::{
    gauss_legendre, gauss_legendre_double, gauss_legendre_partial, gauss_legendre_tensor,
    DoubleIntegrator, DoubleIntegratorBuilder,
};
pub use crate::report::{banner, estimates_table, format_general, table};
pub use crate::result::OrderEstimate;
pub use crate::symbolic::{Expr, Function, Lambda};
