use std::error::Error;
use std::fmt;

/// Failures raised by the quadrature evaluator and its symbolic collaborator.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum QuadratureError {
    /// Order index outside of the tabulated rules (valid: 0..=3).
    InvalidOrder(usize),
    /// A symbol with no numeric binding was found while compiling an expression.
    UnboundSymbol(String),
}

impl Error for QuadratureError {}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::InvalidOrder(k) => write!(
                f,
                "Invalid order index {}. Only Gauss-Legendre orders 2 to 5 (index 0 to 3) are tabulated",
                k
            ),
            QuadratureError::UnboundSymbol(name) => {
                write!(f, "Cannot compile expression: symbol '{}' is unbound", name)
            }
        }
    }
}
