//! Double integral of `x^7 + 2xy` over `[0, 2] x [-1, 1]` with the Gauss-Legendre
//! rules of order 2 to 5.

use env_logger::Env;
use gauss_double_integral::prelude::*;

fn main() -> Result<(), QuadratureError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    print!("{}", banner("Welcome to the Gaussian Quadrature Double Integral"));

    let x = Expr::symbol("x");
    let y = Expr::symbol("y");
    let fxy = x.powi(7) + 2.0 * &x * &y;
    println!("F(x,y) = {}\n", fxy);

    let integrator = DoubleIntegratorBuilder::default()
        .inner_bounds(0.0, 2.0)
        .outer_bounds(-1.0, 1.0)
        .variables("x", "y")
        .build();

    let f = fxy.bivariate("x", "y");
    let estimates = integrator.sweep(&f, MAX_ORDERS)?;

    print!("{}", estimates_table(&estimates, 15));
    Ok(())
}
