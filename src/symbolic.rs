//! Minimal symbolic expressions used to carry the partially integrated
//! integrand from the inner pass to the outer pass.
//!
//! `Expr` supports arithmetic through the standard operators, integer powers,
//! a handful of elementary functions, substitution, collection into
//! polynomial form and compilation into a numeric closure (`lambdify`).

use crate::error::QuadratureError;
use num::Zero;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Elementary functions that can be applied to an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Exp,
}

impl Function {
    fn eval(self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Exp => x.exp(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Exp => "exp",
        }
    }
}

/// Numeric closure produced by [`Expr::lambdify`].
pub type Lambda = Box<dyn Fn(f64) -> f64>;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(f64),
    Symbol(String),
    Add(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, i32),
    Apply(Function, Box<Expr>),
}

impl Expr {
    pub fn constant(value: f64) -> Expr {
        Expr::Const(value)
    }

    pub fn symbol(name: &str) -> Expr {
        Expr::Symbol(name.to_string())
    }

    /// `lhs + rhs`, folding constants.
    pub fn sum(lhs: Expr, rhs: Expr) -> Expr {
        match (lhs, rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
            (Expr::Const(a), e) | (e, Expr::Const(a)) if a == 0.0 => e,
            (l, r) => Expr::Add(Box::new(l), Box::new(r)),
        }
    }

    /// `lhs * rhs`, folding constants.
    pub fn product(lhs: Expr, rhs: Expr) -> Expr {
        match (lhs, rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
            (Expr::Const(a), e) | (e, Expr::Const(a)) if a == 0.0 => {
                // 0 * inf stays NaN, as it does numerically
                if e.has_finite_constants() {
                    Expr::Const(0.0)
                } else {
                    Expr::Const(f64::NAN)
                }
            }
            (Expr::Const(a), e) | (e, Expr::Const(a)) if a == 1.0 => e,
            (Expr::Const(a), Expr::Mul(l, r)) | (Expr::Mul(l, r), Expr::Const(a)) => match *l {
                Expr::Const(b) => Expr::product(Expr::Const(a * b), *r),
                l => Expr::Mul(Box::new(Expr::Const(a)), Box::new(Expr::Mul(Box::new(l), r))),
            },
            // constants lead
            (e, Expr::Const(a)) => Expr::Mul(Box::new(Expr::Const(a)), Box::new(e)),
            (l, r) => Expr::Mul(Box::new(l), Box::new(r)),
        }
    }

    pub fn difference(lhs: Expr, rhs: Expr) -> Expr {
        Expr::sum(lhs, Expr::product(Expr::Const(-1.0), rhs))
    }

    pub fn quotient(lhs: Expr, rhs: Expr) -> Expr {
        Expr::product(lhs, Expr::power(rhs, -1))
    }

    /// `base^n`, folding constants.
    pub fn power(base: Expr, n: i32) -> Expr {
        match (base, n) {
            (_, 0) => Expr::Const(1.0),
            (e, 1) => e,
            (Expr::Const(c), n) => Expr::Const(c.powi(n)),
            (Expr::Pow(inner, m), n) => Expr::power(*inner, m * n),
            (e, n) => Expr::Pow(Box::new(e), n),
        }
    }

    pub fn apply(function: Function, arg: Expr) -> Expr {
        match arg {
            Expr::Const(c) => Expr::Const(function.eval(c)),
            e => Expr::Apply(function, Box::new(e)),
        }
    }

    pub fn powi(&self, n: i32) -> Expr {
        Expr::power(self.clone(), n)
    }

    pub fn sin(&self) -> Expr {
        Expr::apply(Function::Sin, self.clone())
    }

    pub fn cos(&self) -> Expr {
        Expr::apply(Function::Cos, self.clone())
    }

    pub fn exp(&self) -> Expr {
        Expr::apply(Function::Exp, self.clone())
    }

    /// True when every constant in the expression is finite.
    pub fn has_finite_constants(&self) -> bool {
        match self {
            Expr::Const(c) => c.is_finite(),
            Expr::Symbol(_) => true,
            Expr::Add(l, r) | Expr::Mul(l, r) => {
                l.has_finite_constants() && r.has_finite_constants()
            }
            Expr::Pow(e, _) | Expr::Apply(_, e) => e.has_finite_constants(),
        }
    }

    /// Names of all symbols appearing in the expression.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Symbol(name) => {
                symbols.insert(name.clone());
            }
            Expr::Add(l, r) | Expr::Mul(l, r) => {
                l.collect_symbols(symbols);
                r.collect_symbols(symbols);
            }
            Expr::Pow(e, _) | Expr::Apply(_, e) => e.collect_symbols(symbols),
        }
    }

    /// Replace every occurrence of the symbol `name` with `value`.
    pub fn subs(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Const(_) => self.clone(),
            Expr::Symbol(s) if s == name => value.clone(),
            Expr::Symbol(_) => self.clone(),
            Expr::Add(l, r) => Expr::sum(l.subs(name, value), r.subs(name, value)),
            Expr::Mul(l, r) => Expr::product(l.subs(name, value), r.subs(name, value)),
            Expr::Pow(e, n) => Expr::power(e.subs(name, value), *n),
            Expr::Apply(f, e) => Expr::apply(*f, e.subs(name, value)),
        }
    }

    /// Coefficients `c[j]` of `Σ c[j] var^j` if the expression is a polynomial
    /// in `var` with constant coefficients.
    pub fn to_polynomial(&self, var: &str) -> Option<Vec<f64>> {
        match self {
            Expr::Const(c) => Some(vec![*c]),
            Expr::Symbol(s) if s == var => Some(vec![0.0, 1.0]),
            Expr::Symbol(_) => None,
            Expr::Add(l, r) => {
                let (l, r) = (l.to_polynomial(var)?, r.to_polynomial(var)?);
                let mut coeffs = vec![0.0; l.len().max(r.len())];
                for (j, c) in l.iter().enumerate() {
                    coeffs[j] += c;
                }
                for (j, c) in r.iter().enumerate() {
                    coeffs[j] += c;
                }
                Some(coeffs)
            }
            Expr::Mul(l, r) => Some(poly_mul(&l.to_polynomial(var)?, &r.to_polynomial(var)?)),
            Expr::Pow(e, n) => {
                let base = e.to_polynomial(var)?;
                if *n >= 0 {
                    let mut coeffs = vec![1.0];
                    for _ in 0..*n {
                        coeffs = poly_mul(&coeffs, &base);
                    }
                    Some(coeffs)
                } else if base.len() == 1 {
                    Some(vec![base[0].powi(*n)])
                } else {
                    None
                }
            }
            Expr::Apply(f, e) => match e.to_polynomial(var)?.as_slice() {
                [c] => Some(vec![f.eval(*c)]),
                _ => None,
            },
        }
    }

    /// Collect a polynomial in `var` into `c_n*var^n + ... + c_0`. Expressions
    /// that are not polynomials in `var` are returned unchanged.
    pub fn collect(&self, var: &str) -> Expr {
        let coeffs = match self.to_polynomial(var) {
            Some(coeffs) => coeffs,
            None => return self.clone(),
        };
        let x = Expr::symbol(var);
        coeffs
            .iter()
            .enumerate()
            .rev()
            .fold(Expr::zero(), |acc, (j, c)| {
                Expr::sum(acc, Expr::product(Expr::Const(*c), x.powi(j as i32)))
            })
    }

    /// Compile the expression into a numeric function of `var`.
    pub fn lambdify(&self, var: &str) -> Result<Lambda, QuadratureError> {
        self.collect(var).compile(var)
    }

    fn compile(&self, var: &str) -> Result<Lambda, QuadratureError> {
        let lambda: Lambda = match self {
            Expr::Const(c) => {
                let c = *c;
                Box::new(move |_| c)
            }
            Expr::Symbol(s) if s == var => Box::new(|x| x),
            Expr::Symbol(s) => return Err(QuadratureError::UnboundSymbol(s.clone())),
            Expr::Add(l, r) => {
                let (l, r) = (l.compile(var)?, r.compile(var)?);
                Box::new(move |x| l(x) + r(x))
            }
            Expr::Mul(l, r) => {
                let (l, r) = (l.compile(var)?, r.compile(var)?);
                Box::new(move |x| l(x) * r(x))
            }
            Expr::Pow(e, n) => {
                let (e, n) = (e.compile(var)?, *n);
                Box::new(move |x| e(x).powi(n))
            }
            Expr::Apply(f, e) => {
                let (e, f) = (e.compile(var)?, *f);
                Box::new(move |x| f.eval(e(x)))
            }
        };
        Ok(lambda)
    }

    /// Turn an expression in two symbols into a binary integrand, the way the
    /// quadrature routines call it.
    pub fn bivariate<'a>(&'a self, x: &'a str, y: &'a str) -> impl Fn(&Expr, &Expr) -> Expr + 'a {
        move |xv: &Expr, yv: &Expr| self.subs(x, xv).subs(y, yv)
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_, _) => 1,
            Expr::Mul(_, _) => 2,
            Expr::Const(c) if *c < 0.0 => 2,
            Expr::Pow(_, _) => 3,
            _ => 4,
        }
    }
}

fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut coeffs = vec![0.0; a.len() + b.len() - 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            coeffs[i + j] += ca * cb;
        }
    }
    coeffs
}

fn write_operand(f: &mut fmt::Formatter, e: &Expr, min_precedence: u8) -> fmt::Result {
    if e.precedence() < min_precedence {
        write!(f, "({})", e)
    } else {
        write!(f, "{}", e)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Add(l, r) => {
                write!(f, "{}", l)?;
                match r.as_ref() {
                    Expr::Const(c) if *c < 0.0 => write!(f, " - {}", -c),
                    Expr::Mul(k, rest) => match k.as_ref() {
                        Expr::Const(c) if *c == -1.0 => {
                            write!(f, " - ")?;
                            write_operand(f, rest, 2)
                        }
                        Expr::Const(c) if *c < 0.0 => {
                            write!(f, " - {}*", -c)?;
                            write_operand(f, rest, 3)
                        }
                        _ => write!(f, " + {}", r),
                    },
                    _ => write!(f, " + {}", r),
                }
            }
            Expr::Mul(l, r) => {
                write_operand(f, l, 2)?;
                write!(f, "*")?;
                write_operand(f, r, 3)
            }
            Expr::Pow(e, n) => {
                write_operand(f, e, 4)?;
                if *n < 0 {
                    write!(f, "^({})", n)
                } else {
                    write!(f, "^{}", n)
                }
            }
            Expr::Apply(func, e) => write!(f, "{}({})", func.name(), e),
        }
    }
}

impl Zero for Expr {
    fn zero() -> Expr {
        Expr::Const(0.0)
    }

    fn is_zero(&self) -> bool {
        *self == Expr::Const(0.0)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $ctor:path) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(self, rhs)
            }
        }

        impl<'a> $trait<&'a Expr> for Expr {
            type Output = Expr;
            fn $method(self, rhs: &'a Expr) -> Expr {
                $ctor(self, rhs.clone())
            }
        }

        impl<'a> $trait<Expr> for &'a Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(self.clone(), rhs)
            }
        }

        impl<'a, 'b> $trait<&'b Expr> for &'a Expr {
            type Output = Expr;
            fn $method(self, rhs: &'b Expr) -> Expr {
                $ctor(self.clone(), rhs.clone())
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $ctor(self, Expr::Const(rhs))
            }
        }

        impl<'a> $trait<f64> for &'a Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $ctor(self.clone(), Expr::Const(rhs))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(Expr::Const(self), rhs)
            }
        }

        impl<'a> $trait<&'a Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: &'a Expr) -> Expr {
                $ctor(Expr::Const(self), rhs.clone())
            }
        }
    };
}

impl_binary_op!(Add, add, Expr::sum);
impl_binary_op!(Sub, sub, Expr::difference);
impl_binary_op!(Mul, mul, Expr::product);
impl_binary_op!(Div, div, Expr::quotient);
