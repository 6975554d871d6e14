//! Calling conventions for objective functions

/// How many arguments an objective takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One `f64` per dimension
    Fixed(usize),
    /// A single slice holding every dimension
    Vector,
}

/// A function that can be minimized.
///
/// `Args` is a marker naming the calling convention, so closures taking
/// separate `f64` arguments and closures taking one `&[f64]` can both be
/// passed where an objective is expected. The solver always evaluates the
/// objective on a point slice.
pub trait Objective<Args> {
    fn arity(&self) -> Arity;

    /// Evaluate at `x`; a point of the wrong length evaluates to NaN
    fn call(&self, x: &[f64]) -> f64;
}

impl<F> Objective<fn(&[f64]) -> f64> for F
where
    F: Fn(&[f64]) -> f64,
{
    fn arity(&self) -> Arity {
        Arity::Vector
    }

    fn call(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

impl<F> Objective<fn() -> f64> for F
where
    F: Fn() -> f64,
{
    fn arity(&self) -> Arity {
        Arity::Fixed(0)
    }

    fn call(&self, x: &[f64]) -> f64 {
        if x.is_empty() {
            self()
        } else {
            f64::NAN
        }
    }
}

macro_rules! scalar_objective {
    (@f64 $arg:ident) => { f64 };
    ($arity:literal; $($arg:ident),+) => {
        impl<F> Objective<fn($(scalar_objective!(@f64 $arg)),+) -> f64> for F
        where
            F: Fn($(scalar_objective!(@f64 $arg)),+) -> f64,
        {
            fn arity(&self) -> Arity {
                Arity::Fixed($arity)
            }

            fn call(&self, x: &[f64]) -> f64 {
                match x {
                    [$($arg),+] => self($(*$arg),+),
                    _ => f64::NAN,
                }
            }
        }
    };
}

scalar_objective!(1; a);
scalar_objective!(2; a, b);
scalar_objective!(3; a, b, c);
scalar_objective!(4; a, b, c, d);
scalar_objective!(5; a, b, c, d, e);
scalar_objective!(6; a, b, c, d, e, g);
