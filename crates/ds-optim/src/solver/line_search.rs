//! One-dimensional searches along a direction

const GOLDEN: f64 = 1.618_034;
const GROW_LIMIT: f64 = 100.0;
const TINY: f64 = 1e-20;
const BRACKET_MAX_STEPS: usize = 50;

const CGOLD: f64 = 0.381_966_0;
const ZEPS: f64 = 1e-11;
const BRENT_MAX_ITER: usize = 500;

/// Three abscissas with `b` between `a` and `c` and `g(b)` no greater than
/// `g(a)` or `g(c)`; `fb` is `g(b)`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bracket {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fb: f64,
}

/// Walk downhill from `a` and `b` with golden and parabolic steps until the
/// minimum is enclosed. Gives up after a fixed number of steps on functions
/// with no enclosing bracket and returns the last triple.
pub(crate) fn bracket<G: FnMut(f64) -> f64>(g: &mut G, mut a: f64, mut fa: f64, mut b: f64) -> Bracket {
    let mut fb = g(b);
    if fb > fa {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut c = b + GOLDEN * (b - a);
    let mut fc = g(c);

    for _ in 0..BRACKET_MAX_STEPS {
        if fb <= fc {
            break;
        }
        let r = (b - a) * (fb - fc);
        let q = (b - c) * (fb - fa);
        let denom = 2.0 * (q - r).abs().max(TINY).copysign(q - r);
        let mut u = b - ((b - c) * q - (b - a) * r) / denom;
        let u_limit = b + GROW_LIMIT * (c - b);
        let mut fu;

        if (b - u) * (u - c) > 0.0 {
            // parabolic minimum between b and c
            fu = g(u);
            if fu < fc {
                return Bracket { a: b, b: u, c, fb: fu };
            } else if fu > fb {
                return Bracket { a, b, c: u, fb };
            }
            u = c + GOLDEN * (c - b);
            fu = g(u);
        } else if (c - u) * (u - u_limit) > 0.0 {
            fu = g(u);
            if fu < fc {
                b = c;
                c = u;
                u = c + GOLDEN * (c - b);
                fb = fc;
                fc = fu;
                fu = g(u);
            }
        } else if (u - u_limit) * (u_limit - c) >= 0.0 {
            u = u_limit;
            fu = g(u);
        } else {
            u = c + GOLDEN * (c - b);
            fu = g(u);
        }

        a = b;
        b = c;
        c = u;
        fa = fb;
        fb = fc;
        fc = fu;
    }

    Bracket { a, b, c, fb }
}

/// Brent's method: parabolic interpolation with golden-section fallback.
/// Returns the abscissa of the minimum and its value.
pub(crate) fn brent<G: FnMut(f64) -> f64>(g: &mut G, bracket: Bracket, tol: f64) -> (f64, f64) {
    let tol = tol.max(f64::EPSILON.sqrt());
    let mut a = bracket.a.min(bracket.c);
    let mut b = bracket.a.max(bracket.c);
    let (mut x, mut w, mut v) = (bracket.b, bracket.b, bracket.b);
    let (mut fx, mut fw, mut fv) = (bracket.fb, bracket.fb, bracket.fb);
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for _ in 0..BRENT_MAX_ITER {
        let xm = 0.5 * (a + b);
        let tol1 = tol * x.abs() + ZEPS;
        let tol2 = 2.0 * tol1;
        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            break;
        }

        if e.abs() > tol1 {
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let e_prev = e;
            e = d;
            if p.abs() >= (0.5 * q * e_prev).abs() || p <= q * (a - x) || p >= q * (b - x) {
                e = if x >= xm { a - x } else { b - x };
                d = CGOLD * e;
            } else {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
            }
        } else {
            e = if x >= xm { a - x } else { b - x };
            d = CGOLD * e;
        }

        let u = if d.abs() >= tol1 { x + d } else { x + tol1.copysign(d) };
        let fu = g(u);

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    (x, fx)
}

/// Backtracking until the Armijo sufficient-decrease condition holds.
/// `slope` is the directional derivative at `alpha = 0`, negative for a
/// descent direction. `None` when no step up to the cap is acceptable.
pub(crate) fn backtrack<G: FnMut(f64) -> f64>(g: &mut G, f0: f64, slope: f64) -> Option<(f64, f64)> {
    const C1: f64 = 1e-4;
    const SHRINK: f64 = 0.5;
    const MAX_STEPS: usize = 60;

    let mut alpha = 1.0;
    for _ in 0..MAX_STEPS {
        let f = g(alpha);
        if f <= f0 + C1 * alpha * slope {
            return Some((alpha, f));
        }
        alpha *= SHRINK;
    }
    None
}
