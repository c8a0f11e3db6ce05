use num_integer::Integer;
use num_traits::{NumRef, RefNum, Signed};
use std::mem::replace;

/// State of a lazy homographic transformation `(ax + b) / (cx + d)`.
/// The method is described in <https://crypto.stanford.edu/pbc/notes/contfrac/compute.html>
///
/// Each step either emits one output coefficient (when the integer part of the
/// result is determined by the current state) or absorbs one coefficient from
/// the operand. All quotients are truncated towards zero, the same rounding
/// [Integer::div_rem] uses.
#[derive(Debug, Clone, Copy)]
pub struct Block<T> {
    a: T,
    b: T,
    c: T,
    d: T,
}

impl<T> Block<T> {
    /// create a block that represents (ax + b) / (cx + d)
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Block { a, b, c, d }
    }
}

impl<T: Integer> Block<T> {
    /// whether the block represents the identity transformation x
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.a.is_one() && self.b.is_zero() && self.c.is_zero() && self.d.is_one()
    }

    /// whether the denominator is identically zero, in which case the
    /// result is the infinite value (an empty coefficient sequence)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.c.is_zero() && self.d.is_zero()
    }
}

impl<T: Integer + NumRef> Block<T>
where
    for<'r> &'r T: RefNum<T>,
{
    /// Try to produce the next output coefficient without reading the operand.
    /// The integer part is determined once the quotients a/c and b/d agree;
    /// the state is then replaced by the reciprocal of the remainder.
    pub fn try_emit(&mut self) -> Option<T> {
        if self.c.is_zero() || self.d.is_zero() {
            return None;
        }

        let (q, ra) = self.a.div_rem(&self.c);
        let (qb, rb) = self.b.div_rem(&self.d);
        if q != qb {
            return None;
        }

        self.a = replace(&mut self.c, ra);
        self.b = replace(&mut self.d, rb);
        Some(q)
    }

    /// Absorb the next operand coefficient y, substituting x = y + 1/x'
    pub fn absorb(&mut self, y: T) {
        let p = &self.a * &y + &self.b;
        let q = &self.c * &y + &self.d;
        self.b = replace(&mut self.a, p);
        self.d = replace(&mut self.c, q);
    }
}

impl<T: Clone> Block<T> {
    /// Fold an exhausted operand into the state. The operand value is the
    /// infinite one, so the transformation collapses to the constant a/c;
    /// subsequent emit steps expand that rational until the block degenerates.
    pub fn fold(&mut self) {
        self.b = self.a.clone();
        self.d = self.c.clone();
    }
}

/// State of a lazy bihomographic transformation
/// `(axy + bx + cy + d) / (exy + fx + gy + h)` on two continued fractions.
/// The method is described in <https://crypto.stanford.edu/pbc/notes/contfrac/bihom.html>
#[derive(Debug, Clone, Copy)]
pub struct DualBlock<T> {
    a: T,
    b: T,
    c: T,
    d: T,
    e: T,
    f: T,
    g: T,
    h: T,
}

impl<T> DualBlock<T> {
    /// create a block that represents (axy + bx + cy + d) / (exy + fx + gy + h)
    #[allow(clippy::too_many_arguments)]
    pub fn new(a: T, b: T, c: T, d: T, e: T, f: T, g: T, h: T) -> Self {
        DualBlock { a, b, c, d, e, f, g, h }
    }

    /// decompose into the eight coefficients, in declaration order
    pub fn into_coeffs(self) -> (T, T, T, T, T, T, T, T) {
        (self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h)
    }
}

impl<T: Integer> DualBlock<T> {
    /// whether the block represents the first operand unchanged
    #[inline]
    pub fn is_x_identity(&self) -> bool {
        self.a.is_zero() && self.b.is_one() && self.c.is_zero() && self.d.is_zero()
            && self.e.is_zero() && self.f.is_zero() && self.g.is_zero() && self.h.is_one()
    }

    /// whether the block represents the second operand unchanged
    #[inline]
    pub fn is_y_identity(&self) -> bool {
        self.a.is_zero() && self.b.is_zero() && self.c.is_one() && self.d.is_zero()
            && self.e.is_zero() && self.f.is_zero() && self.g.is_zero() && self.h.is_one()
    }

    /// whether the denominator is identically zero
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.e.is_zero() && self.f.is_zero() && self.g.is_zero() && self.h.is_zero()
    }
}

impl<T: Integer + NumRef + Signed> DualBlock<T>
where
    for<'r> &'r T: RefNum<T>,
{
    /// Try to produce the next output coefficient. It is determined once all
    /// four corner quotients a/e, b/f, c/g and d/h agree on the same integer
    /// part, since the exact result always lies within their hull.
    pub fn try_emit(&mut self) -> Option<T> {
        if self.e.is_zero() || self.f.is_zero() || self.g.is_zero() || self.h.is_zero() {
            return None;
        }

        let (q, ra) = self.a.div_rem(&self.e);
        let (qb, rb) = self.b.div_rem(&self.f);
        let (qc, rc) = self.c.div_rem(&self.g);
        let (qd, rd) = self.d.div_rem(&self.h);
        if q != qb || q != qc || q != qd {
            return None;
        }

        self.a = replace(&mut self.e, ra);
        self.b = replace(&mut self.f, rb);
        self.c = replace(&mut self.g, rc);
        self.d = replace(&mut self.h, rd);
        Some(q)
    }

    /// Decide which operand to advance when no coefficient can be emitted.
    /// Compares the output spread along each operand, cross-multiplied to
    /// avoid rational arithmetic. A termination heuristic, not an optimum.
    pub fn prefer_x(&self) -> bool {
        if self.e.is_zero() && self.g.is_zero() {
            return false;
        }
        if self.e.is_zero() && self.f.is_zero() {
            return true;
        }

        // |c/g - a/e| vs |b/f - a/e|, both scaled by efg
        let afg = &self.a * &self.f * &self.g;
        let x_spread = (&self.e * &self.f * &self.c - &afg).abs();
        let y_spread = (&self.e * &self.g * &self.b - &afg).abs();
        x_spread > y_spread
    }

    /// Absorb the next coefficient of the first operand, substituting x = v + 1/x'
    pub fn advance_x(&mut self, v: T) {
        let pa = &self.a * &v + &self.c;
        let pb = &self.b * &v + &self.d;
        let qa = &self.e * &v + &self.g;
        let qb = &self.f * &v + &self.h;
        self.c = replace(&mut self.a, pa);
        self.d = replace(&mut self.b, pb);
        self.g = replace(&mut self.e, qa);
        self.h = replace(&mut self.f, qb);
    }

    /// Absorb the next coefficient of the second operand, substituting y = w + 1/y'
    pub fn advance_y(&mut self, w: T) {
        let pa = &self.a * &w + &self.b;
        let pc = &self.c * &w + &self.d;
        let qa = &self.e * &w + &self.f;
        let qc = &self.g * &w + &self.h;
        self.b = replace(&mut self.a, pa);
        self.d = replace(&mut self.c, pc);
        self.f = replace(&mut self.e, qa);
        self.h = replace(&mut self.g, qc);
    }
}
