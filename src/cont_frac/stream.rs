//! The lazy coefficient-stream representation of a simple continued fraction,
//! with its ordering relation, constructors and convergent generator

use core::cmp::Ordering;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{NumRef, RefNum, Signed};
use std::mem::replace;
use std::ops::Neg;

/// A simple continued fraction `a0 + 1/(a1 + 1/(a2 + ...))` represented as a
/// wrapper of an iterator that returns the coefficients on demand.
///
/// The sequence may be finite or infinite: stopping at any point denotes the
/// exact value of the partial expansion, and the empty sequence denotes the
/// positive infinite value. Every coefficient after the first one must be
/// strictly positive; a negative number is encoded as the coefficient-wise
/// negation of the expansion of its absolute value, e.g. -22/7 = [-3; -7].
/// Feeding a sequence that violates this invariant into the arithmetic
/// operations produces unspecified (but memory-safe) results.
#[derive(Debug, Clone, Copy)]
pub struct ContinuedFraction<I: Iterator>(pub I);

impl<T> ContinuedFraction<std::iter::Empty<T>> {
    /// The infinite value, i.e. the empty coefficient sequence
    pub fn infinity() -> Self {
        ContinuedFraction(std::iter::empty())
    }
}

impl<T: Integer> From<T> for ContinuedFraction<std::iter::Once<T>> {
    fn from(t: T) -> Self {
        ContinuedFraction(std::iter::once(t))
    }
}

/// Iterator over the coefficients of a rational number, produced by the
/// classical expansion: emit the truncated quotient of n/d, then continue
/// with (d, n mod d) until the remainder reaches zero.
#[derive(Debug, Clone, Copy)]
pub struct RatioCoefficients<T> {
    numer: T,
    denom: T,
}

impl<T: Integer + NumRef> Iterator for RatioCoefficients<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.denom.is_zero() {
            return None;
        }
        let (q, r) = self.numer.div_rem(&self.denom);
        self.numer = replace(&mut self.denom, r);
        Some(q)
    }
}

impl<T: Integer + NumRef + Clone> From<Ratio<T>> for ContinuedFraction<RatioCoefficients<T>>
where
    for<'r> &'r T: RefNum<T>,
{
    fn from(r: Ratio<T>) -> Self {
        let (numer, denom) = r.into();
        ContinuedFraction(RatioCoefficients { numer, denom })
    }
}

/// Iterator that negates every coefficient, produced by unary minus
/// on a [ContinuedFraction]
#[derive(Debug, Clone, Copy)]
pub struct NegatedCoefficients<I> {
    coeffs: I,
}

impl<I: Iterator<Item = T>, T: Signed> Iterator for NegatedCoefficients<I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.coeffs.next().map(|v| -v)
    }
}

/// Iterator that takes the absolute value of every coefficient,
/// see [ContinuedFraction::abs()]
#[derive(Debug, Clone, Copy)]
pub struct AbsCoefficients<I> {
    coeffs: I,
}

impl<I: Iterator<Item = T>, T: Signed> Iterator for AbsCoefficients<I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.coeffs.next().map(|v| v.abs())
    }
}

impl<I: Iterator<Item = T>, T: Signed> Neg for ContinuedFraction<I> {
    type Output = ContinuedFraction<NegatedCoefficients<I>>;

    /// Coefficient-wise negation. Equivalent to the homographic
    /// transformation (-1, 0, 0, 1) but reads nothing ahead.
    fn neg(self) -> Self::Output {
        ContinuedFraction(NegatedCoefficients { coeffs: self.0 })
    }
}

impl<I: Iterator<Item = T>, T: Signed> ContinuedFraction<I> {
    /// Coefficient-wise absolute value
    pub fn abs(self) -> ContinuedFraction<AbsCoefficients<I>> {
        ContinuedFraction(AbsCoefficients { coeffs: self.0 })
    }

    /// The sign of the number as a single-coefficient continued fraction,
    /// determined from at most the first two coefficients. A leading zero
    /// with an empty tail is zero itself; a leading zero followed by another
    /// coefficient takes that coefficient's sign; the empty sequence (the
    /// infinite value) is positive.
    pub fn signum(mut self) -> ContinuedFraction<std::iter::Once<T>> {
        let sign = match self.0.next() {
            None => T::one(),
            Some(a) => {
                if a.is_zero() {
                    match self.0.next() {
                        None => T::zero(),
                        Some(b) => b.signum(),
                    }
                } else {
                    a.signum()
                }
            }
        };
        ContinuedFraction(std::iter::once(sign))
    }
}

impl<I: Iterator<Item = T>, T: Integer> ContinuedFraction<I> {
    /// Compare two continued fractions by walking their coefficients pairwise.
    ///
    /// Successive convergents alternate between over- and under-estimating
    /// the value, so the sense of the comparison flips at every level where
    /// the leading coefficients agree; a sequence that terminates while the
    /// other continues acts as the infinite value at that level. The walk is
    /// sign-aware so that mirrored negative expansions order correctly.
    ///
    /// Two caveats are inherent to the coefficient-wise walk: sequences are
    /// not normalized first, so distinct expansions of the same value that
    /// differ near a termination boundary (such as [3] and [2; 1]) do not
    /// compare equal; and comparing two equal infinite expansions never
    /// terminates.
    pub fn compare<J: Iterator<Item = T>>(self, rhs: ContinuedFraction<J>) -> Ordering {
        let mut lhs = self.0;
        let mut rhs = rhs.0;
        let mut at_top = true;
        let mut depth_odd = false;

        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(b)) => {
                    // the left tail is the infinite value at this level
                    if at_top {
                        return Ordering::Greater;
                    }
                    let ord = if b > T::zero() { Ordering::Less } else { Ordering::Greater };
                    return if depth_odd { ord } else { ord.reverse() };
                }
                (Some(a), None) => {
                    if at_top {
                        return Ordering::Less;
                    }
                    let ord = if a > T::zero() { Ordering::Greater } else { Ordering::Less };
                    return if depth_odd { ord } else { ord.reverse() };
                }
                (Some(a), Some(b)) => {
                    if a != b {
                        let ord = a.cmp(&b);
                        if at_top {
                            return ord;
                        }
                        // reciprocation at each level reverses the order of
                        // same-signed tails but preserves mixed signs
                        let same_sign = (a > T::zero() && b > T::zero())
                            || (a < T::zero() && b < T::zero());
                        return match (same_sign, depth_odd) {
                            (true, true) | (false, false) => ord.reverse(),
                            _ => ord,
                        };
                    }
                    at_top = false;
                    depth_odd = !depth_odd;
                }
            }
        }
    }
}

impl<I, J, T> PartialEq<ContinuedFraction<J>> for ContinuedFraction<I>
where
    I: Iterator<Item = T> + Clone,
    J: Iterator<Item = T> + Clone,
    T: Integer,
{
    fn eq(&self, other: &ContinuedFraction<J>) -> bool {
        self.clone().compare(other.clone()) == Ordering::Equal
    }
}

impl<I, J, T> PartialOrd<ContinuedFraction<J>> for ContinuedFraction<I>
where
    I: Iterator<Item = T> + Clone,
    J: Iterator<Item = T> + Clone,
    T: Integer,
{
    fn partial_cmp(&self, other: &ContinuedFraction<J>) -> Option<Ordering> {
        Some(self.clone().compare(other.clone()))
    }
}

/// Iterator of convergents of a [ContinuedFraction], one rational
/// approximation per consumed coefficient
#[derive(Debug, Clone, Copy)]
pub struct Convergents<I: Iterator<Item = T>, T> {
    coeffs: I,
    hm1: T,
    hm2: T,
    km1: T,
    km2: T,
}

impl<I: Iterator<Item = T>, T: Integer + NumRef + Clone> Iterator for Convergents<I, T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Item = Ratio<T>;

    fn next(&mut self) -> Option<Ratio<T>> {
        let a = self.coeffs.next()?;
        let h = &a * &self.hm1 + &self.hm2;
        let k = a * &self.km1 + &self.km2;
        self.hm2 = replace(&mut self.hm1, h.clone());
        self.km2 = replace(&mut self.km1, k.clone());
        Some(Ratio::new(h, k))
    }
}

impl<I: Iterator<Item = T>, T: Integer + NumRef + Clone> ContinuedFraction<I>
where
    for<'r> &'r T: RefNum<T>,
{
    /// Returns an iterator of the convergents h_n/k_n, following the
    /// recurrences h_n = a_n h_{n-1} + h_{n-2} and k_n = a_n k_{n-1} + k_{n-2}.
    /// Denominators grow strictly in magnitude, and any rational closer to
    /// the value than convergent n has a denominator exceeding k_n.
    pub fn convergents(self) -> Convergents<I, T> {
        Convergents {
            coeffs: self.0,
            hm1: T::one(),
            hm2: T::zero(),
            km1: T::zero(),
            km2: T::one(),
        }
    }
}
