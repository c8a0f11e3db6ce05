//! Gosper-style lazy transformations of continued fractions: the homographic
//! (single operand) and bihomographic (dual operand) engines, and the
//! arithmetic operators built on fixed instantiations of them

use super::block::{Block, DualBlock};
use super::stream::ContinuedFraction;
use num_integer::Integer;
use num_traits::{NumRef, RefNum, Signed};
use std::mem::replace;
use std::ops::{Add, Div, Mul, Sub};

impl<I: Iterator<Item = T>, T: Integer + NumRef + Clone> ContinuedFraction<I>
where
    for<'r> &'r T: RefNum<T>,
{
    /// This method returns a homographic function result on the fraction.
    /// A homographic function is `(ax + b)/(cx + d)`
    pub fn homo(self, a: T, b: T, c: T, d: T) -> ContinuedFraction<Homographic<I, T>> {
        ContinuedFraction(Homographic {
            block: Block::new(a, b, c, d),
            coeffs: self.0,
            exhausted: false,
        })
    }

    /// The successor x + 1, as the homographic transformation (1, 1, 0, 1)
    pub fn succ(self) -> ContinuedFraction<Homographic<I, T>> {
        self.homo(T::one(), T::one(), T::zero(), T::one())
    }

    /// The predecessor x - 1, as the homographic transformation (1, -1, 0, 1)
    pub fn pred(self) -> ContinuedFraction<Homographic<I, T>> {
        self.homo(T::one(), T::zero() - T::one(), T::zero(), T::one())
    }
}

impl<I: Iterator<Item = T>, T: Integer + NumRef + Signed + Clone> ContinuedFraction<I>
where
    for<'r> &'r T: RefNum<T>,
{
    /// This method returns a bihomographic function result on the fraction.
    /// A bihomographic function is `(axy + bx + cy + d)/(exy + fx + gy + h)`,
    /// where x is self and y is the other operand
    #[allow(clippy::too_many_arguments)]
    pub fn bihomo<J: Iterator<Item = T>>(
        self,
        rhs: ContinuedFraction<J>,
        a: T,
        b: T,
        c: T,
        d: T,
        e: T,
        f: T,
        g: T,
        h: T,
    ) -> ContinuedFraction<Bihomographic<I, J, T>> {
        ContinuedFraction(Bihomographic {
            state: BihomState::Dual(DualBlock::new(a, b, c, d, e, f, g, h), self.0, rhs.0),
        })
    }
}

/// Iterator of [ContinuedFraction::homo()] result
///
/// Each call to [Iterator::next] performs emit steps while the next output
/// coefficient is determined, absorbing one operand coefficient at a time
/// otherwise. An exhausted operand is folded into the state once, after which
/// the remaining rational expansion is emitted until the block degenerates.
#[derive(Debug, Clone, Copy)]
pub struct Homographic<I: Iterator<Item = T>, T> {
    block: Block<T>,
    coeffs: I,
    exhausted: bool,
}

impl<I: Iterator<Item = T>, T> Homographic<I, T> {
    pub(super) fn new(a: T, b: T, c: T, d: T, coeffs: I) -> Self {
        Homographic {
            block: Block::new(a, b, c, d),
            coeffs,
            exhausted: false,
        }
    }
}

impl<I: Iterator<Item = T>, T: Integer + NumRef + Clone> Iterator for Homographic<I, T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            // the identity state passes coefficients through untouched, and
            // stays the identity on the remaining tail
            if self.block.is_identity() && !self.exhausted {
                return self.coeffs.next();
            }
            if self.block.is_degenerate() {
                return None;
            }
            if let Some(q) = self.block.try_emit() {
                return Some(q);
            }
            if self.exhausted {
                return None;
            }
            match self.coeffs.next() {
                Some(v) => self.block.absorb(v),
                None => {
                    self.block.fold();
                    self.exhausted = true;
                }
            }
        }
    }
}

/// Iterator of [ContinuedFraction::bihomo()] result
///
/// While both operands are live the dual block emits a coefficient whenever
/// its four corner quotients agree, otherwise one operand is advanced,
/// chosen by a heuristic that estimates which one contributes more
/// uncertainty to the output bound. Once an
/// operand runs out the remaining transformation is homographic in the other
/// operand and the engine delegates to [Homographic] with the projected
/// coefficients.
#[derive(Debug, Clone)]
pub struct Bihomographic<X: Iterator<Item = T>, Y: Iterator<Item = T>, T> {
    state: BihomState<X, Y, T>,
}

#[derive(Debug, Clone)]
enum BihomState<X: Iterator<Item = T>, Y: Iterator<Item = T>, T> {
    /// both operands still feed the dual block
    Dual(DualBlock<T>, X, Y),
    /// y was exhausted, the rest is (ax + c) / (ex + g)
    XTail(Homographic<X, T>),
    /// x was exhausted, the rest is (ay + b) / (ey + f)
    YTail(Homographic<Y, T>),
    /// transient placeholder while switching states
    Switching,
}

impl<X, Y, T> Iterator for Bihomographic<X, Y, T>
where
    X: Iterator<Item = T>,
    Y: Iterator<Item = T>,
    T: Integer + NumRef + Signed + Clone,
    for<'r> &'r T: RefNum<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let advanced_x = match &mut self.state {
                BihomState::XTail(homo) => return homo.next(),
                BihomState::YTail(homo) => return homo.next(),
                BihomState::Switching => return None,
                BihomState::Dual(block, x, y) => {
                    if block.is_x_identity() {
                        return x.next();
                    }
                    if block.is_y_identity() {
                        return y.next();
                    }
                    if block.is_degenerate() {
                        return None;
                    }
                    if let Some(q) = block.try_emit() {
                        return Some(q);
                    }
                    let advance_x = block.prefer_x();
                    let pulled = if advance_x { x.next() } else { y.next() };
                    match pulled {
                        Some(v) => {
                            if advance_x {
                                block.advance_x(v);
                            } else {
                                block.advance_y(v);
                            }
                            continue;
                        }
                        None => advance_x,
                    }
                }
            };

            // the chosen operand is exhausted; project the dual block onto
            // the remaining operand and fall back to the homographic engine
            if let BihomState::Dual(block, x, y) = replace(&mut self.state, BihomState::Switching)
            {
                // the constant terms vanish at the infinite operand
                let (a, b, c, _, e, f, g, _) = block.into_coeffs();
                self.state = if advanced_x {
                    BihomState::YTail(Homographic::new(a, b, e, f, y))
                } else {
                    BihomState::XTail(Homographic::new(a, c, e, g, x))
                };
            }
        }
    }
}

impl<X, Y, T> Add<ContinuedFraction<Y>> for ContinuedFraction<X>
where
    X: Iterator<Item = T>,
    Y: Iterator<Item = T>,
    T: Integer + NumRef + Signed + Clone,
    for<'r> &'r T: RefNum<T>,
{
    type Output = ContinuedFraction<Bihomographic<X, Y, T>>;

    /// x + y as the bihomographic transformation (0,1,1,0, 0,0,0,1)
    fn add(self, rhs: ContinuedFraction<Y>) -> Self::Output {
        self.bihomo(
            rhs,
            T::zero(),
            T::one(),
            T::one(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::one(),
        )
    }
}

impl<X, Y, T> Sub<ContinuedFraction<Y>> for ContinuedFraction<X>
where
    X: Iterator<Item = T>,
    Y: Iterator<Item = T>,
    T: Integer + NumRef + Signed + Clone,
    for<'r> &'r T: RefNum<T>,
{
    type Output = ContinuedFraction<Bihomographic<X, Y, T>>;

    /// x - y as the bihomographic transformation (0,1,-1,0, 0,0,0,1)
    fn sub(self, rhs: ContinuedFraction<Y>) -> Self::Output {
        self.bihomo(
            rhs,
            T::zero(),
            T::one(),
            -T::one(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::one(),
        )
    }
}

impl<X, Y, T> Mul<ContinuedFraction<Y>> for ContinuedFraction<X>
where
    X: Iterator<Item = T>,
    Y: Iterator<Item = T>,
    T: Integer + NumRef + Signed + Clone,
    for<'r> &'r T: RefNum<T>,
{
    type Output = ContinuedFraction<Bihomographic<X, Y, T>>;

    /// x * y as the bihomographic transformation (1,0,0,0, 0,0,0,1)
    fn mul(self, rhs: ContinuedFraction<Y>) -> Self::Output {
        self.bihomo(
            rhs,
            T::one(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::one(),
        )
    }
}

impl<X, Y, T> Div<ContinuedFraction<Y>> for ContinuedFraction<X>
where
    X: Iterator<Item = T>,
    Y: Iterator<Item = T>,
    T: Integer + NumRef + Signed + Clone,
    for<'r> &'r T: RefNum<T>,
{
    type Output = ContinuedFraction<Bihomographic<X, Y, T>>;

    /// x / y as the bihomographic transformation (0,1,0,0, 0,0,1,0)
    fn div(self, rhs: ContinuedFraction<Y>) -> Self::Output {
        self.bihomo(
            rhs,
            T::zero(),
            T::one(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::zero(),
            T::one(),
            T::zero(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Phi, E};
    use core::cmp::Ordering;
    use num_rational::Ratio;

    fn ratio(p: i64, q: i64) -> ContinuedFraction<crate::RatioCoefficients<i64>> {
        ContinuedFraction::from(Ratio::new(p, q))
    }

    #[test]
    fn homo_identity_test() {
        // the identity transformation returns the exact coefficient sequence
        let e = ContinuedFraction(E {}.cfrac::<i64>());
        assert_eq!(
            e.homo(1, 0, 0, 1).0.take(8).collect::<Vec<_>>(),
            E {}.cfrac::<i64>().take(8).collect::<Vec<_>>()
        );

        let weird = ContinuedFraction(vec![3i64, -1, 2].into_iter());
        assert_eq!(
            weird.homo(1, 0, 0, 1).0.collect::<Vec<_>>(),
            vec![3, -1, 2]
        );
    }

    #[test]
    fn homo_degenerate_test() {
        // a denominator that is identically zero yields the infinite value
        let cf = ratio(22, 7).homo(1, 2, 0, 0);
        assert_eq!(cf.0.count(), 0);
    }

    #[test]
    fn homo_arithmetic_test() {
        // e - 2 = [0; 1, 2, 1, 1, 4, ...]
        let e = ContinuedFraction(E {}.cfrac::<i64>());
        assert_eq!(
            e.homo(1, -2, 0, 1).0.take(5).collect::<Vec<_>>(),
            vec![0, 1, 2, 1, 1]
        );

        // (3x + 1) / (x + 2) at x = 22/7 is 73/36 = [2; 36]
        let cf = ratio(22, 7).homo(3, 1, 1, 2);
        assert_eq!(cf.0.collect::<Vec<_>>(), vec![2, 36]);
    }

    #[test]
    fn succ_pred_test() {
        assert_eq!(
            ratio(22, 7).succ().compare(ratio(29, 7)),
            Ordering::Equal
        );
        assert_eq!(
            ratio(-22, 7).pred().compare(ratio(-29, 7)),
            Ordering::Equal
        );
        // pred is the inverse of succ
        assert_eq!(
            ratio(5, 3).succ().pred().compare(ratio(5, 3)),
            Ordering::Equal
        );
    }

    #[test]
    fn add_sub_test() {
        let cases = [
            (1, 1, 1, 1, 2, 1),
            (22, 7, 1, 3, 73, 21),
            (-22, 7, 22, 7, 0, 1),
            (-1, 2, -1, 3, -5, 6),
            (7, 22, 3, 1, 73, 22),
        ];
        for (p1, q1, p2, q2, p, q) in cases.iter() {
            let sum = ratio(*p1, *q1) + ratio(*p2, *q2);
            assert_eq!(
                sum.compare(ratio(*p, *q)),
                Ordering::Equal,
                "{}/{} + {}/{}",
                p1,
                q1,
                p2,
                q2
            );
        }

        assert_eq!(
            (ratio(22, 7) - ratio(1, 7)).compare(ratio(3, 1)),
            Ordering::Equal
        );
        assert_eq!(
            (ratio(1, 3) - ratio(1, 2)).compare(ratio(-1, 6)),
            Ordering::Equal
        );
    }

    #[test]
    fn additive_inverse_test() {
        // x + (-x) compares equal to zero
        for p in -6i64..=6 {
            for q in 1i64..=5 {
                let sum = ratio(p, q) + (-ratio(p, q));
                assert_eq!(sum.compare(ratio(0, 1)), Ordering::Equal, "{}/{}", p, q);
            }
        }
    }

    #[test]
    fn mul_div_test() {
        assert_eq!(
            (ratio(22, 7) * ratio(7, 2)).compare(ratio(11, 1)),
            Ordering::Equal
        );
        assert_eq!(
            (ratio(-22, 7) * ratio(3, 2)).compare(ratio(-33, 7)),
            Ordering::Equal
        );
        assert_eq!(
            (ratio(1, 1) / ratio(22, 7)).compare(ratio(7, 22)),
            Ordering::Equal
        );

        // division by zero yields the infinite value
        let div = ratio(3, 1) / ratio(0, 1);
        assert_eq!(div.0.count(), 0);
    }

    #[test]
    fn mul_div_roundtrip_test() {
        // (x * y) / y recovers x for nonzero y
        for p1 in -5i64..=5 {
            for p2 in 1i64..=5 {
                let x = ratio(p1, 3);
                let y = ratio(p2, 2);
                let back = (x * y) / ratio(p2, 2);
                assert_eq!(
                    back.compare(ratio(p1, 3)),
                    Ordering::Equal,
                    "{}/3 * {}/2",
                    p1,
                    p2
                );
            }
        }
    }

    #[test]
    fn golden_ratio_test() {
        // phi + 1 = phi * phi, checked on finite prefixes of the outputs
        let phi = || ContinuedFraction(Phi {}.cfrac::<i64>());
        let lhs = phi() + ContinuedFraction::from(Ratio::new(1i64, 1));
        let rhs = phi() * phi();

        let lhs_convergents = ContinuedFraction(lhs.0.take(8))
            .convergents()
            .collect::<Vec<_>>();
        let rhs_convergents = ContinuedFraction(rhs.0.take(8))
            .convergents()
            .collect::<Vec<_>>();
        assert_eq!(lhs_convergents, rhs_convergents);
        // phi^2 = [2; 1, 1, 1, ...]
        assert_eq!(lhs_convergents[0], Ratio::from(2));
        assert_eq!(lhs_convergents[1], Ratio::from(3));
    }

    #[test]
    fn bihomo_infinite_operand_test() {
        // with y infinite the transformation reduces to (ax + c) / (ex + g)
        let inf = || ContinuedFraction::<std::iter::Empty<i64>>::infinity();
        let through_bihomo = ratio(17, 5)
            .bihomo(inf(), 1, 2, 3, 4, 5, 6, 7, 8)
            .0
            .collect::<Vec<_>>();
        let through_homo = ratio(17, 5).homo(1, 3, 5, 7).0.collect::<Vec<_>>();
        assert_eq!(through_bihomo, through_homo);
        assert_eq!(
            ContinuedFraction(through_bihomo.into_iter()).compare(ratio(4, 15)),
            Ordering::Equal
        );

        // and symmetrically for an infinite x, (ay + b) / (ey + f)
        let through_bihomo = inf()
            .bihomo(ratio(17, 5), 1, 2, 3, 4, 5, 6, 7, 8)
            .0
            .collect::<Vec<_>>();
        let through_homo = ratio(17, 5).homo(1, 2, 5, 6).0.collect::<Vec<_>>();
        assert_eq!(through_bihomo, through_homo);

        // adding the infinite value yields the infinite value
        let sum = ratio(3, 1) + inf();
        assert_eq!(sum.0.count(), 0);
    }

    #[test]
    fn bihomo_identity_test() {
        let x = ratio(22, 7);
        let y = ratio(3, 2);
        let picked = x.bihomo(y, 0, 1, 0, 0, 0, 0, 0, 1);
        assert_eq!(picked.0.collect::<Vec<_>>(), vec![3, 7]);

        let x = ratio(22, 7);
        let y = ratio(3, 2);
        let picked = x.bihomo(y, 0, 0, 1, 0, 0, 0, 0, 1);
        assert_eq!(picked.0.collect::<Vec<_>>(), vec![1, 2]);
    }
}
