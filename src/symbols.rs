//! Predefined irrational math constants as continued fraction
//! coefficient iterators

use core::marker::PhantomData;
use num_traits::{Num, NumRef, One};

/// Euler's number e = [2; 1, 2, 1, 1, 4, 1, 1, 6, ...]
pub struct E {}

/// The golden ratio phi = [1; 1, 1, 1, ...]
pub struct Phi {}

impl E {
    pub fn cfrac<T: Num>(&self) -> ECoefficients<T> {
        ECoefficients { i: T::zero(), m: 0 }
    }
}

impl Phi {
    pub fn cfrac<T: One>(&self) -> PhiCoefficients<T> {
        PhiCoefficients { _marker: PhantomData }
    }
}

/// Coefficients of e, following the pattern 2, (1, 2k, 1) for k = 1, 2, ..
#[derive(Debug, Clone)]
pub struct ECoefficients<T> {
    i: T,
    m: u8,
}

impl<T: Num + NumRef + Clone> Iterator for ECoefficients<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.i.is_zero() {
            self.i = T::one() + T::one();
            Some(T::one() + T::one()) // return 2
        } else {
            let result = match self.m {
                1 => Some(self.i.clone()),
                _ => Some(T::one()),
            };

            if self.m == 2 {
                self.m = 0;
                self.i = T::one() + T::one() + &self.i;
            } else {
                self.m += 1;
            }

            result
        }
    }
}

/// Coefficients of the golden ratio, the all-ones sequence
#[derive(Debug, Clone)]
pub struct PhiCoefficients<T> {
    _marker: PhantomData<T>,
}

impl<T: One> Iterator for PhiCoefficients<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(T::one())
    }
}
