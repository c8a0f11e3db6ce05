//! Data structures and algorithms for exact lazy arithmetic on
//! simple continued fractions
//!
//! A continued fraction is represented by [ContinuedFraction][ContinuedFraction],
//! a thin wrapper of an iterator that yields the coefficients on demand. All
//! arithmetic is performed by Gosper's homographic and bihomographic
//! transformations, which read only as many operand coefficients as are needed
//! to determine each output coefficient.
//!
//! # References:
//! - <https://pi.math.cornell.edu/~gautam/ContinuedFractions.pdf>
//! - <https://crypto.stanford.edu/pbc/notes/contfrac/>
//! - <https://perl.plover.com/classes/cftalk/INFO/gosper.txt>
//! - <https://github.com/blynn/frac>

mod block;
mod stream;
mod transform;

pub use stream::*;
pub use transform::*;
