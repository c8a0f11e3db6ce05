mod cont_frac;
mod cycle;
pub mod symbols;

pub use cont_frac::{
    AbsCoefficients, Bihomographic, ContinuedFraction, Convergents, Homographic,
    NegatedCoefficients, RatioCoefficients,
};
pub use cycle::has_cycle;
