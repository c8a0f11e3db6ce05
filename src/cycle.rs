//! Repetition detection on lazy sequences

/// Detect a repetition in the values of a sequence with Brent's
/// teleporting-turtle technique: a checkpoint value teleports to the current
/// element every time a power-of-two stride is exhausted, and a cycle is
/// reported the instant the current element equals the checkpoint.
///
/// Returns `false` when a finite sequence ends without repeating; never
/// returns when fed an infinite acyclic sequence. Neither the cycle length
/// nor its offset is reported.
///
/// ```
/// use num_cfrac::has_cycle;
///
/// assert!(has_cycle([1, 2, 3, 1, 2, 3, 1, 2, 3].iter()));
/// assert!(!has_cycle([1, 2, 3, 4, 5].iter()));
/// ```
pub fn has_cycle<I: Iterator>(mut iter: I) -> bool
where
    I::Item: PartialEq,
{
    let mut checkpoint = match iter.next() {
        Some(v) => v,
        None => return false,
    };
    let mut power = 1usize;
    let mut stride = 1usize;

    loop {
        let current = match iter.next() {
            Some(v) => v,
            None => return false,
        };
        if current == checkpoint {
            return true;
        }
        if stride == power {
            checkpoint = current;
            power *= 2;
            stride = 0;
        }
        stride += 1;
    }
}
