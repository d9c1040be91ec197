//! Index arithmetic of binary indexed trees.
//!
//! All indices here are 1-based tree indices.

/// Value of the least significant set bit of `n` (`n & -n`).
pub fn lowbit(n: usize) -> usize {
    n & n.wrapping_neg()
}

/// Next cell on the update chain.
pub fn ascend(n: usize) -> usize {
    n + lowbit(n)
}

/// Next cell on the prefix-sum chain; clears the lowest set bit.
pub fn descend(n: usize) -> usize {
    n & n.wrapping_sub(1)
}

/// Highest power of two not greater than `n`, or 0 for `n == 0`.
pub fn highest_power_of_two_le(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1 << (usize::BITS - 1 - n.leading_zeros())
}

/// Number of tree cells visited by a prefix sum up to `n`.
pub fn descent_len(n: usize) -> usize {
    n.count_ones() as usize
}
