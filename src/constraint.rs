//! Constraint helpers.
//!
//! Each function returns [`SATISFIED`] (`0.0`) when the constraint holds and
//! a non-zero violation magnitude otherwise. The results are meant to be fed
//! to [`Solution::with_constraints`](crate::solution::Solution::with_constraints).
//!
//! Functions taking an `epsilon` treat values within `epsilon` of the
//! boundary as satisfied; the variants without it use [`EPS`].
//!
//! ```
//! use u_pareto::constraint;
//! use u_pareto::solution::Solution;
//!
//! let x = 4.0;
//! let s = Solution::new(vec![x * x]).with_constraints(vec![
//!     constraint::less_than_or_equal(x, 5.0),
//!     constraint::between(0.0, x, 3.0),
//! ]);
//! assert_eq!(s.constraint_violation(), 1.0);
//! ```

use crate::solution::EPS;

/// Value of a satisfied constraint.
pub const SATISFIED: f64 = 0.0;

#[inline]
fn violation(amount: f64, epsilon: f64) -> f64 {
    if amount.abs() <= epsilon {
        SATISFIED
    } else {
        amount.abs()
    }
}

/// `x == y`
pub fn equal(x: f64, y: f64) -> f64 {
    equal_within(x, y, EPS)
}

/// `x == y` within `epsilon`.
pub fn equal_within(x: f64, y: f64, epsilon: f64) -> f64 {
    violation(x - y, epsilon)
}

/// `x != y`
pub fn not_equal(x: f64, y: f64) -> f64 {
    not_equal_within(x, y, EPS)
}

/// `x != y`, where values within `epsilon` count as equal.
pub fn not_equal_within(x: f64, y: f64, epsilon: f64) -> f64 {
    if (x - y).abs() <= epsilon {
        1.0
    } else {
        SATISFIED
    }
}

/// `x <= y`
pub fn less_than_or_equal(x: f64, y: f64) -> f64 {
    less_than_or_equal_within(x, y, EPS)
}

/// `x <= y + epsilon`
pub fn less_than_or_equal_within(x: f64, y: f64, epsilon: f64) -> f64 {
    if x <= y + epsilon {
        SATISFIED
    } else {
        x - y
    }
}

/// `x >= y`
pub fn greater_than_or_equal(x: f64, y: f64) -> f64 {
    greater_than_or_equal_within(x, y, EPS)
}

/// `x >= y - epsilon`
pub fn greater_than_or_equal_within(x: f64, y: f64, epsilon: f64) -> f64 {
    if x >= y - epsilon {
        SATISFIED
    } else {
        y - x
    }
}

/// `x < y`
pub fn less_than(x: f64, y: f64) -> f64 {
    less_than_within(x, y, EPS)
}

/// `x < y`, requiring a margin of at least `epsilon`.
pub fn less_than_within(x: f64, y: f64, epsilon: f64) -> f64 {
    if x < y - epsilon {
        SATISFIED
    } else {
        x - y + epsilon
    }
}

/// `x > y`
pub fn greater_than(x: f64, y: f64) -> f64 {
    greater_than_within(x, y, EPS)
}

/// `x > y`, requiring a margin of at least `epsilon`.
pub fn greater_than_within(x: f64, y: f64, epsilon: f64) -> f64 {
    if x > y + epsilon {
        SATISFIED
    } else {
        y - x + epsilon
    }
}

/// `lower <= value <= upper`
pub fn between(lower: f64, value: f64, upper: f64) -> f64 {
    between_within(lower, value, upper, EPS)
}

/// `lower <= value <= upper`, with `epsilon` tolerance at both ends.
pub fn between_within(lower: f64, value: f64, upper: f64, epsilon: f64) -> f64 {
    if value < lower - epsilon {
        lower - value
    } else if value > upper + epsilon {
        value - upper
    } else {
        SATISFIED
    }
}

/// `value < lower || value > upper`
pub fn outside(lower: f64, value: f64, upper: f64) -> f64 {
    outside_within(lower, value, upper, EPS)
}

/// `value < lower || value > upper`, requiring a margin of `epsilon`.
///
/// The violation is the distance to the nearer bound.
pub fn outside_within(lower: f64, value: f64, upper: f64, epsilon: f64) -> f64 {
    if value < lower - epsilon || value > upper + epsilon {
        SATISFIED
    } else {
        (value - lower).abs().min((upper - value).abs()).max(epsilon)
    }
}
