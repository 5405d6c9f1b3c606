//! Overflow-checked addition of 32-bit signed integers.
//!
//! # Invariants
//! - The sum is never computed before both range guards pass.
//! - `Overflow` means the exact sum is above `i32::MAX`, `Underflow` means it
//!   is below `i32::MIN`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which side of the representable range the exact sum fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeDirection {
    /// Exact sum is greater than `i32::MAX`.
    Overflow,
    /// Exact sum is less than `i32::MIN`.
    Underflow,
}

impl RangeDirection {
    /// Stable lowercase tag, also used in log lines and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overflow => "overflow",
            Self::Underflow => "underflow",
        }
    }
}

/// Range failure raised by [`safe_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticRangeError {
    pub direction: RangeDirection,
}

impl ArithmeticRangeError {
    pub fn overflow() -> Self {
        Self {
            direction: RangeDirection::Overflow,
        }
    }

    pub fn underflow() -> Self {
        Self {
            direction: RangeDirection::Underflow,
        }
    }
}

impl Display for ArithmeticRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "addition results in an {}", self.direction.as_str())
    }
}

impl Error for ArithmeticRangeError {}

/// Adds `a` and `b`, failing instead of wrapping when the exact sum does not
/// fit in an `i32`.
///
/// # Errors
/// - `RangeDirection::Overflow` when `a + b > i32::MAX`.
/// - `RangeDirection::Underflow` when `a + b < i32::MIN`.
pub fn safe_add(a: i32, b: i32) -> Result<i32, ArithmeticRangeError> {
    if b > 0 && a > i32::MAX - b {
        return Err(ArithmeticRangeError::overflow());
    }

    if b < 0 && a < i32::MIN - b {
        return Err(ArithmeticRangeError::underflow());
    }

    Ok(a + b)
}
