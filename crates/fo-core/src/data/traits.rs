//! Traits for data operations

use std::fmt::Debug;

/// Primitive numbers a `NullableSeries` can run statistics and arithmetic on.
///
/// Arithmetic is checked: an operation that would overflow, or an integer
/// division by zero, reports `None` and the series stores an absent slot.
pub trait Numeric: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Widen to `f64` for statistics
    fn to_f64(self) -> f64;

    /// Narrow from `f64`; integers truncate toward zero and saturate
    fn from_f64(value: f64) -> Self;

    fn try_add(self, rhs: Self) -> Option<Self>;

    fn try_sub(self, rhs: Self) -> Option<Self>;

    fn try_mul(self, rhs: Self) -> Option<Self>;

    fn try_div(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                fn try_add(self, rhs: Self) -> Option<Self> {
                    self.checked_add(rhs)
                }

                fn try_sub(self, rhs: Self) -> Option<Self> {
                    self.checked_sub(rhs)
                }

                fn try_mul(self, rhs: Self) -> Option<Self> {
                    self.checked_mul(rhs)
                }

                fn try_div(self, rhs: Self) -> Option<Self> {
                    self.checked_div(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                fn try_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                fn try_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }

                fn try_mul(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }

                fn try_div(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }
            }
        )*
    };
}

impl_numeric_int!(i32, i64, u32, u64);
impl_numeric_float!(f32, f64);
