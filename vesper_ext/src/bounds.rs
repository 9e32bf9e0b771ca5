use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds<T> {
    pub value: T,
    pub min: T,
    pub max: T,
}

impl<T: Display> Display for OutOfBounds<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not within [{}, {}]", self.value, self.min, self.max)
    }
}

pub trait CheckBounds: PartialOrd + Copy {
    /// # Errors
    /// if `self` is less than `min`, greater than `max`, or incomparable to
    /// either (e.g. a NaN float)
    fn check_bounds(self, min: Self, max: Self) -> Result<Self, OutOfBounds<Self>> {
        if min <= self && self <= max {
            return Ok(self);
        }
        Err(OutOfBounds {
            value: self,
            min,
            max,
        })
    }

    /// # Errors
    /// if `self` is greater than `max`, or incomparable to it
    fn check_at_most(self, max: Self) -> Result<Self, OutOfBounds<Self>>
    where
        Self: Bounded,
    {
        self.check_bounds(Self::LOWEST, max)
    }
}

impl<T> CheckBounds for T where T: PartialOrd + Copy {}

pub trait Bounded {
    const LOWEST: Self;
}

impl Bounded for usize {
    const LOWEST: Self = Self::MIN;
}

impl Bounded for i64 {
    const LOWEST: Self = Self::MIN;
}

impl Bounded for f64 {
    const LOWEST: Self = Self::NEG_INFINITY;
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{CheckBounds, OutOfBounds};

    #[rstest]
    #[case(1, Ok(1))]
    #[case(100, Ok(100))]
    #[case(0, Err(OutOfBounds { value: 0, min: 1, max: 100 }))]
    #[case(101, Err(OutOfBounds { value: 101, min: 1, max: 100 }))]
    fn usize_check_bounds(
        #[case] input: usize,
        #[case] expected: Result<usize, OutOfBounds<usize>>,
    ) {
        assert_eq!(input.check_bounds(1, 100), expected);
    }

    #[rstest]
    #[case(25, true)]
    #[case(26, false)]
    #[case(0, true)]
    fn usize_check_at_most(#[case] input: usize, #[case] ok: bool) {
        assert_eq!(input.check_at_most(25).is_ok(), ok);
    }

    #[rstest]
    #[case(0.5, true)]
    #[case(-2.0, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn f64_check_bounds(#[case] input: f64, #[case] ok: bool) {
        assert_eq!(input.check_bounds(-1.0, 1.0).is_ok(), ok);
    }

    #[test]
    fn out_of_bounds_display() {
        let error = 26_usize.check_bounds(0, 25).expect_err("26 is out of bounds");
        assert_eq!(error.to_string(), "26 is not within [0, 25]");
    }
}
