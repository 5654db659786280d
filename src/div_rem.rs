use std::cmp::min;

use num_traits::PrimInt;

// Division where the quotient is clamped to a maximum and the remainder absorbs
// whatever the clamping cut off. The gregorian cycle math needs this: the last
// century of a 400-year cycle and the last year of a quadrennium are one day
// longer than their siblings, so a plain division would overshoot into a fifth
// century or a fourth year that doesn't exist.
pub(crate) trait ClampedDivRem<Q: Ord>: Sized {
    type Quotient;
    fn clamped_div_rem(self, divisor: Self, max_quotient: Q) -> (Q, Self);
}

impl<T, Q> ClampedDivRem<Q> for T
where
    T: PrimInt + TryInto<Q>,
    Q: Ord + Into<T> + Copy,
{
    type Quotient = Q;
    fn clamped_div_rem(self, divisor: T, max_quotient: Self::Quotient) -> (Self::Quotient, Self) {
        let quotient = min(self / divisor, max_quotient.into());
        let remainder = self - quotient * divisor;
        let quotient: Self::Quotient = match quotient.try_into() {
            Ok(x) => x,
            Err(_) => panic!("quotient is too large"),
        };
        (quotient, remainder)
    }
}
