// 2.0 math.rs: wad fixed point arithmetic. prices, shares, and values are u128
// integers at scale 1e18; multiply-then-divide widens to 256 bits so the
// intermediate product never overflows. every division names its rounding direction.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// One whole unit in wad fixed point.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Rounding direction for a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
    /// Bump to the next integer when a remainder exists.
    Up,
}

/// `a * b / divisor` with a 256-bit intermediate. Returns `None` when the
/// divisor is zero or the result does not fit in a u128.
pub fn mul_div(a: u128, b: u128, divisor: u128, rounding: Rounding) -> Option<u128> {
    if divisor == 0 {
        return None;
    }

    let product = U256::from(a) * U256::from(b);
    let div = U256::from(divisor);
    let quotient = product / div;

    let result = match rounding {
        Rounding::Down => quotient,
        Rounding::Up => {
            if product % div != U256::zero() {
                quotient + U256::one()
            } else {
                quotient
            }
        }
    };

    if result.bits() > 128 {
        return None;
    }
    Some(result.as_u128())
}

/// `a * b / 1e18`.
pub fn wad_mul(a: u128, b: u128, rounding: Rounding) -> Option<u128> {
    mul_div(a, b, WAD, rounding)
}

/// `a * 1e18 / b`.
pub fn wad_div(a: u128, b: u128, rounding: Rounding) -> Option<u128> {
    mul_div(a, WAD, b, rounding)
}

// 2.1: decimal boundary. external quotes arrive as Decimal and wad values
// render back through Decimal for humans.

/// Convert a non-negative decimal to wad fixed point, truncating precision
/// beyond 18 decimal places. `None` for negative or oversized values.
pub fn wad_from_decimal(value: Decimal) -> Option<u128> {
    if value.is_sign_negative() {
        return None;
    }
    let scaled = value.checked_mul(Decimal::from(WAD as u64))?;
    scaled.trunc().to_u128()
}

/// Convert a wad value to decimal. `None` when it exceeds what a Decimal
/// can carry at scale 18.
pub fn decimal_from_wad(wad: u128) -> Option<Decimal> {
    let raw = i128::try_from(wad).ok()?;
    Decimal::try_from_i128_with_scale(raw, 18).ok()
}
