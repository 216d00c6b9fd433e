//! Loyalty points for a single purchase

/// Whole dollars above this threshold earn one point each, up to the next tier
pub const TIER_ONE_THRESHOLD: f64 = 50.0;
/// Whole dollars above this threshold earn two points each
pub const TIER_TWO_THRESHOLD: f64 = 100.0;

/// Points earned by a purchase of `amount`.
///
/// Only whole dollars count. One point per dollar between 50 and 100, two
/// points per dollar above 100. NaN, infinite and negative amounts earn
/// nothing.
pub fn calculate_points(amount: f64) -> u64 {
    if !amount.is_finite() || amount < 0.0 {
        return 0;
    }

    let dollars = amount.floor();
    let tier_one = (dollars - TIER_ONE_THRESHOLD).clamp(0.0, TIER_TWO_THRESHOLD - TIER_ONE_THRESHOLD);
    let tier_two = (dollars - TIER_TWO_THRESHOLD).max(0.0) * 2.0;

    // `as` saturates, so absurd amounts cap at u64::MAX instead of wrapping
    (tier_one + tier_two) as u64
}
