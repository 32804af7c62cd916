//! Dealer drawing policy.

/// The dealer stands on any total at or above this value, soft or hard.
pub const DEALER_STAND_VALUE: u8 = 17;

/// Returns whether the dealer must draw another card at `value`.
#[must_use]
pub const fn should_draw(value: u8) -> bool {
    value < DEALER_STAND_VALUE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_below_seventeen_only() {
        assert!(should_draw(0));
        assert!(should_draw(16));
        assert!(!should_draw(17));
        assert!(!should_draw(21));
        assert!(!should_draw(26));
    }
}
