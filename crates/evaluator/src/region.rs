//! Coarse census-region resolution from a postal code.

use common::Region;

/// Resolve a postal code to a census region by its leading digit.
///
/// 0-2 Northeast, 3-4 South, 5-7 Midwest, 8-9 West. Empty, non-digit, or
/// otherwise unmapped codes fall back to `National`. Deterministic, no
/// failure mode.
pub fn region_for_postal(postal: &str) -> Region {
    match postal.trim().chars().next() {
        Some('0'..='2') => Region::Northeast,
        Some('3' | '4') => Region::South,
        Some('5'..='7') => Region::Midwest,
        Some('8' | '9') => Region::West,
        _ => Region::National,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_digit_maps_to_region() {
        assert_eq!(region_for_postal("02139"), Region::Northeast);
        assert_eq!(region_for_postal("10001"), Region::Northeast);
        assert_eq!(region_for_postal("30301"), Region::South);
        assert_eq!(region_for_postal("55555"), Region::Midwest);
        assert_eq!(region_for_postal("60601"), Region::Midwest);
        assert_eq!(region_for_postal("90210"), Region::West);
    }

    #[test]
    fn only_the_first_character_matters() {
        assert_eq!(region_for_postal("9"), Region::West);
        assert_eq!(region_for_postal("0xxxx"), Region::Northeast);
    }

    #[test]
    fn unmapped_input_falls_back_to_national() {
        assert_eq!(region_for_postal(""), Region::National);
        assert_eq!(region_for_postal("SW1A 1AA"), Region::National);
        assert_eq!(region_for_postal("?"), Region::National);
    }
}
