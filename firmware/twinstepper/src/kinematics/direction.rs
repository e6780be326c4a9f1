use ufmt_macros::uDebug;

/// Describes the direction for an axis movement.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// Towards increasing step positions.
    Positive,
    /// Towards decreasing step positions.
    Negative,
}
impl Direction {
    /// Returns the direction that reduces a signed distance towards zero.
    ///
    /// A distance of zero has no direction.
    pub fn towards(distance: i64) -> Option<Direction> {
        match distance {
            0 => None,
            d if d > 0 => Some(Direction::Positive),
            _ => Some(Direction::Negative),
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating [Direction].
    pub fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Positive), Just(Direction::Negative)]
    }

    #[test]
    fn test_towards() {
        assert_eq!(None, Direction::towards(0));
        assert_eq!(Some(Direction::Positive), Direction::towards(12));
        assert_eq!(Some(Direction::Negative), Direction::towards(-1));
        assert_eq!(Some(Direction::Negative), Direction::towards(i64::MIN));
    }
}
