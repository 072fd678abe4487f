//! Functions to construct [`Integer`]s from various types.

use rug::Integer;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits, optionally preceded by a sign.
///
/// Returns [`None`] if the string is not a valid integer.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::parse(s).ok().map(Integer::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_large_integer() {
        let n = int_from_str("123456789012345678901234567890").unwrap();
        assert_eq!(n.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn parse_signed() {
        assert_eq!(int_from_str("-42"), Some(int(-42)));
    }

    #[test]
    fn parse_garbage() {
        assert_eq!(int_from_str("4x"), None);
    }
}
