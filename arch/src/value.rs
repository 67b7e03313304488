/// Number of words in the simulated memory.
pub const MEMORY_SIZE: usize = 4096;

/// Range of a signed 16-bit data word.
pub const WORD_MIN: i64 = i16::MIN as i64;
pub const WORD_MAX: i64 = i16::MAX as i64;

/// Hexadecimal address as written after ORG or as a numeric MRI operand.
pub fn parse_address(s: &str) -> Option<usize> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let addr = usize::from_str_radix(s, 16).ok()?;
    (addr < MEMORY_SIZE).then_some(addr)
}

/// Operand of DEC: base 10, optional sign, must fit a 16-bit word.
pub fn parse_decimal(s: &str) -> Option<i16> {
    let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<i16>().ok()
}

/// Operand of HEX: optional leading sign, hex digits, must fit a 16-bit word.
pub fn parse_hex(s: &str) -> Option<i16> {
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = i64::from_str_radix(digits, 16).ok()?;
    let value = if neg { -value } else { value };
    (WORD_MIN..=WORD_MAX)
        .contains(&value)
        .then_some(value as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_hex_below_4096() {
        assert_eq!(parse_address("0"), Some(0));
        assert_eq!(parse_address("100"), Some(256));
        assert_eq!(parse_address("FFF"), Some(4095));
        assert_eq!(parse_address("1000"), None);
        assert_eq!(parse_address("-1"), None);
        assert_eq!(parse_address("X"), None);
        assert_eq!(parse_address(""), None);
        assert_eq!(parse_address("FFFFFFFFFFFFFFFFFFFF"), None);
    }

    #[test]
    fn decimal_range() {
        assert_eq!(parse_decimal("40"), Some(40));
        assert_eq!(parse_decimal("-32768"), Some(-32768));
        assert_eq!(parse_decimal("+32767"), Some(32767));
        assert_eq!(parse_decimal("32768"), None);
        assert_eq!(parse_decimal("40000"), None);
        assert_eq!(parse_decimal("4O"), None);
        assert_eq!(parse_decimal("-"), None);
    }

    #[test]
    fn hex_range() {
        assert_eq!(parse_hex("7FFF"), Some(0x7FFF));
        assert_eq!(parse_hex("-8000"), Some(-0x8000));
        assert_eq!(parse_hex("ffff"), None);
        assert_eq!(parse_hex("8000"), None);
        assert_eq!(parse_hex("-"), None);
        assert_eq!(parse_hex("1G"), None);
        assert_eq!(parse_hex("+1A"), Some(0x1A));
    }
}
