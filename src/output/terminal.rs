//! Field formatting for the CSV listing.

/// Quote `value` and pad it on the left to `width` columns, so the
/// address, netmask and prefix columns of the listing line up.
///
/// Values wider than `width` are quoted but never truncated.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("1.0.1.0", 12), "   \"1.0.1.0\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("1.0.1.0", 9), "\"1.0.1.0\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(
            format_field(Ipv4Addr::new(255, 255, 255, 255), 5),
            "\"255.255.255.255\""
        );
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(24u8, 5), " \"24\"");
    }
}
