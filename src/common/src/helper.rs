#[macro_export]
macro_rules! ensure {
    ( $x:expr, $y:expr ) => {{
        if !$x {
            Err($y)
        } else {
            Ok(())
        }
    }};
}

/// Parses a hex string, with or without the `0x` prefix.
#[cfg(feature = "serialize")]
pub fn from_hex(s: &str) -> Result<Vec<u8>, crate::Error> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|_| crate::Error::CannotParseHexString)
}
