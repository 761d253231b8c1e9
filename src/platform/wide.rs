//! UTF-16 helpers for Win32 string parameters and buffers
//!
//! Wide-string Win32 APIs take null-terminated UTF-16 parameters and hand
//! back fixed-size UTF-16 buffers. The conversions live here so the other
//! platform modules stay free of encoding noise.

/// Converts a Rust string into a null-terminated UTF-16 buffer suitable
/// for `PCWSTR` parameters. The buffer must outlive the Win32 call.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Reads a null-terminated UTF-16 buffer (such as
/// `PROCESSENTRY32W::szExeFile`) back into a `String`.
///
/// Stops at the first null; a buffer without a terminator is read in full.
pub fn from_wide_buf(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_wide_appends_terminator() {
        let wide = to_wide("abc");
        assert_eq!(wide, vec![0x61, 0x62, 0x63, 0]);
    }

    #[test]
    fn round_trips_non_ascii_captions() {
        let caption = "南山对讲";
        let wide = to_wide(caption);
        assert_eq!(from_wide_buf(&wide), caption);
    }

    #[test]
    fn from_wide_buf_stops_at_first_null() {
        let buf = [0x61, 0x62, 0, 0x63, 0];
        assert_eq!(from_wide_buf(&buf), "ab");
    }

    #[test]
    fn from_wide_buf_handles_unterminated_buffers() {
        let buf = [0x61, 0x62, 0x63];
        assert_eq!(from_wide_buf(&buf), "abc");
    }
}
