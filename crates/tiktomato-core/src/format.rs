//! Countdown text formatting.

/// `HH:MM:SS`, zero padded. Hours do not wrap at 24.
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// `MM:SS`, zero padded. Minutes do not wrap at 60.
pub fn format_ms(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(25 * 60), "00:25:00");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }

    #[test]
    fn ms() {
        assert_eq!(format_ms(59), "00:59");
        assert_eq!(format_ms(90 * 60 + 5), "90:05");
    }
}
