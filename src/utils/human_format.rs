//! Human-readable formatting and parsing for memory sizes and durations

const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
const THRESHOLD: f64 = 1024.0;

/// Formats a memory value in bytes to a human-readable string with appropriate units
pub fn format_memory(bytes: f64) -> String {
    if bytes == 0.0 {
        return "0B".to_string();
    }

    let mut size = bytes.abs();
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    let sign = if bytes < 0.0 { "-" } else { "" };

    if unit_index == 0 {
        format!("{}{:.0}{}", sign, size, UNITS[unit_index])
    } else if size >= 10.0 {
        format!("{}{:.1}{}", sign, size, UNITS[unit_index])
    } else {
        format!("{}{:.2}{}", sign, size, UNITS[unit_index])
    }
}

/// Parses "512", "512B", "64KB", "1.5MB", "2 GB" into bytes (binary multiples).
/// Returns None for anything else.
pub fn parse_memory(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    let split_at = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split_at);
    let number: f64 = number.parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }

    let unit = unit.trim().to_ascii_uppercase();
    let exponent = match unit.as_str() {
        "" | "B" => 0,
        "K" | "KB" | "KIB" => 1,
        "M" | "MB" | "MIB" => 2,
        "G" | "GB" | "GIB" => 3,
        "T" | "TB" | "TIB" => 4,
        _ => return None,
    };

    Some((number * THRESHOLD.powi(exponent)) as u64)
}

/// Formats a time duration in milliseconds to a human-readable string
pub fn format_duration(millis: u64) -> String {
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        let seconds = millis as f64 / 1000.0;
        if seconds >= 10.0 {
            format!("{:.1}s", seconds)
        } else {
            format!("{:.2}s", seconds)
        }
    } else {
        let total_seconds = millis / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if seconds == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m{}s", minutes, seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory(0.0), "0B");
        assert_eq!(format_memory(512.0), "512B");
        assert_eq!(format_memory(1024.0), "1.00KB");
        assert_eq!(format_memory(1536.0), "1.50KB");
        assert_eq!(format_memory(1048576.0), "1.00MB");
        assert_eq!(format_memory(104857600.0), "100.0MB");
        assert_eq!(format_memory(10485760.0), "10.0MB");
    }

    #[rstest]
    #[case("512", Some(512))]
    #[case("512B", Some(512))]
    #[case("64KB", Some(64 * 1024))]
    #[case("64kb", Some(64 * 1024))]
    #[case("1.5MB", Some(1024 * 1024 + 512 * 1024))]
    #[case("2 GB", Some(2 * 1024 * 1024 * 1024))]
    #[case("10MiB", Some(10 * 1024 * 1024))]
    #[case("", None)]
    #[case("MB", None)]
    #[case("12 parsecs", None)]
    fn test_parse_memory(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_memory(input), expected);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(500), "500ms");
        assert_eq!(format_duration(1500), "1.50s");
        assert_eq!(format_duration(10000), "10.0s");
        assert_eq!(format_duration(60000), "1m");
        assert_eq!(format_duration(90000), "1m30s");
    }
}
