//! Display helpers for resource quantities.

use std::time::{SystemTime, UNIX_EPOCH};

/// Memory sizes arrive in megabytes.
pub fn mem(megabytes: f64) -> String {
    if megabytes >= 1024.0 {
        format!("{:.1} GB", megabytes / 1024.0)
    } else {
        format!("{:.0} MB", megabytes)
    }
}

pub fn cpus(cores: f64) -> String {
    format!("{cores:.2}")
}

/// Age of an epoch-seconds timestamp, two largest units.
pub fn age(epoch_secs: f64) -> String {
    if epoch_secs <= 0.0 {
        return "-".to_string();
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    let elapsed = (now - epoch_secs).max(0.0) as u64;

    let (days, rest) = (elapsed / 86_400, elapsed % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);

    if days > 0 {
        format!("{days}d{hours}h")
    } else if hours > 0 {
        format!("{hours}h{minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

pub fn ports(ports: &[u64]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }
    ports
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Placeholder for blank backend strings so table cells stay readable.
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_switches_units_at_a_gigabyte() {
        assert_eq!(mem(30.0), "30 MB");
        assert_eq!(mem(2048.0), "2.0 GB");
    }

    #[test]
    fn cpus_keeps_two_decimals() {
        assert_eq!(cpus(0.06), "0.06");
        assert_eq!(cpus(4.0), "4.00");
    }

    #[test]
    fn age_of_zero_is_a_dash() {
        assert_eq!(age(0.0), "-");
        assert_eq!(age(-5.0), "-");
    }

    #[test]
    fn ports_join_with_commas() {
        assert_eq!(ports(&[]), "-");
        assert_eq!(ports(&[80, 443]), "80,443");
    }

    #[test]
    fn or_dash_fills_blanks() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("web"), "web");
    }
}
