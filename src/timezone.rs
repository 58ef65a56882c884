//! Default timezone resolution
//!
//! Requests that do not name a timezone fall back to the local IANA zone.
//! The lookup is a capability handed to the resolver so tests can pin it.

use std::path::Path;

/// Source of the fallback IANA timezone name
pub trait TimezoneProvider: Send + Sync {
    /// The zone name, or `None` when it cannot be determined
    fn resolve(&self) -> Option<String>;
}

/// Always returns the same zone (or none)
#[derive(Debug, Clone, Default)]
pub struct FixedTimezone(Option<String>);

impl FixedTimezone {
    /// Provider that resolves to `zone`
    pub fn new(zone: impl Into<String>) -> Self {
        Self(Some(zone.into()))
    }

    /// Provider that never resolves a zone
    pub fn none() -> Self {
        Self(None)
    }
}

impl TimezoneProvider for FixedTimezone {
    fn resolve(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the host's zone from `TZ`, then `/etc/timezone`, then the
/// `/etc/localtime` symlink target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimezone;

impl TimezoneProvider for SystemTimezone {
    fn resolve(&self) -> Option<String> {
        let resolved = std::env::var("TZ")
            .ok()
            .and_then(|tz| normalize_zone(&tz))
            .or_else(|| {
                std::fs::read_to_string("/etc/timezone")
                    .ok()
                    .and_then(|tz| normalize_zone(&tz))
            })
            .or_else(|| {
                std::fs::read_link("/etc/localtime")
                    .ok()
                    .and_then(|target| zone_from_zoneinfo_path(&target))
            });

        tracing::debug!(timezone = ?resolved, "Resolved local timezone");
        resolved
    }
}

/// Accept names like `Europe/Berlin` or `UTC`; reject POSIX rules and paths
fn normalize_zone(raw: &str) -> Option<String> {
    let zone = raw.trim().trim_start_matches(':');
    if zone.is_empty() || zone.starts_with('/') {
        return None;
    }
    let valid = zone
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+'));
    valid.then(|| zone.to_string())
}

fn zone_from_zoneinfo_path(path: &Path) -> Option<String> {
    let text = path.to_str()?;
    let (_, zone) = text.split_once("zoneinfo/")?;
    normalize_zone(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fixed_timezone() {
        assert_eq!(
            FixedTimezone::new("America/New_York").resolve(),
            Some("America/New_York".to_string())
        );
        assert_eq!(FixedTimezone::none().resolve(), None);
    }

    #[test]
    fn test_normalize_zone() {
        assert_eq!(normalize_zone("Europe/Berlin\n"), Some("Europe/Berlin".into()));
        assert_eq!(normalize_zone(":UTC"), Some("UTC".into()));
        assert_eq!(normalize_zone("Etc/GMT+5"), Some("Etc/GMT+5".into()));
        assert_eq!(normalize_zone(""), None);
        assert_eq!(normalize_zone("/usr/share/zoneinfo/UTC"), None);
        assert_eq!(normalize_zone("EST5EDT,M3.2.0,M11.1.0"), None);
    }

    #[test]
    fn test_zone_from_zoneinfo_path() {
        let path = PathBuf::from("/usr/share/zoneinfo/Asia/Tokyo");
        assert_eq!(zone_from_zoneinfo_path(&path), Some("Asia/Tokyo".into()));

        let path = PathBuf::from("/var/db/timezone/zoneinfo/America/Chicago");
        assert_eq!(zone_from_zoneinfo_path(&path), Some("America/Chicago".into()));

        let path = PathBuf::from("/etc/other");
        assert_eq!(zone_from_zoneinfo_path(&path), None);
    }
}
