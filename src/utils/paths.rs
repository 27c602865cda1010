use std::borrow::Cow;
use std::env;
use std::path::Path;

use crate::error::ParseError;

/// Default upper bound on a single input file: 50MB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Fails with [`ParseError::TooLarge`] if `size` exceeds `max_bytes`
pub fn check_file_size(size: u64, max_bytes: u64) -> Result<(), ParseError> {
    if size > max_bytes {
        return Err(ParseError::TooLarge { size, max: max_bytes });
    }
    Ok(())
}

/// Final path component of an upload name, tolerating both separator styles
///
/// Browser uploads may carry a client-side path; only the last component names the file.
///
/// # Examples
///
/// ```
/// use peer_portal::utils::base_name;
///
/// assert_eq!(base_name("data/sales_q1.csv"), "sales_q1.csv");
/// assert_eq!(base_name("C:\\exports\\report.xlsx"), "report.xlsx");
/// assert_eq!(base_name("plain.csv"), "plain.csv");
/// ```
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Drop the final `.extension` of a file name; names without a dot are returned whole
///
/// # Examples
///
/// ```
/// use peer_portal::utils::strip_final_extension;
///
/// assert_eq!(strip_final_extension("report.v2.xlsx"), "report.v2");
/// assert_eq!(strip_final_extension("README"), "README");
/// ```
pub fn strip_final_extension(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Text after the final dot, if any
pub fn final_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    if let Some(home) = home
        && !home.is_empty()
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_check_file_size() {
        assert!(check_file_size(10, 10).is_ok());
        let err = check_file_size(11, 10).unwrap_err();
        assert!(matches!(err, ParseError::TooLarge { size: 11, max: 10 }));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.csv"), "c.csv");
        assert_eq!(base_name("c.csv"), "c.csv");
        assert_eq!(base_name("dir\\c.csv"), "c.csv");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_strip_final_extension() {
        assert_eq!(strip_final_extension("sales_q1.csv"), "sales_q1");
        assert_eq!(strip_final_extension("report.v2.xlsx"), "report.v2");
        assert_eq!(strip_final_extension("noext"), "noext");
        assert_eq!(strip_final_extension(".hidden"), "");
        assert_eq!(strip_final_extension("trailing."), "trailing");
    }

    #[test]
    fn test_final_extension() {
        assert_eq!(final_extension("a.b.CSV"), Some("CSV"));
        assert_eq!(final_extension("noext"), None);
        assert_eq!(final_extension("trailing."), Some(""));
    }

    #[test]
    fn test_format_path_with_tilde() {
        let path = PathBuf::from("/home/analyst/portal/data");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/analyst")), "~/portal/data");

        let outside = PathBuf::from("/srv/data");
        assert_eq!(format_path_with_tilde_internal(&outside, Some("/home/analyst")), "/srv/data");

        let relative = PathBuf::from("data");
        assert_eq!(format_path_with_tilde_internal(&relative, Some("")), "data");

        let home = PathBuf::from("/home/analyst");
        assert_eq!(format_path_with_tilde_internal(&home, Some("/home/analyst")), "~");
    }

    #[test]
    fn test_format_path_with_tilde_component_boundary() {
        // A home that is only a string prefix of another user's directory
        let path = PathBuf::from("/home/alice/data");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/al")), "/home/alice/data");
        assert_eq!(format_path_with_tilde_internal(&path, Some("/home/alice/")), "~/data");
    }
}
