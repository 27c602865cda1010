use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "PEER_PORTAL_DATA_DIR";

/// Directory scanned for datasets on startup
///
/// Uses `$PEER_PORTAL_DATA_DIR` when set and non-empty, otherwise `./data`.
pub fn get_data_dir() -> PathBuf {
    match env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    // Both cases live in one test so they can't race on the shared variable
    #[test]
    fn test_get_data_dir_env_override_and_default() {
        let original = env::var(DATA_DIR_ENV).ok();

        // SAFETY: only this test touches DATA_DIR_ENV, and it restores the value
        unsafe {
            env::set_var(DATA_DIR_ENV, "/srv/peer/data");
        }
        assert_eq!(get_data_dir(), PathBuf::from("/srv/peer/data"));

        unsafe {
            env::set_var(DATA_DIR_ENV, "  ");
        }
        assert_eq!(get_data_dir(), PathBuf::from("data"));

        unsafe {
            env::remove_var(DATA_DIR_ENV);
        }
        assert_eq!(get_data_dir(), PathBuf::from("data"));

        if let Some(dir) = original {
            unsafe {
                env::set_var(DATA_DIR_ENV, dir);
            }
        }
    }
}
