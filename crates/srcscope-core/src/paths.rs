//! Common filesystem locations used by srcscope.

use std::path::PathBuf;

/// Base directory for srcscope state.
///
/// Defaults to `~/.config/srcscope`, but can be overridden via
/// `SRCSCOPE_DIR` for testing or multi-instance setups.
pub fn srcscope_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SRCSCOPE_DIR") {
        return PathBuf::from(dir);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config").join("srcscope")
}

/// Path to the default source group configuration file.
pub fn config_path() -> PathBuf {
    srcscope_dir().join("config.toml")
}

#[doc(hidden)]
pub fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srcscope_dir_env_override() {
        let _lock = test_env_lock();
        std::env::set_var("SRCSCOPE_DIR", "/tmp/srcscope-test-dir");

        assert_eq!(srcscope_dir(), PathBuf::from("/tmp/srcscope-test-dir"));
        assert_eq!(
            config_path(),
            PathBuf::from("/tmp/srcscope-test-dir/config.toml")
        );

        std::env::remove_var("SRCSCOPE_DIR");
    }
}
