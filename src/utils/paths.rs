use crate::relative_path::RelativePath;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory
///
/// # Errors
///
/// Returns an error if the path is empty or the home directory cannot be
/// determined
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if path == "~" {
        return dirs::home_dir().context("Could not find home directory");
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Printable form of a selected entry.
///
/// Relative output uses `/` on every platform; directories get a trailing
/// `/`. With `absolute`, the on-disk location is printed instead.
#[must_use]
pub fn display_entry(location: &Path, path: &RelativePath, absolute: bool) -> String {
    let mut rendered = if absolute {
        location.display().to_string()
    } else {
        path.to_string()
    };
    if !path.ends_with_file() && !rendered.ends_with('/') {
        rendered.push('/');
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_tilde("~/src").unwrap(), home.join("src"));
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(expand_tilde("/abs").unwrap(), PathBuf::from("/abs"));
        assert_eq!(expand_tilde("rel/~").unwrap(), PathBuf::from("rel/~"));
        assert!(expand_tilde("").is_err());
    }

    #[test]
    fn test_display_entry() {
        let file = RelativePath::parse(true, "src/main.rs");
        let dir = RelativePath::parse(false, "src/bin");

        assert_eq!(display_entry(Path::new("/w/src/main.rs"), &file, false), "src/main.rs");
        assert_eq!(display_entry(Path::new("/w/src/bin"), &dir, false), "src/bin/");
        assert_eq!(display_entry(Path::new("/w/src/bin"), &dir, true), "/w/src/bin/");
    }
}
