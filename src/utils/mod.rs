use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Lexically normalize `.` and `..` without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Make a path absolute and follow symlinks in its longest existing prefix
pub fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = normalize_path(&std::path::absolute(path)?);

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            resolved.extend(rest.iter().rev());
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

/// Extract domain from URL for display purposes
pub fn extract_domain(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Check if a command is available in PATH
pub async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/abs/cookies.txt")), PathBuf::from("/abs/cookies.txt"));
        assert_eq!(expand_home(Path::new("rel/cookies.txt")), PathBuf::from("rel/cookies.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/cookies.txt")), home.join("cookies.txt"));
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("/../etc/passwd")), PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn test_resolve_path_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sub").join("..").join("out.txt");
        let resolved = resolve_path(&target).unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap().join("out.txt"));
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://www.youtube.com/watch?v=123"),
            Some("youtube.com".to_string())
        );
        assert_eq!(extract_domain("https://youtu.be/abc"), Some("youtu.be".to_string()));
        assert_eq!(extract_domain("invalid-url"), None);
    }
}
