//! The layered view over vrz's two config files: a global, per-user file
//! and the repository's own `.vrz/config`. Later layers win.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bstr::BString;

use crate::error::ConfigError;
use crate::file::ConfigFile;

/// Candidate paths for the global config, in increasing precedence:
/// `${XDG_CONFIG_HOME:-~/.config}/vrz/config`, then `~/.vrzconfig`.
fn global_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let home = env::var_os("HOME").map(PathBuf::from);

    let xdg_config_home = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| home.as_ref().map(|h| h.join(".config")));
    if let Some(xdg) = xdg_config_home {
        paths.push(xdg.join("vrz").join("config"));
    }

    if let Some(home) = home {
        paths.push(home.join(".vrzconfig"));
    }

    paths
}

/// The merged view of global config plus a repository's `.vrz/config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigSet {
    layers: Vec<ConfigFile>,
}

impl ConfigSet {
    /// Load the global layers plus `<git_dir>/config`, in precedence order.
    /// Missing files are silently skipped; only malformed ones are an error.
    pub fn load(git_dir: &Path) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        for path in global_config_paths() {
            if let Some(file) = read_if_present(&path)? {
                layers.push(file);
            }
        }
        if let Some(file) = read_if_present(&git_dir.join("config"))? {
            layers.push(file);
        }
        Ok(Self { layers })
    }

    /// Highest-precedence value for `section.key`, if any layer sets it.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.layers.iter().rev().find_map(|layer| layer.get(section, key))
    }

    /// `user.name <user.email>`, or `MissingUserIdentity` if either is unset
    /// anywhere in the stack.
    pub fn user_identity(&self) -> Result<(BString, BString), ConfigError> {
        let name = self.get("user", "name").ok_or(ConfigError::MissingUserIdentity)?;
        let email = self.get("user", "email").ok_or(ConfigError::MissingUserIdentity)?;
        Ok((BString::from(name), BString::from(email)))
    }
}

fn read_if_present(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(ConfigFile::parse(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// The `[core]` defaults a fresh repository is initialized with.
pub fn default_repo_config() -> ConfigFile {
    let mut file = ConfigFile::new();
    file.set("core", "repositoryformatversion", "0");
    file.set("core", "filemode", "false");
    file.set("core", "bare", "false");
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn repo_layer_overrides_global_layer() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".vrz");
        fs::create_dir_all(&git_dir).unwrap();

        fs::write(git_dir.join("config"), b"[user]\n\tname = Repo User\n\temail = repo@example.com\n").unwrap();

        let mut set = ConfigSet::default();
        let mut global = ConfigFile::new();
        global.set("user", "name", "Global User");
        global.set("user", "email", "global@example.com");
        set.layers.push(global);
        set.layers.push(read_if_present(&git_dir.join("config")).unwrap().unwrap());

        let (name, email) = set.user_identity().unwrap();
        assert_eq!(name, BString::from("Repo User"));
        assert_eq!(email, BString::from("repo@example.com"));
    }

    #[test]
    fn missing_identity_is_an_error() {
        let set = ConfigSet::default();
        assert!(matches!(set.user_identity(), Err(ConfigError::MissingUserIdentity)));
    }

    #[test]
    fn load_skips_missing_files_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".vrz");
        fs::create_dir_all(&git_dir).unwrap();
        let set = ConfigSet::load(&git_dir).unwrap();
        assert_eq!(set.get("user", "name"), None);
    }

    #[test]
    fn load_reads_repo_local_config() {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".vrz");
        fs::create_dir_all(&git_dir).unwrap();
        let mut config = fs::File::create(git_dir.join("config")).unwrap();
        config.write_all(b"[core]\n\trepositoryformatversion = 0\n").unwrap();
        let set = ConfigSet::load(&git_dir).unwrap();
        assert_eq!(set.get("core", "repositoryformatversion"), Some("0"));
    }

    #[test]
    fn default_repo_config_matches_init_expectations() {
        let file = default_repo_config();
        assert_eq!(file.get("core", "repositoryformatversion"), Some("0"));
        assert_eq!(file.get("core", "filemode"), Some("false"));
        assert_eq!(file.get("core", "bare"), Some("false"));
    }
}
