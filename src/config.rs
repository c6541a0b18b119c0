//! Project configuration: where the tags and technologies catalogs live.
//!
//! Read from the project's `ortfodb.yaml`. Only the catalog locations are
//! used; every other key is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{OrtfoError, OrtfoResult};
use crate::query::ReferenceKind;

pub const DEFAULT_CONFIG_FILE: &str = "ortfodb.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub tags: RepositoryConfig,
    #[serde(default)]
    pub technologies: RepositoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryConfig {
    /// Path to the catalog file
    #[serde(default)]
    pub repository: PathBuf,
}

impl Configuration {
    /// Load a configuration file, resolving relative catalog paths against
    /// the directory containing it.
    pub fn load(path: &Path) -> OrtfoResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| OrtfoError::io(path, err))?;
        let config = Self::from_yaml(&contents)?;

        let base = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let base = if base.is_absolute() {
            base
        } else {
            std::env::current_dir()
                .map_err(|err| OrtfoError::io(&base, err))?
                .join(base)
        };
        Ok(config.relative_to(&base))
    }

    pub fn from_yaml(contents: &str) -> OrtfoResult<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
            .map_err(|err| OrtfoError::Config(format!("invalid configuration: {}", err)))
    }

    /// Join relative, non-empty catalog paths onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        for repository in [&mut self.tags.repository, &mut self.technologies.repository] {
            if !repository.as_os_str().is_empty() && repository.is_relative() {
                *repository = base.join(&*repository);
            }
        }
        self
    }

    /// Catalog file backing a kind of reference.
    pub fn repository(&self, kind: ReferenceKind) -> OrtfoResult<&Path> {
        let repository = match kind {
            ReferenceKind::Tags => &self.tags.repository,
            ReferenceKind::Technologies => &self.technologies.repository,
        };
        if repository.as_os_str().is_empty() {
            return Err(OrtfoError::Config(format!(
                "no repository configured for {}",
                kind.name()
            )));
        }
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_yaml_reads_repositories() {
        let config = Configuration::from_yaml(
            "make thumbnails:\n  enabled: true\ntags:\n  repository: tags.yaml\ntechnologies:\n  repository: /abs/technologies.yaml\n",
        )
        .unwrap();
        assert_eq!(config.tags.repository, PathBuf::from("tags.yaml"));
        assert_eq!(
            config.technologies.repository,
            PathBuf::from("/abs/technologies.yaml")
        );
    }

    #[test]
    fn test_relative_to_keeps_absolute_paths() {
        let config = Configuration::from_yaml(
            "tags:\n  repository: tags.yaml\ntechnologies:\n  repository: /abs/technologies.yaml\n",
        )
        .unwrap()
        .relative_to(Path::new("/project"));
        assert_eq!(config.tags.repository, PathBuf::from("/project/tags.yaml"));
        assert_eq!(
            config.technologies.repository,
            PathBuf::from("/abs/technologies.yaml")
        );
    }

    #[test]
    fn test_missing_repository_is_a_config_error() {
        let config = Configuration::from_yaml("tags:\n  repository: tags.yaml\n").unwrap();
        assert!(config.repository(ReferenceKind::Tags).is_ok());
        let err = config.repository(ReferenceKind::Technologies).unwrap_err();
        assert!(matches!(err, OrtfoError::Config(_)));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Configuration::from_yaml("\n").unwrap(), Configuration::default());
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ortfodb.yaml");
        fs::write(&path, "tags:\n  repository: catalogs/tags.yaml\n").unwrap();

        let config = Configuration::load(&path).unwrap();
        assert_eq!(
            config.tags.repository,
            dir.path().join("catalogs/tags.yaml")
        );
    }
}
