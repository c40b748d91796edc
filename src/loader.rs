//! Discovery and preloading of service definition files.
//!
//! Every matched file is read into memory before anything else happens:
//! the cross-file parameter map has to be complete before rewriting any
//! single file is safe.

use crate::config::ServiceConfig;
use crate::errors::ServiceError;
use crate::progress::ProgressReporter;
use crate::types::{YamlFileData, YamlFileList};
use globset::{Glob, GlobSetBuilder};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Collect all files under the configured root whose name matches one of
/// the configured patterns, sorted for a deterministic processing order.
pub fn discover_files(config: &ServiceConfig) -> Result<Vec<PathBuf>, ServiceError> {
    let mut glob_builder = GlobSetBuilder::new();
    for pattern in &config.file_patterns {
        glob_builder.add(Glob::new(pattern)?);
    }
    let glob_set = glob_builder.build()?;

    let mut paths = Vec::new();
    for entry in WalkDir::new(&config.root_directory) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if glob_set.is_match(entry.file_name().to_string_lossy().as_ref()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    Ok(paths)
}

#[derive(Debug, Default)]
pub struct YamlFileLoader;

impl YamlFileLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse every file, in order, notifying the reporter once per
    /// loaded file. A file that cannot be read or parsed fails the whole
    /// run rather than being skipped.
    pub fn load_all(
        &self,
        paths: Vec<PathBuf>,
        progress: &mut dyn ProgressReporter,
    ) -> Result<YamlFileList, ServiceError> {
        let mut files = YamlFileList::new();
        for path in paths {
            let raw_text = fs::read_to_string(&path)
                .map_err(|err| ServiceError::FileRead(path.clone(), err))?;
            let file = YamlFileData::parse(path, raw_text)?;
            progress.file(file.path());
            files.push(file);
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> ServiceConfig {
        ServiceConfig {
            root_directory: root.to_path_buf(),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn discovers_yml_and_yaml_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("config").join("packages");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("services.yml"), "services:\n").unwrap();
        fs::write(nested.join("mailer.yaml"), "parameters:\n").unwrap();
        fs::write(temp_dir.path().join("README.md"), "not yaml").unwrap();

        let paths = discover_files(&config_for(temp_dir.path())).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| {
            let ext = p.extension().unwrap().to_string_lossy();
            ext == "yml" || ext == "yaml"
        }));
    }

    #[test]
    fn discovery_order_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.yml"), "").unwrap();
        fs::write(temp_dir.path().join("a.yml"), "").unwrap();
        fs::write(temp_dir.path().join("c.yml"), "").unwrap();

        let paths = discover_files(&config_for(temp_dir.path())).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yml", "c.yml"]);
    }

    #[test]
    fn load_all_keeps_raw_text_and_structure() {
        let temp_dir = TempDir::new().unwrap();
        let content = "# comment\nparameters:\n    app.foo.class: App\\Foo\n";
        fs::write(temp_dir.path().join("parameters.yml"), content).unwrap();

        let paths = discover_files(&config_for(temp_dir.path())).unwrap();
        let files = YamlFileLoader::new()
            .load_all(paths, &mut NoProgress)
            .unwrap();

        assert_eq!(files.len(), 1);
        let file = files.iter().next().unwrap();
        assert_eq!(file.raw_text(), content);
        assert!(file.parameters().is_some());
        assert!(!file.has_services());
    }

    #[test]
    fn load_all_tolerates_custom_tags() {
        let temp_dir = TempDir::new().unwrap();
        let content = "services:\n    app.foo:\n        arguments: [!tagged mailers]\n";
        fs::write(temp_dir.path().join("services.yml"), content).unwrap();

        let paths = discover_files(&config_for(temp_dir.path())).unwrap();
        let files = YamlFileLoader::new()
            .load_all(paths, &mut NoProgress)
            .unwrap();

        assert!(files.iter().next().unwrap().has_services());
    }

    #[test]
    fn load_all_fails_on_malformed_yaml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.yml"), "services: [unclosed\n").unwrap();

        let paths = discover_files(&config_for(temp_dir.path())).unwrap();
        let result = YamlFileLoader::new().load_all(paths, &mut NoProgress);

        match result {
            Err(ServiceError::YamlParse(path, _)) => {
                assert!(path.ends_with("broken.yml"));
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
