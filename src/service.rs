//! Pipeline orchestration: discover, preload, collect, refactor, write.

use crate::config::ServiceConfig;
use crate::errors::ServiceError;
use crate::loader::{YamlFileLoader, discover_files};
use crate::parameters::collect_class_parameters;
use crate::progress::{Phase, ProgressReporter};
use crate::refactor::RefactoringService;
use crate::types::RunSummary;
use std::fs;

pub struct InlineService {
    config: ServiceConfig,
    loader: YamlFileLoader,
    refactoring: RefactoringService,
}

impl InlineService {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            config,
            loader: YamlFileLoader::new(),
            refactoring: RefactoringService::new(),
        }
    }

    /// Run the whole pipeline over the configured directory.
    ///
    /// Every matched file is preloaded before the parameter map is built,
    /// and the map is complete before the first file is rewritten. Files
    /// whose replacement text is byte-identical to the original are never
    /// written back.
    pub fn run(&self, progress: &mut dyn ProgressReporter) -> Result<RunSummary, ServiceError> {
        let paths = discover_files(&self.config)?;

        progress.begin(Phase::Preload, paths.len());
        let files = self.loader.load_all(paths, progress)?;
        progress.finish();
        tracing::info!("Found {} Yaml files", files.len());

        progress.begin(Phase::CollectParameters, files.len());
        let collection = collect_class_parameters(&files, progress);
        progress.finish();
        tracing::info!("Found {} class parameters", collection.parameters.len());

        progress.begin(Phase::Refactor, files.len());
        let mut files_changed = 0;
        for file in &files {
            let result = self.refactoring.refactor_file(file, &collection.parameters);
            progress.file(file.path());
            if result.new_text != file.raw_text() {
                fs::write(file.path(), &result.new_text)
                    .map_err(|err| ServiceError::FileWrite(file.path().to_path_buf(), err))?;
                files_changed += 1;
            }
        }
        progress.finish();

        Ok(RunSummary {
            files: files.len(),
            class_parameters: collection.parameters.len(),
            conflicts: collection.conflicts.len(),
            files_changed,
        })
    }
}

impl Default for InlineService {
    fn default() -> Self {
        Self::new()
    }
}
