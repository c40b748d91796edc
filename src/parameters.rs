//! Collection of `*.class` parameters across the whole file set.

use crate::progress::ProgressReporter;
use crate::types::{CLASS_SUFFIX, ParameterCollection, ParameterConflict, YamlFileList};

/// Fold every file's `parameters` mapping into one global map of class
/// parameter name to class-name literal.
///
/// The first binding of a name wins. Rebinding with the identical value is
/// silently accepted; rebinding with a different value is rejected with a
/// warning. The comparison is always made against the retained value, so a
/// later file repeating an already rejected value warns again.
pub fn collect_class_parameters(
    files: &YamlFileList,
    progress: &mut dyn ProgressReporter,
) -> ParameterCollection {
    let mut collection = ParameterCollection::default();

    for file in files {
        progress.file(file.path());
        let Some(parameters) = file.parameters() else {
            continue;
        };

        for (key, value) in parameters {
            let Some(name) = key.as_str() else {
                continue;
            };
            if !name.ends_with(CLASS_SUFFIX) {
                continue;
            }
            // class parameters hold plain class-name strings; anything else
            // cannot be inlined into a `class:` entry
            let Some(value) = value.as_str() else {
                continue;
            };

            match collection.parameters.get(name) {
                Some(existing) if existing != value => {
                    tracing::warn!(
                        "The parameter \"{name}\" is already defined as \"{existing}\", cannot override with \"{value}\""
                    );
                    collection.conflicts.push(ParameterConflict {
                        name: name.to_string(),
                        kept: existing.clone(),
                        rejected: value.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    collection
                        .parameters
                        .insert(name.to_string(), value.to_string());
                }
            }
        }
    }

    collection
}
