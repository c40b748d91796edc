//! Text-preserving inline refactoring.
//!
//! All rewriting happens on the original file text, guided by the
//! load-time structural snapshot. Re-serializing the parsed document would
//! lose comments, quoting, and key order, which the files in a Symfony
//! config tree are full of.

use crate::types::{ClassParameterMap, FileRefactorResult, YamlFileData};
use regex::{Captures, Regex};

pub struct RefactoringService {
    class_reference: Regex,
    parameter_line: Regex,
    parameters_header: Regex,
}

impl Default for RefactoringService {
    fn default() -> Self {
        Self {
            // `class: '%app.foo.class%'`, single or double quoted
            class_reference: Regex::new(r#"class: (['"]%(.*\.class)%['"])"#).unwrap(),
            // a whole `app.foo.class: value` declaration line
            parameter_line: Regex::new(r" *(.*\.class): .*").unwrap(),
            // a bare `parameters:` header and the blank lines after it
            parameters_header: Regex::new(r"(?m)^parameters:\n*").unwrap(),
        }
    }
}

impl RefactoringService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the replacement text for one file. The input text comes
    /// back unchanged when the file declares no services or when nothing
    /// matches.
    ///
    /// The declaration lines are only dropped after the `class:` entries
    /// have been rewritten; the two patterns target different line shapes
    /// and must not see each other's output the other way around.
    pub fn refactor_file(
        &self,
        file: &YamlFileData,
        parameters: &ClassParameterMap,
    ) -> FileRefactorResult {
        if !file.has_services() {
            return FileRefactorResult {
                new_text: file.raw_text().to_string(),
                inlined: 0,
                removed_parameters: 0,
                unresolved: Vec::new(),
            };
        }

        let mut inlined = 0;
        let mut unresolved = Vec::new();
        let text = self
            .class_reference
            .replace_all(file.raw_text(), |caps: &Captures<'_>| {
                let name = &caps[2];
                match parameters.get(name) {
                    Some(value) => {
                        inlined += 1;
                        format!("class: {value}")
                    }
                    None => {
                        tracing::warn!("Class parameter \"{name}\" not found");
                        unresolved.push(name.to_string());
                        caps[0].to_string()
                    }
                }
            });

        // drop declarations that were hoisted into the global map; the
        // line's trailing newline survives, the header cleanup below
        // absorbs the blank lines it leaves behind
        let mut removed_parameters = 0;
        let text = self
            .parameter_line
            .replace_all(&text, |caps: &Captures<'_>| {
                if parameters.contains_key(&caps[1]) {
                    removed_parameters += 1;
                    String::new()
                } else {
                    caps[0].to_string()
                }
            });

        // remainder check against the pre-edit structural snapshot, not
        // the text edited above
        let all_inlined = match file.parameters() {
            None => true,
            Some(mapping) => mapping.keys().all(|key| {
                key.as_str()
                    .is_some_and(|name| parameters.contains_key(name))
            }),
        };

        let new_text = if all_inlined {
            self.parameters_header.replace_all(&text, "").into_owned()
        } else {
            text.into_owned()
        };

        FileRefactorResult {
            new_text,
            inlined,
            removed_parameters,
            unresolved,
        }
    }
}
