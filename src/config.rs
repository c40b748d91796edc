use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory scanned recursively for service definition files
    pub root_directory: PathBuf,
    /// File name patterns selecting the files to process
    pub file_patterns: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            root_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            file_patterns: vec!["*.yml".to_string(), "*.yaml".to_string()],
        }
    }
}
