use crate::core::track::DEFAULT_META_NAMESPACE;
use crate::error::Result;
use crate::utils::fs;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "~/Music";

/// Settings for one run, as given on the command line.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub playlist: PathBuf,
    pub output: String,
    pub show_progress: bool,
    pub full_paths: bool,
    pub dry_run: bool,
    pub meta_namespace: String,
}

impl FetchOptions {
    pub fn new<P: Into<PathBuf>>(playlist: P) -> Self {
        FetchOptions {
            playlist: playlist.into(),
            output: DEFAULT_OUTPUT_DIR.to_string(),
            show_progress: true,
            full_paths: true,
            dry_run: false,
            meta_namespace: DEFAULT_META_NAMESPACE.to_string(),
        }
    }

    /// Absolute output root with `~` expanded.
    pub fn output_root(&self) -> Result<PathBuf> {
        fs::resolve_absolute(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FetchOptions::new("playlist.amz");
        assert_eq!(options.output, "~/Music");
        assert!(options.show_progress);
        assert!(options.full_paths);
        assert!(!options.dry_run);
        assert_eq!(options.meta_namespace.len(), 29);
    }

    #[test]
    fn test_output_root_expands_home() {
        let options = FetchOptions::new("playlist.amz");
        let home = dirs::home_dir().unwrap();
        assert_eq!(options.output_root().unwrap(), home.join("Music"));
    }
}
