use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Script file extension
pub const SCRIPT_EXTENSION: &str = "rpy";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(extension) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Script files under `input`: the file itself, or every script in the tree
    pub fn collect_scripts<P: AsRef<Path>>(input: P) -> Result<Vec<PathBuf>> {
        let input = input.as_ref();
        if Self::file_exists(input) {
            Ok(vec![input.to_path_buf()])
        } else if Self::dir_exists(input) {
            Self::find_files(input, SCRIPT_EXTENSION)
        } else {
            Err(anyhow!("Input path does not exist: {:?}", input))
        }
    }

    /// Read a UTF-8 script, refusing files above `max_bytes`
    pub fn read_script<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String> {
        let path = path.as_ref();
        let size = fs::metadata(path)
            .with_context(|| format!("Failed to stat file: {:?}", path))?
            .len();
        if size > max_bytes {
            return Err(anyhow!(
                "File {:?} is {} bytes, above the {} byte limit",
                path, size, max_bytes
            ));
        }

        let bytes = fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
        String::from_utf8(bytes).with_context(|| format!("File is not valid UTF-8: {:?}", path))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @returns: `path` relative to `root`, with forward slashes
    pub fn storage_path<P1: AsRef<Path>, P2: AsRef<Path>>(root: P1, path: P2) -> String {
        let path = path.as_ref();
        let relative = if root.as_ref() == path {
            Path::new(path.file_name().unwrap_or_default())
        } else {
            path.strip_prefix(root.as_ref()).unwrap_or(path)
        };

        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}
