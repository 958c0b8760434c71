use glob::{MatchOptions, Pattern, PatternError};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: PatternError,
    },
    #[error("Path {0} is not valid UTF-8")]
    NonUtf8Path(PathBuf),
}

impl IoError {
    fn at(path: &Path) -> impl FnOnce(std::io::Error) -> IoError + '_ {
        move |source| IoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a text file
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::at(path))
}

/// Write a text file, creating parent directories if they don't exist
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    create_parent(path)?;
    fs::write(path, content).map_err(IoError::at(path))
}

/// Copy a single file, creating parent directories of the destination
pub fn copy_file(source: &Path, destination: &Path) -> Result<(), IoError> {
    if !source.exists() {
        return Err(IoError::NotFound(source.to_path_buf()));
    }
    create_parent(destination)?;
    fs::copy(source, destination).map_err(IoError::at(source))?;
    Ok(())
}

/// Delete `dir` and everything in it if present, then recreate it empty
pub fn reset_dir(dir: &Path) -> Result<(), IoError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(IoError::at(dir))?;
    }
    fs::create_dir_all(dir).map_err(IoError::at(dir))
}

pub fn create_dir(dir: &Path) -> Result<(), IoError> {
    fs::create_dir_all(dir).map_err(IoError::at(dir))
}

fn create_parent(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::at(parent))?;
    }
    Ok(())
}

/// Files that must not be copied into the package.
///
/// One glob pattern per line, matched case-insensitively against `/`-separated
/// paths relative to the library root. A pattern matching a directory excludes
/// everything below it. Blank lines and `#` comments are ignored.
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    patterns: Vec<Pattern>,
}

impl ExcludeList {
    const MATCH_OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    pub fn read(path: &Path) -> Result<Self, IoError> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> Result<Self, IoError> {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|entry| !entry.is_empty() && !entry.starts_with('#'))
            .map(|entry| {
                let entry = entry.replace('\\', "/");
                let entry = entry.trim_end_matches('/');
                Pattern::new(entry).map_err(|source| IoError::Pattern {
                    pattern: entry.to_string(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    /// Exclude one exact path.
    pub fn push_literal(&mut self, path: &RelativePath) {
        // Escaped patterns always parse
        if let Ok(pattern) = Pattern::new(&Pattern::escape(path.as_str())) {
            self.patterns.push(pattern);
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_excluded(&self, path: &RelativePath) -> bool {
        let mut current = Some(path);
        while let Some(candidate) = current
            && !candidate.as_str().is_empty()
        {
            if self
                .patterns
                .iter()
                .any(|p| p.matches_with(candidate.as_str(), Self::MATCH_OPTIONS))
            {
                return true;
            }
            current = candidate.parent();
        }
        false
    }
}

/// Scan every file below `root`, as sorted relative paths
pub fn scan_files(root: &Path) -> Result<Vec<RelativePathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::NotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, RelativePath::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    dir: &Path,
    relative: &RelativePath,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::at(dir))?;

    for entry in entries {
        let entry = entry.map_err(IoError::at(dir))?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            return Err(IoError::NonUtf8Path(path));
        };
        let child = relative.join(name);

        if path.is_dir() {
            scan_directory_recursive(&path, &child, files)?;
        } else {
            files.push(child);
        }
    }

    Ok(())
}

/// Copy every non-excluded file below `source` to the same relative path below
/// `destination`. Returns the copied paths in sorted order.
pub fn copy_tree(
    source: &Path,
    destination: &Path,
    exclude: &ExcludeList,
) -> Result<Vec<RelativePathBuf>, IoError> {
    let mut copied = Vec::new();

    for file in scan_files(source)? {
        if exclude.is_excluded(&file) {
            log::debug!("Skipping excluded {file}");
            continue;
        }
        copy_file(&file.to_path(source), &file.to_path(destination))?;
        copied.push(file);
    }

    Ok(copied)
}
