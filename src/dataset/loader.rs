use super::Dataset;
use crate::error::Error;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A file that matched the extension but could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Everything a directory scan produced, keyed by file name.
#[derive(Debug, Default)]
pub struct Loaded {
    pub datasets: BTreeMap<String, Dataset>,
    pub failures: Vec<LoadFailure>,
}

impl Loaded {
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Datasets in lexical file-name order.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }
}

/// Loads every file with the given extension in `directory`.
///
/// Individual files that fail to parse are recorded in `failures` and
/// skipped. Only a failure to list the directory itself is returned as an
/// error.
pub fn load_directory<P: AsRef<Path>>(directory: P, extension: &str) -> Result<Loaded, Error> {
    let directory = directory.as_ref();
    let mut paths = matching_paths(directory, extension)?;
    paths.sort();

    let mut loaded = Loaded::default();

    for path in paths {
        let name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => {
                log::warn!("Skipping file with a non-UTF-8 name: {:?}", path);
                loaded.failures.push(LoadFailure {
                    path,
                    message: "file name is not valid UTF-8".to_string(),
                });
                continue;
            }
        };

        match load_file(&path, &name) {
            Ok(dataset) => {
                log::info!("Loaded {} ({} rows)", name, dataset.len());
                loaded.datasets.insert(name, dataset);
            }
            Err(error) => {
                log::warn!("Failed to load {:?}: {}", path, error);
                loaded.failures.push(LoadFailure {
                    path,
                    message: error.to_string(),
                });
            }
        }
    }

    Ok(loaded)
}

fn load_file(path: &Path, name: &str) -> Result<Dataset, super::Error> {
    let file = File::open(path)?;

    Dataset::from_reader(name, BufReader::new(file))
}

fn matching_paths(directory: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let entries = fs::read_dir(directory).map_err(|error| Error::InputDirectory {
        path: directory.to_path_buf(),
        source: error,
    })?;

    let mut paths = vec![];

    for entry in entries {
        let path = entry
            .map_err(|error| Error::InputDirectory {
                path: directory.to_path_buf(),
                source: error,
            })?
            .path();

        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            paths.push(path);
        }
    }

    Ok(paths)
}
