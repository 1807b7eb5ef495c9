use crate::error::{Error, Result};
use crate::influence::CrossDatasetAggregate;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const COMBINED_FILE_NAME: &str = "all_influencers.csv";
pub const COUNTS_FILE_NAME: &str = "influencer_dataset_counts.csv";
pub const MERGED_FILE_NAME: &str = "influencers_with_cross_dataset_stats.csv";

pub fn create_directory(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory).map_err(|source| Error::OutputDirectory {
        path: directory.to_path_buf(),
        source,
    })
}

/// Writes records with a header row taken from the record's field names.
pub fn write_table<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let to_error = |source| Error::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new().from_path(path).map_err(to_error)?;

    for record in records {
        writer.serialize(record).map_err(to_error)?;
    }

    writer.flush()?;

    Ok(())
}

/// Writes the combined, per-author count, and merged tables.
pub fn write_influencers(
    directory: &Path,
    aggregate: &CrossDatasetAggregate,
) -> Result<Vec<PathBuf>> {
    let combined = directory.join(COMBINED_FILE_NAME);
    write_table(&combined, &aggregate.combined)?;

    let counts = directory.join(COUNTS_FILE_NAME);
    write_table(&counts, &aggregate.counts)?;

    let merged = directory.join(MERGED_FILE_NAME);
    write_table(&merged, &aggregate.merged)?;

    log::info!(
        "Wrote {} influencer records for {} authors",
        aggregate.combined.len(),
        aggregate.author_count()
    );

    Ok(vec![combined, counts, merged])
}
