//! Dataset preparation
//!
//! Turns an aligned directory of `N.wav` / `N.txt` pairs into an LJSpeech
//! layout and then into a columnar dataset directory.

pub mod columnar;
pub mod ljspeech;
pub mod metadata;

pub use columnar::{create_dataset, DatasetRow, DatasetSummary};
pub use ljspeech::convert_to_ljspeech;
pub use metadata::MetadataRow;

use crate::config::PrepareConfig;
use crate::error::Result;

/// Run both preparation steps in order
pub fn prepare_dataset(config: &PrepareConfig) -> Result<DatasetSummary> {
    tracing::info!(
        "Preparing dataset for speaker '{}' from {}",
        config.speaker_name,
        config.aligned_path.display()
    );
    let rows = convert_to_ljspeech(config)?;
    let summary = create_dataset(config)?;
    debug_assert_eq!(rows.len(), summary.num_rows);
    tracing::info!("Dataset preparation complete");
    Ok(summary)
}
