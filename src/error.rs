use camino::Utf8PathBuf;
use thiserror::Error;

/// Fatal conditions raised while validating, loading or scoring volumes.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("ERROR: {path} does not exist. Check path and filename!")]
    FileNotFound { path: Utf8PathBuf },

    #[error("Input images have mismatched dimensions: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    #[error("One or both input images are empty.")]
    EmptyVolume,

    #[error("failed to decode NIfTI file {path}")]
    Decode {
        path: Utf8PathBuf,
        #[source]
        source: nifti::NiftiError,
    },
}
