use camino::{Utf8Path, Utf8PathBuf};
use ndarray::{ArrayD, ArrayViewD};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use tracing::debug;

use crate::error::DiceError;

/// Label volume decoded from a NIfTI file, voxel values as `f64`.
#[derive(Debug)]
pub struct SegmentationVolume {
    path: Utf8PathBuf,
    data: ArrayD<f64>,
}

impl SegmentationVolume {
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }
}

/// Decode `path` (`.nii` or `.nii.gz`) into a [`SegmentationVolume`].
pub fn load_volume(path: &Utf8Path) -> Result<SegmentationVolume, DiceError> {
    let decode = |source: nifti::NiftiError| DiceError::Decode {
        path: path.to_owned(),
        source,
    };

    let obj = ReaderOptions::new().read_file(path).map_err(decode)?;
    let data = obj.into_volume().into_ndarray::<f64>().map_err(decode)?;
    debug!(path = %path, shape = ?data.shape(), "loaded volume");

    Ok(SegmentationVolume {
        path: path.to_owned(),
        data,
    })
}
