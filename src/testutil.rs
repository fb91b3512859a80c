use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8PathBuf;
use ndarray::ArrayD;
use nifti::writer::WriterOptions;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh directory path under the system temp dir; not created.
pub fn unique_temp_dir() -> Utf8PathBuf {
    let mut dir = std::env::temp_dir();
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.push(format!("dice-score-test-{ts}-{seq}"));
    Utf8PathBuf::from_path_buf(dir).unwrap()
}

/// Write `data` as a NIfTI file at `path`.
pub fn write_volume(path: &Utf8PathBuf, data: &ArrayD<f32>) {
    WriterOptions::new(path.as_std_path())
        .write_nifti(data)
        .unwrap();
}
