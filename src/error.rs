use ndarray_npy::ReadNpyError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse NPY file {}: {source}", path.display())]
    Npy {
        path: PathBuf,
        #[source]
        source: ReadNpyError,
    },
    #[error("unsupported element type in {}", path.display())]
    UnsupportedDtype { path: PathBuf },
    #[error("feature array {} has {ndim} axes, expected 3", path.display())]
    FeatureRank { path: PathBuf, ndim: usize },
    #[error("label array {} has {ndim} axes, expected 1", path.display())]
    LabelRank { path: PathBuf, ndim: usize },
    #[error("labels cannot be ordered (NaN or incomparable values)")]
    IncomparableLabels,
    #[error("label {label} was not seen during fit")]
    UnseenLabel { label: String },
    #[error("code {code} is out of range for {num_classes} classes")]
    UnknownCode { code: usize, num_classes: usize },
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("invalid loader config: {0}")]
    Config(#[from] serde_json::Error),
}
