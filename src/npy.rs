//! Reading feature and label arrays out of NumPy `.npy` files.
//!
//! `.npy` files carry their element type in the header and `ndarray-npy` only
//! reads into the exact matching Rust type, so each reader tries the dtypes it
//! supports in turn and converts to the element type the rest of the crate uses.
//! Text labels (`|S` and `<U` dtypes) are decoded with `npyz`.

use crate::error::{DatasetError, Result};
use ndarray::prelude::*;
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Class labels as stored on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum RawLabels {
    Int(Array1<i64>),
    Float(Array1<f64>),
    Text(Array1<String>),
}

impl RawLabels {
    pub fn len(&self) -> usize {
        match self {
            RawLabels::Int(a) => a.len(),
            RawLabels::Float(a) => a.len(),
            RawLabels::Text(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Float view of numeric labels (integers are promoted), `None` for text.
    pub fn to_float(&self) -> Option<Array1<f64>> {
        match self {
            RawLabels::Int(a) => Some(a.mapv(|v| v as f64)),
            RawLabels::Float(a) => Some(a.clone()),
            RawLabels::Text(_) => None,
        }
    }

    /// Text view of the labels, numbers printed the way NumPy prints them.
    pub fn to_text(&self) -> Array1<String> {
        match self {
            RawLabels::Int(a) => a.mapv(|v| v.to_string()),
            RawLabels::Float(a) => a.mapv(|v| format!("{v:?}")),
            RawLabels::Text(a) => a.clone(),
        }
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Ok(None) when the file holds a different element type than `A`.
fn try_read<A: ReadableElement>(bytes: &[u8], path: &Path) -> Result<Option<ArrayD<A>>> {
    match ArrayD::<A>::read_npy(bytes) {
        Ok(array) => Ok(Some(array)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(source) => Err(DatasetError::Npy {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_f32_dyn(bytes: &[u8], path: &Path) -> Result<ArrayD<f32>> {
    if let Some(a) = try_read::<f32>(bytes, path)? {
        return Ok(a);
    }
    if let Some(a) = try_read::<f64>(bytes, path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    // Integer encoded series (e.g. quantized sensors)
    if let Some(a) = try_read::<i64>(bytes, path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    if let Some(a) = try_read::<i32>(bytes, path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    if let Some(a) = try_read::<u32>(bytes, path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    if let Some(a) = try_read::<i16>(bytes, path)? {
        return Ok(a.mapv(f32::from));
    }
    if let Some(a) = try_read::<u16>(bytes, path)? {
        return Ok(a.mapv(f32::from));
    }
    if let Some(a) = try_read::<i8>(bytes, path)? {
        return Ok(a.mapv(f32::from));
    }
    if let Some(a) = try_read::<u8>(bytes, path)? {
        return Ok(a.mapv(f32::from));
    }
    Err(DatasetError::UnsupportedDtype {
        path: path.to_path_buf(),
    })
}

fn read_labels_dyn(bytes: &[u8], path: &Path) -> Result<RawLabels> {
    macro_rules! try_int {
        ($t:ty) => {
            if let Some(a) = try_read::<$t>(bytes, path)? {
                return into_1d(a.mapv(i64::from), path).map(RawLabels::Int);
            }
        };
    }

    if let Some(a) = try_read::<i64>(bytes, path)? {
        return into_1d(a, path).map(RawLabels::Int);
    }
    try_int!(i32);
    try_int!(u32);
    try_int!(i16);
    try_int!(u16);
    try_int!(i8);
    try_int!(u8);
    try_int!(bool);
    if let Some(a) = try_read::<f64>(bytes, path)? {
        return into_1d(a, path).map(RawLabels::Float);
    }
    if let Some(a) = try_read::<f32>(bytes, path)? {
        return into_1d(a.mapv(f64::from), path).map(RawLabels::Float);
    }
    if let Some(a) = try_read_text(bytes, path)? {
        return Ok(RawLabels::Text(a));
    }
    Err(DatasetError::UnsupportedDtype {
        path: path.to_path_buf(),
    })
}

/// Ok(None) when the file does not hold byte or unicode strings.
fn try_read_text(bytes: &[u8], path: &Path) -> Result<Option<Array1<String>>> {
    let io_error = |source: std::io::Error| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let npy = npyz::NpyFile::new(bytes).map_err(io_error)?;
    let type_char = match npy.dtype() {
        npyz::DType::Plain(type_str) => type_str.type_char(),
        _ => return Ok(None),
    };
    let shape = npy.shape().to_vec();

    // NumPy pads fixed width strings with NULs
    let text: Vec<String> = match type_char {
        npyz::TypeChar::ByteStr => npy
            .into_vec::<Vec<u8>>()
            .map_err(io_error)?
            .into_iter()
            .map(|b| String::from_utf8_lossy(&b).trim_end_matches('\0').to_string())
            .collect(),
        npyz::TypeChar::UnicodeStr => npy
            .into_vec::<Vec<char>>()
            .map_err(io_error)?
            .into_iter()
            .map(|c| c.into_iter().collect::<String>().trim_end_matches('\0').to_string())
            .collect(),
        _ => return Ok(None),
    };

    if shape.len() != 1 {
        return Err(DatasetError::LabelRank {
            path: path.to_path_buf(),
            ndim: shape.len(),
        });
    }
    Ok(Some(Array1::from_vec(text)))
}

fn into_1d<A>(a: ArrayD<A>, path: &Path) -> Result<Array1<A>> {
    let ndim = a.ndim();
    a.into_dimensionality::<Ix1>()
        .map_err(|_| DatasetError::LabelRank {
            path: path.to_path_buf(),
            ndim,
        })
}

/// Read a (examples, A, B) feature tensor, converted to f32.
pub fn read_features(path: impl AsRef<Path>) -> Result<Array3<f32>> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let features = read_f32_dyn(&bytes, path)?;
    let ndim = features.ndim();
    debug!(path = %path.display(), shape = ?features.shape(), "read features");

    features
        .into_dimensionality::<Ix3>()
        .map_err(|_| DatasetError::FeatureRank {
            path: path.to_path_buf(),
            ndim,
        })
}

/// Read a 1D label vector.
pub fn read_labels(path: impl AsRef<Path>) -> Result<RawLabels> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let labels = read_labels_dyn(&bytes, path)?;
    debug!(path = %path.display(), len = labels.len(), "read labels");
    Ok(labels)
}
