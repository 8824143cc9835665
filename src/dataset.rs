use crate::config::LoaderConfig;
use crate::encoding::OneHotEncoder;
use crate::error::Result;
use crate::labels::transform_labels;
use crate::layout::to_conv2d_input;
use crate::npy::{read_features, read_labels, RawLabels};
use ndarray::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The four array files of a dataset: `<root>/<name>/{X_train,y_train,X_test,y_test}.npy`
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetFiles {
    pub x_train: PathBuf,
    pub y_train: PathBuf,
    pub x_test: PathBuf,
    pub y_test: PathBuf,
}

impl DatasetFiles {
    pub fn new(root: impl AsRef<Path>, name: &str) -> DatasetFiles {
        let dir = root.as_ref().join(name);
        DatasetFiles {
            x_train: dir.join("X_train.npy"),
            y_train: dir.join("y_train.npy"),
            x_test: dir.join("X_test.npy"),
            y_test: dir.join("y_test.npy"),
        }
    }

    pub fn paths(&self) -> [&Path; 4] {
        [
            self.x_train.as_path(),
            self.y_train.as_path(),
            self.x_test.as_path(),
            self.y_test.as_path(),
        ]
    }

    /// Files that do not exist on disk
    pub fn missing(&self) -> Vec<&Path> {
        self.paths().into_iter().filter(|p| !p.exists()).collect()
    }
}

/// A loaded dataset, ready to be fed to a 2D convolutional classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x_train: Array4<f32>, // (examples, B, A, 1)
    pub y_train: Array2<f32>, // one-hot, (examples, num_classes)
    pub x_test: Array4<f32>, // (examples, B, A, 1)
    pub y_test: Array2<f32>, // one-hot, (examples, num_classes)
    pub y_train_nonencoded: Array1<usize>, // labels in 0..num_classes
    pub y_test_nonencoded: Array1<usize>, // labels in 0..num_classes
}

impl Dataset {
    pub fn num_classes(&self) -> usize {
        self.y_train.ncols()
    }

    /// (x_train, y_train, x_test, y_test, y_train_nonencoded, y_test_nonencoded)
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Array4<f32>,
        Array2<f32>,
        Array4<f32>,
        Array2<f32>,
        Array1<usize>,
        Array1<usize>,
    ) {
        (
            self.x_train,
            self.y_train,
            self.x_test,
            self.y_test,
            self.y_train_nonencoded,
            self.y_test_nonencoded,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    pub config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> DatasetLoader {
        DatasetLoader { config }
    }

    pub fn files(&self, name: &str) -> DatasetFiles {
        DatasetFiles::new(&self.config.root, name)
    }

    /// Load and preprocess the train and test splits of `name`.
    pub fn load(&self, name: &str) -> Result<Dataset> {
        let files = self.files(name);
        debug!(dataset = name, files = ?files.paths(), "loading dataset");

        // Load train and test sets
        let x_train = read_features(&files.x_train)?;
        let y_train = read_labels(&files.y_train)?;
        let x_test = read_features(&files.x_test)?;
        let y_test = read_labels(&files.y_test)?;

        // Contiguous labels, kept aside before one-hot encoding
        let (y_train_nonencoded, y_test_nonencoded) = normalize_labels(&y_train, &y_test)?;

        // One-hot encoder fit on both splits so they share the same columns
        let y_train_test = ndarray::concatenate(
            Axis(0),
            &[y_train_nonencoded.view(), y_test_nonencoded.view()],
        )?;
        let encoder = OneHotEncoder::fit(y_train_test.view())?;
        let y_train = encoder.transform(y_train_nonencoded.view())?;
        let y_test = encoder.transform(y_test_nonencoded.view())?;

        // (N, A, B) -> (N, B, A, 1) to match the 2D convolution filters input shape
        let x_train = to_conv2d_input(x_train, self.config.layout);
        let x_test = to_conv2d_input(x_test, self.config.layout);

        println!("Dataset {} Loaded", name);
        info!(
            dataset = name,
            num_classes = encoder.num_categories(),
            train = x_train.len_of(Axis(0)),
            test = x_test.len_of(Axis(0)),
            "dataset loaded"
        );

        Ok(Dataset {
            x_train,
            y_train,
            x_test,
            y_test,
            y_train_nonencoded,
            y_test_nonencoded,
        })
    }
}

/// Load `./datasets/<name>` with the default config.
pub fn load_dataset(name: &str) -> Result<Dataset> {
    DatasetLoader::default().load(name)
}

/// Labels of both splits are compared as one type: integers stay integers, a float
/// split promotes both to float and a text split turns both into text.
fn normalize_labels(
    y_train: &RawLabels,
    y_test: &RawLabels,
) -> Result<(Array1<usize>, Array1<usize>)> {
    if let (RawLabels::Int(train), RawLabels::Int(test)) = (y_train, y_test) {
        return transform_labels(train.view(), test.view());
    }
    match (y_train.to_float(), y_test.to_float()) {
        (Some(train), Some(test)) => transform_labels(train.view(), test.view()),
        _ => transform_labels(y_train.to_text().view(), y_test.to_text().view()),
    }
}
