pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod labels;
pub mod layout;
pub mod npy;

pub use config::LoaderConfig;
pub use dataset::{load_dataset, Dataset, DatasetFiles, DatasetLoader};
pub use encoding::OneHotEncoder;
pub use error::{DatasetError, Result};
pub use labels::{transform_labels, LabelEncoder};
pub use layout::{to_conv2d_input, FeatureLayout};
