use crate::error::{DatasetError, Result};
use crate::labels::LabelEncoder;
use ndarray::prelude::*;
use std::fmt::Debug;

/// Dense one-hot encoder.
///
/// Categories are the sorted distinct values seen at fit time, so two splits
/// transformed by the same encoder always share column count and column order.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotEncoder<T> {
    categories: LabelEncoder<T>,
}

impl<T: PartialOrd + Clone + Debug> OneHotEncoder<T> {
    pub fn fit(labels: ArrayView1<T>) -> Result<OneHotEncoder<T>> {
        Ok(OneHotEncoder {
            categories: LabelEncoder::fit(labels)?,
        })
    }

    pub fn categories(&self) -> &[T] {
        self.categories.classes()
    }

    pub fn num_categories(&self) -> usize {
        self.categories.num_classes()
    }

    /// Returns a (n_labels, num_categories) matrix with a single 1 per row.
    /// Unknown categories are an error.
    pub fn transform(&self, labels: ArrayView1<T>) -> Result<Array2<f32>> {
        let mut one_hot = Array2::zeros((labels.len(), self.num_categories()));
        for (i, label) in labels.iter().enumerate() {
            let col = self
                .categories
                .code(label)
                .ok_or_else(|| DatasetError::UnseenLabel {
                    label: format!("{label:?}"),
                })?;
            one_hot[(i, col)] = 1.0;
        }
        Ok(one_hot)
    }
}
