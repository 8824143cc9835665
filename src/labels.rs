use crate::error::{DatasetError, Result};
use ndarray::prelude::*;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Maps class identifiers to their 0-based rank among the sorted distinct classes.
///
/// Works for any label type with a partial order (integers, floats, strings).
/// Values that cannot be ordered, such as `NaN`, are rejected at fit time.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder<T> {
    classes: Vec<T>, // sorted, no duplicates
}

impl<T: PartialOrd + Clone + Debug> LabelEncoder<T> {
    pub fn fit(labels: ArrayView1<T>) -> Result<LabelEncoder<T>> {
        if labels.iter().any(|v| v.partial_cmp(v).is_none()) {
            return Err(DatasetError::IncomparableLabels);
        }

        // Sorted insertion, stopping at the first pair that cannot be compared
        let mut classes: Vec<T> = Vec::new();
        for label in labels.iter() {
            let mut incomparable = false;
            let pos = classes.binary_search_by(|c| {
                c.partial_cmp(label).unwrap_or_else(|| {
                    incomparable = true;
                    Ordering::Equal
                })
            });
            if incomparable {
                return Err(DatasetError::IncomparableLabels);
            }
            if let Err(pos) = pos {
                classes.insert(pos, label.clone());
            }
        }

        Ok(LabelEncoder { classes })
    }

    pub fn classes(&self) -> &[T] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Code of a single label, `None` if it was not seen during fit.
    pub fn code(&self, label: &T) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.partial_cmp(label).unwrap_or(Ordering::Less))
            .ok()
    }

    pub fn transform(&self, labels: ArrayView1<T>) -> Result<Array1<usize>> {
        let codes = labels
            .iter()
            .map(|label| {
                self.code(label).ok_or_else(|| DatasetError::UnseenLabel {
                    label: format!("{label:?}"),
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        Ok(Array1::from_vec(codes))
    }

    pub fn inverse_transform(&self, codes: ArrayView1<usize>) -> Result<Array1<T>> {
        let labels = codes
            .iter()
            .map(|&code| {
                self.classes
                    .get(code)
                    .cloned()
                    .ok_or(DatasetError::UnknownCode {
                        code,
                        num_classes: self.num_classes(),
                    })
            })
            .collect::<Result<Vec<T>>>()?;
        Ok(Array1::from_vec(labels))
    }
}

/// Relabel train and test labels into the contiguous range `0..K`, where `K` is the
/// number of distinct labels across both splits.
///
/// e.g. train [1, 3, 4] and test [3, 1] become [0, 1, 2] and [1, 0].
pub fn transform_labels<T: PartialOrd + Clone + Debug>(
    y_train: ArrayView1<T>,
    y_test: ArrayView1<T>,
) -> Result<(Array1<usize>, Array1<usize>)> {
    // Fit on train and test together so both splits share one code per class
    let y_train_test = ndarray::concatenate(Axis(0), &[y_train.view(), y_test.view()])?;
    let encoder = LabelEncoder::fit(y_train_test.view())?;
    let codes = encoder.transform(y_train_test.view())?;

    // Resplit
    let n_train = y_train.len();
    let new_y_train = codes.slice(s![..n_train]).to_owned();
    let new_y_test = codes.slice(s![n_train..]).to_owned();

    Ok((new_y_train, new_y_test))
}
