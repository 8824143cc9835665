use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// How a (examples, A, B) feature tensor becomes a (examples, B, A, 1) conv2d input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLayout {
    /// Swap the two inner axes: out[n, j, i, 0] == x[n, i, j].
    #[default]
    SwapAxes,
    /// Keep the row-major element sequence and only change the shape.
    /// Elements are NOT moved, so out[n, j, i, 0] != x[n, i, j] in general.
    Reinterpret,
}

/// Turn a batch of (A, B) series into single channel images of shape (B, A, 1).
pub fn to_conv2d_input(x: Array3<f32>, layout: FeatureLayout) -> Array4<f32> {
    let (n, a, b) = x.dim();
    match layout {
        FeatureLayout::SwapAxes => x
            .permuted_axes([0, 2, 1])
            .insert_axis(Axis(3))
            .as_standard_layout()
            .into_owned(),
        FeatureLayout::Reinterpret => {
            // iter() walks in logical row-major order whatever the memory layout
            let flat: Vec<f32> = x.iter().copied().collect();
            Array4::from_shape_vec((n, b, a, 1), flat)
                .expect("element count is unchanged by the (n, a, b) -> (n, b, a, 1) reshape")
        }
    }
}
