//! Small vector helpers shared by the induction and disambiguation code.

use ndarray::{Array1, ArrayView1};

/// Inner product; equals cosine similarity for normalized vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    ArrayView1::from(a).dot(&ArrayView1::from(b))
}

pub fn norm(vector: &[f32]) -> f32 {
    dot(vector, vector).sqrt()
}

/// Scale `vector` to unit length in place. Zero vectors are left untouched.
pub fn normalize(vector: &mut [f32]) {
    let length = norm(vector);
    if length > 0.0 {
        vector.iter_mut().for_each(|v| *v /= length);
    }
}

/// `a - b`, component-wise.
pub fn difference(a: &[f32], b: &[f32]) -> Vec<f32> {
    (&ArrayView1::from(a) - &ArrayView1::from(b)).to_vec()
}

/// Component-wise arithmetic mean; `None` when `vectors` is empty.
pub fn mean(vectors: &[&[f32]]) -> Option<Vec<f32>> {
    let (first, rest) = vectors.split_first()?;
    let mut sum = Array1::from(first.to_vec());
    for vector in rest {
        sum += &ArrayView1::from(*vector);
    }
    sum /= vectors.len() as f32;
    Some(sum.to_vec())
}
