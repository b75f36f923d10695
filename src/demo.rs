//! Synthetic demo archive
//!
//! One array per layout the viewer distinguishes, so every plot and table path
//! can be tried on a freshly generated file.

use crate::archive::{write_npz, ArrayData, NamedArray};
use crate::errors::Result;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::StandardNormal;
use std::path::Path;

/// Builds the demo arrays with the thread-local generator
#[must_use]
pub fn demo_arrays() -> Vec<NamedArray> {
    demo_arrays_with_rng(&mut rand::thread_rng())
}

/// Builds `sequence`, `matrix`, `image`, `volume` and `flags`
pub fn demo_arrays_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Vec<NamedArray> {
    let sequence = ArrayD::from_shape_fn(IxDyn(&[100]), |ix| {
        i64::try_from(ix[0]).unwrap_or(i64::MAX)
    });
    let matrix = ArrayD::from_shape_simple_fn(IxDyn(&[1000, 5]), || {
        rng.sample::<f64, _>(StandardNormal)
    });
    let image = ArrayD::from_shape_simple_fn(IxDyn(&[256, 256]), || rng.gen::<f64>());
    let volume = ArrayD::from_shape_simple_fn(IxDyn(&[10, 50, 50]), || rng.gen::<f64>());
    let flags = ArrayD::from_shape_simple_fn(IxDyn(&[100]), || rng.gen_bool(0.5));

    vec![
        NamedArray::new("sequence", ArrayData::Int(sequence)),
        NamedArray::new("matrix", ArrayData::Float64(matrix)),
        NamedArray::new("image", ArrayData::Float64(image)),
        NamedArray::new("volume", ArrayData::Float64(volume)),
        NamedArray::new("flags", ArrayData::Bool(flags)),
    ]
}

/// Writes the demo archive to `path`
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn create_demo_archive(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let arrays = demo_arrays();
    write_npz(path, &arrays)?;
    Ok(arrays.iter().map(|a| a.name().to_string()).collect())
}
