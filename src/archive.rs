//! Archive loading and the in-memory array model
//!
//! An [`Archive`] is the ordered set of named arrays read from one `.npz` file.
//! It is immutable once loaded; opening another file builds a new archive and
//! the old one is dropped wholesale.
//!
//! Entries are enumerated by zip index so names come back in file order, and
//! each `.npy` member is decoded with `ndarray-npy`. Integer entries narrower
//! than 64 bits are widened on load while the original numpy dtype name is kept
//! for display. Members whose dtype has no storage variant (float16, complex,
//! structured records) are skipped so the rest of the archive still loads.

use crate::errors::{NpzVisError, Result};
use chrono::{DateTime, Utc};
use ndarray::{ArrayD, CowArray, IxDyn};
use ndarray_npy::{ReadNpyError, ReadNpyExt, WriteNpyExt};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Coarse element classification used by the descriptor and the info panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Integer,
    Floating,
    Other,
}

/// Typed element storage for one array
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    /// Signed integers of any width, widened to 64 bits
    Int(ArrayD<i64>),
    /// Unsigned integers of any width, widened to 64 bits
    UInt(ArrayD<u64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Bool(ArrayD<bool>),
}

/// Scalar element operations shared by every storage variant
trait Element: Copy + fmt::Display {
    fn as_f64(self) -> f64;
}

impl Element for i64 {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Element for u64 {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Element for f32 {
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Element for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

impl Element for bool {
    fn as_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
}

macro_rules! dispatch {
    ($data:expr, $array:ident => $body:expr) => {
        match $data {
            ArrayData::Int($array) => $body,
            ArrayData::UInt($array) => $body,
            ArrayData::Float32($array) => $body,
            ArrayData::Float64($array) => $body,
            ArrayData::Bool($array) => $body,
        }
    };
}

impl ArrayData {
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape())
    }

    /// Total number of elements (0 if any dimension is 0)
    #[must_use]
    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn element_kind(&self) -> ElementKind {
        match self {
            Self::Int(_) | Self::UInt(_) => ElementKind::Integer,
            Self::Float32(_) | Self::Float64(_) => ElementKind::Floating,
            Self::Bool(_) => ElementKind::Other,
        }
    }

    /// numpy dtype name matching the storage variant
    #[must_use]
    pub const fn default_dtype(&self) -> &'static str {
        match self {
            Self::Int(_) => "int64",
            Self::UInt(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Bool(_) => "bool",
        }
    }

    /// All elements as `f64`, borrowed when the storage already is `f64`
    #[must_use]
    pub fn values(&self) -> CowArray<'_, f64, IxDyn> {
        match self {
            Self::Float64(a) => CowArray::from(a.view()),
            Self::Int(a) => CowArray::from(a.mapv(Element::as_f64)),
            Self::UInt(a) => CowArray::from(a.mapv(Element::as_f64)),
            Self::Float32(a) => CowArray::from(a.mapv(Element::as_f64)),
            Self::Bool(a) => CowArray::from(a.mapv(Element::as_f64)),
        }
    }

    /// Row-major flattened `f64` values
    #[must_use]
    pub fn flat_values(&self) -> Cow<'_, [f64]> {
        if let Self::Float64(a) = self {
            if let Some(slice) = a.as_slice() {
                return Cow::Borrowed(slice);
            }
        }
        Cow::Owned(self.values().iter().copied().collect())
    }

    /// Element at a full multi-index, as `f64`
    #[must_use]
    pub fn value_at(&self, index: &[usize]) -> Option<f64> {
        dispatch!(self, a => a.get(index).map(|v| v.as_f64()))
    }

    /// Natural text form of the element at a full multi-index
    #[must_use]
    pub fn text_at(&self, index: &[usize]) -> Option<String> {
        dispatch!(self, a => a.get(index).map(ToString::to_string))
    }

    /// Text forms of `count` elements starting at row-major position `start`
    #[must_use]
    pub fn flat_texts(&self, start: usize, count: usize) -> Vec<String> {
        dispatch!(self, a => a.iter().skip(start).take(count).map(ToString::to_string).collect())
    }

    /// Text forms of the first `cols` cells of row `row` of a rank-2 array
    #[must_use]
    pub fn row_texts(&self, row: usize, cols: usize) -> Vec<String> {
        (0..cols)
            .map(|col| self.text_at(&[row, col]).unwrap_or_default())
            .collect()
    }

    /// Visits every element in row-major order with its flat index and text form
    pub fn try_for_each_text<E>(
        &self,
        mut f: impl FnMut(usize, String) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        dispatch!(self, a => {
            for (i, v) in a.iter().enumerate() {
                f(i, v.to_string())?;
            }
            Ok(())
        })
    }

    fn write_npy<W: Write>(&self, writer: W) -> std::result::Result<(), ndarray_npy::WriteNpyError> {
        dispatch!(self, a => a.write_npy(writer))
    }
}

/// How every view treats an array, derived from rank alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum Layout {
    /// Rank 1
    Vector { len: usize },
    /// Rank 2
    Matrix { rows: usize, cols: usize },
    /// Rank 0 and rank >= 3, viewed row-major flattened
    Flattened { len: usize },
}

impl Layout {
    #[must_use]
    pub fn of(shape: &[usize]) -> Self {
        match *shape {
            [len] => Self::Vector { len },
            [rows, cols] => Self::Matrix { rows, cols },
            _ => Self::Flattened {
                len: shape.iter().product(),
            },
        }
    }

    /// Number of rows the table view and the CSV export produce
    #[must_use]
    pub const fn logical_rows(self) -> usize {
        match self {
            Self::Vector { len } | Self::Flattened { len } => len,
            Self::Matrix { rows, .. } => rows,
        }
    }
}

/// One named array of an archive
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArray {
    name: String,
    dtype: String,
    data: ArrayData,
}

impl NamedArray {
    pub fn new(name: impl Into<String>, data: ArrayData) -> Self {
        Self {
            name: name.into(),
            dtype: data.default_dtype().to_string(),
            data,
        }
    }

    /// Overrides the displayed numpy dtype name
    #[must_use]
    pub fn with_dtype(mut self, dtype: impl Into<String>) -> Self {
        self.dtype = dtype.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    #[must_use]
    pub const fn data(&self) -> &ArrayData {
        &self.data
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn element_kind(&self) -> ElementKind {
        self.data.element_kind()
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::of(self.shape())
    }
}

/// numpy-style shape text: `()`, `(5,)`, `(3, 4)`
#[must_use]
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({n},)"),
        _ => format!(
            "({})",
            shape
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// The loaded container of named arrays
#[derive(Debug, Clone)]
pub struct Archive {
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
    arrays: Vec<NamedArray>,
}

impl Archive {
    /// Opens and fully decodes an `.npz` file
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::Load`] if the file cannot be opened, is not a zip
    /// container, or holds a `.npy` member that cannot be read. Members with an
    /// unsupported dtype are skipped with a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = File::open(path).map_err(|e| NpzVisError::load(&label, e))?;
        let mut archive = Self::from_reader(BufReader::new(file), &label)?;
        archive.source = Some(path.to_path_buf());
        info!(path = %label, arrays = archive.len(), "loaded archive");
        Ok(archive)
    }

    /// Decodes an `.npz` container from any seekable reader
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::Load`] tagged with `label` on any decoding failure.
    pub fn from_reader<R: Read + Seek>(reader: R, label: &str) -> Result<Self> {
        let mut zip = ZipArchive::new(reader).map_err(|e| NpzVisError::load(label, e))?;
        let mut arrays = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| NpzVisError::load(label, e))?;
            if entry.is_dir() {
                continue;
            }
            let entry_name = entry.name().to_string();
            let Some(name) = entry_name.strip_suffix(".npy") else {
                warn!(entry = %entry_name, "skipping non-array archive member");
                continue;
            };

            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| NpzVisError::load(label, format!("{entry_name}: {e}")))?;

            let decoded = decode_npy(&bytes)
                .map_err(|e| NpzVisError::load(label, format!("{entry_name}: {e}")))?;
            let Some((data, dtype)) = decoded else {
                warn!(entry = %entry_name, "skipping array with unsupported dtype");
                continue;
            };
            debug!(array = name, dtype, shape = ?data.shape(), "decoded array");
            arrays.push(NamedArray::new(name, data).with_dtype(dtype));
        }

        Ok(Self::from_arrays(arrays))
    }

    /// Builds an archive from arrays already in memory
    #[must_use]
    pub fn from_arrays(arrays: Vec<NamedArray>) -> Self {
        Self {
            source: None,
            loaded_at: Utc::now(),
            arrays,
        }
    }

    /// Array names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(NamedArray::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedArray> {
        self.arrays.iter()
    }

    /// Looks up an array by name
    ///
    /// # Errors
    ///
    /// Returns [`NpzVisError::ArrayNotFound`] when no array has that name.
    pub fn get(&self, name: &str) -> Result<&NamedArray> {
        self.arrays
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| NpzVisError::ArrayNotFound {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl fmt::Display for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => writeln!(f, "File: {}", path.display())?,
            None => writeln!(f, "File: (in memory)")?,
        }
        writeln!(f, "Loaded: {}", self.loaded_at.to_rfc3339())?;
        writeln!(f, "Contains {} arrays", self.arrays.len())
    }
}

/// Tries each supported element type until the `.npy` descriptor matches.
///
/// `Ok(None)` means the member is a well-formed `.npy` whose dtype (float16,
/// complex, datetime, structured records, ...) has no storage variant here.
fn decode_npy(
    bytes: &[u8],
) -> std::result::Result<Option<(ArrayData, &'static str)>, ReadNpyError> {
    macro_rules! attempt {
        ($t:ty, $dtype:literal, $wrap:expr) => {
            match ArrayD::<$t>::read_npy(bytes) {
                Ok(array) => return Ok(Some(($wrap(array), $dtype))),
                Err(ReadNpyError::WrongDescriptor(_)) => {}
                Err(e) => return Err(e),
            }
        };
    }

    attempt!(f64, "float64", ArrayData::Float64);
    attempt!(f32, "float32", ArrayData::Float32);
    attempt!(i64, "int64", ArrayData::Int);
    attempt!(i32, "int32", |a: ArrayD<i32>| ArrayData::Int(a.mapv(i64::from)));
    attempt!(i16, "int16", |a: ArrayD<i16>| ArrayData::Int(a.mapv(i64::from)));
    attempt!(i8, "int8", |a: ArrayD<i8>| ArrayData::Int(a.mapv(i64::from)));
    attempt!(u64, "uint64", ArrayData::UInt);
    attempt!(u32, "uint32", |a: ArrayD<u32>| ArrayData::UInt(a.mapv(u64::from)));
    attempt!(u16, "uint16", |a: ArrayD<u16>| ArrayData::UInt(a.mapv(u64::from)));
    attempt!(u8, "uint8", |a: ArrayD<u8>| ArrayData::UInt(a.mapv(u64::from)));
    attempt!(bool, "bool", ArrayData::Bool);
    Ok(None)
}

/// Writes arrays to an uncompressed `.npz` file, one `<name>.npy` member each
///
/// # Errors
///
/// Returns an I/O error if the file or any member cannot be written.
pub fn write_npz(path: impl AsRef<Path>, arrays: &[NamedArray]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    for array in arrays {
        zip.start_file(format!("{}.npy", array.name()), options)
            .map_err(to_io_error)?;
        array.data().write_npy(&mut zip).map_err(to_io_error)?;
    }

    let mut writer = zip.finish().map_err(to_io_error)?;
    writer.flush()?;
    info!(path = %path.as_ref().display(), arrays = arrays.len(), "wrote archive");
    Ok(())
}

fn to_io_error(e: impl std::error::Error + Send + Sync + 'static) -> NpzVisError {
    NpzVisError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e))
}
