//! Scatter axis choices
//!
//! [`advise`] derives which x/y selectors make sense for an array from its rank
//! and shape alone. Vectors offer `index`/`value`, narrow matrices offer their
//! column indices, wide matrices fall back to free numeric entry and every
//! other rank only offers `flattened`.

use crate::archive::{Layout, NamedArray};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Matrices with more columns than this get free-text column entry
pub const ADVISOR_MAX_COLUMNS: usize = 20;

/// One scatter axis selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AxisSelector {
    /// Element position along a vector
    Index,
    /// Element value of a vector
    Value,
    /// Row-major flattening of a higher-rank array
    Flattened,
    /// Column of a matrix
    Column(usize),
    /// Free-text entry that is neither a token nor a column index
    Text(String),
}

impl AxisSelector {
    /// Parses user input. Never fails: unrecognised input is kept as [`AxisSelector::Text`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "index" => Self::Index,
            "value" => Self::Value,
            "flattened" => Self::Flattened,
            _ => trimmed
                .parse::<usize>()
                .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Column),
        }
    }

    /// Column index, if this selector names one
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::Column(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromStr for AxisSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for AxisSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Value => write!(f, "value"),
            Self::Flattened => write!(f, "flattened"),
            Self::Column(c) => write!(f, "{c}"),
            Self::Text(t) => write!(f, "{t}"),
        }
    }
}

impl Serialize for AxisSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Valid selector choices and defaults for one array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionAdvice {
    /// Empty when the user should type a column index freely
    pub x_options: Vec<AxisSelector>,
    pub y_options: Vec<AxisSelector>,
    pub default_x: AxisSelector,
    pub default_y: AxisSelector,
}

/// Derives scatter axis options from rank and shape
#[must_use]
pub fn advise(array: &NamedArray) -> DimensionAdvice {
    match array.layout() {
        Layout::Vector { .. } => {
            let options = vec![AxisSelector::Index, AxisSelector::Value];
            DimensionAdvice {
                x_options: options.clone(),
                y_options: options,
                default_x: AxisSelector::Index,
                default_y: AxisSelector::Value,
            }
        }
        Layout::Matrix { cols, .. } if cols <= ADVISOR_MAX_COLUMNS => {
            let options: Vec<_> = (0..cols).map(AxisSelector::Column).collect();
            let default_x = if cols > 0 {
                AxisSelector::Column(0)
            } else {
                AxisSelector::Index
            };
            let default_y = match cols {
                0 => AxisSelector::Value,
                1 => AxisSelector::Column(0),
                _ => AxisSelector::Column(1),
            };
            DimensionAdvice {
                x_options: options.clone(),
                y_options: options,
                default_x,
                default_y,
            }
        }
        Layout::Matrix { .. } => DimensionAdvice {
            x_options: Vec::new(),
            y_options: Vec::new(),
            default_x: AxisSelector::Column(0),
            default_y: AxisSelector::Column(1),
        },
        Layout::Flattened { .. } => DimensionAdvice {
            x_options: vec![AxisSelector::Flattened],
            y_options: vec![AxisSelector::Flattened],
            default_x: AxisSelector::Flattened,
            default_y: AxisSelector::Flattened,
        },
    }
}
