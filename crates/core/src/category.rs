//! Product categories.
//!
//! The upload form, gallery filter, and delete webhook all speak the same
//! three category values. Anything else coming from upstream is rejected
//! during normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Product category for uploaded photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clothes,
    Caps,
    Shoes,
}

/// All categories, in display order.
pub const ALL_CATEGORIES: [Category; 3] = [Category::Clothes, Category::Caps, Category::Shoes];

impl Category {
    /// The lowercase wire name (`"clothes"`, `"caps"`, `"shoes"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothes => "clothes",
            Category::Caps => "caps",
            Category::Shoes => "shoes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothes" => Ok(Category::Clothes),
            "caps" => Ok(Category::Caps),
            "shoes" => Ok(Category::Shoes),
            other => Err(CoreError::Validation(format!(
                "Unknown category: '{other}'. Valid categories: clothes, caps, shoes"
            ))),
        }
    }
}
