//! Product group data model.
//!
//! A gallery entry comes from one of two upstream systems that never
//! agreed on a payload shape. The old pipeline produced one original
//! photo plus N AI variations; the new pipeline produces front/back
//! originals plus front/back processed images. [`ProductGroup`] carries
//! both shapes as a tagged union, and [`ProductGroup::derive_view`]
//! projects either shape into the single [`NormalizedView`] the gallery
//! and viewer consume. Nothing outside `normalize` inspects the raw
//! upstream JSON.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::Timestamp;

/// A single hosted image with its object-storage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Upstream asset identifier (used for deletion).
    pub id: String,
    /// Public URL of the hosted image.
    pub url: String,
    /// Size in bytes as reported by storage.
    pub file_size: u64,
}

/// Front/back slots for new-system groups. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePair {
    pub front: Option<ImageAsset>,
    pub back: Option<ImageAsset>,
}

impl SidePair {
    /// True when neither side is present.
    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Present assets in front-then-back order.
    pub fn present(&self) -> impl Iterator<Item = &ImageAsset> {
        self.front.iter().chain(self.back.iter())
    }

    /// Number of present sides (0-2).
    pub fn count(&self) -> usize {
        self.present().count()
    }
}

/// Which upstream pipeline produced a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemKind {
    Old,
    New,
}

/// A gallery entry in one of the two upstream shapes.
///
/// Serializes with a `type` tag (`"old"` / `"new"`) matching the
/// upstream discriminator, so responses remain recognizable to clients
/// of the original feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ProductGroup {
    /// Old pipeline: one original plus N AI variations.
    Old {
        id: String,
        name: String,
        category: Category,
        upload_date: Timestamp,
        original: ImageAsset,
        variations: Vec<ImageAsset>,
    },
    /// New pipeline: front/back originals plus front/back processed.
    New {
        id: String,
        name: String,
        category: Category,
        upload_date: Timestamp,
        original: SidePair,
        processed: SidePair,
    },
}

impl ProductGroup {
    pub fn id(&self) -> &str {
        match self {
            ProductGroup::Old { id, .. } | ProductGroup::New { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProductGroup::Old { name, .. } | ProductGroup::New { name, .. } => name,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ProductGroup::Old { category, .. } | ProductGroup::New { category, .. } => *category,
        }
    }

    pub fn upload_date(&self) -> Timestamp {
        match self {
            ProductGroup::Old { upload_date, .. } | ProductGroup::New { upload_date, .. } => {
                *upload_date
            }
        }
    }

    pub fn system_kind(&self) -> SystemKind {
        match self {
            ProductGroup::Old { .. } => SystemKind::Old,
            ProductGroup::New { .. } => SystemKind::New,
        }
    }

    /// Every asset id the group references, originals first.
    ///
    /// This is the flat id list the delete webhook expects: one entry per
    /// hosted file, regardless of which shape the group came in.
    pub fn asset_ids(&self) -> Vec<String> {
        match self {
            ProductGroup::Old {
                original,
                variations,
                ..
            } => std::iter::once(&original.id)
                .chain(variations.iter().map(|v| &v.id))
                .cloned()
                .collect(),
            ProductGroup::New {
                original,
                processed,
                ..
            } => original
                .present()
                .chain(processed.present())
                .map(|a| a.id.clone())
                .collect(),
        }
    }

    /// Project this group into the shape the gallery and viewer consume.
    ///
    /// Pure and infallible: degraded new-system groups (missing sides)
    /// yield a view with `original: None` and/or zero variations rather
    /// than an error.
    pub fn derive_view(&self) -> NormalizedView {
        match self {
            ProductGroup::Old {
                original,
                variations,
                ..
            } => NormalizedView {
                original: Some(original.clone()),
                variations: variations.clone(),
                variations_count: variations.len(),
                total_originals: 1,
                total_processed: variations.len(),
                total_images: 1 + variations.len(),
            },
            ProductGroup::New {
                original,
                processed,
                ..
            } => {
                let variations: Vec<ImageAsset> = processed.present().cloned().collect();
                let total_originals = original.count();
                let total_processed = variations.len();
                NormalizedView {
                    // Front original is the comparison baseline; fall back
                    // to the back side when the front never arrived.
                    original: original.front.clone().or_else(|| original.back.clone()),
                    variations_count: variations.len(),
                    variations,
                    total_originals,
                    total_processed,
                    total_images: total_originals + total_processed,
                }
            }
        }
    }
}

/// The unified projection the gallery grid and comparison viewer render.
///
/// Derived on demand from a [`ProductGroup`]; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedView {
    /// Baseline image for before/after comparison. `None` only for
    /// degraded new-system groups with no original side.
    pub original: Option<ImageAsset>,
    /// Browsable AI results in display order (old: variations as sent;
    /// new: processed front then back).
    pub variations: Vec<ImageAsset>,
    pub variations_count: usize,
    pub total_originals: usize,
    pub total_processed: usize,
    /// Always `total_originals + total_processed`.
    pub total_images: usize,
}

/// Per-category counts over a (filtered) gallery listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GalleryStats {
    pub total: usize,
    pub clothes: usize,
    pub caps: usize,
    pub shoes: usize,
}

impl GalleryStats {
    /// Add one group of the given category to the tally.
    pub fn record(&mut self, category: Category) {
        self.total += 1;
        match category {
            Category::Clothes => self.clothes += 1,
            Category::Caps => self.caps += 1,
            Category::Shoes => self.shoes += 1,
        }
    }
}
