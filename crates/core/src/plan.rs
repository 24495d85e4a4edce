//! Batch download planning.
//!
//! Builds the ordered list of files a "download all" action fetches for
//! a group: originals first, then the AI results in display order. Each
//! item gets the `{group name}-{label}.jpg` filename the gallery has
//! always produced. Group names pass through unsanitized, matching the
//! suggested filenames users already know.
//!
//! New-system groups label both original sides plain `original`; since
//! an archive cannot hold two entries with one name, colliding
//! filenames get a numeric suffix before the extension.

use serde::Serialize;

use crate::group::ProductGroup;

/// One file in a batch download, in fetch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    pub url: String,
    /// `original`, `front`, `back`, or `variation-{n}` (1-based).
    pub label: String,
    /// Final archive-safe filename, unique within the plan.
    pub filename: String,
}

/// Ordered download plan for one product group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPlan {
    pub group_name: String,
    pub items: Vec<DownloadItem>,
}

impl DownloadPlan {
    /// Build the plan for a group: originals first, then variations
    /// (old system) or processed front/back (new system).
    pub fn for_group(group: &ProductGroup) -> Self {
        let mut builder = PlanBuilder::new(group.name());

        match group {
            ProductGroup::Old {
                original,
                variations,
                ..
            } => {
                builder.push(&original.url, "original");
                for (i, variation) in variations.iter().enumerate() {
                    builder.push(&variation.url, &format!("variation-{}", i + 1));
                }
            }
            ProductGroup::New {
                original,
                processed,
                ..
            } => {
                for side in original.present() {
                    builder.push(&side.url, "original");
                }
                if let Some(front) = &processed.front {
                    builder.push(&front.url, "front");
                }
                if let Some(back) = &processed.back {
                    builder.push(&back.url, "back");
                }
            }
        }

        Self {
            group_name: group.name().to_string(),
            items: builder.items,
        }
    }

    /// Number of files the plan fetches.
    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// Accumulates items while keeping filenames unique.
struct PlanBuilder {
    group_name: String,
    items: Vec<DownloadItem>,
    used: std::collections::HashSet<String>,
}

impl PlanBuilder {
    fn new(group_name: &str) -> Self {
        Self {
            group_name: group_name.to_string(),
            items: Vec::new(),
            used: std::collections::HashSet::new(),
        }
    }

    fn push(&mut self, url: &str, label: &str) {
        let base = format!("{}-{label}", self.group_name);
        let mut filename = format!("{base}.jpg");
        let mut suffix = 2;
        while !self.used.insert(filename.clone()) {
            filename = format!("{base}-{suffix}.jpg");
            suffix += 1;
        }
        self.items.push(DownloadItem {
            url: url.to_string(),
            label: label.to_string(),
            filename,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::group::{ImageAsset, SidePair};
    use chrono::TimeZone;

    fn asset(id: &str) -> ImageAsset {
        ImageAsset {
            id: id.to_string(),
            url: format!("https://cdn.example.com/{id}.jpg"),
            file_size: 10,
        }
    }

    fn date() -> crate::Timestamp {
        chrono::Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn old_group_original_first_then_numbered_variations() {
        let group = ProductGroup::Old {
            id: "g1".to_string(),
            name: "Red Hoodie".to_string(),
            category: Category::Clothes,
            upload_date: date(),
            original: asset("o"),
            variations: vec![asset("v1"), asset("v2"), asset("v3")],
        };

        let plan = DownloadPlan::for_group(&group);
        assert_eq!(plan.total(), 4);
        let names: Vec<&str> = plan.items.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Red Hoodie-original.jpg",
                "Red Hoodie-variation-1.jpg",
                "Red Hoodie-variation-2.jpg",
                "Red Hoodie-variation-3.jpg",
            ]
        );
        assert_eq!(plan.items[0].url, "https://cdn.example.com/o.jpg");
    }

    #[test]
    fn new_group_orders_originals_then_front_back() {
        let group = ProductGroup::New {
            id: "g2".to_string(),
            name: "Blue Cap".to_string(),
            category: Category::Caps,
            upload_date: date(),
            original: SidePair {
                front: Some(asset("of")),
                back: Some(asset("ob")),
            },
            processed: SidePair {
                front: Some(asset("pf")),
                back: Some(asset("pb")),
            },
        };

        let plan = DownloadPlan::for_group(&group);
        let labels: Vec<&str> = plan.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["original", "original", "front", "back"]);

        // Both originals share a label; the second filename is suffixed.
        assert_eq!(plan.items[0].filename, "Blue Cap-original.jpg");
        assert_eq!(plan.items[1].filename, "Blue Cap-original-2.jpg");
        assert_eq!(plan.items[2].filename, "Blue Cap-front.jpg");
    }

    #[test]
    fn missing_sides_are_simply_absent() {
        let group = ProductGroup::New {
            id: "g3".to_string(),
            name: "Boots".to_string(),
            category: Category::Shoes,
            upload_date: date(),
            original: SidePair {
                front: Some(asset("of")),
                back: None,
            },
            processed: SidePair {
                front: None,
                back: Some(asset("pb")),
            },
        };

        let plan = DownloadPlan::for_group(&group);
        let labels: Vec<&str> = plan.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["original", "back"]);
    }

    #[test]
    fn group_name_passes_through_unsanitized() {
        let group = ProductGroup::Old {
            id: "g4".to_string(),
            name: "Cap / Limited #2".to_string(),
            category: Category::Caps,
            upload_date: date(),
            original: asset("o"),
            variations: vec![],
        };

        let plan = DownloadPlan::for_group(&group);
        assert_eq!(plan.items[0].filename, "Cap / Limited #2-original.jpg");
    }

    #[test]
    fn empty_variations_yields_original_only() {
        let group = ProductGroup::Old {
            id: "g5".to_string(),
            name: "Shirt".to_string(),
            category: Category::Clothes,
            upload_date: date(),
            original: asset("o"),
            variations: vec![],
        };
        assert_eq!(DownloadPlan::for_group(&group).total(), 1);
    }
}
