//! Treemap view: a fixed root with one child per bucket, sized by notional.

use super::palette::color_for_key;
use crate::aggregator::ReducedBucket;
use crate::utils::config::HIERARCHY_ROOT_NAME;
use serde::{Deserialize, Serialize};

/// One treemap leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Bucket key
    pub name: String,

    /// Total notional of the bucket
    pub value: f64,

    /// Palette color derived from `name`
    pub color: String,
}

/// Root-with-children value tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyProjection {
    pub name: String,
    pub children: Vec<HierarchyNode>,
}

impl Default for HierarchyProjection {
    fn default() -> Self {
        Self {
            name: HIERARCHY_ROOT_NAME.to_string(),
            children: Vec::new(),
        }
    }
}

impl HierarchyProjection {
    /// Sum of all children
    pub fn total_value(&self) -> f64 {
        self.children.iter().map(|c| c.value).sum()
    }
}

/// Build the tree from buckets already in display order
pub(crate) fn build_hierarchy<'a>(
    buckets: impl IntoIterator<Item = &'a ReducedBucket>,
) -> HierarchyProjection {
    let children = buckets
        .into_iter()
        .map(|b| HierarchyNode {
            name: b.key.label.clone(),
            value: b.total_notional,
            color: color_for_key(&b.key.label).to_string(),
        })
        .collect();

    HierarchyProjection {
        name: HIERARCHY_ROOT_NAME.to_string(),
        children,
    }
}
