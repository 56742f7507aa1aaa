//! Collapse a selection into per-case groups for display.

use serde::{Deserialize, Serialize};

use crate::domain::CatalogItem;

/// One distinct case in a selection and how many times it appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseGroup {
    pub item: CatalogItem,
    pub count: usize,
}

impl CaseGroup {
    /// Combined price of every copy in the group.
    pub fn total_price(&self) -> f64 {
        self.item.price * self.count as f64
    }

    /// The group as the flat run of cases it stands for.
    pub fn expand(&self) -> impl Iterator<Item = &CatalogItem> {
        std::iter::repeat(&self.item).take(self.count)
    }
}

/// Group cases sharing a name, in order of first appearance.
///
/// The first occurrence of a name is kept as the group's representative.
pub fn group_by_name(selection: &[CatalogItem]) -> Vec<CaseGroup> {
    let mut groups: Vec<CaseGroup> = Vec::new();
    for item in selection {
        match groups.iter_mut().find(|g| g.item.name == item.name) {
            Some(group) => group.count += 1,
            None => groups.push(CaseGroup {
                item: item.clone(),
                count: 1,
            }),
        }
    }
    groups
}

/// Sum of group totals; equals the sum of the grouped selection's prices.
pub fn grouped_total(groups: &[CaseGroup]) -> f64 {
    groups.iter().map(CaseGroup::total_price).sum()
}
