//! Host surfaces the widget renders into.

use std::collections::BTreeMap;

use super::state::Region;

/// Externally-owned surface exposing display regions by locator.
pub trait DisplaySurface {
    /// Whether a region exists for `locator`.
    fn has_region(&self, locator: &str) -> bool;

    /// Replace the contents of the region at `locator`.
    fn render(&mut self, locator: &str, region: &Region);
}

/// Surface that keeps its regions in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    regions: BTreeMap<String, Region>,
}

impl MemorySurface {
    /// Create a surface with empty regions for each locator.
    #[must_use]
    pub fn with_regions<I, S>(locators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: locators
                .into_iter()
                .map(|l| (l.into(), Region::default()))
                .collect(),
        }
    }

    /// Current contents of a region.
    #[must_use]
    pub fn region(&self, locator: &str) -> Option<&Region> {
        self.regions.get(locator)
    }

    /// Text of a region, empty if the region does not exist.
    #[must_use]
    pub fn text(&self, locator: &str) -> &str {
        self.region(locator).map_or("", |r| r.text.as_str())
    }
}

impl DisplaySurface for MemorySurface {
    fn has_region(&self, locator: &str) -> bool {
        self.regions.contains_key(locator)
    }

    fn render(&mut self, locator: &str, region: &Region) {
        if let Some(slot) = self.regions.get_mut(locator) {
            slot.clone_from(region);
        }
    }
}
