//! Changelog sections in their fixed rendering order

use serde::{Deserialize, Serialize};

/// A section of the changelog document
///
/// Declaration order is rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Changes that break existing consumers
    Breaking,
    /// Endpoint paths that did not exist before
    NewEndpoints,
    /// Endpoint paths that no longer exist
    RemovedEndpoints,
    /// Non-endpoint additions
    Added,
    /// Changed values
    Modified,
    /// Non-endpoint removals
    Removed,
}

impl Section {
    /// Get the string identifier for this section
    pub fn id(&self) -> &'static str {
        match self {
            Section::Breaking => "BREAKING",
            Section::NewEndpoints => "NEW_ENDPOINTS",
            Section::RemovedEndpoints => "REMOVED_ENDPOINTS",
            Section::Added => "ADDED",
            Section::Modified => "MODIFIED",
            Section::Removed => "REMOVED",
        }
    }

    /// Markdown heading line for this section
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Breaking => "### ⚠️ Breaking Changes",
            Section::NewEndpoints => "### 🆕 New Endpoints",
            Section::RemovedEndpoints => "### 🗑️ Removed Endpoints",
            Section::Added => "### ✨ Added",
            Section::Modified => "### 🔄 Modified",
            Section::Removed => "### ❌ Removed",
        }
    }

    /// Parse section from string ID
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "BREAKING" => Some(Section::Breaking),
            "NEW_ENDPOINTS" => Some(Section::NewEndpoints),
            "REMOVED_ENDPOINTS" => Some(Section::RemovedEndpoints),
            "ADDED" => Some(Section::Added),
            "MODIFIED" => Some(Section::Modified),
            "REMOVED" => Some(Section::Removed),
            _ => None,
        }
    }

    /// All sections in rendering order
    pub fn all() -> [Self; 6] {
        [
            Section::Breaking,
            Section::NewEndpoints,
            Section::RemovedEndpoints,
            Section::Added,
            Section::Modified,
            Section::Removed,
        ]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown changelog section: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering_order_matches_declaration_order() {
        let all = Section::all();
        let mut sorted = all;
        sorted.sort();
        assert_eq!(all, sorted);
        assert_eq!(all[0], Section::Breaking);
        assert_eq!(all[5], Section::Removed);
    }

    #[test]
    fn test_id_round_trip() {
        for section in Section::all() {
            assert_eq!(section.id().parse::<Section>(), Ok(section));
        }
        assert!("DEPRECATED".parse::<Section>().is_err());
    }
}
