//! Destination catalog (the links behind the menu).

use serde::{Deserialize, Serialize};

/// Menu group a destination is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Social,
    Projects,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[Section::Social, Section::Projects]
    }

    /// Bracketed tag shown above the group.
    pub fn tag(self) -> &'static str {
        match self {
            Section::Social => "[SOCIAL]",
            Section::Projects => "[PROJECTS]",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Section::Social => "Personal profiles and accounts:",
            Section::Projects => "Development portfolio and work:",
        }
    }
}

/// One external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Text shown in the menu.
    pub label: String,
    /// Name announced in the boot log ("Target selected: ...").
    /// Falls back to the label when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub url: String,
    #[serde(default)]
    pub section: Section,
}

impl Destination {
    pub fn new(label: &str, target: &str, url: &str, section: Section) -> Self {
        Self {
            label: label.to_string(),
            target: Some(target.to_string()),
            url: url.to_string(),
            section,
        }
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.label)
    }
}

/// Ordered list of destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    /// The links shipped with linkboot.
    pub fn builtin() -> Self {
        use Section::{Projects, Social};
        Self::new(vec![
            Destination::new(
                "Discord Profile",
                "Discord Profile",
                "https://discord.com/users/1256365134826311751",
                Social,
            ),
            Destination::new(
                "GitHub Repository",
                "GitHub Repository",
                "https://github.com/TaverNxyz",
                Social,
            ),
            Destination::new(
                "Steam Profile",
                "Steam Profile",
                "https://steamcommunity.com/id/terryyyyyyy/",
                Social,
            ),
            Destination::new(
                "Crypto Exchange",
                "Crypto Exchange",
                "https://crypto.tavernappy.xyz",
                Social,
            ),
            Destination::new(
                "RageLive Public",
                "Project",
                "https://publicized.ragelive.xyz/",
                Projects,
            ),
            Destination::new(
                "Plentiful Power",
                "Project",
                "https://plentifulpower.xyz/",
                Projects,
            ),
            Destination::new(
                "Plentiful Power Main",
                "Project",
                "https://main.plentifulpower.xyz/",
                Projects,
            ),
            Destination::new(
                "Plentiful Power Archive",
                "Project",
                "https://archive.plentifulpower.xyz/",
                Projects,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Destination> {
        self.destinations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    /// Finds a destination by 1-based index or case-insensitive label.
    pub fn find(&self, query: &str) -> Option<&Destination> {
        let query = query.trim();
        if let Ok(n) = query.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.get(i));
        }
        self.destinations
            .iter()
            .find(|d| d.label.eq_ignore_ascii_case(query))
    }

    /// Entries of one section, with their catalog index.
    pub fn section(&self, section: Section) -> impl Iterator<Item = (usize, &Destination)> {
        self.destinations
            .iter()
            .enumerate()
            .filter(move |(_, d)| d.section == section)
    }

    /// Catalog indices in display order (grouped by section).
    pub fn display_order(&self) -> Vec<usize> {
        Section::all()
            .iter()
            .flat_map(|s| self.section(*s).map(|(i, _)| i))
            .collect()
    }
}
