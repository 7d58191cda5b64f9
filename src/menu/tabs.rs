//! # Tabs and Menu Items
//!
//! A [`TabDescriptor`] is the static description of one tab: its id, the
//! menu number taken from the id's numeric suffix, and how many menu items it
//! owns. Menu items are never stored; [`TabDescriptor::menu_items`] derives
//! them on demand so the displayed list can't drift from the configuration.

use crate::error::CallError;

/// Prefix shared by every generated endpoint path.
pub const ENDPOINT_PREFIX: &str = "/api/menu/item";

/// Static description of a single tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    pub id: String,
    /// Numeric suffix of `id` (`tab3` -> 3), used for ordering.
    pub number: u32,
    /// The suffix digits as written (`tab03` -> `03`), used in labels and endpoints.
    pub suffix: String,
    pub item_count: usize,
}

impl TabDescriptor {
    /// Build a descriptor, extracting the menu number from the id.
    ///
    /// Returns `None` when the id does not end in ASCII digits.
    pub fn new(id: impl Into<String>, item_count: usize) -> Option<Self> {
        let id = id.into();
        let suffix = tab_suffix(&id)?.to_string();
        let number = suffix.parse().ok()?;
        Some(Self {
            id,
            number,
            suffix,
            item_count,
        })
    }

    /// Generate the full menu for this tab, items `1..=item_count`.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        (1..=self.item_count)
            .map(|index| MenuItem::new(&self.suffix, index))
            .collect()
    }

    /// Generate the single item at a 1-based `index`, if it exists.
    pub fn menu_item(&self, index: usize) -> Option<MenuItem> {
        if index == 0 || index > self.item_count {
            return None;
        }
        Some(MenuItem::new(&self.suffix, index))
    }
}

/// A selectable menu entry and the mock endpoint it calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub endpoint: String,
}

impl MenuItem {
    pub fn new(tab_suffix: &str, index: usize) -> Self {
        Self {
            label: format!("Menu Item {}-{}", tab_suffix, index),
            endpoint: format!("{}{}-{}", ENDPOINT_PREFIX, tab_suffix, index),
        }
    }
}

/// The trailing ASCII digits of a tab id, leading zeros included.
pub fn tab_suffix(id: &str) -> Option<&str> {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(&id[digits_start..])
}

/// Extract the trailing decimal number of a tab id.
pub fn tab_number(id: &str) -> Option<u32> {
    tab_suffix(id)?.parse().ok()
}

/// Parse an endpoint of the form `/api/menu/item<n>-<i>` into `(n, i)`.
pub fn parse_endpoint(endpoint: &str) -> Result<(u32, usize), CallError> {
    let malformed = || CallError::MalformedEndpoint(endpoint.to_string());

    let rest = endpoint.strip_prefix(ENDPOINT_PREFIX).ok_or_else(malformed)?;
    let (tab, index) = rest.split_once('-').ok_or_else(malformed)?;

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(tab) || !all_digits(index) {
        return Err(malformed());
    }

    let tab = tab.parse().map_err(|_| malformed())?;
    let index = index.parse().map_err(|_| malformed())?;
    Ok((tab, index))
}
