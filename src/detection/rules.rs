//! Field-name rules for combinatorial PII categories
//!
//! Names, addresses, device identifiers and IP addresses are only considered
//! when they appear under a recognised field name. The allow-lists are
//! locale-specific, so they are loaded from TOML rather than hard-coded.

use crate::detection::models::PiiCategory;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Rules file layout
#[derive(Debug, Deserialize)]
struct RulesFile {
    fields: HashMap<String, Vec<String>>,
    #[serde(default)]
    address: Option<AddressSection>,
}

#[derive(Debug, Deserialize)]
struct AddressSection {
    keywords: Vec<String>,
}

/// Mapping from combinatorial category to recognised field names
#[derive(Debug, Clone, Default)]
pub struct FieldNameRules {
    by_category: HashMap<PiiCategory, HashSet<String>>,
    address_keywords: Option<Vec<String>>,
}

impl FieldNameRules {
    /// Load rules from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read field-name rules: {}", path.as_ref().display())
        })?;

        Self::from_toml(&content)
    }

    /// Parse rules from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: RulesFile =
            toml::from_str(content).context("Failed to parse field-name rules TOML")?;

        let mut by_category: HashMap<PiiCategory, HashSet<String>> = HashMap::new();
        for (name, fields) in file.fields {
            let category = PiiCategory::from_name(&name)
                .with_context(|| format!("Unknown category in field-name rules: {name}"))?;
            if !category.is_combinatorial() {
                anyhow::bail!(
                    "Field-name rules only apply to name, address, device_id and ip_address, not {category}"
                );
            }

            by_category
                .entry(category)
                .or_default()
                .extend(fields.iter().map(|f| normalize_field_name(f)));
        }

        Ok(Self {
            by_category,
            address_keywords: file.address.map(|a| a.keywords),
        })
    }

    /// Built-in rules shipped with the crate
    pub fn default_rules() -> Result<Self> {
        let default_toml = include_str!("../../rules/field_names.toml");
        Self::from_toml(default_toml)
    }

    /// Replace the allow-list for one category
    pub fn with_fields<I, S>(mut self, category: PiiCategory, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.by_category.insert(
            category,
            fields
                .into_iter()
                .map(|f| normalize_field_name(f.as_ref()))
                .collect(),
        );
        self
    }

    /// Check if `field_name` is on the allow-list for `category`
    pub fn recognizes(&self, category: PiiCategory, field_name: &str) -> bool {
        self.by_category
            .get(&category)
            .is_some_and(|names| names.contains(&normalize_field_name(field_name)))
    }

    /// Address anchor keywords overriding the built-in list, if configured
    pub fn address_keywords(&self) -> Option<&[String]> {
        self.address_keywords.as_deref()
    }

    /// Number of recognised field names for a category
    pub fn field_count(&self, category: PiiCategory) -> usize {
        self.by_category.get(&category).map_or(0, HashSet::len)
    }
}

/// Lower-case a field name and unify separators to underscores
pub fn normalize_field_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
