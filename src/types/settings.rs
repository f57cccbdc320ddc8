use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#88B04B";
pub const DEFAULT_SITE_NAME: &str = "고마움의 운명상담소";
pub const DEFAULT_HERO_TITLE: &str = "당신의 운명을 조용히 비추는\n따뜻한 상담";

/// Strongly typed view over the permissively stored settings table.
///
/// The three known keys always have a value (seed defaults fill any gap);
/// arbitrary future keys round-trip through `extra` so the underlying table
/// stays forward compatible. Serializes to the flat `{key: value}` object the
/// settings endpoint speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub primary_color: String,
    pub site_name: String,
    pub hero_title: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            hero_title: DEFAULT_HERO_TITLE.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl SiteSettings {
    /// Builds the typed view from stored key/value rows. Missing known keys
    /// fall back to the seed defaults.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "primary_color" => settings.primary_color = value,
                "site_name" => settings.site_name = value,
                "hero_title" => settings.hero_title = value,
                _ => {
                    settings.extra.insert(key, value);
                }
            }
        }
        settings
    }

    /// Flattens the view back into key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("primary_color".to_string(), self.primary_color.clone()),
            ("site_name".to_string(), self.site_name.clone()),
            ("hero_title".to_string(), self.hero_title.clone()),
        ];
        pairs.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "primary_color" => Some(&self.primary_color),
            "site_name" => Some(&self.site_name),
            "hero_title" => Some(&self.hero_title),
            other => self.extra.get(other).map(String::as_str),
        }
    }
}
