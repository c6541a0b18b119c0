//! Catalog entry kinds and what frontmatter values may refer to them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Capabilities shared by every kind of catalog entry.
pub trait CatalogEntry: DeserializeOwned {
    /// Name of the entry kind, as used in messages
    const KIND: &'static str;

    /// Whether `alias` names this entry.
    fn referred_to_by(&self, alias: &str) -> bool;

    fn display_name(&self) -> &str;

    /// Identifier usable in URLs.
    fn url_friendly_name(&self) -> String;

    fn description(&self) -> &str;

    fn learn_more_at(&self) -> Option<&str>;
}

/// A tag of the tags catalog, e.g. `sculptures`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub singular: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plural: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, rename = "learn more at")]
    pub learn_more_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<String>,
}

impl CatalogEntry for Tag {
    const KIND: &'static str = "tag";

    fn referred_to_by(&self, alias: &str) -> bool {
        loosely_matches(alias, &self.singular)
            || loosely_matches(alias, &self.plural)
            || self.aliases.iter().any(|a| loosely_matches(alias, a))
    }

    fn display_name(&self) -> &str {
        &self.plural
    }

    fn url_friendly_name(&self) -> String {
        slugify(&self.plural)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn learn_more_at(&self) -> Option<&str> {
        self.learn_more_at.as_deref()
    }
}

/// A technology of the technologies catalog, e.g. `blender`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Technology {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, rename = "learn more at")]
    pub learn_more_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub autodetect: Vec<String>,
}

impl CatalogEntry for Technology {
    const KIND: &'static str = "technology";

    fn referred_to_by(&self, alias: &str) -> bool {
        loosely_matches(alias, &self.slug)
            || loosely_matches(alias, &self.name)
            || self.aliases.iter().any(|a| loosely_matches(alias, a))
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn url_friendly_name(&self) -> String {
        self.slug.clone()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn learn_more_at(&self) -> Option<&str> {
        self.learn_more_at.as_deref()
    }
}

/// A resolved entry of any known kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Tag(Tag),
    Technology(Technology),
}

impl Entry {
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Tag(_) => Tag::KIND,
            Entry::Technology(_) => Technology::KIND,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Entry::Tag(tag) => tag.display_name(),
            Entry::Technology(technology) => technology.display_name(),
        }
    }

    pub fn url_friendly_name(&self) -> String {
        match self {
            Entry::Tag(tag) => tag.url_friendly_name(),
            Entry::Technology(technology) => technology.url_friendly_name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Entry::Tag(tag) => tag.description(),
            Entry::Technology(technology) => technology.description(),
        }
    }

    pub fn learn_more_at(&self) -> Option<&str> {
        match self {
            Entry::Tag(tag) => tag.learn_more_at(),
            Entry::Technology(technology) => technology.learn_more_at(),
        }
    }

    /// Hover text: a title line, then the description.
    pub fn markdown(&self) -> String {
        let mut text = format!(
            "# {} (`{}`)\n{}",
            self.display_name(),
            self.url_friendly_name(),
            self.description().trim_end()
        );
        if let Some(url) = self.learn_more_at() {
            text.push_str(&format!("\n\n[Learn more]({})", url));
        }
        text
    }
}

impl From<Tag> for Entry {
    fn from(tag: Tag) -> Self {
        Entry::Tag(tag)
    }
}

impl From<Technology> for Entry {
    fn from(technology: Technology) -> Self {
        Entry::Technology(technology)
    }
}

/// Case-insensitive comparison ignoring surrounding whitespace.
pub fn loosely_matches(alias: &str, candidate: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty() && alias.trim().to_lowercase() == candidate.to_lowercase()
}

/// Lowercase, with runs of non-alphanumeric characters collapsed to `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
