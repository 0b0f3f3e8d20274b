//! Immutable catalogue of unit categories.
//!
//! A [`Catalogue`] is built once from a [`CatalogueSource`], validated, and
//! never mutated afterwards, so it can be shared freely between threads.

mod conversion;
mod embedded;
mod source;

pub use conversion::Conversion;
pub use embedded::{BUILTIN_SOURCE, builtin};
pub use source::{
    CSV_SYNONYM_SEPARATOR, CatalogueSource, CategorySource, ReciprocalSource, UnitSource,
};

use std::collections::HashMap;

use crate::normalize::{NormalizedKey, normalize};

/// Fatal errors raised while loading or building a catalogue
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("Category {0} has no units")]
    EmptyCategory(String),

    #[error("Empty name in category {0}")]
    EmptyName(String),

    #[error("Synonym '{synonym}' in {category} names both {first} and {second}")]
    DuplicateSynonym {
        category: String,
        synonym: String,
        first: String,
        second: String,
    },

    #[error("Category {category} has more than one base unit: {first}, {second}")]
    MultipleBaseUnits {
        category: String,
        first: String,
        second: String,
    },

    #[error("Base unit {unit} of {category} must have factor 1 and offset 0")]
    BaseNotIdentity { category: String, unit: String },

    #[error("Invalid conversion for {unit} in {category}: {reason}")]
    InvalidDescriptor {
        category: String,
        unit: String,
        reason: String,
    },

    #[error("Unit name '{name}' appears in both {first} and {second}")]
    DuplicateGlobalName {
        name: String,
        first: String,
        second: String,
    },
}

/// Resolved identity of a unit within a catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId {
    pub(crate) category: usize,
    pub(crate) unit: usize,
}

impl UnitId {
    pub fn category_index(&self) -> usize {
        self.category
    }

    pub fn unit_index(&self) -> usize {
        self.unit
    }
}

/// A single unit and how it relates to its category's base unit
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    synonyms: Vec<String>,
    conversion: Conversion,
    base: bool,
}

impl Unit {
    /// Canonical display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate names, not including the display name
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// Display name followed by every synonym
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    pub fn is_base(&self) -> bool {
        self.base
    }
}

/// A named group of commensurable units
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    units: Vec<Unit>,
    ambiguous: bool,
    shared_names: Vec<String>,
    /// normalized synonym -> index into `units`
    index: HashMap<NormalizedKey, usize>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }

    pub fn shared_names(&self) -> &[String] {
        &self.shared_names
    }

    /// The unit flagged as base, if any
    pub fn base_unit(&self) -> Option<&Unit> {
        self.units.iter().find(|u| u.base)
    }

    pub(crate) fn unit_index(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn build(source: CategorySource) -> Result<Self, CatalogueError> {
        let category_name = source.name.trim().to_string();
        if normalize(&category_name).is_empty() {
            return Err(CatalogueError::EmptyName(source.name));
        }
        if source.units.is_empty() {
            return Err(CatalogueError::EmptyCategory(category_name));
        }

        let mut units: Vec<Unit> = Vec::with_capacity(source.units.len());
        let mut index: HashMap<NormalizedKey, usize> = HashMap::new();
        let mut base: Option<usize> = None;

        for unit_source in source.units {
            let conversion =
                unit_source.conversion().map_err(|reason| CatalogueError::InvalidDescriptor {
                    category: category_name.clone(),
                    unit: unit_source.name.clone(),
                    reason,
                })?;

            let position = units.len();
            if unit_source.base {
                if let Some(first) = base {
                    return Err(CatalogueError::MultipleBaseUnits {
                        category: category_name,
                        first: units[first].name.clone(),
                        second: unit_source.name,
                    });
                }
                if !conversion.is_identity() {
                    return Err(CatalogueError::BaseNotIdentity {
                        category: category_name,
                        unit: unit_source.name,
                    });
                }
                base = Some(position);
            }

            let unit = Unit {
                name: unit_source.name,
                synonyms: unit_source.synonyms,
                conversion,
                base: unit_source.base,
            };

            for name in unit.all_names() {
                let key = normalize(name);
                if key.is_empty() {
                    return Err(CatalogueError::EmptyName(category_name));
                }
                match index.get(&key).copied() {
                    // the same unit listing a name twice is harmless
                    Some(owner) if owner == position => {}
                    Some(owner) => {
                        return Err(CatalogueError::DuplicateSynonym {
                            category: category_name,
                            synonym: name.to_string(),
                            first: units[owner].name.clone(),
                            second: unit.name.clone(),
                        });
                    }
                    None => {
                        index.insert(key, position);
                    }
                }
            }

            units.push(unit);
        }

        Ok(Self {
            name: category_name,
            units,
            ambiguous: source.ambiguous,
            shared_names: source.shared_names,
            index,
        })
    }
}

/// All categories, in declared order, plus the category name index
#[derive(Debug, Clone)]
pub struct Catalogue {
    categories: Vec<Category>,
    index: HashMap<NormalizedKey, usize>,
}

impl Catalogue {
    /// Validate `source` and freeze it into a catalogue
    pub fn from_source(source: CatalogueSource) -> Result<Self, CatalogueError> {
        let mut categories = Vec::with_capacity(source.categories.len());
        let mut index = HashMap::new();

        for category_source in source.categories {
            let category = Category::build(category_source)?;
            let key = normalize(category.name());
            if index.contains_key(&key) {
                return Err(CatalogueError::DuplicateCategory(category.name));
            }
            index.insert(key, categories.len());
            categories.push(category);
        }

        let catalogue = Self { categories, index };
        tracing::debug!(
            categories = catalogue.categories.len(),
            units = catalogue.unit_count(),
            "built unit catalogue"
        );
        Ok(catalogue)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogueError> {
        Self::from_source(CatalogueSource::from_toml_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogueError> {
        Self::from_source(CatalogueSource::from_json_file(path)?)
    }

    pub fn from_csv_file(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogueError> {
        Self::from_source(CatalogueSource::from_csv_file(path)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of units across all categories
    pub fn unit_count(&self) -> usize {
        self.categories.iter().map(|c| c.units.len()).sum()
    }

    pub(crate) fn category_index(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }
}
