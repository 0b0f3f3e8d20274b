//! Raw catalogue configuration as it appears on disk or embedded in the crate.
//!
//! The source types are plain serde models. Nothing here is validated;
//! [`Catalogue::from_source`](super::Catalogue::from_source) does that.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::{CatalogueError, Conversion};

/// Nested category -> unit definitions, in declared order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueSource {
    #[serde(rename = "category", default)]
    pub categories: Vec<CategorySource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySource {
    pub name: String,

    /// Names in this category deliberately overlap other categories, so it
    /// is left out of the catalogue-wide name map.
    #[serde(default, skip_serializing_if = "is_false")]
    pub ambiguous: bool,

    /// Names this category may share with other categories in the
    /// catalogue-wide name map. The other category owns them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_names: Vec<String>,

    #[serde(rename = "unit", default)]
    pub units: Vec<UnitSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSource {
    pub name: String,

    #[serde(default)]
    pub synonyms: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reciprocal: Option<ReciprocalSource>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub base: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReciprocalSource {
    pub numerator: f64,
    pub shift: f64,
    #[serde(default = "one")]
    pub scale: f64,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn one() -> f64 {
    1.0
}

impl UnitSource {
    /// Scale-only unit
    pub fn scaled(name: impl Into<String>, scale: f64, synonyms: &[&str]) -> Self {
        Self {
            name: name.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            scale: Some(scale),
            offset: None,
            reciprocal: None,
            base: false,
        }
    }

    /// Mark as the base unit of its category
    pub fn as_base(mut self) -> Self {
        self.base = true;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build the conversion descriptor. Exactly one of `scale` and
    /// `reciprocal` must be present; `offset` only goes with `scale`.
    pub fn conversion(&self) -> Result<Conversion, String> {
        let conversion = match (self.scale, self.offset, self.reciprocal) {
            (Some(scale), None, None) => Conversion::Scale(scale),
            (Some(scale), Some(offset), None) => Conversion::Affine { scale, offset },
            (None, None, Some(r)) => Conversion::Reciprocal {
                numerator: r.numerator,
                shift: r.shift,
                scale: r.scale,
            },
            (None, Some(_), None) => return Err("offset given without scale".into()),
            (None, None, None) => return Err("needs either scale or reciprocal".into()),
            (_, _, Some(_)) => {
                return Err("reciprocal cannot be combined with scale or offset".into());
            }
        };
        conversion.validate()?;
        Ok(conversion)
    }

    fn from_conversion(
        name: &str,
        synonyms: &[String],
        conversion: Conversion,
        base: bool,
    ) -> Self {
        let (scale, offset, reciprocal) = match conversion {
            Conversion::Scale(factor) => (Some(factor), None, None),
            Conversion::Affine { scale, offset } => (Some(scale), Some(offset), None),
            Conversion::Reciprocal { numerator, shift, scale } => {
                (None, None, Some(ReciprocalSource { numerator, shift, scale }))
            }
        };
        Self {
            name: name.to_string(),
            synonyms: synonyms.to_vec(),
            scale,
            offset,
            reciprocal,
            base,
        }
    }
}

/// One row of the flat CSV form
#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    unit: String,
    #[serde(default)]
    synonyms: String,
    scale: f64,
    offset: Option<f64>,
    base: Option<bool>,
}

/// Separator between synonyms inside the CSV `synonyms` column
pub const CSV_SYNONYM_SEPARATOR: char = '|';

impl CatalogueSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogueError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogueError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let json = fs::read_to_string(path.as_ref())?;
        let source = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            categories = source.categories.len(),
            "loaded catalogue source"
        );
        Ok(source)
    }

    /// Save to JSON file
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), CatalogueError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read the flat `category,unit,synonyms,scale,offset,base` table.
    /// Rows of one category need not be adjacent; categories keep the order
    /// in which they first appear.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, CatalogueError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut source = Self::new();
        for row in rdr.deserialize() {
            let row: CsvRow = row?;
            let synonyms = row
                .synonyms
                .split(CSV_SYNONYM_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            let unit = UnitSource {
                name: row.unit,
                synonyms,
                scale: Some(row.scale),
                offset: row.offset,
                reciprocal: None,
                base: row.base.unwrap_or(false),
            };

            match source.categories.iter_mut().find(|c| c.name == row.category) {
                Some(category) => category.units.push(unit),
                None => source.categories.push(CategorySource {
                    name: row.category,
                    ambiguous: false,
                    shared_names: Vec::new(),
                    units: vec![unit],
                }),
            }
        }
        Ok(source)
    }

    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let file = fs::File::open(path.as_ref())?;
        let source = Self::from_csv_reader(io::BufReader::new(file))?;
        tracing::debug!(
            path = %path.as_ref().display(),
            categories = source.categories.len(),
            "loaded catalogue source"
        );
        Ok(source)
    }
}

impl super::Catalogue {
    /// Rebuild the raw source this catalogue was built from
    pub fn to_source(&self) -> CatalogueSource {
        let categories = self
            .categories()
            .iter()
            .map(|category| CategorySource {
                name: category.name().to_string(),
                ambiguous: category.is_ambiguous(),
                shared_names: category.shared_names().to_vec(),
                units: category
                    .units()
                    .iter()
                    .map(|unit| {
                        UnitSource::from_conversion(
                            unit.name(),
                            unit.synonyms(),
                            unit.conversion(),
                            unit.is_base(),
                        )
                    })
                    .collect(),
            })
            .collect();
        CatalogueSource { categories }
    }
}
