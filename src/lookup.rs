//! Name resolution over a [`Catalogue`].
//!
//! Every lookup normalizes its input first, so "Square  Feet", "square feet"
//! and "SQUARE FEET" all resolve the same way. Unit resolution is always
//! scoped to one category.

use std::collections::HashMap;

use crate::catalogue::{Catalogue, CatalogueError, Category, Unit, UnitId};
use crate::normalize::{NormalizedKey, normalize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown unit type: {0}")]
    UnknownCategory(String),

    #[error("Unknown {category} unit: {unit}")]
    UnknownUnit { category: String, unit: String },
}

impl Catalogue {
    /// Category display names in declared order
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories().iter().map(Category::name).collect()
    }

    /// Canonical unit names of `category`, in declared order
    pub fn list_unit_names(&self, category: &str) -> Result<Vec<&str>, UnitError> {
        let category = self.category(category)?;
        Ok(category.units().iter().map(Unit::name).collect())
    }

    pub fn category(&self, name: &str) -> Result<&Category, UnitError> {
        let index = self.resolve_category(name)?;
        Ok(&self.categories()[index])
    }

    pub(crate) fn resolve_category(&self, name: &str) -> Result<usize, UnitError> {
        self.category_index(normalize(name).as_str())
            .ok_or_else(|| UnitError::UnknownCategory(name.to_string()))
    }

    /// Resolve a unit name or synonym within `category`
    pub fn resolve_unit(&self, category: &str, unit: &str) -> Result<UnitId, UnitError> {
        let category_index = self.resolve_category(category)?;
        self.resolve_unit_in(category_index, unit)
    }

    pub(crate) fn resolve_unit_in(&self, category: usize, unit: &str) -> Result<UnitId, UnitError> {
        let found = &self.categories()[category];
        found
            .unit_index(normalize(unit).as_str())
            .map(|index| UnitId { category, unit: index })
            .ok_or_else(|| UnitError::UnknownUnit {
                category: found.name().to_string(),
                unit: unit.to_string(),
            })
    }

    /// The unit an identifier refers to.
    ///
    /// Identifiers are only meaningful for the catalogue that produced them;
    /// `None` when `id` is out of range here.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.categories().get(id.category)?.units().get(id.unit)
    }

    pub fn synonyms(&self, category: &str, unit: &str) -> Result<&[String], UnitError> {
        let category_index = self.resolve_category(category)?;
        let id = self.resolve_unit_in(category_index, unit)?;
        Ok(self.categories()[category_index].units()[id.unit].synonyms())
    }

    /// Conventional abbreviation: the first synonym listed
    pub fn abbreviation(&self, category: &str, unit: &str) -> Result<Option<&str>, UnitError> {
        let synonyms = self.synonyms(category, unit)?;
        Ok(synonyms.first().map(String::as_str))
    }

    /// Map every unit name in the catalogue to its category.
    ///
    /// Ambiguous categories are skipped. A name found in two categories is
    /// an error unless one of them lists it in `shared_names`, in which case
    /// the other category keeps it.
    pub fn find_unit_categories(&self) -> Result<HashMap<NormalizedKey, String>, CatalogueError> {
        let mut owners: HashMap<NormalizedKey, usize> = HashMap::new();

        for (index, category) in self.categories().iter().enumerate() {
            if category.is_ambiguous() {
                continue;
            }
            let shared: Vec<NormalizedKey> =
                category.shared_names().iter().map(|s| normalize(s)).collect();

            for unit in category.units() {
                for name in unit.all_names() {
                    let key = normalize(name);
                    let Some(owner) = owners.get(&key).copied() else {
                        owners.insert(key, index);
                        continue;
                    };
                    if owner == index || shared.contains(&key) {
                        continue;
                    }

                    let other = &self.categories()[owner];
                    if other.shared_names().iter().any(|s| normalize(s) == key) {
                        owners.insert(key, index);
                    } else {
                        return Err(CatalogueError::DuplicateGlobalName {
                            name: name.to_string(),
                            first: other.name().to_string(),
                            second: category.name().to_string(),
                        });
                    }
                }
            }
        }

        Ok(owners
            .into_iter()
            .map(|(key, index)| (key, self.categories()[index].name().to_string()))
            .collect())
    }

    /// True when both names belong to the same category and resolve to the
    /// same unit there. Unknown names are never the same unit.
    pub fn is_same_unit(&self, a: &str, b: &str) -> Result<bool, CatalogueError> {
        let owners = self.find_unit_categories()?;
        let first = owners.get(normalize(a).as_str());
        let second = owners.get(normalize(b).as_str());
        let (Some(first), Some(second)) = (first, second) else {
            return Ok(false);
        };
        if first != second {
            return Ok(false);
        }
        match (self.resolve_unit(first, a), self.resolve_unit(second, b)) {
            (Ok(x), Ok(y)) => Ok(x == y),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{CatalogueSource, CategorySource, UnitSource, builtin};

    #[test]
    fn test_list_categories_in_order() {
        let categories = builtin().list_categories();
        assert_eq!(categories[0], "Length");
        assert!(categories.contains(&"Area"));
        assert!(categories.contains(&"Temperature"));
        assert_eq!(categories, builtin().list_categories());
    }

    #[test]
    fn test_list_unit_names_area() {
        let names = builtin().list_unit_names("Area").unwrap();
        assert_eq!(names[0], "square meter");
        assert!(names.contains(&"acre"));

        let acre = builtin().synonyms("Area", "acre").unwrap();
        assert!(!acre.is_empty());
    }

    #[test]
    fn test_list_unit_names_normalizes_category() {
        let names = builtin().list_unit_names("  kinematic   VISCOSITY ").unwrap();
        assert_eq!(names[0], "Stoke");
    }

    #[test]
    fn test_list_unit_names_unknown() {
        let err = builtin().list_unit_names("Luminosity").unwrap_err();
        assert_eq!(err, UnitError::UnknownCategory("Luminosity".into()));
    }

    #[test]
    fn test_meter_synonyms() {
        let synonyms = builtin().synonyms("Length", "meter").unwrap();
        assert_eq!(synonyms, ["m", "meters", "metre"]);
    }

    #[test]
    fn test_synonym_equivalence() {
        let catalogue = builtin();
        for category in catalogue.categories() {
            for unit in category.units() {
                let expected = catalogue.resolve_unit(category.name(), unit.name()).unwrap();
                for synonym in unit.synonyms() {
                    let id = catalogue.resolve_unit(category.name(), synonym).unwrap();
                    assert_eq!(id, expected, "{} / {}", category.name(), synonym);
                    assert_eq!(catalogue.unit(id).map(Unit::name), Some(unit.name()));
                }
            }
        }
    }

    #[test]
    fn test_resolve_is_case_and_space_insensitive() {
        let catalogue = builtin();
        let a = catalogue.resolve_unit("area", "Square   FEET").unwrap();
        let b = catalogue.resolve_unit("AREA", "ft^2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_category_isolation() {
        let catalogue = builtin();
        // "acre" is an area, not a length
        let err = catalogue.resolve_unit("Length", "acre").unwrap_err();
        assert_eq!(
            err,
            UnitError::UnknownUnit { category: "Length".into(), unit: "acre".into() }
        );

        // "inch" exists in both, but as different units
        let length_inch = catalogue.resolve_unit("Length", "inch").unwrap();
        let slick_inch = catalogue.resolve_unit("Oil Concentration", "inch").unwrap();
        assert_ne!(length_inch, slick_inch);
        assert_ne!(
            catalogue.unit(length_inch).map(Unit::conversion),
            catalogue.unit(slick_inch).map(Unit::conversion)
        );
    }

    #[test]
    fn test_unknown_category_wins_over_unknown_unit() {
        let err = builtin().resolve_unit("Lenght", "parsec").unwrap_err();
        assert!(matches!(err, UnitError::UnknownCategory(_)));
    }

    #[test]
    fn test_abbreviation() {
        let catalogue = builtin();
        assert_eq!(catalogue.abbreviation("Length", "meter").unwrap(), Some("m"));
        assert_eq!(catalogue.abbreviation("Mass", "pounds").unwrap(), Some("lb"));
        assert_eq!(
            catalogue.abbreviation("Concentration In Water", "nanogram per liter").unwrap(),
            None
        );
    }

    #[test]
    fn test_find_unit_categories_builtin() {
        let owners = builtin().find_unit_categories().unwrap();
        assert_eq!(owners.get("ft").map(String::as_str), Some("Length"));
        assert_eq!(owners.get("acre").map(String::as_str), Some("Area"));
        // shared names stay with the owning category
        assert_eq!(owners.get("oz").map(String::as_str), Some("Mass"));
        assert_eq!(owners.get("s").map(String::as_str), Some("Time"));
        // ambiguous categories are left out
        assert!(owners.get("ppm").is_none());
    }

    #[test]
    fn test_find_unit_categories_duplicate() {
        let source = CatalogueSource {
            categories: vec![
                CategorySource {
                    name: "Length".into(),
                    ambiguous: false,
                    shared_names: Vec::new(),
                    units: vec![UnitSource::scaled("meter", 1.0, &["m"]).as_base()],
                },
                CategorySource {
                    name: "Mass".into(),
                    ambiguous: false,
                    shared_names: Vec::new(),
                    units: vec![UnitSource::scaled("mille", 1.0, &["M"]).as_base()],
                },
            ],
        };
        let catalogue = Catalogue::from_source(source).unwrap();
        let err = catalogue.find_unit_categories().unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateGlobalName { .. }));
    }

    #[test]
    fn test_is_same_unit() {
        let catalogue = builtin();
        assert!(catalogue.is_same_unit("m", "metre").unwrap());
        assert!(catalogue.is_same_unit("ft", "Feet").unwrap());
        assert!(!catalogue.is_same_unit("m", "ft").unwrap());
        assert!(!catalogue.is_same_unit("m", "m^2").unwrap());
        assert!(!catalogue.is_same_unit("m", "parsec").unwrap());
    }

    #[test]
    fn test_unit_from_other_catalogue() {
        let source = CatalogueSource {
            categories: vec![CategorySource {
                name: "Length".into(),
                ambiguous: false,
                shared_names: Vec::new(),
                units: vec![UnitSource::scaled("meter", 1.0, &["m"]).as_base()],
            }],
        };
        let small = Catalogue::from_source(source).unwrap();
        let gallon = builtin().resolve_unit("Volume", "gal").unwrap();
        assert!(small.unit(gallon).is_none());

        let foot = builtin().resolve_unit("Length", "ft").unwrap();
        assert!(small.unit(foot).is_none());

        let meter = small.resolve_unit("Length", "meter").unwrap();
        assert_eq!(small.unit(meter).map(Unit::name), Some("meter"));
    }
}
