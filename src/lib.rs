//! Data-driven unit conversion.
//!
//! Units are grouped into categories ("Length", "Area", ...). Every unit
//! carries a list of synonyms and a conversion to its category's base unit.
//! Names are matched after [`normalize`], and always within one category.
//!
//! The free functions below work on the built-in catalogue; the same
//! operations are available as [`Catalogue`] methods for catalogues loaded
//! from elsewhere.

pub mod catalogue;
pub mod convert;
pub mod lookup;
pub mod normalize;
pub mod types;

pub use catalogue::{
    Catalogue, CatalogueError, CatalogueSource, Category, Conversion, Unit, UnitId, builtin,
};
pub use convert::{ConvertError, UnitSide};
pub use lookup::UnitError;
pub use normalize::{NormalizedKey, normalize};

/// Category names of the built-in catalogue, in declared order
pub fn list_categories() -> Vec<&'static str> {
    builtin().list_categories()
}

pub fn list_unit_names(category: &str) -> Result<Vec<&'static str>, UnitError> {
    builtin().list_unit_names(category)
}

pub fn resolve_unit(category: &str, unit: &str) -> Result<UnitId, UnitError> {
    builtin().resolve_unit(category, unit)
}

/// Convert `value` between two units of `category` in the built-in catalogue
pub fn convert(category: &str, from: &str, to: &str, value: f64) -> Result<f64, ConvertError> {
    builtin().convert(category, from, to, value)
}
