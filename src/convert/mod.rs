pub mod oil;

use std::fmt;

use crate::catalogue::{Catalogue, UnitId};
use crate::lookup::UnitError;

/// Which end of a conversion a unit name was given for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSide {
    From,
    To,
}

impl fmt::Display for UnitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSide::From => f.write_str("from"),
            UnitSide::To => f.write_str("to"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid unit type: {0}")]
    UnknownCategory(String),

    #[error("Invalid {side} unit: {unit}, {category}")]
    UnknownUnit {
        side: UnitSide,
        category: String,
        unit: String,
    },

    #[error("Invalid {side} unit id: {id:?} is not in this catalogue")]
    ForeignUnitId { side: UnitSide, id: UnitId },

    #[error("Cannot convert from {from} to {to}")]
    CategoryMismatch { from: String, to: String },
}

impl ConvertError {
    fn on_side(err: UnitError, side: UnitSide) -> Self {
        match err {
            UnitError::UnknownCategory(name) => ConvertError::UnknownCategory(name),
            UnitError::UnknownUnit { category, unit } => {
                ConvertError::UnknownUnit { side, category, unit }
            }
        }
    }
}

impl Catalogue {
    /// Convert `value` from one unit of `category` to another.
    ///
    /// Goes through the category's base unit. The same unit on both sides
    /// returns `value` untouched. Non-finite values are not rejected.
    pub fn convert(
        &self,
        category: &str,
        from: &str,
        to: &str,
        value: f64,
    ) -> Result<f64, ConvertError> {
        let category_index = self
            .resolve_category(category)
            .map_err(|e| ConvertError::on_side(e, UnitSide::From))?;

        let from_id = self
            .resolve_unit_in(category_index, from)
            .map_err(|e| ConvertError::on_side(e, UnitSide::From))?;
        let to_id = self
            .resolve_unit_in(category_index, to)
            .map_err(|e| ConvertError::on_side(e, UnitSide::To))?;

        let result = self.convert_ids(from_id, to_id, value)?;
        tracing::trace!(category, from, to, value, result, "converted");
        Ok(result)
    }

    /// Convert between two already-resolved units.
    ///
    /// Both ids must come from this catalogue and name units of the same
    /// category.
    pub fn convert_ids(&self, from: UnitId, to: UnitId, value: f64) -> Result<f64, ConvertError> {
        let from_unit = self
            .unit(from)
            .ok_or(ConvertError::ForeignUnitId { side: UnitSide::From, id: from })?;
        let to_unit = self
            .unit(to)
            .ok_or(ConvertError::ForeignUnitId { side: UnitSide::To, id: to })?;

        if from.category_index() != to.category_index() {
            let categories = self.categories();
            return Err(ConvertError::CategoryMismatch {
                from: categories[from.category_index()].name().to_string(),
                to: categories[to.category_index()].name().to_string(),
            });
        }
        if from == to {
            return Ok(value);
        }
        let base = from_unit.conversion().to_base(value);
        Ok(to_unit.conversion().from_base(base))
    }
}
