use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    area::square_meter,
    f64::{Area, Length, Mass, ThermodynamicTemperature, Time, Velocity, Volume},
    length::meter,
    mass::kilogram,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
    volume::cubic_meter,
};

use crate::catalogue::{Catalogue, builtin};
use crate::convert::ConvertError;

/// A `uom` quantity whose catalogue category is known.
///
/// `BASE_UNIT` must name a unit of `CATEGORY` that matches the SI unit the
/// quantity is built from.
pub trait CatalogueQuantity: Sized {
    const CATEGORY: &'static str;
    const BASE_UNIT: &'static str;

    fn from_base_value(value: f64) -> Self;
    fn base_value(&self) -> f64;
}

macro_rules! catalogue_quantity {
    ($quantity:ty, $category:literal, $base:literal, $unit:ty) => {
        impl CatalogueQuantity for $quantity {
            const CATEGORY: &'static str = $category;
            const BASE_UNIT: &'static str = $base;

            fn from_base_value(value: f64) -> Self {
                <$quantity>::new::<$unit>(value)
            }

            fn base_value(&self) -> f64 {
                self.get::<$unit>()
            }
        }
    };
}

catalogue_quantity!(Length, "Length", "meter", meter);
catalogue_quantity!(Area, "Area", "square meter", square_meter);
catalogue_quantity!(Volume, "Volume", "cubic meter", cubic_meter);
catalogue_quantity!(Mass, "Mass", "kilogram", kilogram);
catalogue_quantity!(Time, "Time", "second", second);
catalogue_quantity!(Velocity, "Velocity", "meter per second", meter_per_second);
catalogue_quantity!(ThermodynamicTemperature, "Temperature", "Kelvin", kelvin);

/// A raw value with a free-form unit name, as read from user input or a
/// data file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type AreaValue = WithUnit<Area>;
pub type VolumeValue = WithUnit<Volume>;
pub type MassValue = WithUnit<Mass>;
pub type TimeValue = WithUnit<Time>;
pub type VelocityValue = WithUnit<Velocity>;
pub type TemperatureValue = WithUnit<ThermodynamicTemperature>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }
}

impl<T: CatalogueQuantity> WithUnit<T> {
    /// Resolve the unit name through the built-in catalogue
    pub fn to_quantity(&self) -> Result<T, ConvertError> {
        self.to_quantity_in(builtin())
    }

    pub fn to_quantity_in(&self, catalogue: &Catalogue) -> Result<T, ConvertError> {
        let base = catalogue.convert(T::CATEGORY, &self.unit, T::BASE_UNIT, self.value)?;
        Ok(T::from_base_value(base))
    }

    /// Express `quantity` in `unit`
    pub fn from_quantity(quantity: &T, unit: &str) -> Result<Self, ConvertError> {
        Self::from_quantity_in(builtin(), quantity, unit)
    }

    pub fn from_quantity_in(
        catalogue: &Catalogue,
        quantity: &T,
        unit: &str,
    ) -> Result<Self, ConvertError> {
        let base = quantity.base_value();
        let value = catalogue.convert(T::CATEGORY, T::BASE_UNIT, unit, base)?;
        Ok(Self::new(value, unit))
    }

    /// Same quantity, expressed in another unit
    pub fn convert_to(&self, unit: &str) -> Result<Self, ConvertError> {
        let value = builtin().convert(T::CATEGORY, &self.unit, unit, self.value)?;
        Ok(Self::new(value, unit))
    }
}
