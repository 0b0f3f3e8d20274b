//! Oil quantity conversion between mass and volume.
//!
//! Mass and volume live in different categories, so these go through a
//! density: mass = volume * density, all in SI (kg, m^3, kg/m^3).

use super::ConvertError;
use crate::catalogue::Catalogue;

const MASS: &str = "Mass";
const VOLUME: &str = "Volume";
const DENSITY: &str = "Density";

const KILOGRAM: &str = "kg";
const CUBIC_METER: &str = "m^3";
const KILOGRAM_PER_CUBIC_METER: &str = "kg/m^3";

/// A value tagged with the name of its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measured<'a> {
    pub value: f64,
    pub unit: &'a str,
}

impl<'a> Measured<'a> {
    pub fn new(value: f64, unit: &'a str) -> Self {
        Self { value, unit }
    }
}

impl Catalogue {
    /// Volume, in `volume_unit`, of `mass` of oil at `density`
    pub fn oil_volume(
        &self,
        mass: Measured<'_>,
        density: Measured<'_>,
        volume_unit: &str,
    ) -> Result<f64, ConvertError> {
        let density =
            self.convert(DENSITY, density.unit, KILOGRAM_PER_CUBIC_METER, density.value)?;
        let mass = self.convert(MASS, mass.unit, KILOGRAM, mass.value)?;
        let volume = mass / density;
        self.convert(VOLUME, CUBIC_METER, volume_unit, volume)
    }

    /// Mass, in `mass_unit`, of `volume` of oil at `density`
    pub fn oil_mass(
        &self,
        volume: Measured<'_>,
        density: Measured<'_>,
        mass_unit: &str,
    ) -> Result<f64, ConvertError> {
        let density =
            self.convert(DENSITY, density.unit, KILOGRAM_PER_CUBIC_METER, density.value)?;
        let volume = self.convert(VOLUME, volume.unit, CUBIC_METER, volume.value)?;
        let mass = volume * density;
        self.convert(MASS, KILOGRAM, mass_unit, mass)
    }
}

/// Convert an oil mass to a volume using the built-in catalogue
pub fn to_volume(
    mass: f64,
    mass_unit: &str,
    density: f64,
    density_unit: &str,
    volume_unit: &str,
) -> Result<f64, ConvertError> {
    crate::catalogue::builtin().oil_volume(
        Measured::new(mass, mass_unit),
        Measured::new(density, density_unit),
        volume_unit,
    )
}

/// Convert an oil volume to a mass using the built-in catalogue
pub fn to_mass(
    volume: f64,
    volume_unit: &str,
    density: f64,
    density_unit: &str,
    mass_unit: &str,
) -> Result<f64, ConvertError> {
    crate::catalogue::builtin().oil_mass(
        Measured::new(volume, volume_unit),
        Measured::new(density, density_unit),
        mass_unit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::UnitSide;
    use approx::assert_relative_eq;

    fn failing_category(err: &ConvertError) -> Option<(&str, UnitSide)> {
        match err {
            ConvertError::UnknownUnit { category, side, .. } => Some((category.as_str(), *side)),
            _ => None,
        }
    }

    #[test]
    fn test_water_mass_to_volume() {
        // a tonne of water at 1000 kg/m^3 is one cubic meter
        let m3 = to_volume(1000.0, "kg", 1000.0, "kg/m^3", "m^3").unwrap();
        assert_relative_eq!(m3, 1.0, epsilon = 1e-12);

        let liters = to_volume(1.0, "metric ton", 1.0, "g/cm^3", "liters").unwrap();
        assert_relative_eq!(liters, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_volume_to_mass_barrels() {
        // one barrel of 0.85 g/cm^3 crude
        let kg = to_mass(1.0, "bbl", 0.85, "g/cm^3", "kg").unwrap();
        assert_relative_eq!(kg, 0.1589873 * 850.0, epsilon = 1e-9);
    }

    #[test]
    fn test_api_density_input() {
        // 10 API is water at 15C
        let kg = to_mass(1.0, "m^3", 10.0, "api", "kg").unwrap();
        assert_relative_eq!(kg, 999.13, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let volume = to_volume(12345.0, "lbs", 0.9, "SG", "gal").unwrap();
        let mass = to_mass(volume, "gal", 0.9, "SG", "lbs").unwrap();
        assert_relative_eq!(mass, 12345.0, max_relative = 1e-12);
    }

    #[test]
    fn test_bad_units_name_the_category() {
        let err = to_volume(1.0, "stone", 1.0, "g/cm^3", "m^3").unwrap_err();
        assert_eq!(failing_category(&err), Some(("Mass", UnitSide::From)));

        let err = to_mass(1.0, "m^3", 1.0, "g/cm^3", "furlong").unwrap_err();
        assert_eq!(failing_category(&err), Some(("Mass", UnitSide::To)));

        let err = to_mass(1.0, "m^3", 1.0, "g/l", "kg").unwrap_err();
        assert_eq!(failing_category(&err), Some(("Density", UnitSide::From)));
    }
}
