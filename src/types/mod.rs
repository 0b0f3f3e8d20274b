mod with_unit;

pub use uom::si::f64::{Area, Length, Mass, ThermodynamicTemperature, Time, Velocity, Volume};

pub use with_unit::{
    AreaValue, CatalogueQuantity, LengthValue, MassValue, TemperatureValue, TimeValue,
    VelocityValue, VolumeValue, WithUnit,
};
