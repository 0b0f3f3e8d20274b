/// How a unit maps onto the base unit of its category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// base = value * factor
    Scale(f64),

    /// base = value * scale + offset (temperature scales)
    Affine { scale: f64, offset: f64 },

    /// base = scale * numerator / (value + shift)
    ///
    /// Hyperbolic scales such as API gravity, where
    /// specific gravity = 141.5 / (API + 131.5).
    Reciprocal { numerator: f64, shift: f64, scale: f64 },
}

impl Conversion {
    /// Express `value` in the category's base unit
    #[inline]
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Conversion::Scale(factor) => value * factor,
            Conversion::Affine { scale, offset } => value * scale + offset,
            Conversion::Reciprocal { numerator, shift, scale } => {
                scale * numerator / (value + shift)
            }
        }
    }

    /// Express a base-unit value in this unit
    #[inline]
    pub fn from_base(&self, base: f64) -> f64 {
        match *self {
            Conversion::Scale(factor) => base / factor,
            Conversion::Affine { scale, offset } => (base - offset) / scale,
            Conversion::Reciprocal { numerator, shift, scale } => scale * numerator / base - shift,
        }
    }

    /// True for the base unit's descriptor (factor 1, offset 0)
    pub fn is_identity(&self) -> bool {
        match *self {
            Conversion::Scale(factor) => factor == 1.0,
            Conversion::Affine { scale, offset } => scale == 1.0 && offset == 0.0,
            Conversion::Reciprocal { .. } => false,
        }
    }

    /// Check the descriptor can be inverted: non-zero finite scale,
    /// finite offsets.
    pub(crate) fn validate(&self) -> Result<(), String> {
        let (scale, extra) = match *self {
            Conversion::Scale(factor) => (factor, 0.0),
            Conversion::Affine { scale, offset } => (scale, offset),
            Conversion::Reciprocal { numerator, shift, scale } => {
                if !numerator.is_finite() || numerator == 0.0 {
                    return Err(format!(
                        "reciprocal numerator must be finite and non-zero, got {}",
                        numerator
                    ));
                }
                (scale, shift)
            }
        };

        if !scale.is_finite() || scale == 0.0 {
            return Err(format!("scale must be finite and non-zero, got {}", scale));
        }
        if !extra.is_finite() {
            return Err(format!("offset must be finite, got {}", extra));
        }
        Ok(())
    }
}
