use std::sync::LazyLock;

use super::Catalogue;

/// Catalogue data compiled into the crate
pub const BUILTIN_SOURCE: &str = include_str!("../data/units.toml");

static BUILTIN: LazyLock<Catalogue> = LazyLock::new(|| {
    Catalogue::from_toml_str(BUILTIN_SOURCE)
        .unwrap_or_else(|e| panic!("built-in unit catalogue is invalid: {}", e))
});

/// Process-wide catalogue, built and validated on first use.
///
/// Panics if the embedded data violates a catalogue invariant; that is a
/// defect in the shipped data, not a runtime condition.
pub fn builtin() -> &'static Catalogue {
    &BUILTIN
}
