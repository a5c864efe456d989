//! Shared test fixtures for `derby_core` and downstream crates.

use crate::{Assembly, Material};

/// Assembly with every slot filled from the given materials, in slot order.
pub fn assembly_of(
    tire: Material,
    chassis: Material,
    body: Material,
    motor: Material,
    gear: Material,
) -> Assembly {
    Assembly {
        tire: Some(tire),
        chassis: Some(chassis),
        body: Some(body),
        motor: Some(motor),
        gear: Some(gear),
    }
}

/// A build with no faults: rubber tires, metal chassis, rubber body, copper
/// motor, rubber gears. Evaluates to the baseline success.
pub fn sound_build() -> Assembly {
    assembly_of(
        Material::Rubber,
        Material::Metal,
        Material::Rubber,
        Material::Copper,
        Material::Rubber,
    )
}
