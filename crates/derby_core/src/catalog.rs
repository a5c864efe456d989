//! The workshop shelf: which materials are offered for which slot.
//!
//! Exhaustive matches over the closed enums, so adding a slot or material is
//! a compile error until the shelf is updated.

use crate::types::{Material, SlotName};

/// Materials the shelf offers for `slot`, in display order.
pub fn offered_materials(slot: SlotName) -> &'static [Material] {
    match slot {
        SlotName::Tire => &[Material::Rubber, Material::Plastic, Material::Glass],
        SlotName::Chassis => &[Material::Metal, Material::Plastic, Material::Foam],
        SlotName::Body => &[Material::Rubber, Material::Metal, Material::Glass],
        SlotName::Motor => &[Material::Copper, Material::Plastic],
        SlotName::Gear => &[
            Material::Rubber,
            Material::Copper,
            Material::Plastic,
            Material::Soap,
        ],
    }
}

/// Boundary check for installs: is `material` a legal choice for `slot`?
pub fn is_offered(slot: SlotName, material: Material) -> bool {
    offered_materials(slot).contains(&material)
}
