//! Assembly state tracker operations.

use crate::types::{Assembly, FittedParts, Material, SlotName};

impl Assembly {
    /// An assembly with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: SlotName) -> &mut Option<Material> {
        match slot {
            SlotName::Tire => &mut self.tire,
            SlotName::Chassis => &mut self.chassis,
            SlotName::Body => &mut self.body,
            SlotName::Motor => &mut self.motor,
            SlotName::Gear => &mut self.gear,
        }
    }

    pub fn get(&self, slot: SlotName) -> Option<Material> {
        match slot {
            SlotName::Tire => self.tire,
            SlotName::Chassis => self.chassis,
            SlotName::Body => self.body,
            SlotName::Motor => self.motor,
            SlotName::Gear => self.gear,
        }
    }

    /// Mounts `material` in `slot`, returning what it overwrote.
    ///
    /// Slot/material pairing is validated by the caller at the boundary
    /// (see `catalog::is_offered`); the tracker accepts anything.
    pub fn install(&mut self, slot: SlotName, material: Material) -> Option<Material> {
        self.slot_mut(slot).replace(material)
    }

    /// Clears `slot`, returning the removed material. Clearing an empty slot
    /// is a no-op and returns `None`.
    pub fn uninstall(&mut self, slot: SlotName) -> Option<Material> {
        self.slot_mut(slot).take()
    }

    /// True iff all five slots are filled.
    pub fn is_complete(&self) -> bool {
        SlotName::ALL.iter().all(|slot| self.get(*slot).is_some())
    }

    /// Number of filled slots, for progress reporting.
    pub fn filled_count(&self) -> u8 {
        SlotName::ALL
            .iter()
            .map(|slot| u8::from(self.get(*slot).is_some()))
            .sum()
    }

    /// Empty slots in fixed slot order.
    pub fn missing_slots(&self) -> Vec<SlotName> {
        SlotName::ALL
            .into_iter()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    /// Clears every slot.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolves every slot, or reports the empty ones.
    pub(crate) fn fitted(&self) -> Result<FittedParts, Vec<SlotName>> {
        match (self.tire, self.chassis, self.body, self.motor, self.gear) {
            (Some(tire), Some(chassis), Some(body), Some(motor), Some(gear)) => Ok(FittedParts {
                tire,
                chassis,
                body,
                motor,
                gear,
            }),
            _ => Err(self.missing_slots()),
        }
    }
}
