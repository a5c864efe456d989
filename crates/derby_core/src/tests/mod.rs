use super::*;
use crate::test_fixtures::{assembly_of, sound_build};


// --- Shared test helpers ------------------------------------------------

/// Sound build with one slot swapped out.
fn build_with(slot: SlotName, material: Material) -> Assembly {
    let mut assembly = sound_build();
    assembly.install(slot, material);
    assembly
}
