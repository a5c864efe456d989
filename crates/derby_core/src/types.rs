//! Type definitions for `derby_core`.
//!
//! All public enums, state types, outcome types, and events used by the
//! garage and the test track.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

/// A named mounting position on the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotName {
    Tire,
    Chassis,
    Body,
    Motor,
    Gear,
}

impl SlotName {
    /// Fixed slot order. Also the order `missing_slots` reports in.
    pub const ALL: [SlotName; 5] = [
        SlotName::Tire,
        SlotName::Chassis,
        SlotName::Body,
        SlotName::Motor,
        SlotName::Gear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::Tire => "tire",
            SlotName::Chassis => "chassis",
            SlotName::Body => "body",
            SlotName::Motor => "motor",
            SlotName::Gear => "gear",
        }
    }
}

impl std::fmt::Display for SlotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SlotName {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tire" => Ok(SlotName::Tire),
            "chassis" => Ok(SlotName::Chassis),
            "body" => Ok(SlotName::Body),
            "motor" => Ok(SlotName::Motor),
            "gear" => Ok(SlotName::Gear),
            _ => Err(UnknownName {
                kind: "slot",
                raw: s.to_string(),
            }),
        }
    }
}

/// The substance a part is made of. Closed set; which materials are legal
/// for a given slot is decided by [`crate::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Rubber,
    Plastic,
    Glass,
    Metal,
    Foam,
    Copper,
    Soap,
}

impl Material {
    pub fn as_str(self) -> &'static str {
        match self {
            Material::Rubber => "rubber",
            Material::Plastic => "plastic",
            Material::Glass => "glass",
            Material::Metal => "metal",
            Material::Foam => "foam",
            Material::Copper => "copper",
            Material::Soap => "soap",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Material {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rubber" => Ok(Material::Rubber),
            "plastic" => Ok(Material::Plastic),
            "glass" => Ok(Material::Glass),
            "metal" => Ok(Material::Metal),
            "foam" => Ok(Material::Foam),
            "copper" => Ok(Material::Copper),
            "soap" => Ok(Material::Soap),
            _ => Err(UnknownName {
                kind: "material",
                raw: s.to_string(),
            }),
        }
    }
}

/// Parse failure for [`SlotName`] / [`Material`] string forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub kind: &'static str,
    pub raw: String,
}

impl std::fmt::Display for UnknownName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.raw)
    }
}

impl std::error::Error for UnknownName {}

/// Symbolic label for the failure visual the presentation layer should play.
/// Opaque to the core logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationTag {
    Burnout,
    Slip,
    Shatter,
}

impl std::fmt::Display for AnimationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AnimationTag::Burnout => "burnout",
            AnimationTag::Slip => "slip",
            AnimationTag::Shatter => "shatter",
        })
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Current material choice per slot. All slots start empty; mutated only by
/// install/uninstall/reset on the tracker, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub tire: Option<Material>,
    pub chassis: Option<Material>,
    pub body: Option<Material>,
    pub motor: Option<Material>,
    pub gear: Option<Material>,
}

/// A complete assembly: every slot resolved. Built by the evaluator after the
/// completeness check so the rule table never sees an `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FittedParts {
    pub tire: Material,
    pub chassis: Material,
    pub body: Material,
    pub motor: Material,
    pub gear: Material,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The deterministic result of evaluating a complete assembly. Computed fresh
/// each run, consumed once by the presentation layer, never mutated after.
///
/// `travel_distance` and `duration_ms` are presentation hints (how far and how
/// long the car visibly advances), not physical units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub failing_slot: Option<SlotName>,
    pub animation_tag: Option<AnimationTag>,
    pub travel_distance: u32,
    pub duration_ms: u64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Boundary and precondition violations. Both are prevented by a correct
/// collaborator (the UI only offers legal parts and disables the run action
/// until the assembly is complete), so neither propagates in normal play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblyError {
    /// Install of a material the shelf does not offer for that slot.
    SlotMismatch { slot: SlotName, material: Material },
    /// Evaluate invoked before all five slots were filled.
    IncompleteAssembly { missing: Vec<SlotName> },
}

impl std::fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblyError::SlotMismatch { slot, material } => {
                write!(f, "a {material} {slot} is not on the shelf")
            }
            AssemblyError::IncompleteAssembly { missing } => {
                let names: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
                write!(f, "assembly is incomplete: missing {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for AssemblyError {}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub event: Event,
}

/// State changes the presentation layer reacts to without polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    PartInstalled {
        slot: SlotName,
        material: Material,
        /// The material this install overwrote, if the slot was occupied.
        replaced: Option<Material>,
    },
    PartRemoved {
        slot: SlotName,
        material: Material,
    },
    /// Emitted by the install that fills the fifth slot.
    AssemblyCompleted,
    AssemblyReset {
        cleared: u8,
    },
    TestCompleted {
        success: bool,
        failing_slot: Option<SlotName>,
    },
}
