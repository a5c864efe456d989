//! The failure-rule table.
//!
//! Rules are checked in array order and the first match wins; every later
//! rule is skipped. The ordering (motor, gear, chassis, tire, body) puts the
//! most catastrophic fault first: an electrical fault pre-empts a structural
//! one. Keeping the priority as a visible list rather than an if/else chain
//! is deliberate.

use crate::types::{AnimationTag, FittedParts, Material, Outcome, SlotName};

// Presentation hints. Opaque units consumed by the driver layer; the literal
// values are behavioral contract and must not drift.
pub const FULL_TRACK_DISTANCE: u32 = 800;
pub const STALL_DISTANCE: u32 = 50;
pub const TIRE_SLIP_DISTANCE: u32 = 100;
pub const BODY_SHATTER_DISTANCE: u32 = 400;
pub const WORN_GEAR_DISTANCE: u32 = 600;
pub const BASELINE_DURATION_MS: u64 = 2000;
pub const HEAVY_BODY_DURATION_MS: u64 = 4000;
pub const FAILURE_DURATION_MS: u64 = 1000;

const MSG_MOTOR_BURNOUT: &str = "The motor burned out! That material doesn't conduct.";
const MSG_GEAR_SLIP: &str = "The gears are slipping! Soap is far too slick.";
const MSG_CHASSIS_SNAP: &str = "The chassis snapped! Foam is too brittle.";
const MSG_TIRE_SHATTER: &str = "The tires shattered! Glass makes a poor wheel.";
const MSG_TIRE_SLIP: &str = "The tires are spinning! Plastic has no grip.";
const MSG_BODY_SHATTER: &str = "The body shattered mid-run! Glass is too fragile.";
const MSG_HEAVY_BODY: &str = "Test passed! The metal body is heavy, so the car runs slow.";
const MSG_PERFECT: &str = "Perfect run!";
const MSG_WORN_GEAR_NOTE: &str = " The plastic gears are wearing down and cut the run short.";

pub(crate) struct Rule {
    /// Stable identifier, used in logs and tests.
    pub name: &'static str,
    pub check: fn(&FittedParts) -> Option<Outcome>,
}

/// Priority order: motor > gear > chassis > tire > body.
pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "motor_conductivity",
        check: motor_conductivity,
    },
    Rule {
        name: "gear_integrity",
        check: gear_integrity,
    },
    Rule {
        name: "chassis_rigidity",
        check: chassis_rigidity,
    },
    Rule {
        name: "tire_integrity",
        check: tire_integrity,
    },
    Rule {
        name: "tire_traction",
        check: tire_traction,
    },
    Rule {
        name: "body_safety",
        check: body_safety,
    },
    Rule {
        name: "body_weight",
        check: body_weight,
    },
];

fn fail(slot: SlotName, tag: AnimationTag, message: &str, distance: u32) -> Outcome {
    Outcome {
        success: false,
        message: message.to_string(),
        failing_slot: Some(slot),
        animation_tag: Some(tag),
        travel_distance: distance,
        duration_ms: FAILURE_DURATION_MS,
    }
}

fn motor_conductivity(parts: &FittedParts) -> Option<Outcome> {
    (parts.motor != Material::Copper).then(|| {
        fail(
            SlotName::Motor,
            AnimationTag::Burnout,
            MSG_MOTOR_BURNOUT,
            STALL_DISTANCE,
        )
    })
}

fn gear_integrity(parts: &FittedParts) -> Option<Outcome> {
    (parts.gear == Material::Soap).then(|| {
        fail(
            SlotName::Gear,
            AnimationTag::Slip,
            MSG_GEAR_SLIP,
            STALL_DISTANCE,
        )
    })
}

fn chassis_rigidity(parts: &FittedParts) -> Option<Outcome> {
    (parts.chassis == Material::Foam).then(|| {
        fail(
            SlotName::Chassis,
            AnimationTag::Shatter,
            MSG_CHASSIS_SNAP,
            FULL_TRACK_DISTANCE,
        )
    })
}

fn tire_integrity(parts: &FittedParts) -> Option<Outcome> {
    (parts.tire == Material::Glass).then(|| {
        fail(
            SlotName::Tire,
            AnimationTag::Shatter,
            MSG_TIRE_SHATTER,
            FULL_TRACK_DISTANCE,
        )
    })
}

fn tire_traction(parts: &FittedParts) -> Option<Outcome> {
    (parts.tire == Material::Plastic).then(|| {
        fail(
            SlotName::Tire,
            AnimationTag::Slip,
            MSG_TIRE_SLIP,
            TIRE_SLIP_DISTANCE,
        )
    })
}

/// Glass body drives partway before shattering: a two-phase outcome the
/// presentation layer renders as drive-then-break.
fn body_safety(parts: &FittedParts) -> Option<Outcome> {
    (parts.body == Material::Glass).then(|| {
        fail(
            SlotName::Body,
            AnimationTag::Shatter,
            MSG_BODY_SHATTER,
            BODY_SHATTER_DISTANCE,
        )
    })
}

/// Non-fatal: a metal body passes, just slowly.
fn body_weight(parts: &FittedParts) -> Option<Outcome> {
    (parts.body == Material::Metal).then(|| Outcome {
        success: true,
        message: MSG_HEAVY_BODY.to_string(),
        failing_slot: None,
        animation_tag: None,
        travel_distance: FULL_TRACK_DISTANCE,
        duration_ms: HEAVY_BODY_DURATION_MS,
    })
}

pub(crate) fn default_success() -> Outcome {
    Outcome {
        success: true,
        message: MSG_PERFECT.to_string(),
        failing_slot: None,
        animation_tag: None,
        travel_distance: FULL_TRACK_DISTANCE,
        duration_ms: BASELINE_DURATION_MS,
    }
}

/// Secondary penalty, applied only after the primary chain resolved to a
/// success: plastic gears shorten the run and earn a warning note. Failure
/// verdicts are never modified here.
pub(crate) fn apply_gear_wear_penalty(parts: &FittedParts, outcome: &mut Outcome) {
    if outcome.success && parts.gear == Material::Plastic {
        outcome.travel_distance = WORN_GEAR_DISTANCE;
        outcome.message.push_str(MSG_WORN_GEAR_NOTE);
    }
}
