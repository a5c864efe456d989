//! Session boundary between the garage core and a presentation layer.
//!
//! [`GarageSession`] owns one [`Assembly`] for the lifetime of a UI session
//! and is the only mutator. Install requests are validated against the shelf
//! here, so the tracker below never sees an illegal slot/material pairing.
//! Every state change is returned as a numbered event for the presentation
//! layer to react to, and a test run is compiled into an ordered cue script
//! the presentation layer plays back on its own clock.

use derby_core::{
    catalog, emit, evaluate, AnimationTag, Assembly, AssemblyError, Counters, Event, EventEnvelope,
    Material, Outcome, SlotName,
};
use serde::{Deserialize, Serialize};

/// Hold on the start line before the car moves, in milliseconds.
pub const PRE_DRIVE_HOLD_MS: u64 = 1000;

/// One step of the presentation script compiled from an [`Outcome`].
///
/// Cues are ordered; the presentation layer plays them in sequence using its
/// own timers. The core never blocks on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationCue {
    /// Engines on, car held at the line.
    Countdown { hold_ms: u64 },
    /// Advance the car `distance` units over `duration_ms`.
    Drive { distance: u32, duration_ms: u64 },
    /// Play the failure visual for `slot`.
    FailureEffect { slot: SlotName, tag: AnimationTag },
    /// Final banner.
    Verdict { success: bool, message: String },
}

/// Result of one test run: the outcome plus everything the presentation
/// layer needs to play it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRun {
    pub outcome: Outcome,
    pub cues: Vec<PresentationCue>,
    pub events: Vec<EventEnvelope>,
}

/// Progress summary for the assembly screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyProgress {
    pub filled: u8,
    pub total: u8,
    pub complete: bool,
}

impl AssemblyProgress {
    pub fn status_line(&self) -> String {
        if self.complete {
            "Assembly complete, ready to test!".to_string()
        } else {
            format!("Assembly progress: {} / {}", self.filled, self.total)
        }
    }
}

/// Owns the assembly state for one UI session. Constructor-injected into
/// whatever drives it; there is no process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct GarageSession {
    assembly: Assembly,
    counters: Counters,
}

impl GarageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current assembly.
    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    pub fn progress(&self) -> AssemblyProgress {
        AssemblyProgress {
            filled: self.assembly.filled_count(),
            total: 5,
            complete: self.assembly.is_complete(),
        }
    }

    /// Mounts a part, rejecting materials the shelf does not offer for the
    /// slot. On a mismatch the assembly is left untouched.
    pub fn install(
        &mut self,
        slot: SlotName,
        material: Material,
    ) -> Result<Vec<EventEnvelope>, AssemblyError> {
        if !catalog::is_offered(slot, material) {
            return Err(AssemblyError::SlotMismatch { slot, material });
        }

        let was_complete = self.assembly.is_complete();
        let replaced = self.assembly.install(slot, material);

        let mut events = vec![emit(
            &mut self.counters,
            Event::PartInstalled {
                slot,
                material,
                replaced,
            },
        )];
        if !was_complete && self.assembly.is_complete() {
            events.push(emit(&mut self.counters, Event::AssemblyCompleted));
        }
        Ok(events)
    }

    /// Removes a part. Removing from an empty slot emits nothing.
    pub fn uninstall(&mut self, slot: SlotName) -> Vec<EventEnvelope> {
        match self.assembly.uninstall(slot) {
            Some(material) => vec![emit(
                &mut self.counters,
                Event::PartRemoved { slot, material },
            )],
            None => Vec::new(),
        }
    }

    /// Clears every slot. Safe at any time, including while a previous run
    /// is still being presented; halting in-flight visuals is the
    /// presentation layer's job.
    pub fn reset(&mut self) -> Vec<EventEnvelope> {
        let cleared = self.assembly.filled_count();
        self.assembly.reset();
        vec![emit(&mut self.counters, Event::AssemblyReset { cleared })]
    }

    /// Runs the track test. Mirrors the disabled run button: refuses with
    /// `IncompleteAssembly` until all five slots are filled.
    pub fn run_test(&mut self) -> Result<TestRun, AssemblyError> {
        let outcome = evaluate(&self.assembly)?;
        let cues = cue_script(&outcome);
        let events = vec![emit(
            &mut self.counters,
            Event::TestCompleted {
                success: outcome.success,
                failing_slot: outcome.failing_slot,
            },
        )];
        Ok(TestRun {
            outcome,
            cues,
            events,
        })
    }
}

/// Compiles an outcome into the ordered cue script: countdown, drive, then
/// the failure effect (if any) and the verdict banner.
pub fn cue_script(outcome: &Outcome) -> Vec<PresentationCue> {
    let mut cues = vec![
        PresentationCue::Countdown {
            hold_ms: PRE_DRIVE_HOLD_MS,
        },
        PresentationCue::Drive {
            distance: outcome.travel_distance,
            duration_ms: outcome.duration_ms,
        },
    ];
    if let (Some(slot), Some(tag)) = (outcome.failing_slot, outcome.animation_tag) {
        cues.push(PresentationCue::FailureEffect { slot, tag });
    }
    cues.push(PresentationCue::Verdict {
        success: outcome.success,
        message: outcome.message.clone(),
    });
    cues
}

#[cfg(test)]
mod tests {
    use super::*;
    use derby_core::test_fixtures::sound_build;

    fn filled_session() -> GarageSession {
        let mut session = GarageSession::new();
        let build = sound_build();
        for slot in SlotName::ALL {
            session.install(slot, build.get(slot).unwrap()).unwrap();
        }
        session
    }

    #[test]
    fn install_rejects_materials_not_on_the_shelf() {
        let mut session = GarageSession::new();
        let err = session.install(SlotName::Motor, Material::Soap).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::SlotMismatch {
                slot: SlotName::Motor,
                material: Material::Soap,
            }
        );
        assert_eq!(
            session.assembly(),
            &Assembly::new(),
            "rejected install must leave the assembly untouched"
        );
    }

    #[test]
    fn install_emits_numbered_events() {
        let mut session = GarageSession::new();
        let events = session.install(SlotName::Tire, Material::Rubber).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id.0, "evt_000000");
        assert_eq!(
            events[0].event,
            Event::PartInstalled {
                slot: SlotName::Tire,
                material: Material::Rubber,
                replaced: None,
            }
        );

        let events = session.install(SlotName::Tire, Material::Glass).unwrap();
        assert_eq!(events[0].id.0, "evt_000001", "event IDs are sequential");
        assert_eq!(
            events[0].event,
            Event::PartInstalled {
                slot: SlotName::Tire,
                material: Material::Glass,
                replaced: Some(Material::Rubber),
            }
        );
    }

    #[test]
    fn fifth_install_emits_assembly_completed() {
        let mut session = GarageSession::new();
        let build = sound_build();
        let mut completion_events = 0;
        for slot in SlotName::ALL {
            let events = session.install(slot, build.get(slot).unwrap()).unwrap();
            completion_events += events
                .iter()
                .filter(|e| e.event == Event::AssemblyCompleted)
                .count();
        }
        assert_eq!(completion_events, 1, "only the fifth install completes");
        assert!(session.progress().complete);
    }

    #[test]
    fn reinstall_on_a_complete_assembly_does_not_recomplete() {
        let mut session = filled_session();
        let events = session.install(SlotName::Body, Material::Metal).unwrap();
        assert!(events.iter().all(|e| e.event != Event::AssemblyCompleted));
    }

    #[test]
    fn uninstall_of_empty_slot_emits_nothing() {
        let mut session = GarageSession::new();
        assert!(session.uninstall(SlotName::Gear).is_empty());
    }

    #[test]
    fn progress_tracks_install_and_uninstall() {
        let mut session = GarageSession::new();
        assert_eq!(session.progress().status_line(), "Assembly progress: 0 / 5");

        session.install(SlotName::Tire, Material::Rubber).unwrap();
        assert_eq!(session.progress().filled, 1);

        session.uninstall(SlotName::Tire);
        assert_eq!(session.progress().filled, 0);

        let session = filled_session();
        assert_eq!(
            session.progress().status_line(),
            "Assembly complete, ready to test!"
        );
    }

    #[test]
    fn reset_reports_cleared_count_and_empties_the_bay() {
        let mut session = filled_session();
        let events = session.reset();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, Event::AssemblyReset { cleared: 5 });
        assert_eq!(session.progress().filled, 0);
        assert!(!session.progress().complete);
    }

    #[test]
    fn run_test_refuses_an_incomplete_assembly() {
        let mut session = GarageSession::new();
        session.install(SlotName::Tire, Material::Rubber).unwrap();
        let err = session.run_test().unwrap_err();
        let AssemblyError::IncompleteAssembly { missing } = err else {
            panic!("expected IncompleteAssembly");
        };
        assert_eq!(
            missing,
            vec![
                SlotName::Chassis,
                SlotName::Body,
                SlotName::Motor,
                SlotName::Gear,
            ]
        );
    }

    #[test]
    fn successful_run_has_no_failure_effect_cue() {
        let mut session = filled_session();
        let run = session.run_test().unwrap();
        assert!(run.outcome.success);
        assert!(matches!(
            run.cues[0],
            PresentationCue::Countdown {
                hold_ms: PRE_DRIVE_HOLD_MS
            }
        ));
        assert!(matches!(run.cues[1], PresentationCue::Drive { .. }));
        assert!(run
            .cues
            .iter()
            .all(|cue| !matches!(cue, PresentationCue::FailureEffect { .. })));
        assert!(matches!(
            run.cues.last(),
            Some(PresentationCue::Verdict { success: true, .. })
        ));
    }

    #[test]
    fn failed_run_plays_effect_then_verdict() {
        let mut session = filled_session();
        session.install(SlotName::Motor, Material::Plastic).unwrap();
        let run = session.run_test().unwrap();

        assert!(!run.outcome.success);
        let cues = &run.cues;
        assert_eq!(cues.len(), 4);
        assert!(matches!(
            cues[2],
            PresentationCue::FailureEffect {
                slot: SlotName::Motor,
                tag: AnimationTag::Burnout,
            }
        ));
        assert!(matches!(
            cues[3],
            PresentationCue::Verdict { success: false, .. }
        ));

        assert_eq!(run.events.len(), 1);
        assert_eq!(
            run.events[0].event,
            Event::TestCompleted {
                success: false,
                failing_slot: Some(SlotName::Motor),
            }
        );
    }

    #[test]
    fn drive_cue_carries_the_outcome_hints() {
        let mut session = filled_session();
        session.install(SlotName::Body, Material::Metal).unwrap();
        let run = session.run_test().unwrap();
        assert_eq!(
            run.cues[1],
            PresentationCue::Drive {
                distance: run.outcome.travel_distance,
                duration_ms: run.outcome.duration_ms,
            }
        );
    }

    #[test]
    fn reset_is_safe_mid_presentation() {
        // A run's cue script stays valid after the state underneath resets.
        let mut session = filled_session();
        let run = session.run_test().unwrap();
        let events = session.reset();
        assert_eq!(events[0].event, Event::AssemblyReset { cleared: 5 });
        assert!(matches!(run.cues.last(), Some(PresentationCue::Verdict { .. })));
        assert!(session.run_test().is_err(), "bay is empty again");
    }

    #[test]
    fn test_run_serializes_for_the_presentation_boundary() {
        let mut session = filled_session();
        let run = session.run_test().unwrap();
        let json = serde_json::to_string(&run).unwrap();
        let back: TestRun = serde_json::from_str(&json).unwrap();
        assert_eq!(back, run);
    }
}
