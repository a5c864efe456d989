//! Test-run evaluation.

use crate::rules::{apply_gear_wear_penalty, default_success, RULES};
use crate::types::{Assembly, AssemblyError, Outcome};

/// Evaluate a complete assembly against the ordered rule table.
///
/// Pure and total over complete assemblies: identical assemblies always yield
/// identical outcomes. Invoking it early is a precondition violation and
/// returns [`AssemblyError::IncompleteAssembly`]; the UI is expected to keep
/// the run action disabled until the assembly is complete.
pub fn evaluate(assembly: &Assembly) -> Result<Outcome, AssemblyError> {
    let parts = assembly
        .fitted()
        .map_err(|missing| AssemblyError::IncompleteAssembly { missing })?;

    let mut outcome = RULES
        .iter()
        .find_map(|rule| (rule.check)(&parts))
        .unwrap_or_else(default_success);

    apply_gear_wear_penalty(&parts, &mut outcome);
    Ok(outcome)
}
