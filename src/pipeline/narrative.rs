//! Narrative synthesis for audio playback.

use super::types::EnrichedStep;

/// Render a route as one continuous spoken narrative.
///
/// A trailing period on an instruction is dropped before the step's own
/// period is added, so sentences never end in "..".
pub fn synthesize(
    origin: &str,
    destination: &str,
    distance: &str,
    duration: &str,
    steps: &[EnrichedStep],
) -> String {
    let mut narrative = format!(
        "Starting from {}. The total journey is {} and will take approximately {}. \
         Here are your step by step directions: ",
        origin, distance, duration
    );

    for step in steps {
        narrative.push_str(&format!(
            "Step {}: {}. ",
            step.step_number,
            step.instruction.strip_suffix('.').unwrap_or(&step.instruction)
        ));
    }

    narrative.push_str(&format!(
        "You have arrived at your destination: {}.",
        destination
    ));
    narrative
}
