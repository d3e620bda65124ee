//! Landmark-aware instruction rewriting.
//!
//! The default [`PhrasePatternAugmenter`] matches English phrasing by substring.
//! Anything smarter plugs in through [`InstructionAugmenter`] without touching
//! the rest of the pipeline.

use super::types::Landmark;

/// Rewrites a clean instruction so it references a landmark.
pub trait InstructionAugmenter: Send + Sync + 'static {
    fn augment(&self, instruction: &str, landmark: &Landmark) -> String;
}

/// Appends a landmark hint chosen by the instruction's verb phrase.
///
/// | contains                          | suffix                                   |
/// |-----------------------------------|------------------------------------------|
/// | `Turn right`                      | `(You'll see {name} on your right)`      |
/// | `Turn left`                       | `(You'll see {name} on your left)`       |
/// | `Continue` / `Head` / `Proceed`   | `passing {name}`                         |
/// | anything else                     | `(Look for {name} nearby)`               |
#[derive(Debug, Default, Clone, Copy)]
pub struct PhrasePatternAugmenter;

impl InstructionAugmenter for PhrasePatternAugmenter {
    fn augment(&self, instruction: &str, landmark: &Landmark) -> String {
        let name = &landmark.name;
        let suffix = if instruction.contains("Turn right") {
            format!("(You'll see {} on your right)", name)
        } else if instruction.contains("Turn left") {
            format!("(You'll see {} on your left)", name)
        } else if ["Continue", "Head", "Proceed"]
            .iter()
            .any(|verb| instruction.contains(verb))
        {
            format!("passing {}", name)
        } else {
            format!("(Look for {} nearby)", name)
        };

        if instruction.is_empty() {
            suffix
        } else {
            format!("{} {}", instruction, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GeoPoint;

    fn landmark(name: &str) -> Landmark {
        Landmark {
            name: name.to_string(),
            categories: vec!["cafe".to_string()],
            location: GeoPoint::default(),
        }
    }

    #[test]
    fn test_turn_right() {
        let out = PhrasePatternAugmenter.augment("Turn right onto Main St", &landmark("Joe's"));
        assert_eq!(out, "Turn right onto Main St (You'll see Joe's on your right)");
    }

    #[test]
    fn test_turn_left() {
        let out = PhrasePatternAugmenter.augment("Turn left at Elm", &landmark("Joe's"));
        assert_eq!(out, "Turn left at Elm (You'll see Joe's on your left)");
    }

    #[test]
    fn test_continue_head_proceed() {
        for base in ["Continue onto I-5", "Head north on 3rd", "Proceed to the route"] {
            let out = PhrasePatternAugmenter.augment(base, &landmark("the Old Mill"));
            assert_eq!(out, format!("{} passing the Old Mill", base));
        }
    }

    #[test]
    fn test_unmatched_gets_look_for() {
        let out = PhrasePatternAugmenter.augment("Merge onto US-101 S", &landmark("Joe's"));
        assert_eq!(out, "Merge onto US-101 S (Look for Joe's nearby)");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        // "turn right" mid-sentence is not the leading verb phrase
        let out = PhrasePatternAugmenter.augment("Slight turn right", &landmark("Joe's"));
        assert_eq!(out, "Slight turn right (Look for Joe's nearby)");
    }

    #[test]
    fn test_empty_instruction() {
        let out = PhrasePatternAugmenter.augment("", &landmark("Joe's"));
        assert_eq!(out, "(Look for Joe's nearby)");
    }
}
