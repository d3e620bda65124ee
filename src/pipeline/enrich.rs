//! Step enrichment: markup stripping, landmark lookup and instruction assembly.
//!
//! Fragment order within one instruction is fixed:
//! base (landmark-augmented) → landmark category → distance → duration →
//! transit → maneuver cue.

use super::augment::{InstructionAugmenter, PhrasePatternAugmenter};
use super::landmark::LandmarkResolver;
use super::types::Landmark;
use crate::provider::{RawStep, StepMode, TransitDetails};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio_util::sync::CancellationToken;

/// Tags that separate words when rendered.
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:div|br|p|li|ul|ol|tr|td|h[1-6])\b[^>]*>").expect("valid block tag regex")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Category tags too generic to describe a landmark.
const GENERIC_CATEGORIES: &[&str] = &["point_of_interest", "establishment"];

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Remove all markup from a provider instruction.
///
/// Block-level tags become a space; inline tags vanish. Entities are decoded
/// afterwards, so escaped text is kept, except that a decoded `<` or `>`
/// becomes a space and no angle bracket reaches the output.
pub fn strip_markup(html: &str) -> String {
    let spaced = BLOCK_TAG.replace_all(html, " ");
    let stripped = ANY_TAG.replace_all(&spaced, "");
    let decoded = decode_entities(&stripped).replace(['<', '>'], " ");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// "{name} is a {category}." for the first non-generic category.
fn category_sentence(landmark: &Landmark) -> Option<String> {
    let category = landmark
        .categories
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty() && !GENERIC_CATEGORIES.contains(c))?
        .replace('_', " ");

    Some(format!(
        "{} is {} {}.",
        landmark.name,
        article(&category),
        category
    ))
}

fn transit_sentences(details: &TransitDetails) -> Vec<String> {
    let mut sentences = Vec::new();

    let vehicle = details
        .vehicle_type
        .as_deref()
        .map(|v| strip_markup(v).replace('_', " ").to_lowercase());
    let line = details.line_name.as_deref().map(strip_markup);
    match (line, vehicle) {
        (Some(line), Some(vehicle)) => sentences.push(format!("Take the {} {}.", line, vehicle)),
        (Some(line), None) => sentences.push(format!("Take the {}.", line)),
        (None, Some(vehicle)) => sentences.push(format!("Take the {}.", vehicle)),
        (None, None) => {}
    }

    let departure = details.departure_stop.as_deref().map(strip_markup);
    let arrival = details.arrival_stop.as_deref().map(strip_markup);
    match (departure, arrival) {
        (Some(from), Some(to)) => {
            sentences.push(format!("Board at {} and get off at {}.", from, to))
        }
        (Some(from), None) => sentences.push(format!("Board at {}.", from)),
        (None, Some(to)) => sentences.push(format!("Get off at {}.", to)),
        (None, None) => {}
    }

    sentences
}

fn maneuver_cue(maneuver: &str) -> Option<&'static str> {
    match maneuver {
        "turn-right" => Some("Get ready to turn right."),
        "turn-left" => Some("Get ready to turn left."),
        "straight" => Some("Keep going straight."),
        _ => None,
    }
}

/// Build the final instruction for one step.
pub fn compose_instruction(
    step: &RawStep,
    landmark: Option<&Landmark>,
    augmenter: &dyn InstructionAugmenter,
) -> String {
    let base = strip_markup(&step.instruction_html);
    let mut fragments = Vec::new();

    match landmark {
        Some(landmark) => {
            fragments.push(augmenter.augment(&base, landmark));
            if let Some(sentence) = category_sentence(landmark) {
                fragments.push(sentence);
            }
        }
        None => fragments.push(base),
    }

    if let Some(distance) = &step.distance_text {
        fragments.push(format!("Continue for {}.", strip_markup(distance)));
    }
    if let Some(duration) = &step.duration_text {
        fragments.push(format!("This should take about {}.", strip_markup(duration)));
    }
    if let StepMode::Transit(details) = &step.mode {
        fragments.extend(transit_sentences(details));
    }
    if let Some(cue) = step.maneuver.as_deref().and_then(maneuver_cue) {
        fragments.push(cue.to_string());
    }

    fragments.retain(|f| !f.is_empty());
    fragments.join(" ")
}

/// Turns raw provider steps into narrated instructions.
pub struct StepEnricher {
    resolver: Option<LandmarkResolver>,
    augmenter: Arc<dyn InstructionAugmenter>,
}

impl StepEnricher {
    /// Enricher with the phrase-pattern augmenter. Without a resolver no
    /// landmarks are ever attached.
    pub fn new(resolver: Option<LandmarkResolver>) -> Self {
        Self {
            resolver,
            augmenter: Arc::new(PhrasePatternAugmenter),
        }
    }

    pub fn with_augmenter(mut self, augmenter: Arc<dyn InstructionAugmenter>) -> Self {
        self.augmenter = augmenter;
        self
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Enrich one step, returning its instruction and attached landmarks.
    ///
    /// A lookup abandoned through `cancel` is treated as "no landmark".
    pub async fn enrich(
        &self,
        step: &RawStep,
        landmark_lookup_enabled: bool,
        cancel: &CancellationToken,
    ) -> (String, Vec<Landmark>) {
        let landmark = match (landmark_lookup_enabled, &self.resolver, step.midpoint()) {
            (true, Some(resolver), Some(midpoint)) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!("Landmark lookup abandoned");
                        None
                    }
                    found = resolver.resolve(midpoint) => found,
                }
            }
            _ => None,
        };

        let instruction = compose_instruction(step, landmark.as_ref(), self.augmenter.as_ref());
        (instruction, landmark.into_iter().collect())
    }
}
