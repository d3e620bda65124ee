//! Provider data types.
//!
//! Wire types mirror the Google Directions and Places Nearby Search JSON. Every
//! field is defaulted so partially-populated responses still deserialize; the
//! domain types ([`RawStep`], [`RouteLeg`]) are built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider status string for a usable response.
pub const STATUS_OK: &str = "OK";

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Arithmetic midpoint of two coordinates.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    /// `"lat,lng"` form accepted by the provider as an origin or destination.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Travel mode requested from the mapping provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(format!("Invalid travel mode: {}", s)),
        }
    }
}

// ============================================================================
// Directions wire format
// ============================================================================

/// Top-level Directions API response.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub routes: Vec<WireRoute>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireRoute {
    pub legs: Vec<WireLeg>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub steps: Vec<WireStep>,
}

/// `{ "text": "5 km", "value": 5000 }`
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TextValue {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireStep {
    pub html_instructions: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub travel_mode: String,
    pub start_location: Option<GeoPoint>,
    pub end_location: Option<GeoPoint>,
    pub maneuver: Option<String>,
    pub transit_details: Option<WireTransitDetails>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireTransitDetails {
    pub line: Option<WireTransitLine>,
    pub departure_stop: Option<WireStop>,
    pub arrival_stop: Option<WireStop>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireTransitLine {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub vehicle: Option<WireVehicle>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireVehicle {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WireStop {
    pub name: Option<String>,
}

// ============================================================================
// Places wire format
// ============================================================================

/// Places Nearby Search response.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PlacesResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub results: Vec<PlaceCandidate>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PlaceCandidate {
    pub name: String,
    pub types: Vec<String>,
    pub geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PlaceGeometry {
    pub location: GeoPoint,
}

// ============================================================================
// Domain types
// ============================================================================

/// Transit-only step details; every part may be missing upstream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitDetails {
    pub line_name: Option<String>,
    pub vehicle_type: Option<String>,
    pub departure_stop: Option<String>,
    pub arrival_stop: Option<String>,
}

/// How a step is travelled. Transit carries its own details so the enricher
/// never looks for transit fields on other modes.
#[derive(Debug, Clone, PartialEq)]
pub enum StepMode {
    Driving,
    Walking,
    Bicycling,
    Transit(TransitDetails),
    /// Any tag the provider sends that we don't model.
    Other(String),
}

impl StepMode {
    /// Provider-style tag (`DRIVING`, `TRANSIT`, ...).
    pub fn tag(&self) -> &str {
        match self {
            StepMode::Driving => "DRIVING",
            StepMode::Walking => "WALKING",
            StepMode::Bicycling => "BICYCLING",
            StepMode::Transit(_) => "TRANSIT",
            StepMode::Other(tag) => tag,
        }
    }
}

/// One navigation step as delivered by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStep {
    pub instruction_html: String,
    pub distance_text: Option<String>,
    pub duration_text: Option<String>,
    pub start: Option<GeoPoint>,
    pub end: Option<GeoPoint>,
    pub maneuver: Option<String>,
    pub mode: StepMode,
}

impl RawStep {
    /// Midpoint of the step, when both ends are known.
    pub fn midpoint(&self) -> Option<GeoPoint> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(start.midpoint(&end)),
            _ => None,
        }
    }
}

/// The first leg of the first route in a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance_text: String,
    pub duration_text: String,
    pub steps: Vec<RawStep>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<WireTransitDetails> for TransitDetails {
    fn from(wire: WireTransitDetails) -> Self {
        let (line_name, vehicle_type) = match wire.line {
            Some(line) => (
                non_empty(line.short_name).or(non_empty(line.name)),
                line.vehicle
                    .and_then(|v| non_empty(v.name).or(non_empty(v.kind))),
            ),
            None => (None, None),
        };

        TransitDetails {
            line_name,
            vehicle_type,
            departure_stop: non_empty(wire.departure_stop.and_then(|s| s.name)),
            arrival_stop: non_empty(wire.arrival_stop.and_then(|s| s.name)),
        }
    }
}

impl From<WireStep> for RawStep {
    fn from(wire: WireStep) -> Self {
        let mode = match wire.travel_mode.trim().to_uppercase().as_str() {
            "DRIVING" => StepMode::Driving,
            "WALKING" => StepMode::Walking,
            "BICYCLING" => StepMode::Bicycling,
            "TRANSIT" => StepMode::Transit(
                wire.transit_details
                    .map(TransitDetails::from)
                    .unwrap_or_default(),
            ),
            _ => StepMode::Other(wire.travel_mode),
        };

        RawStep {
            instruction_html: wire.html_instructions,
            distance_text: non_empty(wire.distance.map(|d| d.text)),
            duration_text: non_empty(wire.duration.map(|d| d.text)),
            start: wire.start_location,
            end: wire.end_location,
            maneuver: non_empty(wire.maneuver),
            mode,
        }
    }
}

impl From<WireLeg> for RouteLeg {
    fn from(wire: WireLeg) -> Self {
        RouteLeg {
            start_address: wire.start_address,
            end_address: wire.end_address,
            distance_text: wire.distance.map(|d| d.text).unwrap_or_default(),
            duration_text: wire.duration.map(|d| d.text).unwrap_or_default(),
            steps: wire.steps.into_iter().map(RawStep::from).collect(),
        }
    }
}

impl DirectionsResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// First leg of the first route, if the response carries one.
    pub fn into_first_leg(self) -> Option<RouteLeg> {
        self.routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .map(RouteLeg::from)
    }
}
