//! Query normalization.
//!
//! Pure string rewrites applied before a query reaches the provider.

/// Origin sentinel meaning "wherever the user is". Resolving it to
/// coordinates is the caller's job.
pub const CURRENT_LOCATION: &str = "current location";

/// Qualifier appended to "nearest X" destinations.
///
/// Known approximation: the qualifier is always "restaurant", whatever the
/// subject. It improves provider recall for food queries and is wrong for
/// everything else.
pub const NEAREST_QUALIFIER: &str = "restaurant";

pub fn is_current_location(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(CURRENT_LOCATION)
}

/// Rewrite an origin/destination pair into forms the provider resolves better.
///
/// Never fails; empty strings come back unchanged.
pub fn normalize(origin: &str, destination: &str) -> (String, String) {
    (origin.to_string(), normalize_destination(destination))
}

fn is_word(token: &str, word: &str) -> bool {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .eq_ignore_ascii_case(word)
}

fn normalize_destination(destination: &str) -> String {
    if !destination.split_whitespace().any(|t| is_word(t, "nearest")) {
        return destination.to_string();
    }

    let mut subject: Vec<&str> = Vec::new();
    for token in destination.split_whitespace() {
        if is_word(token, "nearest") {
            // "the nearest X" -> "X"
            if subject.last().is_some_and(|prev| is_word(prev, "the")) {
                subject.pop();
            }
            continue;
        }
        subject.push(token);
    }

    if subject.is_empty() {
        return NEAREST_QUALIFIER.to_string();
    }

    let subject = subject.join(" ");
    if subject
        .to_lowercase()
        .ends_with(NEAREST_QUALIFIER)
    {
        subject
    } else {
        format!("{} {}", subject, NEAREST_QUALIFIER)
    }
}
