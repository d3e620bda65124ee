//! Tracing filter construction.

use crate::config::LoggingConfig;

/// Build an `EnvFilter` directive string from [`LoggingConfig`].
///
/// Component overrides are scoped under the crate name and emitted in
/// sorted order.
///
/// # Examples
///
/// ```
/// use wayfinder::config::LoggingConfig;
/// use wayfinder::logging::build_filter_directives;
///
/// let mut config = LoggingConfig::default();
/// config
///     .component_levels
///     .insert("pipeline".to_string(), "debug".to_string());
///
/// assert_eq!(build_filter_directives(&config), "info,wayfinder::pipeline=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut directives = vec![config.level.trim().to_lowercase()];
    directives.extend(
        config
            .component_levels
            .iter()
            .map(|(component, level)| {
                format!("wayfinder::{}={}", component.trim(), level.trim().to_lowercase())
            }),
    );
    directives.join(",")
}
