//! Domain constants

/// Default limit on nested in-flight resolutions within one session
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 128;

/// Separator used when rendering a chain of service names
pub const CHAIN_SEPARATOR: &str = " -> ";
