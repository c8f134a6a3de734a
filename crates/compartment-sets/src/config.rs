//! Parse-time validation options.

/// Optional validation applied when compartment sets are parsed.
///
/// The default accepts any offset and keeps entries exactly as written,
/// duplicates and ordering included. [`ParseConfig::strict`] enables every
/// check.
///
/// # Example
///
/// ```rust
/// use compartment_sets::ParseConfig;
///
/// let config = ParseConfig::builder()
///     .with_offset_bounds(true)
///     .with_sorted(false)
///     .build();
/// assert!(config.check_offset_bounds);
/// assert!(!config.require_sorted);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseConfig {
    /// Reject offsets outside `[0, 1]`.
    pub check_offset_bounds: bool,
    /// Reject entries that are not strictly increasing (this also rejects
    /// duplicates).
    pub require_sorted: bool,
}

impl ParseConfig {
    /// Creates a new builder for ParseConfig.
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder::default()
    }

    /// Returns a config with all checks enabled.
    pub fn strict() -> Self {
        Self {
            check_offset_bounds: true,
            require_sorted: true,
        }
    }
}

/// Builder for ParseConfig.
#[derive(Debug, Clone, Default)]
pub struct ParseConfigBuilder {
    check_offset_bounds: bool,
    require_sorted: bool,
}

impl ParseConfigBuilder {
    /// Enables or disables the `[0, 1]` offset check.
    pub fn with_offset_bounds(mut self, enabled: bool) -> Self {
        self.check_offset_bounds = enabled;
        self
    }

    /// Enables or disables the strict ordering check.
    pub fn with_sorted(mut self, enabled: bool) -> Self {
        self.require_sorted = enabled;
        self
    }

    /// Builds the ParseConfig.
    pub fn build(self) -> ParseConfig {
        ParseConfig {
            check_offset_bounds: self.check_offset_bounds,
            require_sorted: self.require_sorted,
        }
    }
}
