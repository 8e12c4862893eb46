//! Rendering and naming configuration.

use smol_str::SmolStr;

/// Default pool of lazily assigned node names, consumed in order.
pub const DEFAULT_NAME_POOL: &[&str] = &[
    "bolden",
    "morton",
    "oliver",
    "armstrong",
    "bechet",
    "beiderbecke",
    "hawkins",
    "ellington",
    "basie",
    "waller",
    "tatum",
    "young",
    "holiday",
    "fitzgerald",
    "gillespie",
    "parker",
    "monk",
    "powell",
    "davis",
    "mingus",
    "rollins",
    "coltrane",
    "evans",
    "coleman",
];

/// Configuration for query text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Indentation added per nested `CALL { }` level.
    pub indent_unit: SmolStr,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_unit: SmolStr::new_static("  "),
        }
    }
}

impl RenderConfig {
    /// Creates a configuration with the default two-space indentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit for nested blocks.
    pub fn with_indent_unit(mut self, unit: impl Into<SmolStr>) -> Self {
        self.indent_unit = unit.into();
        self
    }
}

/// Configuration for the lazy identifier allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Prefix prepended to every generated name.
    pub prefix: SmolStr,
    /// Ordered pool of name stems.
    pub pool: Vec<SmolStr>,
    /// Stem used with a running number once the pool is exhausted.
    pub fallback_stem: SmolStr,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: SmolStr::new_static("_node_"),
            pool: DEFAULT_NAME_POOL
                .iter()
                .copied()
                .map(SmolStr::new_static)
                .collect(),
            fallback_stem: SmolStr::new_static("jazzcat"),
        }
    }
}

impl NamingConfig {
    /// Creates the default naming configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<SmolStr>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replaces the name pool.
    pub fn with_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.pool = pool.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fallback stem.
    pub fn with_fallback_stem(mut self, stem: impl Into<SmolStr>) -> Self {
        self.fallback_stem = stem.into();
        self
    }

    /// Returns the name for the given zero-based allocation index.
    pub fn name_at(&self, index: usize) -> SmolStr {
        match self.pool.get(index) {
            Some(stem) => SmolStr::from(format!("{}{}", self.prefix, stem)),
            None => SmolStr::from(format!(
                "{}{}{}",
                self.prefix,
                self.fallback_stem,
                index - self.pool.len() + 1
            )),
        }
    }
}
