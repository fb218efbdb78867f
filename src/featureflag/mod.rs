//! Feature flags.
//!
//! Flags are named booleans read at call time. The process-wide registry is
//! seeded once from `CONTROL_MONKEY_FEATURE_FLAGS`, a comma-separated list of
//! `Name` or `Name=Value` entries:
//!
//! ```text
//! CONTROL_MONKEY_FEATURE_FLAGS=MergeCredentialsChain=true
//! ```
//!
//! Readers take an immutable [`FeatureFlags`] snapshot; [`set`] swaps in a new
//! one, so a reader never sees a half-applied update. Code that should not
//! depend on process state can build its own snapshot and pass it explicitly,
//! e.g. [`ChainProvider::with_flags`](crate::credentials::ChainProvider::with_flags).

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, RwLock};

/// Environment variable the process-wide registry is seeded from.
pub const ENV_VAR: &str = "CONTROL_MONKEY_FEATURE_FLAGS";

/// Merge credentials from every provider of a chain instead of taking the
/// first complete one.
pub const MERGE_CREDENTIALS_CHAIN: FeatureFlag = FeatureFlag::new("MergeCredentialsChain", false);

const BUILTIN: &[FeatureFlag] = &[MERGE_CREDENTIALS_CHAIN];

/// Handle to a named flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureFlag {
    name: &'static str,
    default: bool,
}

impl FeatureFlag {
    pub const fn new(name: &'static str, default: bool) -> Self {
        Self { name, default }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> bool {
        self.default
    }

    /// Current value in the process-wide registry.
    pub fn enabled(&self) -> bool {
        all().is_enabled(*self)
    }
}

impl std::fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Immutable set of flag values.
///
/// Displays as `Name=Value,Name=Value`, the same syntax [`Registry::set`]
/// accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    values: BTreeMap<String, bool>,
}

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `flag`, or its default if unset.
    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.values.get(flag.name).copied().unwrap_or(flag.default)
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, flag: FeatureFlag, enabled: bool) {
        self.values.insert(flag.name.to_string(), enabled);
    }

    pub fn with(mut self, flag: FeatureFlag, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Display for FeatureFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", pairs.join(","))
    }
}

/// Set of known flags and their current values.
#[derive(Debug)]
pub struct Registry {
    known: RwLock<BTreeMap<&'static str, FeatureFlag>>,
    current: RwLock<Arc<FeatureFlags>>,
}

impl Registry {
    /// Registry containing only the built-in flags, at their defaults.
    pub fn new() -> Self {
        let registry = Self {
            known: RwLock::new(BTreeMap::new()),
            current: RwLock::new(Arc::new(FeatureFlags::default())),
        };
        for flag in BUILTIN {
            registry.register(flag.name, flag.default);
        }
        registry
    }

    /// Declare a flag. Registering a name twice returns the first handle.
    pub fn register(&self, name: &'static str, default: bool) -> FeatureFlag {
        let mut known = self.known.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = known.get(name) {
            return *existing;
        }
        let flag = FeatureFlag::new(name, default);
        known.insert(name, flag);
        drop(known);

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let mut next = FeatureFlags::clone(&current);
        next.values.entry(name.to_string()).or_insert(default);
        *current = Arc::new(next);
        flag
    }

    pub fn lookup(&self, name: &str) -> Option<FeatureFlag> {
        self.known
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .copied()
    }

    /// Current snapshot.
    pub fn all(&self) -> Arc<FeatureFlags> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Apply `spec` on top of the current values and install the result.
    ///
    /// An empty `spec` resets every flag to its default.
    pub fn set(&self, spec: &str) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let base = if spec.trim().is_empty() {
            self.defaults()
        } else {
            FeatureFlags::clone(&current)
        };
        *current = Arc::new(self.apply(base, spec));
    }

    /// Snapshot of the defaults with `spec` applied, without installing it.
    pub fn parse(&self, spec: &str) -> FeatureFlags {
        self.apply(self.defaults(), spec)
    }

    fn defaults(&self) -> FeatureFlags {
        let known = self.known.read().unwrap_or_else(|e| e.into_inner());
        FeatureFlags {
            values: known
                .values()
                .map(|flag| (flag.name.to_string(), flag.default))
                .collect(),
        }
    }

    fn apply(&self, mut flags: FeatureFlags, spec: &str) -> FeatureFlags {
        for (name, value) in parse_pairs(spec) {
            match self.lookup(name) {
                Some(flag) => flags.set(flag, value),
                None => tracing::debug!(flag = name, "Ignoring unknown feature flag"),
            }
        }
        flags
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_pairs(spec: &str) -> impl Iterator<Item = (&str, bool)> {
    spec.split(',').filter_map(|entry| {
        let (name, value) = match entry.split_once('=') {
            Some((name, value)) => (name.trim(), parse_bool(name.trim(), value.trim())),
            None => (entry.trim(), true),
        };
        (!name.is_empty()).then_some((name, value))
    })
}

fn parse_bool(name: &str, value: &str) -> bool {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
        "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
        other => {
            tracing::warn!(flag = name, value = other, "Invalid feature flag value, using false");
            false
        }
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let registry = Registry::new();
    registry.set(&std::env::var(ENV_VAR).unwrap_or_default());
    registry
});

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Declare a flag in the process-wide registry.
pub fn register(name: &'static str, default: bool) -> FeatureFlag {
    REGISTRY.register(name, default)
}

/// Update the process-wide flags from a `Name=Value,...` list.
pub fn set(spec: &str) {
    REGISTRY.set(spec)
}

/// Current process-wide snapshot.
pub fn all() -> Arc<FeatureFlags> {
    REGISTRY.all()
}

/// Build a snapshot from `spec` using the process-wide set of known flags.
pub fn parse(spec: &str) -> FeatureFlags {
    REGISTRY.parse(spec)
}
