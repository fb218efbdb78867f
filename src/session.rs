//! Session: the shared configuration service clients are created from.

use crate::config::Config;

/// Holds the configuration shared by the clients created from it.
///
/// A session is safe to read from many tasks at once.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: Config,
}

impl Session {
    /// SDK defaults with each of `overrides` merged in order.
    pub fn new(overrides: &[Config]) -> Self {
        Self {
            config: Config::defaults().merged(overrides),
        }
    }

    /// Session config with `overrides` applied, leaving the session untouched.
    pub fn config_with(&self, overrides: &[Config]) -> Config {
        self.config.merged(overrides)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&[])
    }
}
