//! Environment variable lookup.

use std::collections::{BTreeMap, HashMap};

/// Read access to a set of environment variables.
///
/// Resolution only ever reads through this trait, so callers can hand in an
/// isolated view instead of the process environment.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use tablestore_config::resolve::EnvLookup;
///
/// let mut vars = HashMap::new();
/// vars.insert("APPSETTING_EnvironmentName".to_string(), "QA".to_string());
///
/// assert_eq!(vars.var("APPSETTING_EnvironmentName").as_deref(), Some("QA"));
/// assert_eq!(vars.var("MISSING"), None);
/// ```
pub trait EnvLookup {
    /// Get the value of the variable `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Values that are not valid unicode count as unset
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_lookup() {
        let mut vars = BTreeMap::new();
        vars.insert("A".to_string(), "1".to_string());
        assert_eq!(vars.var("A").as_deref(), Some("1"));
        assert_eq!(vars.var("B"), None);
    }

    #[test]
    fn test_closure_lookup() {
        let env = |name: &str| (name == "STAGE_VAR").then(|| "STAGE".to_string());
        assert_eq!(env.var("STAGE_VAR").as_deref(), Some("STAGE"));
        assert_eq!(env.var("OTHER"), None);
    }

    #[test]
    fn test_empty_value_is_present() {
        let mut vars = HashMap::new();
        vars.insert("EMPTY".to_string(), String::new());

        assert_eq!(vars.var("EMPTY").as_deref(), Some(""));
        assert_eq!(vars.var("UNSET"), None);
    }

    #[test]
    fn test_process_env_missing_variable() {
        assert_eq!(
            ProcessEnv.var("TABLESTORE_CONFIG_TEST_SURELY_UNSET_VARIABLE"),
            None
        );
    }
}
