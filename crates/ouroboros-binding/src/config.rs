//! Configuration options for a validator instance

/// Default separator between rule names in a rules tag
pub const DEFAULT_RULE_SEPARATOR: char = ',';

/// Configuration options for [`Validator`](crate::Validator) construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Separator between rule names in a rules tag
    pub rule_separator: char,

    /// Seed the built-in rules (required, int, unsigned, time, bool)
    pub builtin_rules: bool,

    /// Seed the built-in converters (int, uint, int64, string, bool, time)
    pub builtin_converters: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            rule_separator: DEFAULT_RULE_SEPARATOR,
            builtin_rules: true,
            builtin_converters: true,
        }
    }
}

impl ValidatorConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule separator
    pub fn rule_separator(mut self, separator: char) -> Self {
        self.rule_separator = separator;
        self
    }

    /// Enable or disable built-in rules
    pub fn builtin_rules(mut self, enabled: bool) -> Self {
        self.builtin_rules = enabled;
        self
    }

    /// Enable or disable built-in converters
    pub fn builtin_converters(mut self, enabled: bool) -> Self {
        self.builtin_converters = enabled;
        self
    }

    /// Start with empty registries
    pub fn without_builtins(self) -> Self {
        self.builtin_rules(false).builtin_converters(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ValidatorConfig::default();
        assert_eq!(config.rule_separator, ',');
        assert!(config.builtin_rules);
        assert!(config.builtin_converters);
    }

    #[test]
    fn test_config_builder() {
        let config = ValidatorConfig::new()
            .rule_separator('|')
            .builtin_converters(false);
        assert_eq!(config.rule_separator, '|');
        assert!(config.builtin_rules);
        assert!(!config.builtin_converters);

        let bare = ValidatorConfig::new().without_builtins();
        assert!(!bare.builtin_rules);
        assert!(!bare.builtin_converters);
    }
}
