#![allow(dead_code)]
use redmask_core::{DigestSynthesizer, PatternConfig, PatternSet, default_patterns};

/// Compiles the default catalog. Panics on failure (intended for tests).
pub fn default_set() -> PatternSet {
    PatternSet::compile(&default_patterns()).expect("default patterns must compile")
}

/// Synthesizer wired with the default catalog prefixes.
pub fn default_synth() -> DigestSynthesizer {
    DigestSynthesizer::from_patterns(&default_set())
}

/// Parses a pattern list from YAML, the way operators write it.
pub fn patterns_from_yaml(yaml: &str) -> Vec<PatternConfig> {
    serde_yaml::from_str(yaml).expect("Failed to parse test patterns from YAML")
}

/// A sample of distinct values used for spot checks.
pub fn sample_values() -> Vec<String> {
    let mut values: Vec<String> = (0..=255).map(|i| format!("192.168.0.{i}")).collect();
    values.extend((0..200).map(|i| format!("user{i}@example.com")));
    values.extend(["alice", "bob", "carol", "", " ", "ALICE"].map(String::from));
    values
}
