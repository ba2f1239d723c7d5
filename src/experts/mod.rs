// src/experts/mod.rs
// Expert personas: the fixed registry and the consultation client built on it

pub mod consultation;
pub mod prompts;

pub use consultation::{CompletionOutcome, ExpertClient, Submission};

use crate::error::{ExpertError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// One selectable expert persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaDefinition {
    /// Stable identifier submitted by the form ("A", "B", ...)
    pub key: String,
    /// Human-readable label shown next to the radio button
    pub label: String,
    /// Instructions sent as the system message
    #[serde(skip)]
    pub system_prompt: String,
}

impl PersonaDefinition {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

/// Immutable, ordered set of personas.
///
/// Built once at startup and shared read-only. Lookups of keys outside the
/// set fail instead of falling back to a default persona.
#[derive(Debug, Clone)]
pub struct ExpertRegistry {
    personas: Vec<PersonaDefinition>,
}

impl ExpertRegistry {
    /// Build a registry, rejecting empty sets, duplicate keys and blank prompts
    pub fn new(personas: Vec<PersonaDefinition>) -> Result<Self> {
        if personas.is_empty() {
            return Err(ExpertError::Config(
                "persona registry must contain at least one persona".into(),
            ));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if persona.key.trim().is_empty() {
                return Err(ExpertError::Config("persona key must not be empty".into()));
            }
            if !seen.insert(persona.key.as_str()) {
                return Err(ExpertError::Config(format!(
                    "duplicate persona key: {}",
                    persona.key
                )));
            }
            if persona.system_prompt.trim().is_empty() {
                return Err(ExpertError::Config(format!(
                    "persona {} has an empty system prompt",
                    persona.key
                )));
            }
        }

        Ok(Self { personas })
    }

    /// The two personas the app ships with
    pub fn builtin() -> Self {
        Self {
            personas: vec![
                PersonaDefinition::new("A", "A: Data Scientist", prompts::DATA_SCIENTIST_PROMPT),
                PersonaDefinition::new("B", "B: UX Designer", prompts::UX_DESIGNER_PROMPT),
            ],
        }
    }

    pub fn lookup(&self, key: &str) -> Result<&PersonaDefinition> {
        self.personas
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| ExpertError::UnknownPersona(key.to_string()))
    }

    /// All personas in insertion order
    pub fn list_all(&self) -> &[PersonaDefinition] {
        &self.personas
    }

    pub fn contains(&self, key: &str) -> bool {
        self.personas.iter().any(|p| p.key == key)
    }

    /// Key preselected on a fresh page
    pub fn default_key(&self) -> &str {
        // new() and builtin() both guarantee a non-empty list
        &self.personas[0].key
    }
}

impl Default for ExpertRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prompts_are_non_empty() {
        let registry = ExpertRegistry::builtin();
        for persona in registry.list_all() {
            let found = registry.lookup(&persona.key).unwrap();
            assert!(!found.system_prompt.trim().is_empty(), "{} has empty prompt", found.key);
        }
    }

    #[test]
    fn test_builtin_order_is_insertion_order() {
        let registry = ExpertRegistry::builtin();
        let keys: Vec<&str> = registry.list_all().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(registry.default_key(), "A");
    }

    #[test]
    fn test_lookup_known_keys() {
        let registry = ExpertRegistry::builtin();
        assert_eq!(
            registry.lookup("A").unwrap().system_prompt,
            prompts::DATA_SCIENTIST_PROMPT
        );
        assert_eq!(registry.lookup("B").unwrap().label, "B: UX Designer");
    }

    #[test]
    fn test_lookup_unknown_key_fails() {
        let registry = ExpertRegistry::builtin();
        for key in ["C", "a", "", " A", "data_scientist"] {
            let err = registry.lookup(key).unwrap_err();
            assert!(matches!(err, ExpertError::UnknownPersona(ref k) if k == key));
        }
        assert!(!registry.contains("C"));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = ExpertRegistry::new(vec![
            PersonaDefinition::new("A", "first", "prompt one"),
            PersonaDefinition::new("A", "second", "prompt two"),
        ]);
        assert!(matches!(result, Err(ExpertError::Config(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_new_rejects_blank_prompt_and_empty_set() {
        let blank = ExpertRegistry::new(vec![PersonaDefinition::new("A", "a", "   ")]);
        assert!(matches!(blank, Err(ExpertError::Config(_))));

        let empty = ExpertRegistry::new(vec![]);
        assert!(matches!(empty, Err(ExpertError::Config(_))));
    }

    #[test]
    fn test_new_accepts_more_personas() {
        let registry = ExpertRegistry::new(vec![
            PersonaDefinition::new("A", "A: one", "p1"),
            PersonaDefinition::new("B", "B: two", "p2"),
            PersonaDefinition::new("C", "C: three", "p3"),
        ])
        .unwrap();
        assert_eq!(registry.list_all().len(), 3);
        assert_eq!(registry.lookup("C").unwrap().system_prompt, "p3");
    }

    #[test]
    fn test_serialized_listing_hides_prompt() {
        let registry = ExpertRegistry::builtin();
        let json = serde_json::to_value(registry.list_all()).unwrap();
        assert_eq!(json[0]["key"], "A");
        assert_eq!(json[0]["label"], "A: Data Scientist");
        assert!(json[0].get("system_prompt").is_none());
    }
}
