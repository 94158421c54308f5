use crate::identity::{EntityId, Identified};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Captures the editable layout of one entity type and drives the shared
/// form/save/rest machinery. One static spec per entity replaces a per-entity
/// copy of the whole pattern.
pub struct EntitySpec<E> {
    pub name: &'static str,
    /// Plural REST path, e.g. `api/books`.
    pub resource: &'static str,
    /// Declared defaults for a fresh form: `id = None`, empty relationship
    /// lists, everything else unset.
    pub seed: fn() -> E,
    pub fields: Vec<FieldSpec<E>>,
}

/// Describes how a single field exposes its value and which rules apply to it.
pub struct FieldSpec<E> {
    pub name: &'static str,
    pub rules: &'static [Rule],
    pub value: fn(&E) -> FieldValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    Min(i64),
}

/// Type-erased view of one field value, used only for rule evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Int(Option<i64>),
    Date(Option<NaiveDate>),
    Choice(Option<String>),
    Reference(Option<EntityId>),
    References(Vec<EntityId>),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(v) => v.as_deref().is_none_or(|s| s.is_empty()),
            FieldValue::Int(v) => v.is_none(),
            FieldValue::Date(v) => v.is_none(),
            FieldValue::Choice(v) => v.is_none(),
            FieldValue::Reference(v) => v.is_none(),
            // Relationship lists are never mandatory in this contract.
            FieldValue::References(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub rule: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Evaluates every declared rule against the current field values.
pub fn evaluate<E>(spec: &EntitySpec<E>, entity: &E) -> Vec<Violation> {
    let mut violations = Vec::new();
    for field in &spec.fields {
        let value = (field.value)(entity);
        for rule in field.rules {
            match rule {
                Rule::Required => {
                    if value.is_blank() {
                        violations.push(Violation {
                            field: field.name,
                            rule: "required",
                            message: "must not be null".to_string(),
                        });
                    }
                }
                Rule::Min(min) => {
                    if let FieldValue::Int(Some(v)) = &value {
                        if v < min {
                            violations.push(Violation {
                                field: field.name,
                                rule: "min",
                                message: format!("must be at least {min}"),
                            });
                        }
                    }
                }
            }
        }
    }
    violations
}

/// A domain record with a stable server-assigned identity and a declared
/// editable layout. The serde bounds make the implementing struct double as
/// its own wire record; date fields go through `date_serde_enc::Ymd`.
pub trait Entity: Identified + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn spec() -> &'static EntitySpec<Self>;

    /// Settable only by form binding/reset and by decoding server responses.
    fn set_id(&mut self, id: Option<EntityId>);

    fn resource() -> &'static str {
        Self::spec().resource
    }

    fn entity_name() -> &'static str {
        Self::spec().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        id: Option<EntityId>,
        label: Option<String>,
        copies: Option<i64>,
    }

    static SAMPLE_SPEC: Lazy<EntitySpec<Sample>> = Lazy::new(|| EntitySpec {
        name: "sample",
        resource: "api/samples",
        seed: || Sample { id: None, label: None, copies: None },
        fields: vec![
            FieldSpec {
                name: "label",
                rules: &[Rule::Required],
                value: |s| FieldValue::Text(s.label.clone()),
            },
            FieldSpec {
                name: "copies",
                rules: &[Rule::Required, Rule::Min(0)],
                value: |s| FieldValue::Int(s.copies),
            },
        ],
    });

    impl Identified for Sample {
        fn id(&self) -> Option<EntityId> {
            self.id
        }
    }

    impl Entity for Sample {
        fn spec() -> &'static EntitySpec<Self> {
            &SAMPLE_SPEC
        }
        fn set_id(&mut self, id: Option<EntityId>) {
            self.id = id;
        }
    }

    #[test]
    fn seeded_entity_violates_required_rules() {
        let seeded = (Sample::spec().seed)();
        let violations = evaluate(Sample::spec(), &seeded);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["label", "copies"]);
    }

    #[test]
    fn satisfied_rules_produce_no_violations() {
        let sample = Sample { id: Some(1), label: Some("ok".into()), copies: Some(3) };
        assert!(evaluate(Sample::spec(), &sample).is_empty());
    }

    #[test]
    fn min_rule_rejects_negative_values() {
        let sample = Sample { id: None, label: Some("ok".into()), copies: Some(-1) };
        let violations = evaluate(Sample::spec(), &sample);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "min");
        assert_eq!(violations[0].field, "copies");
    }

    #[test]
    fn empty_text_counts_as_missing() {
        let sample = Sample { id: None, label: Some(String::new()), copies: Some(0) };
        let violations = evaluate(Sample::spec(), &sample);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "label");
    }
}
