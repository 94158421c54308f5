use crate::entity_model::{evaluate, Entity, Violation};
use crate::identity::{EntityId, Identified};

/// Rule outcome for one field. Fields stay pristine until the form is first
/// edited; validity is re-evaluated on every change either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Pristine,
    Valid,
    Invalid,
}

/// Editable projection of one entity, scoped to one active screen. The id
/// control is locked: it is seeded by `new`/`from_entity`/`reset` and cannot
/// be changed through `apply`, regardless of create/edit mode.
pub struct Form<E: Entity> {
    draft: E,
    locked_id: Option<EntityId>,
    violations: Vec<Violation>,
    pristine: bool,
}

impl<E: Entity> Form<E> {
    /// A fresh form seeded from the declared per-entity defaults (`id = None`).
    pub fn new() -> Self {
        Self::seeded((E::spec().seed)())
    }

    /// A form bound to an existing record, id locked to that record's id.
    pub fn from_entity(initial: &E) -> Self {
        Self::seeded(initial.clone())
    }

    fn seeded(draft: E) -> Self {
        let mut form = Form {
            locked_id: draft.id(),
            draft,
            violations: Vec::new(),
            pristine: true,
        };
        form.draft.set_id(form.locked_id);
        form.revalidate();
        form
    }

    /// Reseeds every control from `value`, re-locking the id unconditionally.
    pub fn reset(&mut self, value: &E) {
        self.draft = value.clone();
        self.locked_id = value.id();
        self.draft.set_id(self.locked_id);
        self.pristine = true;
        self.revalidate();
    }

    /// Applies one edit to the draft. The locked id is re-asserted afterwards,
    /// so an edit that touches it is silently undone.
    pub fn apply(&mut self, edit: impl FnOnce(&mut E)) {
        edit(&mut self.draft);
        self.draft.set_id(self.locked_id);
        self.pristine = false;
        self.revalidate();
    }

    /// Reads the raw value back out, locked id included. Validity is not
    /// enforced here; callers check `is_valid` before submitting.
    pub fn raw_value(&self) -> E {
        let mut value = self.draft.clone();
        value.set_id(self.locked_id);
        value
    }

    pub fn id(&self) -> Option<EntityId> {
        self.locked_id
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    pub fn field_state(&self, field: &str) -> FieldState {
        if self.pristine {
            FieldState::Pristine
        } else if self.violations.iter().any(|v| v.field == field) {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }

    fn revalidate(&mut self) {
        self.violations = evaluate(E::spec(), &self.draft);
    }
}

impl<E: Entity> Default for Form<E> {
    fn default() -> Self {
        Self::new()
    }
}
