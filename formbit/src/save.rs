use crate::entity_model::Entity;
use crate::form::Form;
use crate::resolver::Navigator;
use crate::rest_client::{RestApi, Transport};
use crate::AppError;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};

/// Domain hooks around one save. The finalize hook fires exactly once per
/// accepted `save` invocation, always after the success/error hook.
pub trait SaveHooks<E> {
    fn on_success(&mut self, _saved: &E) {}
    fn on_error(&mut self, _err: &AppError) {}
    fn on_finalize(&mut self) {}
}

/// Default behavior: navigate back on success, stay put on error.
pub struct NavigateBack<'a, N: Navigator + ?Sized> {
    pub navigator: &'a mut N,
}

impl<E, N: Navigator + ?Sized> SaveHooks<E> for NavigateBack<'_, N> {
    fn on_success(&mut self, _saved: &E) {
        self.navigator.back();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Saved<E> {
    Created(E),
    Updated(E),
}

impl<E> Saved<E> {
    pub fn entity(&self) -> &E {
        match self {
            Saved::Created(entity) | Saved::Updated(entity) => entity,
        }
    }

    pub fn into_entity(self) -> E {
        match self {
            Saved::Created(entity) | Saved::Updated(entity) => entity,
        }
    }
}

/// Drives a single create-or-update mutation per form instance:
/// `Idle → Saving → Idle`. A second save while one is in flight is rejected
/// outright instead of racing the first one.
pub struct SaveWorkflow<E: Entity> {
    saving: AtomicBool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Default for SaveWorkflow<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> SaveWorkflow<E> {
    pub fn new() -> Self {
        SaveWorkflow { saving: AtomicBool::new(false), _entity: PhantomData }
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Extracts the form's raw value and issues an update when its id is
    /// present, a create otherwise. `is_saving` flips true synchronously and
    /// is false again by the time the hooks run. Failures are not retried and
    /// leave the form contents untouched.
    pub async fn save<T: Transport, H: SaveHooks<E> + ?Sized>(
        &self,
        api: &RestApi<T>,
        form: &Form<E>,
        hooks: &mut H,
    ) -> Result<Saved<E>, AppError> {
        if self
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::SaveInFlight(E::entity_name()));
        }
        if !form.is_valid() {
            // Local validation blocks submission; this save never started.
            self.saving.store(false, Ordering::SeqCst);
            return Err(AppError::Validation(form.violations().to_vec()));
        }
        let entity = form.raw_value();
        let result = match entity.id() {
            Some(_) => api.update(&entity).await.map(Saved::Updated),
            None => api.create(&entity).await.map(Saved::Created),
        };
        self.saving.store(false, Ordering::SeqCst);
        match &result {
            Ok(saved) => hooks.on_success(saved.entity()),
            Err(err) => hooks.on_error(err),
        }
        hooks.on_finalize();
        result
    }
}
