use crate::entity_model::Entity;
use crate::identity::EntityId;
use crate::rest_client::{RestApi, Transport};
use crate::AppError;

/// Explicit navigation seam. The view layer behind it (history, router) is
/// out of scope; workflows receive a navigator instead of reaching for an
/// ambient one.
pub trait Navigator {
    /// Return to the prior view.
    fn back(&mut self);
    /// Redirect to the not-found destination.
    fn not_found(&mut self);
}

/// Outcome of a pre-navigation fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<E> {
    /// New-entity route: no id, no backend call.
    New,
    Found(E),
    /// The backend reported absence; the navigator was already redirected and
    /// no usable value reaches the caller.
    Redirected,
}

impl<E> Resolution<E> {
    pub fn entity(self) -> Option<E> {
        match self {
            Resolution::Found(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn is_redirected(&self) -> bool {
        matches!(self, Resolution::Redirected)
    }
}

/// Loads an entity by id, or redirects to not-found when the backend answers
/// with an empty body. Transport failures propagate untouched.
pub async fn resolve<E: Entity, T: Transport>(
    api: &RestApi<T>,
    navigator: &mut dyn Navigator,
    id: Option<EntityId>,
) -> Result<Resolution<E>, AppError> {
    let Some(id) = id else {
        return Ok(Resolution::New);
    };
    match api.find::<E>(id).await? {
        Some(entity) => Ok(Resolution::Found(entity)),
        None => {
            navigator.not_found();
            Ok(Resolution::Redirected)
        }
    }
}
