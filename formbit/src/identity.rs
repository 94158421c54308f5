/// Server-assigned primary key. `None` marks a record that has not been
/// persisted yet; the backend is the only party that ever invents one.
pub type EntityId = i64;

/// Anything that can be told apart by its primary key alone.
pub trait Identified {
    fn id(&self) -> Option<EntityId>;
}

/// Identity-based equality, tolerant of absent sides. Content is irrelevant:
/// two records with the same id are the same record. Two unsaved records
/// (`id == None`) also compare equal, matching the identifier semantics of
/// the backing REST contract.
pub fn eq_by_id<T: Identified>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.id() == b.id(),
        (None, None) => true,
        _ => false,
    }
}
