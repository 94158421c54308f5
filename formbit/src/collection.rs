use crate::identity::Identified;

/// Deduplicating union used when folding a current selection into a freshly
/// fetched option list. Absent candidates are skipped, candidates whose id is
/// already present in `collection` (or earlier among the accepted candidates)
/// are dropped, and the accepted ones are prepended in their original relative
/// order. The base collection is never reordered or shrunk.
pub fn add_to_collection_if_missing<T, I>(collection: Vec<T>, to_check: I) -> Vec<T>
where
    T: Identified,
    I: IntoIterator<Item = Option<T>>,
{
    let mut seen: Vec<_> = collection.iter().map(Identified::id).collect();
    let mut accepted = Vec::new();
    for candidate in to_check.into_iter().flatten() {
        let id = candidate.id();
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        accepted.push(candidate);
    }
    if accepted.is_empty() {
        return collection;
    }
    accepted.extend(collection);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::EntityId;

    #[derive(Clone, Debug, PartialEq)]
    struct Opt {
        id: Option<EntityId>,
    }

    impl Identified for Opt {
        fn id(&self) -> Option<EntityId> {
            self.id
        }
    }

    fn opt(id: EntityId) -> Opt {
        Opt { id: Some(id) }
    }

    fn ids(items: &[Opt]) -> Vec<Option<EntityId>> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn adds_to_an_empty_collection() {
        let merged = add_to_collection_if_missing(vec![], [Some(opt(1))]);
        assert_eq!(merged, vec![opt(1)]);
    }

    #[test]
    fn does_not_add_an_already_present_id() {
        let merged = add_to_collection_if_missing(vec![opt(1)], [Some(opt(1))]);
        assert_eq!(merged, vec![opt(1)]);
    }

    #[test]
    fn prepends_missing_candidates_and_keeps_base_order() {
        let merged = add_to_collection_if_missing(vec![opt(3), opt(4)], [Some(opt(1)), Some(opt(2))]);
        assert_eq!(ids(&merged), vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn deduplicates_among_candidates_themselves() {
        let merged = add_to_collection_if_missing(vec![], [Some(opt(7)), Some(opt(7)), Some(opt(8))]);
        assert_eq!(ids(&merged), vec![Some(7), Some(8)]);
    }

    #[test]
    fn skips_absent_candidates() {
        let merged = add_to_collection_if_missing(vec![opt(1)], [None, Some(opt(2)), None]);
        assert_eq!(ids(&merged), vec![Some(2), Some(1)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let once = add_to_collection_if_missing(vec![opt(1)], [Some(opt(2))]);
        let twice = add_to_collection_if_missing(once.clone(), [Some(opt(2))]);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_preserves_every_base_id() {
        let base = vec![opt(1), opt(2), opt(3)];
        let merged = add_to_collection_if_missing(base.clone(), [Some(opt(2)), Some(opt(9))]);
        for id in ids(&base) {
            assert!(ids(&merged).contains(&id));
        }
    }

    #[test]
    fn returns_base_unchanged_when_nothing_is_accepted() {
        let base = vec![opt(1), opt(2)];
        let merged = add_to_collection_if_missing(base.clone(), [None, Some(opt(1))]);
        assert_eq!(merged, base);
    }
}
