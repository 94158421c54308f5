use crate::collection::add_to_collection_if_missing;
use crate::entity_model::Entity;
use crate::query::QueryOptions;
use crate::rest_client::{RestApi, Transport};
use crate::AppError;

/// Fetches the candidate option list for one relationship and folds the
/// current selection in, so a value already attached to the entity being
/// edited stays selectable even when the authoritative list would exclude or
/// paginate it out. Each relationship loads independently; callers join
/// several concurrently.
pub async fn load_options<E, T, I>(
    api: &RestApi<T>,
    options: &QueryOptions,
    selected: I,
) -> Result<Vec<E>, AppError>
where
    E: Entity,
    T: Transport,
    I: IntoIterator<Item = Option<E>>,
{
    let fetched = api.query::<E>(options).await?;
    Ok(add_to_collection_if_missing(fetched, selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{tag, FakeTransport, Tag};
    use serde_json::json;

    fn wire_tags() -> serde_json::Value {
        json!([
            { "id": 1, "label": "fiction" },
            { "id": 2, "label": "poetry" },
        ])
    }

    #[tokio::test]
    async fn merges_the_current_selection_into_the_fetched_list() {
        let transport = FakeTransport::new();
        transport.push_ok(wire_tags());
        let api = RestApi::new(transport);

        let merged = load_options(&api, &QueryOptions::default(), [Some(tag(9, "archived"))])
            .await
            .unwrap();
        let ids: Vec<_> = merged.iter().filter_map(|t: &Tag| t.id).collect();
        assert_eq!(ids, vec![9, 1, 2]);
    }

    #[tokio::test]
    async fn an_already_listed_selection_is_not_duplicated() {
        let transport = FakeTransport::new();
        transport.push_ok(wire_tags());
        let api = RestApi::new(transport);

        let merged = load_options(&api, &QueryOptions::default(), [Some(tag(2, "poetry"))])
            .await
            .unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn no_selection_leaves_the_fetched_list_untouched() {
        let transport = FakeTransport::new();
        transport.push_ok(wire_tags());
        let api = RestApi::new(transport);

        let merged: Vec<Tag> = load_options(&api, &QueryOptions::default(), [None]).await.unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn independent_relationship_loads_can_run_concurrently() {
        let transport = FakeTransport::new();
        transport.push_ok(wire_tags());
        transport.push_ok(json!([{ "id": 5, "label": "large-print" }]));
        let api = RestApi::new(transport);

        let query = QueryOptions::default();
        let (a, b) = futures::try_join!(
            load_options::<Tag, _, _>(&api, &query, [None]),
            load_options::<Tag, _, _>(&api, &query, [Some(tag(6, "braille"))]),
        )
        .unwrap();
        assert_eq!(a.len(), 2);
        let ids: Vec<_> = b.iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec![6, 5]);
    }
}
