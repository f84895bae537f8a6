mod common;

use anyhow::Result;
use lifecycle::contract::{EntityKind, LifecycleError};
use search_core::{SearchQuery, SortDir};
use uuid::Uuid;

use common::{province, setup};

#[tokio::test]
async fn client_exposes_catalog() -> Result<()> {
    let ctx = setup().await;
    let client = ctx.lifecycle.client();

    let states = client.states().await?;
    assert_eq!(states.len(), 3);
    assert_eq!(states[2].label, "ELIMINATED");
    Ok(())
}

#[tokio::test]
async fn client_delete_and_state_scoped_views() -> Result<()> {
    let ctx = setup().await;
    let provinces = &ctx.lifecycle.services().provinces;
    let cascais = provinces.create(province("Cascais"), None).await?;
    let sintra = provinces.create(province("Sintra"), None).await?;

    let client = ctx.lifecycle.client();
    client.delete(EntityKind::Province, sintra.id).await?;

    let visible = client.list_visible(EntityKind::Province).await?;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["name"], "Cascais");

    let eliminated = client.list_by_state(EntityKind::Province, 3).await?;
    assert_eq!(eliminated.len(), 1);
    assert_eq!(eliminated[0]["id"], sintra.id.to_string());

    let got = client.get(EntityKind::Province, cascais.id, None).await?;
    assert_eq!(got["state_id"], 1);

    let err = client
        .get(EntityKind::Province, sintra.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound { .. }), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn client_search_serializes_page() -> Result<()> {
    let ctx = setup().await;
    let provinces = &ctx.lifecycle.services().provinces;
    provinces.create(province("Lisboa Centro"), None).await?;
    provinces.create(province("Lisboa Norte"), Some(2)).await?;

    let client = ctx.lifecycle.client();
    let page = client
        .search(
            EntityKind::Province,
            None,
            SearchQuery::new("lisboa").sorted_by("name", SortDir::Desc),
        )
        .await?;
    assert_eq!(page.page_info.total_elements, 2);
    assert_eq!(page.items[0]["name"], "Lisboa Norte");

    let scoped = client
        .search(EntityKind::Province, Some(1), SearchQuery::new("lisboa"))
        .await?;
    assert_eq!(scoped.page_info.total_elements, 1);

    let json = serde_json::to_value(&page)?;
    assert_eq!(json["page_info"]["total_pages"], 1);
    Ok(())
}

#[tokio::test]
async fn client_maps_errors() -> Result<()> {
    let ctx = setup().await;
    let client = ctx.lifecycle.client();

    let err = client
        .delete(EntityKind::Lead, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound { .. }));

    let err = client
        .search(
            EntityKind::Agent,
            None,
            SearchQuery::all().sorted_by("shoe_size", SortDir::Asc),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation { .. }), "got {err:?}");
    Ok(())
}
