//! Item and store lifecycle against a real database

mod common;

use axum::http::StatusCode;
use serde_json::json;
use stockroom_server::db::repos::{DbError, ItemChanges, ItemRepo, NewItem};
use stockroom_server::models::{Pagination, Patch, RecordName};

use common::{app, create_item, create_store, send, test_pool, unique_name};

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_get_by_name_returns_fresh_id() {
    let pool = test_pool().await;
    let app = app(&pool);

    let first = create_item(&app, &unique_name("widget")).await;
    let second = create_item(&app, &unique_name("widget")).await;
    assert_ne!(first["id"], second["id"]);

    let name = first["name"].as_str().unwrap();
    let (status, found) = send(&app, "GET", &format!("/items/name/{name}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, first);

    let id = first["id"].as_str().unwrap();
    let (status, found) = send(&app, "GET", &format!("/items/id/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["name"], name);
}

#[tokio::test]
#[ignore = "requires database"]
async fn names_are_stored_verbatim() {
    let pool = test_pool().await;
    let app = app(&pool);

    let core = unique_name("pad");
    let padded = format!(" {core} ");
    let item = create_item(&app, &padded).await;
    assert_eq!(item["name"], padded);

    let (status, found) = send(&app, "GET", &format!("/items/name/%20{core}%20"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, item);

    // The unpadded spelling is a different name
    let (status, _) = send(&app, "GET", &format!("/items/name/{core}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // No length cap on names or free text
    let long_name = format!("{}-{}", "s".repeat(300), unique_name("long"));
    let (status, store) = send(
        &app,
        "POST",
        "/stores/create",
        Some(json!({"name": long_name, "description": "d".repeat(2000), "address": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{store}");
    assert_eq!(store["name"], long_name);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_name_conflicts() {
    let pool = test_pool().await;
    let app = app(&pool);
    let name = unique_name("dup");

    create_item(&app, &name).await;
    let (status, body) = send(
        &app,
        "POST",
        "/items/create",
        Some(json!({"name": name, "description": "again"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    create_store(&app, &name).await;
    let (status, _) = send(
        &app,
        "POST",
        "/stores/create",
        Some(json!({"name": name, "description": "", "address": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_records_answer_no_content() {
    let pool = test_pool().await;
    let app = app(&pool);
    let id = uuid::Uuid::new_v4();

    for (method, uri) in [
        ("GET", format!("/items/id/{id}")),
        ("GET", format!("/stores/id/{id}")),
        ("GET", format!("/items/name/{}", unique_name("ghost"))),
        ("DELETE", format!("/items/delete/id/{id}")),
        ("DELETE", format!("/stores/delete/id/{id}")),
    ] {
        let (status, body) = send(&app, method, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{method} {uri}");
        assert!(body.is_null());
    }

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/items/update/id/{id}"),
        Some(json!({"description": "nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_update_is_a_no_op() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let mut repo = ItemRepo::new(&mut conn);

    let created = repo
        .create(NewItem {
            name: RecordName::new(&unique_name("noop")).unwrap(),
            description: "unchanged".into(),
        })
        .await
        .unwrap();

    let updated = repo.update(created.id, ItemChanges::default()).await.unwrap();
    assert_eq!(updated, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_changes_only_supplied_fields() {
    let pool = test_pool().await;
    let app = app(&pool);
    let store = create_store(&app, &unique_name("shop")).await;
    let id = store["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/stores/update/id/{id}"),
        Some(json!({"address": "99 New Road"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["address"], "99 New Road");
    assert_eq!(updated["name"], store["name"]);
    assert_eq!(updated["description"], store["description"]);

    // Description and address are separate columns
    let (_, updated) = send(
        &app,
        "PUT",
        &format!("/stores/update/id/{id}"),
        Some(json!({"description": ""})),
    )
    .await;
    assert_eq!(updated["description"], "");
    assert_eq!(updated["address"], "99 New Road");
}

#[tokio::test]
#[ignore = "requires database"]
async fn rename_to_taken_name_conflicts() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let mut repo = ItemRepo::new(&mut conn);

    let taken = unique_name("taken");
    repo.create(NewItem {
        name: RecordName::new(&taken).unwrap(),
        description: String::new(),
    })
    .await
    .unwrap();
    let other = repo
        .create(NewItem {
            name: RecordName::new(&unique_name("other")).unwrap(),
            description: String::new(),
        })
        .await
        .unwrap();

    let err = repo
        .update(
            other.id,
            ItemChanges {
                name: Patch::Set(RecordName::new(&taken).unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict { resource: "item", .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_unreferenced_item_removes_it() {
    let pool = test_pool().await;
    let app = app(&pool);
    let item = create_item(&app, &unique_name("gone")).await;
    let id = item["id"].as_str().unwrap();

    let (status, deleted) = send(&app, "DELETE", &format!("/items/delete/id/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, item);

    let (status, _) = send(&app, "GET", &format!("/items/id/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_referenced_records_is_blocked() {
    let pool = test_pool().await;
    let app = app(&pool);
    let item = create_item(&app, &unique_name("held")).await;
    let store = create_store(&app, &unique_name("holder")).await;

    let (status, _) = send(
        &app,
        "POST",
        "/stock/add",
        Some(json!({"item_id": item["id"], "store_id": store["id"], "available": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let item_id = item["id"].as_str().unwrap();
    let (status, body) = send(&app, "DELETE", &format!("/items/delete/id/{item_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let store_id = store["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/stores/delete/id/{store_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Both records survive
    let (status, _) = send(&app, "GET", &format!("/items/id/{item_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/stores/id/{store_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn skip_beyond_rows_is_no_content() {
    let pool = test_pool().await;
    let app = app(&pool);
    create_item(&app, &unique_name("paged")).await;

    for uri in [
        "/items/?skip=4000000000",
        "/stores/?skip=4000000000",
        "/stock/?skip=4000000000",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        assert!(body.is_null());
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_is_ordered_by_name_and_limited() {
    let pool = test_pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let mut repo = ItemRepo::new(&mut conn);

    let prefix = unique_name("order");
    for suffix in ["c", "a", "b"] {
        repo.create(NewItem {
            name: RecordName::new(&format!("{prefix}-{suffix}")).unwrap(),
            description: String::new(),
        })
        .await
        .unwrap();
    }

    // Walk every page; the database may be shared with other tests
    let mut ours = Vec::new();
    let mut skip = 0;
    loop {
        let page = repo.list(Pagination::new(skip, 1000)).await.unwrap();
        if page.is_empty() {
            break;
        }
        skip += page.len() as u32;
        ours.extend(
            page.into_iter()
                .filter(|i| i.name.starts_with(&prefix))
                .map(|i| i.name),
        );
    }
    assert_eq!(
        ours,
        vec![format!("{prefix}-a"), format!("{prefix}-b"), format!("{prefix}-c")]
    );

    let one = repo.list(Pagination::new(0, 1)).await.unwrap();
    assert_eq!(one.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn zero_limit_is_no_content() {
    let pool = test_pool().await;
    let app = app(&pool);
    create_item(&app, &unique_name("zero")).await;
    create_store(&app, &unique_name("zero")).await;

    for uri in ["/items/?limit=0", "/stores/?limit=0", "/stock/?limit=0"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        assert!(body.is_null());
    }
}
