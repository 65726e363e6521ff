//! MongoDB repository tests (require Docker)
//!
//! Run with `cargo test -p domain_categories -- --ignored`.

use domain_categories::*;
use test_utils::assertions::{assert_some, assert_uuid_eq};
use test_utils::{TestDataBuilder, TestMongo};

fn category(name: &str, hierarchy: Hierarchy, slug: &str) -> Category {
    let input = CategoryInput {
        name: name.to_string(),
        publish: true,
        ..Default::default()
    };
    Category::new(input, hierarchy, slug.to_string())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_load_hierarchy() {
    let mongo = TestMongo::new().await;
    let repository = MongoCategoryRepository::new(&mongo.store());
    repository.init_indexes().await.unwrap();

    let root = category("Electronics", Hierarchy::root("Electronics"), "electronics");
    let root = repository.create(root).await.unwrap();
    let child = category(
        "Phones",
        Hierarchy::child_of(&root, "Phones"),
        "phones",
    );
    let child = repository.create(child).await.unwrap();

    let loaded = assert_some(repository.get_by_id(child.id).await.unwrap(), "child");
    assert_eq!(loaded.level, 1);
    assert_eq!(loaded.path, "Electronics>Phones");
    assert_uuid_eq(loaded.ancestors[0], root.id, "ancestor");

    let many = repository.get_many(&[root.id, child.id]).await.unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(repository.count(&CategoryFilter::default()).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_slug_lookup_and_delete() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_slug_lookup_and_delete");
    let repository = MongoCategoryRepository::new(&mongo.store());
    repository.init_indexes().await.unwrap();

    let name = builder.name("category", "root");
    let created = repository
        .create(category(&name, Hierarchy::root(&name), &name))
        .await
        .unwrap();

    assert!(repository.exists_by_slug(&name, None).await.unwrap());
    assert!(!repository.exists_by_slug(&name, Some(created.id)).await.unwrap());

    assert!(repository.delete(created.id).await.unwrap());
    assert!(!repository.delete(created.id).await.unwrap());
    assert!(repository.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_child_category_resolves_parent_from_mongo() {
    use search::{InMemorySearchIndex, SearchMirror};
    use std::sync::Arc;

    let mongo = TestMongo::new().await;
    let repository = MongoCategoryRepository::new(&mongo.store());
    repository.init_indexes().await.unwrap();
    let mirror = SearchMirror::new(Arc::new(InMemorySearchIndex::new()), SEARCH_INDEX);
    let service = CategoryService::new(repository, mirror);

    let electronics = service
        .create_category(CategoryInput {
            name: "Electronics".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let phones = service
        .create_category(CategoryInput {
            name: "Phones".into(),
            parent_id: Some(electronics.id.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(phones.level, 1);
    assert_eq!(phones.path, "Electronics>Phones");
    assert_eq!(phones.ancestors, vec![electronics.id]);

    let reloaded = service.get_category(phones.id).await.unwrap();
    assert_eq!(reloaded.parent_id, Some(electronics.id));
}
