//! MongoDB repository tests (require Docker)
//!
//! Run with `cargo test -p domain_users -- --ignored`.

use domain_users::*;
use test_utils::{TestDataBuilder, TestMongo};

fn user(builder: &TestDataBuilder, suffix: &str) -> User {
    let input = CreateUser {
        name: builder.name("user", suffix),
        username: builder.username(suffix),
        email: builder.email(suffix),
        password: "unused-here".to_string(),
        ..Default::default()
    };
    User::new(input, "$argon2id$placeholder".to_string())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_email_is_enforced() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_unique_email_is_enforced");
    let repository = MongoUserRepository::new(&mongo.store());
    repository.init_indexes().await.unwrap();

    let first = user(&builder, "admin");
    repository.create(first.clone()).await.unwrap();

    let mut second = user(&builder, "other");
    second.email = first.email.clone();
    let err = repository.create(second).await.unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_email_and_exclusion() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_find_by_email_and_exclusion");
    let repository = MongoUserRepository::new(&mongo.store());
    repository.init_indexes().await.unwrap();

    let created = repository.create(user(&builder, "staff")).await.unwrap();

    let found = repository.find_by_email(&created.email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, created.password_hash);

    assert!(repository.exists_by_username(&created.username, None).await.unwrap());
    assert!(
        !repository
            .exists_by_email(&created.email, Some(created.id))
            .await
            .unwrap()
    );

    let filter = UserFilter {
        search: Some("staff".to_string()),
        ..Default::default()
    };
    assert_eq!(repository.list(&filter).await.unwrap().len(), 1);
}
