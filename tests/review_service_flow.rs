use std::sync::Arc;

use chrono::Utc;

mod support;

use bazaar_core::application::commands::reviews::{
    DeactivateProductReviewsCommand, ReviewCommandService, SubmitReviewCommand,
};
use bazaar_core::application::error::ApplicationError;
use bazaar_core::domain::errors::DomainError;
use bazaar_core::domain::user::Role;
use support::{FixedClock, InMemoryStore, actor_for};

fn service(store: &Arc<InMemoryStore>) -> ReviewCommandService {
    ReviewCommandService::new(
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::new(FixedClock(Utc::now())),
    )
}

fn submit(product_id: i64, grade: Option<f64>) -> SubmitReviewCommand {
    SubmitReviewCommand {
        product_id,
        header: "Quick take".into(),
        body: "Plenty to like here.".into(),
        grade,
    }
}

#[tokio::test]
async fn graded_reviews_move_the_product_average() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, true);
    let actor = actor_for(&customer);
    let service = service(&store);

    let first = service
        .submit_review(&actor, submit(product.id.into(), Some(4.0)))
        .await
        .unwrap();
    assert!(first.rating_id.is_some());
    assert_eq!(store.product(product.id).unwrap().rating, 4.0);

    service
        .submit_review(&actor, submit(product.id.into(), Some(5.0)))
        .await
        .unwrap();
    assert_eq!(store.product(product.id).unwrap().rating, 4.5);
    assert_eq!(store.ratings().len(), 2);
}

#[tokio::test]
async fn gradeless_review_leaves_the_average_alone() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, true);
    let actor = actor_for(&customer);
    let service = service(&store);

    service
        .submit_review(&actor, submit(product.id.into(), Some(3.0)))
        .await
        .unwrap();

    let review = service
        .submit_review(&actor, submit(product.id.into(), None))
        .await
        .unwrap();

    assert!(review.rating_id.is_none());
    assert_eq!(store.product(product.id).unwrap().rating, 3.0);
    assert_eq!(store.ratings().len(), 1);
    assert_eq!(store.reviews().len(), 2);
}

#[tokio::test]
async fn out_of_range_grade_is_rejected_before_any_write() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, true);
    let actor = actor_for(&customer);
    let service = service(&store);

    let err = service
        .submit_review(&actor, submit(product.id.into(), Some(5.5)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Validation(_))
    ));
    assert!(store.reviews().is_empty());
    assert!(store.ratings().is_empty());
}

#[tokio::test]
async fn inactive_product_rejects_reviews() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    store.deactivate_product(product.id);
    let customer = store.seed_user("mira", Role::Customer, true);
    let actor = actor_for(&customer);
    let service = service(&store);

    let err = service
        .submit_review(&actor, submit(product.id.into(), Some(4.0)))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
    assert!(store.reviews().is_empty());
}

#[tokio::test]
async fn deactivated_account_cannot_review() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, false);
    let actor = actor_for(&customer);
    let service = service(&store);

    let err = service
        .submit_review(&actor, submit(product.id.into(), Some(4.0)))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn moderation_resets_the_product_and_deactivates_everything() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, true);
    let admin = store.seed_user("root", Role::Admin, true);
    let service = service(&store);

    let actor = actor_for(&customer);
    service
        .submit_review(&actor, submit(product.id.into(), Some(3.0)))
        .await
        .unwrap();
    service
        .submit_review(&actor, submit(product.id.into(), Some(4.0)))
        .await
        .unwrap();
    assert_eq!(store.product(product.id).unwrap().rating, 3.5);

    service
        .deactivate_reviews_for_product(
            &actor_for(&admin),
            DeactivateProductReviewsCommand {
                product_id: product.id.into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(store.product(product.id).unwrap().rating, 0.0);
    assert!(store.reviews().iter().all(|r| !r.is_active));
    assert!(store.ratings().iter().all(|r| !r.is_active));
}

#[tokio::test]
async fn moderation_requires_the_moderate_capability() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, true);
    let service = service(&store);

    let actor = actor_for(&customer);
    service
        .submit_review(&actor, submit(product.id.into(), Some(3.0)))
        .await
        .unwrap();

    let err = service
        .deactivate_reviews_for_product(
            &actor,
            DeactivateProductReviewsCommand {
                product_id: product.id.into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Forbidden(_)));
    assert!(store.reviews().iter().all(|r| r.is_active));
}

#[tokio::test]
async fn moderation_with_nothing_to_deactivate_is_not_found() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let admin = store.seed_user("root", Role::Admin, true);
    let service = service(&store);

    let err = service
        .deactivate_reviews_for_product(
            &actor_for(&admin),
            DeactivateProductReviewsCommand {
                product_id: product.id.into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::NotFound(_))));
}

#[tokio::test]
async fn moderation_aborts_whole_when_a_step_matches_nothing() {
    let store = InMemoryStore::new();
    store.seed_category("Kitchen", "kitchen", None);
    let product = store.seed_product("Enamel Mug", "enamel-mug", 1, 5);
    let customer = store.seed_user("mira", Role::Customer, true);
    let admin = store.seed_user("root", Role::Admin, true);
    let service = service(&store);

    // Only a gradeless review exists, so the ratings step matches no rows.
    service
        .submit_review(&actor_for(&customer), submit(product.id.into(), None))
        .await
        .unwrap();

    let err = service
        .deactivate_reviews_for_product(
            &actor_for(&admin),
            DeactivateProductReviewsCommand {
                product_id: product.id.into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::NotFound(_))));
    // The review survives because the operation is all or nothing.
    assert!(store.reviews().iter().all(|r| r.is_active));
}
