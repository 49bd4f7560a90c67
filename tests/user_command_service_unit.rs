use std::sync::Arc;

use chrono::Utc;

mod support;

use bazaar_core::application::commands::users::{
    LoginUserCommand, RegisterUserCommand, UserCommandService,
};
use bazaar_core::application::error::ApplicationError;
use bazaar_core::domain::user::Role;
use support::{FixedClock, InMemoryStore, PlainPasswordHasher, StaticTokenManager, actor_for};

fn service(store: &Arc<InMemoryStore>) -> UserCommandService {
    UserCommandService::new(
        Arc::clone(store) as _,
        Arc::new(PlainPasswordHasher),
        Arc::new(StaticTokenManager),
        Arc::new(FixedClock(Utc::now())),
    )
}

fn register(username: &str, role: Option<Role>) -> RegisterUserCommand {
    RegisterUserCommand {
        username: username.into(),
        password: "secret123".into(),
        role,
    }
}

#[tokio::test]
async fn first_account_becomes_admin_later_ones_customers() {
    let store = InMemoryStore::new();
    let service = service(&store);

    let first = service.register(None, register("root", None)).await.unwrap();
    assert_eq!(first.role, Role::Admin);

    let second = service.register(None, register("mira", None)).await.unwrap();
    assert_eq!(second.role, Role::Customer);
}

#[tokio::test]
async fn explicit_roles_require_an_admin_actor() {
    let store = InMemoryStore::new();
    let service = service(&store);

    service.register(None, register("root", None)).await.unwrap();

    let err = service
        .register(None, register("mira", Some(Role::Admin)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let admin = store.seed_user("boss", Role::Admin, true);
    let promoted = service
        .register(Some(&actor_for(&admin)), register("nadia", Some(Role::Admin)))
        .await
        .unwrap();
    assert_eq!(promoted.role, Role::Admin);
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let store = InMemoryStore::new();
    let service = service(&store);

    service.register(None, register("root", None)).await.unwrap();
    service.register(None, register("mira", None)).await.unwrap();

    let err = service
        .register(None, register("mira", None))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let store = InMemoryStore::new();
    let service = service(&store);

    let err = service
        .register(
            None,
            RegisterUserCommand {
                username: "root".into(),
                password: "short".into(),
                role: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Validation(_)));
}

#[tokio::test]
async fn login_issues_a_token_for_valid_credentials() {
    let store = InMemoryStore::new();
    let service = service(&store);

    service.register(None, register("root", None)).await.unwrap();

    let result = service
        .login(LoginUserCommand {
            username: "root".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap();

    assert_eq!(result.user.username, "root");
    assert!(!result.token.token.is_empty());
}

#[tokio::test]
async fn login_rejects_bad_passwords_and_disabled_accounts() {
    let store = InMemoryStore::new();
    let service = service(&store);

    service.register(None, register("root", None)).await.unwrap();

    let err = service
        .login(LoginUserCommand {
            username: "root".into(),
            password: "wrong password".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));

    store.seed_user("ghost", Role::Customer, false);
    let err = service
        .login(LoginUserCommand {
            username: "ghost".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}
