use pretty_assertions::assert_eq;
use regex::Regex;
use std::collections::HashSet;

use vacation_desk::AppError;
use vacation_desk::database::models::{
    CreateUserInput, LoginInput, NewUser, RegisterInput, UpdateUserInput, UserRole,
};
use vacation_desk::database::repositories::UserRepository;

mod common;

use common::PASSWORD;

fn register_input(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_assigns_employee_code() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let created = ctx
        .state
        .users
        .register(register_input("Alice", "alice@x.com", "secret1"))
        .await
        .unwrap();

    let pattern = Regex::new(r"^\d{3}-\d{3}-\d{3}$").unwrap();
    assert!(pattern.is_match(&created.employee_code));

    let user = ctx.state.users.find_user(created.id).await.unwrap().unwrap();
    assert_eq!(user.role, UserRole::Employee);
    assert_eq!(user.employee_code, created.employee_code);
    assert_ne!(user.password_hash, "secret1");
}

#[tokio::test]
async fn test_register_normalizes_email() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let created = ctx
        .state
        .users
        .register(register_input("Bob", "  Bob@Example.COM ", PASSWORD))
        .await
        .unwrap();

    let user = ctx.state.users.find_user(created.id).await.unwrap().unwrap();
    assert_eq!(user.email, "bob@example.com");
}

#[tokio::test]
async fn test_employee_codes_are_unique() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let mut codes = HashSet::new();
    for i in 0..25 {
        let created = ctx.employee(&format!("user{}@example.com", i)).await;
        assert!(codes.insert(created.employee_code));
    }
}

#[tokio::test]
async fn test_duplicate_email_registration() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let first = ctx
        .state
        .users
        .register(register_input("First", "duplicate@example.com", PASSWORD))
        .await;
    assert!(first.is_ok());

    let second = ctx
        .state
        .users
        .register(register_input("Second", "Duplicate@Example.com", "another1"))
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(ctx.count("users").await, 1);
}

#[tokio::test]
async fn test_register_validation() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let cases = [
        register_input("", "empty-name@example.com", PASSWORD),
        register_input("   ", "blank-name@example.com", PASSWORD),
        register_input("Bad Email", "not-an-email", PASSWORD),
        register_input("Short", "short@example.com", "12345"),
    ];

    for input in cases {
        let result = ctx.state.users.register(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
    assert_eq!(ctx.count("users").await, 0);
}

#[tokio::test]
async fn test_authenticate_success() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let created = ctx.employee("login@example.com").await;

    let user = ctx
        .state
        .users
        .authenticate(&login_input("LOGIN@example.com", PASSWORD))
        .await
        .unwrap();

    assert_eq!(user.id, created.id);
    assert_eq!(user.email, "login@example.com");
    assert_eq!(user.employee_code, created.employee_code);

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_authenticate_failures_are_indistinguishable() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    ctx.employee("known@example.com").await;

    let attempts = [
        login_input("known@example.com", "wrong-password"),
        login_input("unknown@example.com", PASSWORD),
        login_input("not an email", PASSWORD),
    ];

    for attempt in attempts {
        let err = ctx.state.users.authenticate(&attempt).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}

#[tokio::test]
async fn test_create_user_with_role_and_code() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let created = ctx
        .state
        .users
        .create_user(CreateUserInput {
            name: "Maria Manager".to_string(),
            email: "maria@example.com".to_string(),
            password: PASSWORD.to_string(),
            role: Some("manager".to_string()),
            employee_code: Some("CUSTOM-1".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(created.employee_code, "CUSTOM-1");

    let user = ctx.state.users.find_user(created.id).await.unwrap().unwrap();
    assert_eq!(user.role, UserRole::Manager);
    assert!(user.is_manager());
}

#[tokio::test]
async fn test_create_user_defaults_to_employee_with_generated_code() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let created = ctx
        .state
        .users
        .create_user(CreateUserInput {
            name: "Eve".to_string(),
            email: "eve@example.com".to_string(),
            password: PASSWORD.to_string(),
            role: None,
            employee_code: Some("  ".to_string()),
        })
        .await
        .unwrap();

    let pattern = Regex::new(r"^\d{3}-\d{3}-\d{3}$").unwrap();
    assert!(pattern.is_match(&created.employee_code));

    let user = ctx.state.users.find_user(created.id).await.unwrap().unwrap();
    assert_eq!(user.role, UserRole::Employee);
}

#[tokio::test]
async fn test_create_user_rejects_unknown_role() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let result = ctx
        .state
        .users
        .create_user(CreateUserInput {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password: PASSWORD.to_string(),
            role: Some("admin".to_string()),
            employee_code: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_create_user_duplicate_employee_code_conflicts() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let existing = ctx.employee("first@example.com").await;

    let result = ctx
        .state
        .users
        .create_user(CreateUserInput {
            name: "Copycat".to_string(),
            email: "second@example.com".to_string(),
            password: PASSWORD.to_string(),
            role: None,
            employee_code: Some(existing.employee_code.clone()),
        })
        .await;

    match result {
        Err(AppError::Conflict(message)) => assert_eq!(message, "Employee code already exists"),
        other => panic!("expected a conflict, got {:?}", other.map(|c| c.id)),
    }
}

#[tokio::test]
async fn test_update_user_applies_only_present_fields() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let created = ctx.employee("partial@example.com").await;
    let before = ctx.state.users.find_user(created.id).await.unwrap().unwrap();

    ctx.state
        .users
        .update_user(
            created.id,
            UpdateUserInput {
                name: Some("Renamed".to_string()),
                email: None,
                password: Some(String::new()),
            },
        )
        .await
        .unwrap();

    let after = ctx.state.users.find_user(created.id).await.unwrap().unwrap();
    assert_eq!(after.name, "Renamed");
    assert_eq!(after.email, before.email);
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.role, before.role);
    assert_eq!(after.employee_code, before.employee_code);

    // The empty password left the old one working
    assert!(
        ctx.state
            .users
            .authenticate(&login_input("partial@example.com", PASSWORD))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_update_user_changes_email_and_password() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let created = ctx.employee("old@example.com").await;

    ctx.state
        .users
        .update_user(
            created.id,
            UpdateUserInput {
                name: None,
                email: Some("New@Example.com".to_string()),
                password: Some("brand-new".to_string()),
            },
        )
        .await
        .unwrap();

    let users = &ctx.state.users;
    assert!(users.authenticate(&login_input("old@example.com", PASSWORD)).await.is_err());
    assert!(users.authenticate(&login_input("new@example.com", PASSWORD)).await.is_err());
    assert!(users.authenticate(&login_input("new@example.com", "brand-new")).await.is_ok());
}

#[tokio::test]
async fn test_update_user_keeping_own_email_is_not_a_conflict() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let created = ctx.employee("same@example.com").await;

    let result = ctx
        .state
        .users
        .update_user(
            created.id,
            UpdateUserInput {
                email: Some("same@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_user_errors() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let first = ctx.employee("taken@example.com").await;
    let second = ctx.employee("other@example.com").await;

    let conflict = ctx
        .state
        .users
        .update_user(
            second.id,
            UpdateUserInput {
                email: Some("taken@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(conflict, Err(AppError::Conflict(_))));

    let short_password = ctx
        .state
        .users
        .update_user(
            first.id,
            UpdateUserInput {
                password: Some("123".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(short_password, Err(AppError::Validation(_))));

    let empty_name = ctx
        .state
        .users
        .update_user(
            first.id,
            UpdateUserInput {
                name: Some("".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(empty_name, Err(AppError::Validation(_))));

    let missing = ctx
        .state
        .users
        .update_user(9_999, UpdateUserInput::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_users_newest_first() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let a = ctx.employee("a@example.com").await;
    let b = ctx.employee("b@example.com").await;
    let c = ctx.manager("c@example.com").await;

    let users = ctx.state.users.list_users().await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    let json = serde_json::to_value(&users).unwrap();
    for user in json.as_array().unwrap() {
        assert!(user.get("password_hash").is_none());
    }
    assert_eq!(json[0]["role"], "manager");
}

#[tokio::test]
async fn test_delete_user() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let created = ctx.employee("gone@example.com").await;

    assert!(ctx.state.users.delete_user(created.id).await.unwrap());
    assert!(ctx.state.users.find_user(created.id).await.unwrap().is_none());

    // Deleting again is not an error
    assert!(!ctx.state.users.delete_user(created.id).await.unwrap());
}

#[tokio::test]
async fn test_unique_constraint_backs_email_and_code_uniqueness() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let existing = ctx.employee("first@example.com").await;
    let repo = UserRepository::new(ctx.pool.clone());

    let row = |email: &str, employee_code: &str| NewUser {
        name: "Racer".to_string(),
        email: email.to_string(),
        employee_code: employee_code.to_string(),
        role: UserRole::Employee,
        password_hash: "not-a-real-hash".to_string(),
    };

    // Straight to storage, skipping the service's existence checks
    let err = repo
        .create_user(&row("first@example.com", "FRESH-001"))
        .await
        .map_err(AppError::from_user_write)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref m) if m == "Email already exists"));

    let err = repo
        .create_user(&row("second@example.com", &existing.employee_code))
        .await
        .map_err(AppError::from_user_write)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref m) if m == "Employee code already exists"));

    assert_eq!(ctx.count("users").await, 1);
}
