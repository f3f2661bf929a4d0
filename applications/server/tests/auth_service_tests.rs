/// Authentication service tests
/// Tests JWT generation, password hashing, token validation
mod common;

use chrono::Utc;
use common::{fixtures, TestApp};
use jsonwebtoken::{encode, EncodingKey, Header};
use tempo_server::services::auth::{AuthService, Claims, TokenType};
use tempo_server::services::{create_account, NewAccount};
use tempo_storage::users;

fn create_test_auth_service() -> AuthService {
    AuthService::new(fixtures::JWT_SECRET.to_string(), 1, 1).with_bcrypt_cost(4)
}

fn signed(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Test password hashing produces valid bcrypt hashes
#[tokio::test]
async fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let password = "MySecurePassword123!";
    let hash = auth_service.hash_password(password).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert!(hash.starts_with("$2b$04$"), "Configured cost should be used");

    // Verify the hash is different each time (salt is random)
    let hash2 = auth_service.hash_password(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// Test password verification with correct and incorrect passwords
#[tokio::test]
async fn test_password_verification() {
    let auth_service = create_test_auth_service();
    let hash = auth_service.hash_password("MySecurePassword123!").unwrap();

    assert!(auth_service
        .verify_password("MySecurePassword123!", &hash)
        .unwrap());
    assert!(!auth_service.verify_password("WrongPassword", &hash).unwrap());
}

/// Test password verification with invalid hash format
#[tokio::test]
async fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

/// Test token type enforcement in both directions
#[tokio::test]
async fn test_token_type_enforcement() {
    let auth_service = create_test_auth_service();

    let tokens = auth_service.issue_tokens(5).unwrap();
    assert_eq!(auth_service.verify_access_token(&tokens.access_token).unwrap(), 5);
    assert_eq!(auth_service.verify_refresh_token(&tokens.refresh_token).unwrap(), 5);

    assert!(auth_service.verify_refresh_token(&tokens.access_token).is_err());
    assert!(auth_service.verify_access_token(&tokens.refresh_token).is_err());
}

/// Test token signed with a different secret is rejected
#[tokio::test]
async fn test_token_validation_invalid_signature() {
    let auth_service = create_test_auth_service();
    let other_service = AuthService::new("another-secret".to_string(), 1, 1);

    let token = other_service.create_access_token(5).unwrap();
    assert!(auth_service.verify_access_token(&token).is_err());
}

/// Test malformed and empty tokens are rejected
#[tokio::test]
async fn test_token_validation_malformed() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.verify_access_token("not.a.jwt").is_err());
    assert!(auth_service.verify_access_token("").is_err());
}

/// Test expired tokens are rejected
#[tokio::test]
async fn test_access_token_expiration() {
    let auth_service = create_test_auth_service();
    let now = Utc::now().timestamp();

    let expired = signed(
        &Claims {
            sub: "5".to_string(),
            exp: now - 3600,
            iat: now - 7200,
            token_type: TokenType::Access,
        },
        fixtures::JWT_SECRET,
    );

    assert!(auth_service.verify_access_token(&expired).is_err());
}

/// Test a token whose subject is not a user id
#[tokio::test]
async fn test_token_with_non_numeric_subject() {
    let auth_service = create_test_auth_service();
    let now = Utc::now().timestamp();

    let token = signed(
        &Claims {
            sub: "user-abc".to_string(),
            exp: now + 3600,
            iat: now,
            token_type: TokenType::Access,
        },
        fixtures::JWT_SECRET,
    );

    assert!(auth_service.verify_access_token(&token).is_err());
}

/// Test complete authentication flow with database
#[tokio::test]
async fn test_complete_authentication_flow() {
    let app = TestApp::new().await;
    let (user_id, _) = app
        .create_user(fixtures::TEST_EMAIL, fixtures::TEST_USERNAME)
        .await;

    // Simulate login: retrieve hash and verify password
    let credentials = users::find_credentials_by_email(&app.db, "Test@Example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(credentials.user.id, user_id);
    assert!(app
        .auth_service
        .verify_password(fixtures::TEST_PASSWORD, &credentials.password_hash)
        .unwrap());

    let tokens = app.auth_service.issue_tokens(credentials.user.id).unwrap();
    assert_eq!(
        app.auth_service
            .verify_access_token(&tokens.access_token)
            .unwrap(),
        user_id
    );
}

/// Test authentication with non-existent user
#[tokio::test]
async fn test_authentication_nonexistent_user() {
    let app = TestApp::new().await;

    let credentials = users::find_credentials_by_email(&app.db, "ghost@example.com")
        .await
        .unwrap();
    assert!(credentials.is_none());
}

/// Accounts created outside registration are found by the login lookup
#[tokio::test]
async fn test_created_account_email_is_normalized() {
    let app = TestApp::new().await;

    let user = create_account(
        &app.db,
        &app.auth_service,
        NewAccount {
            email: "  Admin@Example.COM ",
            username: " admin ",
            password: fixtures::TEST_PASSWORD,
            display_name: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(user.email, "admin@example.com");
    assert_eq!(user.username, "admin");

    let credentials = users::find_credentials_by_email(&app.db, "admin@example.com")
        .await
        .unwrap()
        .expect("account should be found by its normalized email");
    assert_eq!(credentials.user.id, user.id);
    assert!(app
        .auth_service
        .verify_password(fixtures::TEST_PASSWORD, &credentials.password_hash)
        .unwrap());
}
