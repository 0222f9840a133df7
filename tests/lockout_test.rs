// Account lockout accounting across failed logins

mod common;

use chrono::Utc;
use common::{register_client, setup_auth};
use vetclinic_backend::errors::auth::AuthError;
use vetclinic_backend::services::auth_service::{LOCKOUT_MINUTES, MAX_FAILED_ATTEMPTS};
use vetclinic_backend::services::LoginOutcome;

const EMAIL: &str = "anna@example.com";
const PASSWORD: &str = "correct-horse-battery";

#[tokio::test]
async fn test_failed_attempts_are_counted() {
    let harness = setup_auth().await;
    register_client(&harness, EMAIL, PASSWORD).await;

    for expected in 1..MAX_FAILED_ATTEMPTS {
        let result = harness.auth.login(EMAIL, "wrong-password", None, false).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));

        let account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
        assert_eq!(account.failed_login_attempts, expected);
        assert!(account.locked_until.is_none());
    }
}

#[tokio::test]
async fn test_fifth_failure_locks_for_fifteen_minutes() {
    let harness = setup_auth().await;
    register_client(&harness, EMAIL, PASSWORD).await;

    let before = Utc::now().timestamp();
    for _ in 0..MAX_FAILED_ATTEMPTS {
        let _ = harness.auth.login(EMAIL, "wrong-password", None, false).await;
    }
    let after = Utc::now().timestamp();

    let account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();

    // Lockout consumes the counter
    assert_eq!(account.failed_login_attempts, 0);

    let locked_until = account.locked_until.expect("account is locked");
    assert!(locked_until >= before + LOCKOUT_MINUTES * 60);
    assert!(locked_until <= after + LOCKOUT_MINUTES * 60);
}

#[tokio::test]
async fn test_locked_account_rejects_correct_password() {
    let harness = setup_auth().await;
    register_client(&harness, EMAIL, PASSWORD).await;

    for _ in 0..MAX_FAILED_ATTEMPTS {
        let _ = harness.auth.login(EMAIL, "wrong-password", None, false).await;
    }

    // Sixth attempt, correct password: still rejected as locked, with a
    // nonzero remaining duration
    let result = harness.auth.login(EMAIL, PASSWORD, None, false).await;
    let Err(AuthError::AccountLocked(body)) = result else {
        panic!("expected AccountLocked");
    };
    assert!(body.0.message.contains("min"));

    let state_before = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();

    // Further attempts while locked mutate nothing
    let _ = harness.auth.login(EMAIL, "wrong-password", None, false).await;
    let state_after = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();

    assert_eq!(state_before.failed_login_attempts, state_after.failed_login_attempts);
    assert_eq!(state_before.locked_until, state_after.locked_until);
}

#[tokio::test]
async fn test_expired_lock_allows_login_and_clears_state() {
    let harness = setup_auth().await;
    register_client(&harness, EMAIL, PASSWORD).await;

    // Simulate a lock that has already run out
    let mut account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
    account.locked_until = Some(Utc::now().timestamp() - 60);
    account.failed_login_attempts = 0;
    harness.accounts.persist_auth_state(&account).await.unwrap();

    let outcome = harness.auth.login(EMAIL, PASSWORD, None, false).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::SetupRequired { .. }));

    let account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(account.locked_until.is_none());
    assert_eq!(account.failed_login_attempts, 0);
}

#[tokio::test]
async fn test_successful_password_resets_counter_even_when_totp_pending() {
    let harness = setup_auth().await;
    register_client(&harness, EMAIL, PASSWORD).await;

    for _ in 0..3 {
        let _ = harness.auth.login(EMAIL, "wrong-password", None, false).await;
    }
    let account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(account.failed_login_attempts, 3);

    // Correct password, but the attempt still ends in SetupRequired; the
    // counter resets regardless of the TOTP step
    let outcome = harness.auth.login(EMAIL, PASSWORD, None, false).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::SetupRequired { .. }));

    let account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(account.failed_login_attempts, 0);
    assert!(account.locked_until.is_none());
}

#[tokio::test]
async fn test_counter_restarts_after_success() {
    let harness = setup_auth().await;
    register_client(&harness, EMAIL, PASSWORD).await;

    for _ in 0..4 {
        let _ = harness.auth.login(EMAIL, "wrong-password", None, false).await;
    }
    let _ = harness.auth.login(EMAIL, PASSWORD, None, false).await.unwrap();

    // One more failure is failure #1, not #5: no lock
    let _ = harness.auth.login(EMAIL, "wrong-password", None, false).await;
    let account = harness.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(account.failed_login_attempts, 1);
    assert!(account.locked_until.is_none());
}
