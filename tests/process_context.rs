//! The process-wide context: installed once, shared by every caller.

mod common;

use std::sync::Arc;

use common::load_test_config;
use firebind::startup;
use firebind::Error;

/// Nothing listens here; connections are refused.
const UNREACHABLE: &str = "http://127.0.0.1:1";

#[test]
fn init_returns_the_same_context_every_time() {
    let config = load_test_config(UNREACHABLE);
    let first = startup::init(&config).expect("init should succeed");
    let second = startup::init(&config).expect("init should succeed");

    assert!(std::ptr::eq(first, second));
    assert!(Arc::ptr_eq(&first.auth, &second.auth));
    assert!(Arc::ptr_eq(&first.db, &second.db));
    assert!(first.app().ptr_eq(second.app()));

    let installed = startup::context().expect("context should be installed");
    assert!(std::ptr::eq(first, installed));
}

#[test]
fn init_from_many_threads_yields_one_context() {
    let config = load_test_config(UNREACHABLE);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || {
                startup::init(&config).expect("init should succeed") as *const _ as usize
            })
        })
        .collect();

    let addrs: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn later_init_ignores_new_config() {
    let config = load_test_config(UNREACHABLE);
    let ctx = startup::init(&config).expect("init should succeed");

    let mut other = config.clone();
    other.firebase.project_id = "some-other-project".to_string();
    let again = startup::init(&other).expect("init should succeed");

    assert!(std::ptr::eq(ctx, again));
    assert_eq!(again.app().options().project_id, "vote-app-test");
}

/// Construction needs no backend; the failure shows up on first use.
#[tokio::test]
async fn unreachable_backend_fails_on_first_use_only() {
    let config = load_test_config(UNREACHABLE);
    let ctx = startup::init(&config).expect("init should succeed without a backend");

    let err = ctx
        .auth()
        .sign_in_with_email_and_password("ada@example.com", "hunter2")
        .await
        .expect_err("sign-in should fail");
    assert!(matches!(err, Error::Http(_)), "unexpected error: {}", err);

    let err = ctx
        .db()
        .get_document("polls/p1")
        .await
        .expect_err("read should fail");
    assert!(matches!(err, Error::Http(_)), "unexpected error: {}", err);
}
