mod common;

use common::{MockServer, Reply};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rivulex::config::Config;
use rivulex::forms::{AccessModeSelector, Form, LoginForm, SignUpField, SignUpForm, SubmitBlocked};
use rivulex::gateway::RequestGateway;
use rivulex::models::{AccessMode, SubmissionResult};
use rivulex::screens::{LoginScreen, SafetyRoutingScreen, Screen, ScreenContext};
use rivulex::services::{into_submission_result, SubmissionService, TaskHandle};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

async fn settle<T>(handle: &mut TaskHandle<T>) -> Result<T, rivulex::GatewayError> {
    for _ in 0..200 {
        if let Some(result) = handle.try_recv() {
            return result;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background task never settled");
}

fn filled_sign_up() -> SignUpForm {
    let mut form = SignUpForm::new();
    form.set_field(SignUpField::FirstName, "John");
    form.set_field(SignUpField::LastName, "Doe");
    form.set_field(SignUpField::Gender, "male");
    form.set_field(SignUpField::Country, "Nigeria");
    form.set_field(SignUpField::StateOfResidence, "Borno");
    form.set_field(SignUpField::GeneralEmail, "john@gmail.com");
    form.set_field(SignUpField::Password, "password1");
    form
}

#[tokio::test]
async fn test_sign_up_round_trip_resets_form() {
    let server = MockServer::start(Reply::json(201, json!({}))).await;
    let gateway = Arc::new(RequestGateway::new(&server.api_config(2_000)).unwrap());

    let mut form = filled_sign_up();
    let payload = form.begin_submit().unwrap();
    assert!(form.is_submitting());

    // A second submit while in flight does nothing
    assert_eq!(form.begin_submit().unwrap_err(), SubmitBlocked::InFlight);

    let mut handle = SubmissionService::submit(
        &Handle::current(),
        Arc::clone(&gateway),
        form.endpoint(),
        payload,
        form.confirmation(),
    );
    form.finish_submit(into_submission_result(settle(&mut handle).await));

    assert!(!form.is_submitting());
    let result = form.last_result().unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Account created successfully with general access!");
    assert!(form.first_name.is_blank());
    assert_eq!(form.mode(), AccessMode::General);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let body = requests[0].json();
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["email"], "john@gmail.com");
    assert_eq!(body["gender"], "male");
}

#[tokio::test]
async fn test_failed_login_keeps_fields() {
    let server =
        MockServer::start(Reply::json(401, json!({"message": "Invalid credentials"}))).await;
    let gateway = Arc::new(RequestGateway::new(&server.api_config(2_000)).unwrap());

    let mut form = LoginForm::new();
    form.email.set_text("ops@rivulex.io");
    form.password.set_text("wrong");
    let payload = form.begin_submit().unwrap();

    let mut handle = SubmissionService::submit(
        &Handle::current(),
        gateway,
        form.endpoint(),
        payload,
        form.confirmation(),
    );
    form.finish_submit(into_submission_result(settle(&mut handle).await));

    assert_eq!(
        form.last_result(),
        Some(&SubmissionResult::failure("Invalid credentials"))
    );
    assert_eq!(form.email.text(), "ops@rivulex.io");
    assert_eq!(form.password.text(), "wrong");
}

#[tokio::test]
async fn test_cancelled_submission_reports_cancellation() {
    let server = MockServer::start(
        Reply::json(200, json!({"message": "late"})).delayed(Duration::from_secs(5)),
    )
    .await;
    let gateway = Arc::new(RequestGateway::new(&server.api_config(10_000)).unwrap());

    let mut form = LoginForm::new();
    form.email.set_text("ops@rivulex.io");
    form.password.set_text("hunter22");
    let payload = form.begin_submit().unwrap();

    let mut handle = SubmissionService::submit(
        &Handle::current(),
        gateway,
        form.endpoint(),
        payload,
        form.confirmation(),
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let result = into_submission_result(settle(&mut handle).await);
    assert!(!result.success);
    assert_eq!(result.message, "request was cancelled, try again.");
}

#[tokio::test]
async fn test_login_screen_submits_on_enter() {
    let server = MockServer::start(Reply::json(200, json!({}))).await;
    let mut config = Config::default();
    config.api = server.api_config(2_000);
    let gateway = Arc::new(RequestGateway::new(&config.api).unwrap());
    let runtime = Handle::current();
    let ctx = ScreenContext::new(&config, &runtime, &gateway);

    let mut screen = LoginScreen::new();
    let press = |screen: &mut LoginScreen, code: KeyCode| {
        screen
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), &ctx)
            .unwrap();
    };
    for c in "ops@rivulex.io".chars() {
        press(&mut screen, KeyCode::Char(c));
    }
    press(&mut screen, KeyCode::Tab);
    for c in "hunter22".chars() {
        press(&mut screen, KeyCode::Char(c));
    }
    press(&mut screen, KeyCode::Enter);
    assert!(screen.form().is_submitting());

    for _ in 0..200 {
        if screen.tick() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let result = screen.form().last_result().unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Signed in successfully with company access!");
    assert!(screen.form().email.is_blank());
    assert_eq!(server.requests()[0].json()["accessType"], "company");
}

#[tokio::test]
async fn test_safety_refresh_replaces_alerts() {
    let server = MockServer::start_with(|request| {
        if request.path.starts_with("/api/safety/") {
            Reply::json(
                200,
                json!({"alerts": [
                    {"id": 3, "category": "general", "message": "Bridge closed", "severity": "medium"}
                ]}),
            )
        } else {
            Reply::json(200, json!({"summary": "Via Lower Town Heights"}))
        }
    })
    .await;
    let mut config = Config::default();
    config.api = server.api_config(2_000);
    let gateway = Arc::new(RequestGateway::new(&config.api).unwrap());
    let runtime = Handle::current();
    let ctx = ScreenContext::new(&config, &runtime, &gateway);

    let mut screen = SafetyRoutingScreen::new(&config.default_location);
    screen
        .handle_event(
            Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            &ctx,
        )
        .unwrap();
    assert!(screen.is_refreshing());

    for _ in 0..200 {
        if screen.tick() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(!screen.is_refreshing());
    assert_eq!(screen.alerts().len(), 1);
    assert_eq!(screen.alerts()[0].message, "Bridge closed");
    assert_eq!(screen.route().unwrap().summary(), "Via Lower Town Heights");
    assert!(screen.refresh_note().is_none());
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_timed_out_login_keeps_fields() {
    let server = MockServer::start(
        Reply::json(200, json!({"message": "too late"})).delayed(Duration::from_secs(2)),
    )
    .await;
    let gateway = Arc::new(RequestGateway::new(&server.api_config(150)).unwrap());

    let mut form = LoginForm::new();
    form.email.set_text("ops@rivulex.io");
    form.password.set_text("hunter22");
    form.remember_me = true;
    let payload = form.begin_submit().unwrap();

    let mut handle = SubmissionService::submit(
        &Handle::current(),
        gateway,
        form.endpoint(),
        payload,
        form.confirmation(),
    );
    form.finish_submit(into_submission_result(settle(&mut handle).await));

    assert!(!form.is_submitting());
    assert_eq!(
        form.last_result(),
        Some(&SubmissionResult::failure(
            "request timed out, check your connection and try again."
        ))
    );
    assert_eq!(form.email.text(), "ops@rivulex.io");
    assert_eq!(form.password.text(), "hunter22");
    assert!(form.remember_me);
}

async fn refresh_until_settled(screen: &mut SafetyRoutingScreen, ctx: &ScreenContext<'_>) {
    screen
        .handle_event(
            Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            ctx,
        )
        .unwrap();
    for _ in 0..200 {
        if screen.tick() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("refresh never settled");
}

#[tokio::test]
async fn test_refresh_skips_unreadable_alerts() {
    let server = MockServer::start_with(|request| {
        if request.path.starts_with("/api/safety/") {
            Reply::json(
                200,
                json!({"alerts": [
                    {"id": 3, "category": "general", "message": "Bridge closed", "severity": "medium"},
                    {"id": 4, "category": "weather", "severity": "low"}
                ]}),
            )
        } else {
            Reply::json(200, json!({"summary": "Via Lower Town Heights"}))
        }
    })
    .await;
    let mut config = Config::default();
    config.api = server.api_config(2_000);
    let gateway = Arc::new(RequestGateway::new(&config.api).unwrap());
    let runtime = Handle::current();
    let ctx = ScreenContext::new(&config, &runtime, &gateway);

    let mut screen = SafetyRoutingScreen::new(&config.default_location);
    refresh_until_settled(&mut screen, &ctx).await;

    assert_eq!(screen.alerts().len(), 1);
    assert_eq!(screen.alerts()[0].message, "Bridge closed");
    assert!(screen.refresh_note().is_none());
}

#[tokio::test]
async fn test_refresh_with_unreadable_safety_data_keeps_alerts() {
    let server = MockServer::start_with(|request| {
        if request.path.starts_with("/api/safety/") {
            Reply::json(200, json!({"alerts": [{"id": 4, "severity": "low"}]}))
        } else {
            Reply::json(200, json!({"summary": "Via Lower Town Heights"}))
        }
    })
    .await;
    let mut config = Config::default();
    config.api = server.api_config(2_000);
    let gateway = Arc::new(RequestGateway::new(&config.api).unwrap());
    let runtime = Handle::current();
    let ctx = ScreenContext::new(&config, &runtime, &gateway);

    let mut screen = SafetyRoutingScreen::new(&config.default_location);
    let before = screen.alerts().to_vec();
    refresh_until_settled(&mut screen, &ctx).await;

    assert_eq!(screen.alerts(), before.as_slice());
    assert_eq!(
        screen.refresh_note(),
        Some("alerts: received an unexpected response, try again.")
    );
    assert_eq!(screen.route().unwrap().summary(), "Via Lower Town Heights");
}
