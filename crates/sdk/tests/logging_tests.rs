mod support;

use std::io::Write;
use std::sync::{Arc, Mutex};

use accounting_sdk::blocking::AccountingSessionFactory;
use accounting_sdk::{AccountingConfig, AsyncAccountingSessionFactory, ProjectId, ServiceSubtype};
use support::{FakeAccounting, PROJ_ID};
use tracing::subscriber::DefaultGuard;

const DROP_WARNING: &str = "Session dropped before finish, not sending usage";
const OVERRIDE_INFO: &str = "Overriding previous count value";

/// Log lines written by the thread-local subscriber installed in [`capture`].
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn count(&self, needle: &str) -> usize {
        self.text().matches(needle).count()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Captured, DefaultGuard) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}

fn project() -> ProjectId {
    PROJ_ID.parse().unwrap()
}

fn factory_for(base_url: &str) -> AsyncAccountingSessionFactory {
    AsyncAccountingSessionFactory::new(AccountingConfig::default().with_base_url(base_url))
        .expect("factory")
}

#[tokio::test]
async fn unfinished_session_warns_on_drop() {
    let fake = FakeAccounting::new();
    let factory = factory_for(&fake.spawn());
    let (logs, _guard) = capture();

    let session = factory
        .oneshot_session(ServiceSubtype::MlLlm, project(), 5u64)
        .reserve()
        .await
        .unwrap();
    assert_eq!(logs.count(DROP_WARNING), 0);
    drop(session);

    assert_eq!(logs.count(DROP_WARNING), 1);
    assert!(logs.text().contains("WARN"));
}

#[tokio::test]
async fn finished_session_does_not_warn() {
    let fake = FakeAccounting::new();
    let factory = factory_for(&fake.spawn());
    let (logs, _guard) = capture();

    factory
        .oneshot_session(ServiceSubtype::MlLlm, project(), 5u64)
        .reserve()
        .await
        .unwrap()
        .finish()
        .await
        .unwrap();

    assert_eq!(logs.count(DROP_WARNING), 0);
    assert!(logs.text().contains("Sending usage"));
}

#[tokio::test]
async fn failed_usage_does_not_warn() {
    let fake = FakeAccounting::new();
    fake.reply_to_usage(500, "{}");
    let factory = factory_for(&fake.spawn());
    let (logs, _guard) = capture();

    let session = factory
        .oneshot_session(ServiceSubtype::MlLlm, project(), 5u64)
        .reserve()
        .await
        .unwrap();
    session.finish().await.unwrap_err();

    assert_eq!(logs.count(DROP_WARNING), 0);
}

#[tokio::test]
async fn null_session_does_not_warn_on_drop() {
    let factory =
        AsyncAccountingSessionFactory::new(AccountingConfig::default().with_disabled(true))
            .unwrap();
    let (logs, _guard) = capture();

    let session = factory
        .oneshot_session(ServiceSubtype::MlLlm, project(), 5u64)
        .reserve()
        .await
        .unwrap();
    drop(session);

    assert_eq!(logs.count(DROP_WARNING), 0);
}

#[tokio::test]
async fn changing_the_count_is_logged_once_per_change() {
    let fake = FakeAccounting::new();
    let factory = factory_for(&fake.spawn());
    let (logs, _guard) = capture();

    let mut pending = factory.oneshot_session(ServiceSubtype::MlRag, project(), 10u64);
    pending.set_count(10u64);
    assert_eq!(logs.count(OVERRIDE_INFO), 0);
    pending.set_count(12u64);
    assert_eq!(logs.count(OVERRIDE_INFO), 1);

    let mut session = pending.reserve().await.unwrap();
    session.set_count(12u64);
    assert_eq!(logs.count(OVERRIDE_INFO), 1);
    session.set_count(8u64);
    assert_eq!(logs.count(OVERRIDE_INFO), 2);
    session.finish().await.unwrap();

    let text = logs.text();
    assert!(text.contains("previous=12"));
    assert!(text.contains("new=8"));
}

#[test]
fn blocking_session_warns_only_when_left_unfinished() {
    let fake = FakeAccounting::new();
    let factory =
        AccountingSessionFactory::new(AccountingConfig::default().with_base_url(fake.spawn()))
            .unwrap();
    let (logs, _guard) = capture();

    let finished = factory
        .oneshot_session(ServiceSubtype::Notebook, project(), 1u64)
        .reserve()
        .unwrap();
    finished.finish().unwrap();
    assert_eq!(logs.count(DROP_WARNING), 0);

    let abandoned = factory
        .oneshot_session(ServiceSubtype::Notebook, project(), 1u64)
        .reserve()
        .unwrap();
    drop(abandoned);
    assert_eq!(logs.count(DROP_WARNING), 1);
}
