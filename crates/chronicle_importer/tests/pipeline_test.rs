//! Tests for message delivery.

mod common;

use chronicle_error::ImportErrorKind;
use chronicle_importer::{AttachmentSource, Importer};
use chronicle_state::StateStore;
use common::{ANNOUNCEMENTS, GENERAL, GUILD_ID, LOUNGE_VOICE, MockPlatform, THROTTLE};
use std::path::Path;
use tokio::time::Instant;

async fn importer_with_alice(platform: &MockPlatform, path: &Path) -> Importer<MockPlatform> {
    let mut importer = Importer::init(platform.clone(), GUILD_ID, path, THROTTLE)
        .await
        .unwrap();
    if !importer.has_user("alice#1") {
        importer.add_user("alice#1", "Alice", None).await.unwrap();
    }
    importer
}

#[tokio::test(start_paused = true)]
async fn test_first_post_provisions_persists_sends_and_throttles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &path).await;
    assert!(importer.has_user("alice#1"));

    let start = Instant::now();
    importer.post(GENERAL, "alice#1", "hello world").await.unwrap();
    assert!(start.elapsed() >= THROTTLE);

    let log = platform.log();
    assert_eq!(log.created_proxies.len(), 1);
    let (channel_id, profile) = &log.created_proxies[0];
    assert_eq!(channel_id, GENERAL);
    assert_eq!(profile.name(), "Alice");
    assert_eq!(profile.avatar(), &None);

    assert_eq!(log.sent.len(), 1);
    let (proxy, message) = &log.sent[0];
    assert_eq!(message.content(), "hello world");
    assert!(message.attachments().is_empty());

    let saved = StateStore::load(&path).unwrap();
    assert_eq!(saved.proxy_handle(GENERAL, "alice#1"), Some(proxy.handle.as_str()));
    assert_eq!(
        importer.proxy_handle(GENERAL, "alice#1"),
        Some(proxy.handle.as_str())
    );
}

#[tokio::test(start_paused = true)]
async fn test_repeated_posts_reuse_one_proxy() {
    let dir = tempfile::tempdir().unwrap();
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &dir.path().join("state.json")).await;

    for text in ["one", "two", "three"] {
        importer.post(GENERAL, "alice#1", text).await.unwrap();
    }

    let log = platform.log();
    assert_eq!(log.created_proxies.len(), 1);
    assert!(log.fetched_proxies.is_empty());
    assert_eq!(log.sent.len(), 3);
    let handles: Vec<_> = log.sent.iter().map(|(p, _)| p.handle.clone()).collect();
    assert!(handles.iter().all(|h| h == &handles[0]));
}

#[tokio::test(start_paused = true)]
async fn test_each_channel_gets_its_own_proxy() {
    let dir = tempfile::tempdir().unwrap();
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &dir.path().join("state.json")).await;
    let other = importer.find_or_create_channel_named("archive").await.unwrap();

    importer.post(GENERAL, "alice#1", "here").await.unwrap();
    importer.post(&other, "alice#1", "there").await.unwrap();

    let log = platform.log();
    assert_eq!(log.created_proxies.len(), 2);
    assert_ne!(log.sent[0].0.handle, log.sent[1].0.handle);
    assert_eq!(log.sent[1].0.channel_id, other);
    assert_eq!(importer.store().state().proxy_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_author_is_rejected_without_sending() {
    let dir = tempfile::tempdir().unwrap();
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &dir.path().join("state.json")).await;

    let err = importer.post(GENERAL, "ghost", "hi").await.unwrap_err();

    assert_eq!(
        err.import_kind(),
        Some(&ImportErrorKind::UnknownAuthor("ghost".to_string()))
    );
    assert_eq!(platform.log().remote_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_channel_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &dir.path().join("state.json")).await;

    let err = importer.post("general", "alice#1", "hi").await.unwrap_err();

    assert_eq!(
        err.import_kind(),
        Some(&ImportErrorKind::UnknownChannel("general".to_string()))
    );
    assert_eq!(platform.log().remote_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_non_text_channels_are_rejected_with_their_kind() {
    let dir = tempfile::tempdir().unwrap();
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &dir.path().join("state.json")).await;

    for (channel_id, kind) in [(LOUNGE_VOICE, "voice"), (ANNOUNCEMENTS, "announcement")] {
        let err = importer.post(channel_id, "alice#1", "hi").await.unwrap_err();
        assert_eq!(
            err.import_kind(),
            Some(&ImportErrorKind::WrongChannelKind {
                channel_id: channel_id.to_string(),
                kind: kind.to_string(),
            })
        );
    }
    assert_eq!(platform.log().remote_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_restart_fetches_persisted_proxy_instead_of_creating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let platform = MockPlatform::new();

    let mut first = importer_with_alice(&platform, &path).await;
    first.post(GENERAL, "alice#1", "before restart").await.unwrap();
    drop(first);

    let mut second = importer_with_alice(&platform, &path).await;
    second.post(GENERAL, "alice#1", "after restart").await.unwrap();
    second.post(GENERAL, "alice#1", "again").await.unwrap();

    let log = platform.log();
    assert_eq!(log.created_proxies.len(), 1);
    assert_eq!(log.fetched_proxies.len(), 1);
    assert_eq!(log.sent.len(), 3);
    assert_eq!(log.fetched_proxies[0], log.sent[0].0.handle);
}

#[tokio::test(start_paused = true)]
async fn test_send_failure_propagates_and_keeps_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &path).await;
    platform.fail_sends();

    let start = Instant::now();
    let err = importer.post(GENERAL, "alice#1", "lost").await.unwrap_err();

    assert_eq!(
        err.import_kind(),
        Some(&ImportErrorKind::Transport("503 Service Unavailable".to_string()))
    );
    assert!(start.elapsed() < THROTTLE);
    assert!(platform.log().sent.is_empty());

    let saved = StateStore::load(&path).unwrap();
    assert!(saved.proxy_handle(GENERAL, "alice#1").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_missing_remote_proxy_is_a_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let platform = MockPlatform::new();

    let mut first = importer_with_alice(&platform, &path).await;
    first.post(GENERAL, "alice#1", "first").await.unwrap();
    drop(first);
    platform.forget_proxies();

    let mut second = importer_with_alice(&platform, &path).await;
    let err = second.post(GENERAL, "alice#1", "second").await.unwrap_err();

    assert_eq!(
        err.import_kind(),
        Some(&ImportErrorKind::Transport("Unknown Webhook".to_string()))
    );
    assert_eq!(platform.log().created_proxies.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_attachments_are_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let platform = MockPlatform::new();
    let mut importer = importer_with_alice(&platform, &dir.path().join("state.json")).await;

    importer
        .post_with_attachments(
            GENERAL,
            "alice#1",
            "see attached",
            vec![
                AttachmentSource::from("logs/photo.png"),
                AttachmentSource::from("https://cdn.test/clip.gif"),
            ],
        )
        .await
        .unwrap();

    let log = platform.log();
    let (_, message) = &log.sent[0];
    assert_eq!(message.attachments().len(), 2);
    assert!(matches!(
        message.attachments()[1],
        AttachmentSource::Url(ref url) if url == "https://cdn.test/clip.gif"
    ));
}
