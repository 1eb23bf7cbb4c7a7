use async_trait::async_trait;
use clap::Parser;
use mockall::mock;

use ytt::{
    app, CaptionSegment, Cli, Config, Result, TrackDescriptor, TrackKind, TranscriptError,
    TranscriptProvider, VideoId,
};

mock! {
    pub Provider {}

    #[async_trait]
    impl TranscriptProvider for Provider {
        async fn list_tracks(&self, video: &VideoId) -> Result<Vec<TrackDescriptor>>;
        async fn fetch_segments(&self, track: &TrackDescriptor) -> Result<Vec<CaptionSegment>>;
        fn name(&self) -> &'static str;
    }
}

const VIDEO: &str = "dQw4w9WgXcQ";

fn track(language: &str, kind: TrackKind) -> TrackDescriptor {
    TrackDescriptor {
        language: language.to_string(),
        name: format!("{} captions", language),
        kind,
        url: format!("https://www.youtube.com/api/timedtext?v={}&lang={}", VIDEO, language),
    }
}

fn provider_with(tracks: Vec<TrackDescriptor>) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("mock");
    provider
        .expect_list_tracks()
        .withf(|video| video.as_str() == VIDEO)
        .times(1)
        .returning(move |_| Ok(tracks.clone()));
    provider
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("ytt").chain(args.iter().copied())).unwrap()
}

async fn run(args: &[&str], provider: &MockProvider) -> (Result<()>, String) {
    let mut stdout = Vec::new();
    let result = app::run(&cli(args), &Config::default(), provider, &mut stdout).await;
    (result, String::from_utf8(stdout).unwrap())
}

#[tokio::test]
async fn test_german_transcript_to_stdout() {
    let mut provider = provider_with(vec![
        track("en", TrackKind::Manual),
        track("de", TrackKind::Manual),
    ]);
    provider
        .expect_fetch_segments()
        .withf(|track| track.language == "de")
        .times(1)
        .returning(|_| {
            Ok(vec![
                CaptionSegment::untimed("Guten"),
                CaptionSegment::untimed("Tag"),
            ])
        });

    let args = ["-q", "-l", "de", "https://youtu.be/dQw4w9WgXcQ"];
    let (result, stdout) = run(&args, &provider).await;

    assert!(result.is_ok());
    assert_eq!(stdout, "Guten Tag\n");
}

#[tokio::test]
async fn test_falls_back_to_english() {
    let mut provider = provider_with(vec![
        track("ja", TrackKind::Manual),
        track("en", TrackKind::Generated),
    ]);
    provider
        .expect_fetch_segments()
        .withf(|track| track.language == "en" && track.kind == TrackKind::Generated)
        .times(1)
        .returning(|_| Ok(vec![CaptionSegment::untimed("hello   there")]));

    let (result, stdout) = run(&["-q", "--lang", "xx", VIDEO], &provider).await;

    assert!(result.is_ok());
    assert_eq!(stdout, "hello there\n");
}

#[tokio::test]
async fn test_falls_back_to_first_listed_track() {
    let mut provider = provider_with(vec![
        track("ja", TrackKind::Manual),
        track("ko", TrackKind::Manual),
    ]);
    provider
        .expect_fetch_segments()
        .withf(|track| track.language == "ja")
        .times(1)
        .returning(|_| Ok(vec![CaptionSegment::untimed("こんにちは")]));

    let (result, stdout) = run(&["-q", "-l", "xx", VIDEO], &provider).await;

    assert!(result.is_ok());
    assert_eq!(stdout, "こんにちは\n");
}

#[tokio::test]
async fn test_no_tracks_writes_nothing() {
    let mut provider = provider_with(vec![]);
    provider.expect_fetch_segments().never();

    let (result, stdout) = run(&["-q", VIDEO], &provider).await;

    let err = result.unwrap_err();
    assert_eq!(app::exit_code(&err), app::EXIT_NO_TRANSCRIPT);
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn test_invalid_reference_never_calls_provider() {
    let mut provider = MockProvider::new();
    provider.expect_list_tracks().never();
    provider.expect_fetch_segments().never();

    let (result, stdout) = run(&["-q", "not a url or id"], &provider).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TranscriptError>(),
        Some(TranscriptError::InvalidReference(input)) if input == "not a url or id"
    ));
    assert_eq!(app::exit_code(&err), app::EXIT_INVALID_REFERENCE);
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn test_retrieval_error_propagates() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("mock");
    provider.expect_list_tracks().returning(|_| {
        Err(TranscriptError::Retrieval("ERROR: Video unavailable".to_string()).into())
    });

    let (result, stdout) = run(&["-q", VIDEO], &provider).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Video unavailable"));
    assert_eq!(app::exit_code(&err), 1);
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_leaves_output_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transcript.txt");

    let mut provider = provider_with(vec![track("en", TrackKind::Manual)]);
    provider
        .expect_fetch_segments()
        .returning(|_| Err(TranscriptError::Retrieval("HTTP 429".to_string()).into()));

    let (result, _) = run(&["-q", "-o", path.to_str().unwrap(), VIDEO], &provider).await;

    assert!(result.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transcript.txt");

    let mut provider = provider_with(vec![track("en", TrackKind::Manual)]);
    provider
        .expect_fetch_segments()
        .withf(|t| t.language == "en" && t.kind == TrackKind::Manual)
        .returning(|_| {
            Ok(vec![
                CaptionSegment::untimed(" Never gonna "),
                CaptionSegment::untimed("give you up"),
            ])
        });

    let (result, stdout) = run(&["-q", "-o", path.to_str().unwrap(), VIDEO], &provider).await;

    assert!(result.is_ok());
    assert!(stdout.is_empty());
    assert_eq!(fs_err::read_to_string(&path).unwrap(), "Never gonna give you up\n");
}

#[tokio::test]
async fn test_protected_output_path_rejected_before_fetch() {
    let mut provider = MockProvider::new();
    provider.expect_list_tracks().never();

    let (result, _) = run(&["-q", "-o", "/etc/transcript.txt", VIDEO], &provider).await;

    let err = result.unwrap_err();
    assert_eq!(app::exit_code(&err), app::EXIT_OUTPUT);
}

#[tokio::test]
async fn test_list_languages() {
    let mut provider = provider_with(vec![
        track("de", TrackKind::Manual),
        track("en", TrackKind::Generated),
    ]);
    provider.expect_fetch_segments().never();

    let (result, stdout) = run(&["-q", "--list-languages", VIDEO], &provider).await;

    assert!(result.is_ok());
    assert_eq!(stdout, "de\tde captions\tmanual\nen\ten captions\tgenerated\n");
}

#[tokio::test]
async fn test_list_languages_without_tracks() {
    let mut provider = provider_with(vec![]);
    provider.expect_fetch_segments().never();

    let (result, stdout) = run(&["-q", "--list-languages", VIDEO], &provider).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TranscriptError>(),
        Some(TranscriptError::NoTranscriptAvailable(msg)) if msg.contains(VIDEO)
    ));
    assert_eq!(app::exit_code(&err), app::EXIT_NO_TRANSCRIPT);
    assert!(stdout.is_empty());
}
