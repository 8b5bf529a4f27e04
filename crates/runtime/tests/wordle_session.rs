use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use quiz_core::{
    MultiChoiceQuestion, QuestionDifficulty, SessionStatus, UserProfile, WordleInput,
    WordleOutcome, WordleQuizType, XpConfig,
};
use quiz_runtime::{
    ContentError, ContentSource, Event, GameKind, GameResult, GameResultRepository,
    InMemoryProfileRepo, JobEvent, RepositoryError, RewardEvent, Runtime, RuntimeError,
    SessionEnd, SessionEvent, SessionSettings, StaticContentSource, Topic, WordleRequest,
};

/// Counts word fetches so tests can tell whether the fetch path ran.
struct CountingContent {
    inner: StaticContentSource,
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl ContentSource for CountingContent {
    async fn fetch_target_word(
        &self,
        quiz_type: WordleQuizType,
        day: Option<&str>,
    ) -> Result<String, ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_target_word(quiz_type, day).await
    }

    async fn fetch_random_questions(
        &self,
        amount: usize,
        category: Option<u32>,
        difficulty: Option<QuestionDifficulty>,
    ) -> Result<Vec<MultiChoiceQuestion>, ContentError> {
        self.inner
            .fetch_random_questions(amount, category, difficulty)
            .await
    }
}

/// Fails the first word fetch, then serves from `inner`.
struct FailsOnceContent {
    inner: StaticContentSource,
    fetches: AtomicUsize,
}

#[async_trait]
impl ContentSource for FailsOnceContent {
    async fn fetch_target_word(
        &self,
        quiz_type: WordleQuizType,
        day: Option<&str>,
    ) -> Result<String, ContentError> {
        if self.fetches.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(ContentError::Unavailable("connection reset".into()));
        }
        self.inner.fetch_target_word(quiz_type, day).await
    }

    async fn fetch_random_questions(
        &self,
        amount: usize,
        category: Option<u32>,
        difficulty: Option<QuestionDifficulty>,
    ) -> Result<Vec<MultiChoiceQuestion>, ContentError> {
        self.inner
            .fetch_random_questions(amount, category, difficulty)
            .await
    }
}

fn words() -> StaticContentSource {
    StaticContentSource::new().with_words(WordleQuizType::Text, ["CRANE"])
}

async fn runtime_with_profile(settings: SessionSettings) -> Runtime {
    let profile = UserProfile::new("local", &XpConfig::default());
    Runtime::builder()
        .content(words())
        .settings(settings)
        .profiles(Arc::new(InMemoryProfileRepo::with_profile(profile)))
        .build()
        .await
        .expect("runtime should build")
}

async fn next_session_event(rx: &mut broadcast::Receiver<Event>) -> SessionEvent {
    loop {
        match rx.recv().await.expect("event bus should stay open") {
            Event::Session(event) => return event,
            _ => continue,
        }
    }
}

async fn wait_started(rx: &mut broadcast::Receiver<Event>) {
    loop {
        if let SessionEvent::Started { .. } = next_session_event(rx).await {
            return;
        }
    }
}

fn wordle_results(runtime: &Runtime) -> Vec<quiz_runtime::WordleResult> {
    runtime
        .results()
        .expect("results should load")
        .into_iter()
        .filter_map(|result| match result {
            GameResult::Wordle(result) => Some(result),
            GameResult::MultiChoice(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn winning_game_awards_xp_on_close() {
    let runtime = runtime_with_profile(SessionSettings::default()).await;
    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));

    handle.enter_word("SLOTH").await.expect("keys accepted");
    let outcome = handle.verify().await.expect("row verified");
    assert!(matches!(
        outcome,
        WordleOutcome::RowVerified {
            row: 0,
            status: SessionStatus::InProgress,
            ..
        }
    ));

    handle.enter_word("crane").await.expect("keys accepted");
    let outcome = handle.verify().await.expect("row verified");
    assert!(outcome.finished_session());

    // Nothing is recorded before the session is closed.
    runtime.flush_jobs().await.expect("flush");
    assert!(wordle_results(&runtime).is_empty());

    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    let results = wordle_results(&runtime);
    assert_eq!(results.len(), 1);
    assert!(results[0].solved);
    assert_eq!(results[0].rows_used, 2);
    assert_eq!(results[0].max_rows, 6);
    assert_eq!(results[0].earned_xp, 50);

    let profile = runtime.profile().expect("profile").expect("profile exists");
    assert_eq!(profile.total_xp, 50);

    assert!(matches!(
        handle.snapshot().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn rejected_rows_leave_the_session_unchanged() {
    let runtime = runtime_with_profile(SessionSettings::default()).await;
    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));

    handle.enter_word("CRA").await.expect("keys accepted");
    let err = handle.verify().await.expect_err("row is incomplete");
    assert!(matches!(err, RuntimeError::Wordle(_)));

    let snapshot = handle.snapshot().await.expect("snapshot");
    let session = snapshot.session.expect("session loaded");
    assert_eq!(session.current_row, 0);
    assert_eq!(snapshot.error_code.as_deref(), Some("WORDLE_MALFORMED_ROW"));

    // The next accepted transition clears the status.
    handle.remove_key(2).await.expect("key removed");
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(snapshot.error.is_none());

    handle.close().await.expect("close");
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn hard_mode_requires_previous_hints() {
    let settings = SessionSettings {
        hard_mode: true,
        ..SessionSettings::default()
    };
    let runtime = runtime_with_profile(settings).await;
    let handle = runtime.start_wordle(WordleRequest::restored("ALLOY", WordleQuizType::Text));

    handle.enter_word("LOLLY").await.expect("keys accepted");
    handle.verify().await.expect("first row verified");

    handle.enter_word("CRANE").await.expect("keys accepted");
    let err = handle.verify().await.expect_err("hints missing");
    assert_eq!(
        err.rule_severity(),
        Some(quiz_core::ErrorSeverity::Recoverable)
    );
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(
        snapshot.error_code.as_deref(),
        Some("WORDLE_MISSING_REQUIRED_HINTS")
    );

    handle.close().await.expect("close");
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn reward_rows_count_towards_the_result() {
    let runtime = runtime_with_profile(SessionSettings::default()).await;
    let handle = runtime.start_wordle(
        WordleRequest::restored("CRANE", WordleQuizType::Text).with_row_limit(1),
    );

    handle.enter_word("SLOTH").await.expect("keys accepted");
    let outcome = handle.verify().await.expect("row verified");
    assert!(matches!(
        outcome,
        WordleOutcome::RowVerified {
            status: SessionStatus::Lost,
            ..
        }
    ));

    let outcome = handle.grant_reward_rows(1).await.expect("rows granted");
    assert_eq!(outcome, WordleOutcome::RowsGranted { row_limit: 2 });

    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    let results = wordle_results(&runtime);
    assert_eq!(results.len(), 1);
    assert!(results[0].solved);
    assert_eq!(results[0].max_rows, 2);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn restored_word_skips_the_fetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let runtime = Runtime::builder()
        .content(CountingContent {
            inner: words(),
            fetches: Arc::clone(&fetches),
        })
        .build()
        .await
        .expect("runtime should build");
    let mut events = runtime.subscribe(Topic::Session);

    let handle = runtime.start_wordle(WordleRequest::restored("SLOTH", WordleQuizType::Text));
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.session.expect("session loaded").word.to_string(),
        "SLOTH"
    );
    assert_eq!(fetches.load(Ordering::SeqCst), 0);

    // Play-again always goes through the content source.
    wait_started(&mut events).await;
    handle.play_again().await.expect("play again");
    wait_started(&mut events).await;

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(snapshot.generation, 2);
    assert_eq!(
        snapshot.session.expect("session loaded").word.to_string(),
        "CRANE"
    );

    // The replaced game was handed off as abandoned.
    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");
    let results = wordle_results(&runtime);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|result| !result.solved));
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn fetch_failure_can_be_retried_with_play_again() {
    let runtime = Runtime::builder()
        .content(FailsOnceContent {
            inner: words(),
            fetches: AtomicUsize::new(0),
        })
        .build()
        .await
        .expect("runtime should build");
    let mut events = runtime.subscribe(Topic::Session);

    let handle = runtime.start_wordle(WordleRequest::random(WordleQuizType::Text));
    loop {
        if let SessionEvent::FetchFailed { kind, .. } = next_session_event(&mut events).await {
            assert_eq!(kind, GameKind::Wordle);
            break;
        }
    }

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(!snapshot.loading);
    assert!(snapshot.session.is_none());
    assert_eq!(snapshot.error_code.as_deref(), Some("CONTENT_UNAVAILABLE"));
    assert!(matches!(
        handle.enter_key('C').await,
        Err(RuntimeError::SessionNotReady)
    ));

    handle.play_again().await.expect("retry");
    wait_started(&mut events).await;

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(snapshot.error.is_none());
    assert!(snapshot.error_code.is_none());
    assert_eq!(
        snapshot.session.expect("session loaded").word.to_string(),
        "CRANE"
    );
    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");

    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");
    let results = wordle_results(&runtime);
    assert_eq!(results.len(), 1);
    assert!(results[0].solved);
    runtime.shutdown().await.expect("shutdown");
}

/// Result sink whose storage is gone.
struct BrokenResults;

impl GameResultRepository for BrokenResults {
    fn record(&self, _result: &GameResult) -> quiz_runtime::repository::Result<()> {
        Err(RepositoryError::Io(std::io::Error::other("disk full")))
    }

    fn list(&self) -> quiz_runtime::repository::Result<Vec<GameResult>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn failed_record_leaves_the_profile_untouched() {
    let profile = UserProfile::new("local", &XpConfig::default());
    let runtime = Runtime::builder()
        .content(words())
        .results(Arc::new(BrokenResults))
        .profiles(Arc::new(InMemoryProfileRepo::with_profile(profile.clone())))
        .build()
        .await
        .expect("runtime should build");
    let mut jobs = runtime.subscribe(Topic::Job);

    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));
    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    match jobs.recv().await.expect("job event") {
        Event::Job(JobEvent::Failed { job, .. }) => assert_eq!(job, "record_result"),
        other => panic!("expected job failure, got {other:?}"),
    }
    let stored = runtime.profile().expect("profile").expect("profile exists");
    assert_eq!(stored.total_xp, profile.total_xp);
    assert_eq!(stored.diamonds, profile.diamonds);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn missing_profile_records_unscored_result() {
    let runtime = Runtime::builder()
        .content(words())
        .build()
        .await
        .expect("runtime should build");
    let mut rewards = runtime.subscribe(Topic::Reward);

    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));
    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    match rewards.recv().await.expect("reward event") {
        Event::Reward(RewardEvent::Unscored { .. }) => {}
        other => panic!("expected unscored event, got {other:?}"),
    }

    let results = wordle_results(&runtime);
    assert_eq!(results.len(), 1);
    assert!(results[0].solved);
    assert_eq!(results[0].earned_xp, 0);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn dropping_every_handle_records_an_abandoned_game() {
    let runtime = runtime_with_profile(SessionSettings::default()).await;
    let mut events = runtime.subscribe(Topic::Session);

    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));
    let clone = handle.clone();
    clone.enter_word("SLO").await.expect("keys accepted");
    drop(handle);
    drop(clone);

    loop {
        if let SessionEvent::Ended { end, .. } = next_session_event(&mut events).await {
            assert_eq!(end, SessionEnd::Abandoned);
            break;
        }
    }

    let mut results = Vec::new();
    for _ in 0..50 {
        runtime.flush_jobs().await.expect("flush");
        results = wordle_results(&runtime);
        if !results.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(results.len(), 1);
    assert!(!results[0].solved);
    assert_eq!(results[0].earned_xp, 0);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn countdown_submits_the_current_row() {
    let settings = SessionSettings {
        word_countdown_ms: Some(10_000),
        ..SessionSettings::default()
    };
    let runtime = runtime_with_profile(settings).await;
    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));

    handle.enter_word("SLOTH").await.expect("keys accepted");
    tokio::time::sleep(Duration::from_millis(10_500)).await;

    let snapshot = handle.snapshot().await.expect("snapshot");
    let session = snapshot.session.expect("session loaded");
    assert_eq!(session.current_row, 1, "expiry verified the full row");
    assert!(snapshot.remaining_ms.is_some());

    // An empty row is rejected on expiry and the countdown starts over.
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.session.expect("session loaded").current_row, 1);
    assert_eq!(snapshot.error_code.as_deref(), Some("WORDLE_MALFORMED_ROW"));
    assert!(snapshot.remaining_ms.is_some());

    handle.close().await.expect("close");
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn manual_submit_wins_the_timer_race() {
    let settings = SessionSettings {
        word_countdown_ms: Some(10_000),
        ..SessionSettings::default()
    };
    let runtime = runtime_with_profile(settings).await;
    let handle = runtime.start_wordle(WordleRequest::restored("CRANE", WordleQuizType::Text));

    handle.enter_word("SLOTH").await.expect("keys accepted");
    handle.verify().await.expect("row verified");

    // A verification tagged with the already verified row is a no-op.
    let outcome = handle
        .send(WordleInput::Verify { row: Some(0) })
        .await
        .expect("stale verify accepted");
    assert_eq!(outcome, WordleOutcome::Ignored);

    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    let before = handle.snapshot().await.expect("snapshot");
    assert!(before.remaining_ms.is_none(), "countdown cancelled on finish");

    tokio::time::sleep(Duration::from_secs(60)).await;
    let after = handle.snapshot().await.expect("snapshot");
    assert_eq!(after.session, before.session);
    assert_eq!(
        after.session.expect("session loaded").status,
        SessionStatus::Won
    );

    handle.close().await.expect("close");
    runtime.shutdown().await.expect("shutdown");
}
