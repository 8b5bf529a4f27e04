use std::sync::{Arc, Mutex};

use quiz_core::{
    MazeItem, MazeItemId, MazeTrack, MultiChoiceQuestion, UserProfile, WordleQuizType, XpConfig,
};
use quiz_runtime::{
    Event, GameResult, GameResultRepository, InMemoryMazeRepo, InMemoryProfileRepo, MazeEvent,
    MazeRepository, RepositoryError, Runtime, RuntimeError, SessionHandle, SessionSettings,
    StaticContentSource, Topic,
};

/// Result sink that notes, for each recorded result, whether its maze item
/// was already marked played at that moment.
struct OrderCheckingResults {
    maze: Arc<InMemoryMazeRepo>,
    seen: Mutex<Vec<(GameResult, bool)>>,
}

impl GameResultRepository for OrderCheckingResults {
    fn record(&self, result: &GameResult) -> quiz_runtime::repository::Result<()> {
        let played = match result.maze_item_id() {
            Some(id) => {
                let track = self.maze.load_track()?;
                track
                    .position(id)
                    .is_some_and(|index| track.is_played(index))
            }
            None => false,
        };
        self.seen
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push((result.clone(), played));
        Ok(())
    }

    fn list(&self) -> quiz_runtime::repository::Result<Vec<GameResult>> {
        let seen = self.seen.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(seen.iter().map(|(result, _)| result.clone()).collect())
    }
}

fn question() -> MultiChoiceQuestion {
    MultiChoiceQuestion::new(
        7,
        "Which planet is known as the red planet?",
        vec!["Venus".into(), "Mars".into(), "Jupiter".into()],
        1,
    )
    .expect("valid question")
}

struct Fixture {
    runtime: Runtime,
    results: Arc<OrderCheckingResults>,
    ids: Vec<MazeItemId>,
}

async fn fixture() -> Fixture {
    let track = MazeTrack::from_items(vec![
        MazeItem::wordle("CRANE", WordleQuizType::Text),
        MazeItem::wordle("SLOTH", WordleQuizType::Text),
        MazeItem::multi_choice(question()),
    ])
    .expect("valid track");
    let ids = track.items().iter().map(|item| item.id).collect();

    let maze = Arc::new(InMemoryMazeRepo::new(track));
    let results = Arc::new(OrderCheckingResults {
        maze: Arc::clone(&maze),
        seen: Mutex::new(Vec::new()),
    });
    let profile = UserProfile::new("local", &XpConfig::default());

    let runtime = Runtime::builder()
        .content(StaticContentSource::new().with_words(WordleQuizType::Text, ["ZEBRA"]))
        .settings(SessionSettings {
            row_limit: Some(2),
            ..SessionSettings::default()
        })
        .results(results.clone())
        .profiles(Arc::new(InMemoryProfileRepo::with_profile(profile)))
        .maze(maze)
        .build()
        .await
        .expect("runtime should build");

    Fixture {
        runtime,
        results,
        ids,
    }
}

#[tokio::test]
async fn winning_unlocks_before_the_result_is_recorded() {
    let Fixture {
        runtime,
        results,
        ids,
    } = fixture().await;
    let mut maze_events = runtime.subscribe(Topic::Maze);

    assert!(matches!(
        runtime.start_maze_item(ids[1]),
        Err(RuntimeError::MazeItemLocked(id)) if id == ids[1]
    ));

    let SessionHandle::Wordle(handle) = runtime.start_maze_item(ids[0]).expect("first item open")
    else {
        panic!("first item is a word-guess item");
    };
    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    match maze_events.recv().await.expect("maze event") {
        Event::Maze(MazeEvent::ItemPlayed { id, newly_played }) => {
            assert_eq!(id, ids[0]);
            assert!(newly_played);
        }
        other => panic!("expected maze event, got {other:?}"),
    }

    let seen = results.seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    assert!(seen[0].1, "maze item was played before the result was recorded");
    drop(seen);

    let track = runtime.maze_track().expect("track");
    assert_eq!(track.next_playable(), Some(1));
    assert!(runtime.start_maze_item(ids[1]).is_ok());
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn losing_keeps_the_next_item_locked() {
    let Fixture {
        runtime,
        results,
        ids,
    } = fixture().await;

    let SessionHandle::Wordle(first) = runtime.start_maze_item(ids[0]).expect("first item open")
    else {
        panic!("first item is a word-guess item");
    };
    first.enter_word("CRANE").await.expect("keys accepted");
    first.verify().await.expect("row verified");
    first.close().await.expect("close");

    let SessionHandle::Wordle(second) = runtime.start_maze_item(ids[1]).expect("second item open")
    else {
        panic!("second item is a word-guess item");
    };
    for guess in ["CRANE", "ALLOY"] {
        second.enter_word(guess).await.expect("keys accepted");
        second.verify().await.expect("row verified");
    }
    second.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    let track = runtime.maze_track().expect("track");
    assert_eq!(track.played_count(), 1);
    assert_eq!(track.next_playable(), Some(1));
    assert!(matches!(
        runtime.start_maze_item(ids[2]),
        Err(RuntimeError::MazeItemLocked(_))
    ));

    let seen = results.seen.lock().expect("lock");
    assert_eq!(seen.len(), 2);
    match &seen[1].0 {
        GameResult::Wordle(result) => {
            assert!(!result.solved);
            assert_eq!(result.maze_item_id, Some(ids[1]));
        }
        other => panic!("expected word-guess result, got {other:?}"),
    }
    assert!(!seen[1].1);
    drop(seen);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn play_again_on_a_maze_item_replays_the_item_word() {
    let Fixture {
        runtime,
        results,
        ids,
    } = fixture().await;

    let SessionHandle::Wordle(handle) = runtime.start_maze_item(ids[0]).expect("first item open")
    else {
        panic!("first item is a word-guess item");
    };
    for guess in ["ALLOY", "SLOTH"] {
        handle.enter_word(guess).await.expect("keys accepted");
        handle.verify().await.expect("row verified");
    }
    handle.play_again().await.expect("play again");

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(!snapshot.loading, "maze replay must not fetch a random word");
    let session = snapshot.session.expect("replay started");
    assert_eq!(session.word.to_string(), "CRANE");
    assert_eq!(session.maze_item_id, Some(ids[0]));

    // The content word does not solve the maze item.
    handle.enter_word("ZEBRA").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    runtime.flush_jobs().await.expect("flush");
    let track = runtime.maze_track().expect("track");
    assert!(!track.is_played(0));
    assert_eq!(track.next_playable(), Some(0));

    handle.enter_word("CRANE").await.expect("keys accepted");
    handle.verify().await.expect("row verified");
    handle.close().await.expect("close");
    runtime.flush_jobs().await.expect("flush");

    let track = runtime.maze_track().expect("track");
    assert!(track.is_played(0));
    assert_eq!(track.next_playable(), Some(1));
    let seen = results.seen.lock().expect("lock");
    assert_eq!(seen.len(), 2);
    assert!(!seen[0].1, "the lost first attempt unlocks nothing");
    assert!(seen[1].1);
    assert_eq!(seen[1].0.maze_item_id(), Some(ids[0]));
    drop(seen);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn multi_choice_item_unlocks_when_all_answers_are_correct() {
    let Fixture { runtime, ids, .. } = fixture().await;

    for (id, word) in [(ids[0], "CRANE"), (ids[1], "SLOTH")] {
        let SessionHandle::Wordle(handle) = runtime.start_maze_item(id).expect("item open") else {
            panic!("word-guess item expected");
        };
        handle.enter_word(word).await.expect("keys accepted");
        handle.verify().await.expect("row verified");
        handle.close().await.expect("close");
    }
    runtime.flush_jobs().await.expect("flush");

    let SessionHandle::MultiChoice(handle) =
        runtime.start_maze_item(ids[2]).expect("third item open")
    else {
        panic!("third item is a multi-choice item");
    };
    handle.answer(1).await.expect("answered");
    runtime.flush_jobs().await.expect("flush");

    let track = runtime.maze_track().expect("track");
    assert_eq!(track.played_count(), 3);
    assert_eq!(track.next_playable(), None);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn appended_items_do_not_change_existing_progress() {
    let Fixture { runtime, ids, .. } = fixture().await;

    let new_ids = runtime
        .append_maze_items(vec![MazeItem::wordle("PIGMY", WordleQuizType::Text)])
        .expect("append");
    assert_eq!(new_ids.len(), 1);
    assert!(!ids.contains(&new_ids[0]));

    let track = runtime.maze_track().expect("track");
    assert_eq!(track.len(), 4);
    assert_eq!(track.next_playable(), Some(0));
    runtime.shutdown().await.expect("shutdown");
}
