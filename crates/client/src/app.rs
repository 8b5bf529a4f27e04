//! Line-based terminal front end.
//!
//! Reads commands from stdin, forwards them to session handles and prints
//! snapshots. All game rules live in the runtime.
use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use quiz_core::{
    MultiChoiceStep, SessionStatus, WordleItem, WordleQuizType, WordleRow, XpConfig,
};
use quiz_runtime::{
    MultiChoiceHandle, MultiChoiceRequest, MultiChoiceSnapshot, Runtime, RuntimeError,
    SessionHandle, WordleHandle, WordleRequest, WordleSnapshot,
};

const HELP: &str = "\
commands:
  w | n | m   word, number or math-formula guessing
  q           multiple-choice quiz
  z           next maze item
  p           profile
  x           exit";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

const WORDLE_HELP: &str = "type a guess and press enter; :again new word, :reward extra row after a loss, :quit back";

pub struct TerminalApp {
    runtime: Runtime,
    lines: Lines<BufReader<Stdin>>,
    xp_config: XpConfig,
}

impl TerminalApp {
    pub fn new(runtime: Runtime) -> Self {
        let xp_config = runtime.config().game_config.xp.clone();
        Self {
            runtime,
            lines: BufReader::new(tokio::io::stdin()).lines(),
            xp_config,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("NewQuiz\n{HELP}");

        while let Some(line) = self.prompt("> ").await? {
            match line.as_str() {
                "w" => self.play_wordle(WordleQuizType::Text).await?,
                "n" => self.play_wordle(WordleQuizType::Number).await?,
                "m" => self.play_wordle(WordleQuizType::MathFormula).await?,
                "q" => {
                    let handle = self.runtime.start_multi_choice(MultiChoiceRequest::random());
                    self.drive_multi_choice(handle).await?;
                }
                "z" => self.play_maze().await?,
                "p" => self.print_profile()?,
                "x" => break,
                "" => {}
                _ => println!("{HELP}"),
            }
        }

        self.runtime.flush_jobs().await?;
        self.runtime.shutdown().await?;
        Ok(())
    }

    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::Write::flush(&mut std::io::stdout())?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }

    async fn play_wordle(&mut self, quiz_type: WordleQuizType) -> Result<()> {
        let handle = self.runtime.start_wordle(WordleRequest::random(quiz_type));
        self.drive_wordle(handle).await
    }

    async fn play_maze(&mut self) -> Result<()> {
        let track = self.runtime.maze_track()?;
        let Some(index) = track.next_playable() else {
            println!("maze complete ({} items)", track.len());
            return Ok(());
        };
        let id = track.items()[index].id;
        println!("maze item {} of {}", index + 1, track.len());

        match self.runtime.start_maze_item(id)? {
            SessionHandle::Wordle(handle) => self.drive_wordle(handle).await?,
            SessionHandle::MultiChoice(handle) => self.drive_multi_choice(handle).await?,
        }
        self.runtime.flush_jobs().await?;
        Ok(())
    }

    async fn drive_wordle(&mut self, handle: WordleHandle) -> Result<()> {
        println!("{WORDLE_HELP}");
        print_wordle(&wait_for_word(&handle).await?);

        while let Some(line) = self.prompt("guess> ").await? {
            match line.as_str() {
                ":quit" => break,
                ":again" => {
                    handle.play_again().await?;
                    self.runtime.flush_jobs().await?;
                }
                ":reward" => report(handle.grant_reward_rows(1).await),
                guess => {
                    if let Err(err) = type_guess(&handle, guess).await {
                        report::<()>(Err(err));
                    } else {
                        report(handle.verify().await);
                    }
                }
            }
            print_wordle(&wait_for_word(&handle).await?);
        }

        handle.close().await?;
        self.runtime.flush_jobs().await?;
        Ok(())
    }

    async fn drive_multi_choice(&mut self, handle: MultiChoiceHandle) -> Result<()> {
        loop {
            let snapshot = handle.snapshot().await?;
            if let Some(error) = &snapshot.error
                && snapshot.session.is_none()
            {
                println!("could not load questions: {error} (:again to retry)");
                match self.prompt("> ").await?.as_deref() {
                    Some(":again") => {
                        handle.play_again().await?;
                        continue;
                    }
                    _ => break,
                }
            }
            if snapshot.loading || snapshot.session.is_none() {
                tokio::time::sleep(POLL_INTERVAL).await;
                continue;
            }
            if print_multi_choice(&snapshot) {
                break;
            }

            let Some(line) = self.prompt("answer> ").await? else {
                break;
            };
            match line.as_str() {
                ":quit" => break,
                ":again" => {
                    handle.play_again().await?;
                    continue;
                }
                _ => {}
            }
            match line.parse::<usize>() {
                Ok(number) if number > 0 => report(handle.answer(number - 1).await),
                _ => println!("enter the answer number, or :quit"),
            }
        }

        handle.close().await?;
        self.runtime.flush_jobs().await?;
        Ok(())
    }

    fn print_profile(&self) -> Result<()> {
        match self.runtime.profile()? {
            Some(profile) => {
                let level = profile.level(&self.xp_config);
                let to_next = self.xp_config.level.xp_to_next_level(profile.total_xp);
                println!(
                    "level {level}  xp {} ({to_next} to next level)  diamonds {}",
                    profile.total_xp, profile.diamonds
                );
            }
            None => println!("no profile"),
        }
        let results = self.runtime.results()?;
        println!("{} games recorded", results.len());
        Ok(())
    }
}

/// Replaces the current row with `guess`.
async fn type_guess(handle: &WordleHandle, guess: &str) -> Result<(), RuntimeError> {
    let snapshot = handle.snapshot().await?;
    let len = snapshot
        .session
        .as_ref()
        .map(|session| session.word.len())
        .unwrap_or(0);
    for index in 0..len {
        handle.remove_key(index).await?;
    }
    handle.enter_word(guess).await
}

/// Polls until the word is loaded or failed to load.
async fn wait_for_word(handle: &WordleHandle) -> Result<WordleSnapshot> {
    loop {
        let snapshot = handle.snapshot().await?;
        if !snapshot.loading {
            return Ok(snapshot);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

fn report<T>(result: Result<T, RuntimeError>) {
    match result {
        Ok(_) => {}
        Err(RuntimeError::Wordle(err)) => println!("! {err}"),
        Err(RuntimeError::MultiChoice(err)) => println!("! {err}"),
        Err(err) => {
            warn!(error = %err, "command failed");
            println!("! {err}");
        }
    }
}

fn print_wordle(snapshot: &WordleSnapshot) {
    let Some(session) = &snapshot.session else {
        if let Some(error) = &snapshot.error {
            println!("could not load a word: {error} (:again to retry)");
        }
        return;
    };

    for (index, row) in session.rows.iter().enumerate() {
        let mut line = render_row(row, snapshot.color_blind);
        if let Some(hints) = snapshot.letter_hints.get(index) {
            let hints: Vec<String> = hints
                .iter()
                .map(|hint| hint.map_or("-".to_string(), |count| count.to_string()))
                .collect();
            let _ = write!(line, "   {}", hints.join(" "));
        }
        println!("{line}");
    }

    let rows_left = session.row_limit.saturating_sub(session.current_row);
    match session.status {
        SessionStatus::InProgress => {
            let mut status = format!("{rows_left} rows left");
            if let Some(ms) = snapshot.remaining_ms {
                let _ = write!(status, ", {}s on this row", ms / 1000);
            }
            if !session.keys_disabled.is_empty() {
                let keys: String = session.keys_disabled.iter().map(|c| c.value()).collect();
                let _ = write!(status, ", not in word: {keys}");
            }
            println!("{status}");
        }
        SessionStatus::Won => {
            info!(rows = session.rows_used(), "word solved");
            println!("solved in {} rows", session.rows_used());
        }
        SessionStatus::Lost => println!("the word was {}", session.word),
    }
}

/// `[A]` correct, `(A)` present, ` a ` absent, ` A ` pending, ` _ ` empty.
///
/// Color-blind mode swaps brackets for `+`/`?` markers.
fn render_row(row: &WordleRow, color_blind: bool) -> String {
    row.items()
        .iter()
        .map(|item| match (*item, color_blind) {
            (WordleItem::Empty, _) => " _ ".to_string(),
            (WordleItem::Pending(c), _) => format!(" {c} "),
            (WordleItem::Absent(c), _) => format!(" {} ", c.value().to_ascii_lowercase()),
            (WordleItem::Present(c), false) => format!("({c})"),
            (WordleItem::Correct(c), false) => format!("[{c}]"),
            (WordleItem::Present(c), true) => format!("?{c} "),
            (WordleItem::Correct(c), true) => format!("+{c} "),
        })
        .collect()
}

/// Prints the current question. Returns `true` once the quiz is over.
fn print_multi_choice(snapshot: &MultiChoiceSnapshot) -> bool {
    let Some(session) = &snapshot.session else {
        return false;
    };

    if session.is_finished() {
        let performance = session.performance();
        println!(
            "{} of {} correct, {}ms per answer",
            performance.correct, performance.total, performance.average_time_ms
        );
        return true;
    }

    let Some(index) = session.current_index else {
        return true;
    };
    if let Some(MultiChoiceStep::Current(question)) = session.steps.get(index) {
        println!("\n{}/{} {}", index + 1, session.steps.len(), question.description);
        for (number, answer) in question.answers.iter().enumerate() {
            println!("  {}. {answer}", number + 1);
        }
        if let Some(ms) = snapshot.remaining_ms {
            println!("{}s left", ms / 1000);
        }
    }
    false
}
