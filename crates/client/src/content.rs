//! Bundled offline content.
use quiz_core::{MazeItem, MazeTrack, MultiChoiceQuestion, QuestionDifficulty, WordleQuizType};
use quiz_runtime::StaticContentSource;

const WORDS: &[&str] = &[
    "CRANE", "SLOTH", "ALLOY", "PIGMY", "ABIDE", "QUERY", "FJORD", "BRISK", "GLYPH", "OCEAN",
];
const NUMBERS: &[&str] = &["31415", "27182", "16180", "14142", "57721"];
const FORMULAS: &[&str] = &["1+2=3", "2*3=6", "9-4=5", "8/2=4", "3+3=6"];

/// Word lists for every variant plus a small trivia set.
pub fn content_source() -> anyhow::Result<StaticContentSource> {
    Ok(StaticContentSource::new()
        .with_words(WordleQuizType::Text, WORDS.iter().copied())
        .with_words(WordleQuizType::Number, NUMBERS.iter().copied())
        .with_words(WordleQuizType::MathFormula, FORMULAS.iter().copied())
        .with_questions(questions()?))
}

/// A short starter maze alternating both quizzes.
pub fn maze_track() -> anyhow::Result<MazeTrack> {
    let mut questions = questions()?.into_iter();
    let mut items = vec![
        MazeItem::wordle("OCEAN", WordleQuizType::Text),
        MazeItem::wordle("2*3=6", WordleQuizType::MathFormula),
        MazeItem::wordle("GLYPH", WordleQuizType::Text),
    ];
    items.extend(questions.next().map(MazeItem::multi_choice));
    items.push(MazeItem::wordle("14142", WordleQuizType::Number));
    items.extend(questions.next().map(MazeItem::multi_choice));

    Ok(MazeTrack::from_items(items)?)
}

fn questions() -> anyhow::Result<Vec<MultiChoiceQuestion>> {
    let answers = |list: &[&str]| list.iter().map(|answer| answer.to_string()).collect();
    Ok(vec![
        MultiChoiceQuestion::new(
            1,
            "Which planet is known as the red planet?",
            answers(&["Venus", "Mars", "Jupiter", "Mercury"]),
            1,
        )?
        .with_difficulty(QuestionDifficulty::Easy),
        MultiChoiceQuestion::new(
            2,
            "What is the chemical symbol for gold?",
            answers(&["Ag", "Go", "Au", "Gd"]),
            2,
        )?,
        MultiChoiceQuestion::new(
            3,
            "How many sides does a hexagon have?",
            answers(&["5", "6", "7", "8"]),
            1,
        )?
        .with_difficulty(QuestionDifficulty::Easy),
        MultiChoiceQuestion::new(
            4,
            "Who wrote \"On the Origin of Species\"?",
            answers(&["Darwin", "Mendel", "Newton", "Lamarck"]),
            0,
        )?,
        MultiChoiceQuestion::new(
            5,
            "Which is the largest ocean on Earth?",
            answers(&["Atlantic", "Indian", "Arctic", "Pacific"]),
            3,
        )?
        .with_difficulty(QuestionDifficulty::Hard),
    ])
}
