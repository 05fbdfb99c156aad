//! Interactive practice loops over any line-based input and output

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;
use woordjes_algo::{
    build_question, check_answer, similarity, AdaptiveQueue, ItemId, Outcome, PassThroughRun,
    PracticeItem, StudySettings,
};

use crate::store::SetProgress;

pub const QUIT: &str = "q";
pub const UNDO: &str = "u";
pub const HINT: &str = "?";

/// How an interactive session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished,
    Quit,
}

/// A wrong answer as it was typed or picked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrongGuess {
    pub item: PracticeItem,
    pub given: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub end: SessionEnd,
    /// One entry per correct answer that counts towards word progress
    pub correct_ids: Vec<ItemId>,
    pub wrong_guesses: Vec<WrongGuess>,
}

impl SessionOutcome {
    fn new() -> Self {
        Self {
            end: SessionEnd::Finished,
            correct_ids: Vec::new(),
            wrong_guesses: Vec::new(),
        }
    }

    fn quit(mut self) -> Self {
        self.end = SessionEnd::Quit;
        self
    }
}

/// `None` on end of input
fn read_answer<I: BufRead>(input: &mut I) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn report_answer<O: Write>(
    output: &mut O,
    correct: bool,
    given: &str,
    expected: &str,
) -> Result<()> {
    if correct {
        writeln!(output, "correct")?;
    } else {
        writeln!(
            output,
            "wrong: {expected} ({}% match)",
            similarity(given, expected)
        )?;
    }
    Ok(())
}

/// Learn mode: wrong answers come back later, `u` undoes, `?` shows a hint.
/// An empty line asks again.
pub fn run_learn<R, I, O>(
    queue: &mut AdaptiveQueue<R>,
    settings: &StudySettings,
    input: &mut I,
    output: &mut O,
) -> Result<SessionOutcome>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut outcome = SessionOutcome::new();
    while let Some(item) = queue.current().cloned() {
        let done = queue.initial_count() - queue.len();
        write!(output, "[{done}/{}] {} > ", queue.initial_count(), item.prompt)?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(outcome.quit());
        };
        match answer.as_str() {
            "" => continue,
            QUIT => return Ok(outcome.quit()),
            UNDO => match queue.undo() {
                Some(undone) => {
                    if undone == Outcome::Incorrect {
                        outcome.wrong_guesses.pop();
                    }
                    writeln!(output, "undone: {undone:?}")?;
                }
                None => writeln!(output, "nothing to undo")?,
            },
            HINT => {
                if let Some(hint) = queue.hint() {
                    writeln!(output, "hint: {hint}")?;
                }
            }
            given => {
                let correct = check_answer(
                    given,
                    &item.answer,
                    settings.case_sensitive,
                    settings.accent_sensitive,
                );
                report_answer(output, correct, given, &item.answer)?;
                if correct {
                    queue.submit_correct()?;
                } else {
                    queue.submit_incorrect()?;
                    outcome.wrong_guesses.push(WrongGuess {
                        item,
                        given: given.to_string(),
                    });
                }
            }
        }
    }

    outcome.correct_ids = queue.mastered().map(|item| item.id).collect();
    Ok(outcome)
}

/// Typing mode: one pass, a wrong answer is retried until it is right.
/// An empty line asks again.
pub fn run_typing<R, I, O>(
    run: &mut PassThroughRun<R>,
    settings: &StudySettings,
    input: &mut I,
    output: &mut O,
) -> Result<SessionOutcome>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut outcome = SessionOutcome::new();
    while let Some(item) = run.current().cloned() {
        write!(output, "[{}/{}] {} > ", run.index() + 1, run.len(), item.prompt)?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(outcome.quit());
        };
        if answer.is_empty() {
            continue;
        }
        if answer == QUIT {
            return Ok(outcome.quit());
        }

        let correct = check_answer(
            &answer,
            &item.answer,
            settings.case_sensitive,
            settings.accent_sensitive,
        );
        report_answer(output, correct, &answer, &item.answer)?;
        if correct {
            run.submit(Outcome::Correct)?;
            outcome.correct_ids.push(item.id);
        } else {
            run.submit(Outcome::Incorrect)?;
            outcome.wrong_guesses.push(WrongGuess {
                item,
                given: answer,
            });
        }
    }
    Ok(outcome)
}

/// Multiple choice: answer with the option number or its text.
///
/// Distractors come from the other words of the run plus, once the word has
/// been asked often enough, the wrong answer given most for it.
pub fn run_choice<R, G, I, O>(
    run: &mut PassThroughRun<R>,
    progress: &SetProgress,
    rng: &mut G,
    input: &mut I,
    output: &mut O,
) -> Result<SessionOutcome>
where
    R: Rng,
    G: Rng,
    I: BufRead,
    O: Write,
{
    let pool = run.items().to_vec();
    let mut outcome = SessionOutcome::new();
    while let Some(item) = run.current().cloned() {
        let question = build_question(&item, &pool, &progress.common_mistakes(&item), rng);
        writeln!(output, "[{}/{}] {}", run.index() + 1, run.len(), question.prompt)?;
        for (number, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}) {option}", number + 1)?;
        }

        let choice = loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(answer) = read_answer(input)? else {
                return Ok(outcome.quit());
            };
            if answer == QUIT {
                return Ok(outcome.quit());
            }
            let picked = match answer.parse::<usize>() {
                Ok(number) => number
                    .checked_sub(1)
                    .and_then(|index| question.options.get(index)),
                Err(_) => question.options.iter().find(|option| **option == answer),
            };
            match picked {
                Some(option) => break option.clone(),
                None => writeln!(output, "pick 1-{}", question.options.len())?,
            }
        };

        if question.is_correct(&choice) {
            writeln!(output, "correct")?;
            run.submit(Outcome::Correct)?;
            outcome.correct_ids.push(item.id);
        } else {
            writeln!(output, "wrong: {}", question.correct_answer)?;
            run.submit(Outcome::Incorrect)?;
            outcome.wrong_guesses.push(WrongGuess {
                item,
                given: choice,
            });
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::mock::StepRng;
    use std::io::Cursor;
    use woordjes_algo::{QueueOptions, RetryRule};

    fn words() -> Vec<PracticeItem> {
        vec![
            PracticeItem::new(1, "huis", "maison"),
            PracticeItem::new(2, "kat", "chat"),
            PracticeItem::new(3, "hond", "chien"),
        ]
    }

    fn ordered() -> QueueOptions {
        QueueOptions {
            shuffle: false,
            ..QueueOptions::default()
        }
    }

    fn typing_run(rule: RetryRule) -> PassThroughRun<StepRng> {
        PassThroughRun::with_rng(&words(), &ordered(), rule, StepRng::new(0, 0)).unwrap()
    }

    #[test]
    fn test_learn_requeues_and_finishes() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(), ordered(), StepRng::new(0, 0)).unwrap();
        // huis wrong -> requeued at index 2 of [kat, hond]
        let mut input = Cursor::new("fout\nchat\nchien\nMaison\n");
        let mut output = Vec::new();

        let outcome =
            run_learn(&mut queue, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Finished);
        assert_eq!(queue.correct_count(), 3);
        assert_eq!(queue.incorrect_count(), 1);
        assert_eq!(outcome.correct_ids, vec![2, 3, 1]);
        assert_eq!(outcome.wrong_guesses.len(), 1);
        assert_eq!(outcome.wrong_guesses[0].given, "fout");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("wrong: maison"));
        assert!(text.contains("[2/3] huis > "));
    }

    #[test]
    fn test_learn_ignores_empty_lines() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(), ordered(), StepRng::new(0, 0)).unwrap();
        let mut input = Cursor::new("\nmaison\n   \nchat\n");
        let mut output = Vec::new();

        let outcome =
            run_learn(&mut queue, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Quit);
        assert_eq!(queue.incorrect_count(), 0);
        assert_eq!(queue.correct_count(), 2);
        assert!(queue.mistakes().is_empty());

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("[0/3] huis > ").count(), 2);
        assert!(!text.contains("wrong"));
    }

    #[test]
    fn test_learn_undo_hint_and_quit() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(), ordered(), StepRng::new(0, 0)).unwrap();
        let mut input = Cursor::new("maison\nu\n?\nq\n");
        let mut output = Vec::new();

        let outcome =
            run_learn(&mut queue, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Quit);
        assert_eq!(queue.correct_count(), 0);
        assert_eq!(queue.current().map(|item| item.id), Some(1));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("undone: Correct"));
        assert!(text.contains("hint: ma..."));
    }

    #[test]
    fn test_undone_wrong_answer_is_forgotten() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(), ordered(), StepRng::new(0, 0)).unwrap();
        let mut input = Cursor::new("fout\nu\nq\n");
        let mut output = Vec::new();

        let outcome =
            run_learn(&mut queue, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert!(outcome.wrong_guesses.is_empty());
        assert!(queue.mistakes().is_empty());
    }

    #[test]
    fn test_learn_stops_at_end_of_input() {
        let mut queue =
            AdaptiveQueue::with_rng(&words(), ordered(), StepRng::new(0, 0)).unwrap();
        let mut input = Cursor::new("maison\n");
        let mut output = Vec::new();

        let outcome =
            run_learn(&mut queue, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Quit);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_typing_retries_until_correct() {
        let mut run = typing_run(RetryRule::RetryUntilCorrect);
        let mut input = Cursor::new("masion\nmaison\nchat\nchien\n");
        let mut output = Vec::new();

        let outcome =
            run_typing(&mut run, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Finished);
        assert_eq!(run.mistakes(), &[1]);
        assert_eq!(outcome.correct_ids, vec![1, 2, 3]);
        assert_eq!(run.summary(30).score, 75);
    }

    #[test]
    fn test_typing_ignores_empty_lines() {
        let mut run = typing_run(RetryRule::RetryUntilCorrect);
        let mut input = Cursor::new("\nmaison\n\n\nchat\nchien\n");
        let mut output = Vec::new();

        let outcome =
            run_typing(&mut run, &StudySettings::default(), &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Finished);
        assert!(run.mistakes().is_empty());
        assert_eq!(run.incorrect_count(), 0);
        assert_eq!(run.summary(30).score, 100);
    }

    #[test]
    fn test_choice_accepts_text_and_reasks() {
        let mut run = typing_run(RetryRule::AdvanceAlways);
        let mut rng = StepRng::new(0, 0);
        // huis: picks a wrong option; kat: right; hond: right after a bad pick
        let mut input = Cursor::new("chat\n\nchat\n9\nchien\n");
        let mut output = Vec::new();

        let outcome = run_choice(
            &mut run,
            &SetProgress::default(),
            &mut rng,
            &mut input,
            &mut output,
        )
        .unwrap();
        assert_eq!(outcome.end, SessionEnd::Finished);
        assert_eq!(outcome.correct_ids, vec![2, 3]);
        assert_eq!(run.mistakes(), &[1]);
        assert_eq!(outcome.wrong_guesses[0].given, "chat");

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("pick 1-3").count(), 2);
        assert!(text.contains("wrong: maison"));
    }

    #[test]
    fn test_choice_offers_common_wrong_answer() {
        let huis = PracticeItem::new(1, "huis", "maison");
        let mut progress = SetProgress::default();
        progress.record_session(
            &[1],
            &[1, 1],
            [(&huis, "tuin"), (&huis, "tuin")],
            Utc::now(),
        );

        let mut run = typing_run(RetryRule::AdvanceAlways);
        let mut rng = StepRng::new(0, 0);
        let mut input = Cursor::new("q\n");
        let mut output = Vec::new();

        let outcome = run_choice(&mut run, &progress, &mut rng, &mut input, &mut output).unwrap();
        assert_eq!(outcome.end, SessionEnd::Quit);
        assert!(String::from_utf8(output).unwrap().contains(") tuin"));
    }
}
