use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use woordjes_algo::{
    dashboard_stats, latest_snapshot, seeded_rng, select_range, AdaptiveQueue, Direction, ItemId,
    PassThroughRun, PracticeItem, RetryRule, SessionRecord, SessionSummary, StudyMode,
    StudySettings, MOST_MISSED_LIMIT,
};
use woordjes_trainer::config::Config;
use woordjes_trainer::logging::{init_tracing, ConsoleLogs};
use woordjes_trainer::report::{
    forecasts_by_set, write_most_missed, write_set_forecasts, write_stats,
};
use woordjes_trainer::session::{run_choice, run_learn, run_typing, SessionEnd, SessionOutcome};
use woordjes_trainer::store;
use woordjes_trainer::words::load_words;

const RESUME_MISMATCH: &str =
    "the saved session does not match this word list or mode; start without --resume";

#[derive(Parser)]
#[command(name = "woordjes", version, about = "Vocabulary practice in the terminal")]
struct Cli {
    /// Session history file (overrides WOORDJES_HISTORY)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Practice until every word is answered correctly
    Learn {
        #[command(flatten)]
        practice: PracticeArgs,

        /// Continue the unfinished session, if there is one
        #[arg(long)]
        resume: bool,

        /// Flashcard pacing: missed words come back 5-10 cards later
        #[arg(long)]
        swipe: bool,
    },
    /// Type every answer once, retrying wrong ones
    Type {
        #[command(flatten)]
        practice: PracticeArgs,
    },
    /// Pick the right answer out of four, once per word
    Choice {
        #[command(flatten)]
        practice: PracticeArgs,
    },
    /// Forecast mastery milestones per set from the session history
    Forecast {
        /// Only forecast this set
        #[arg(long)]
        set_id: Option<u64>,
    },
    /// Show totals, streaks and this week's activity
    Stats,
}

#[derive(Args)]
struct PracticeArgs {
    /// Word list in quick-entry form: `huis, maison; kat, chat`
    words: Option<String>,

    /// Read the word list from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Set id stored with the session, its snapshot and word progress
    #[arg(long)]
    set_id: Option<u64>,

    /// forward, reverse or both
    #[arg(short, long, default_value = "forward", value_parser = parse_direction)]
    direction: Direction,

    /// Only practice words at these 1-based positions, e.g. `1-20`
    #[arg(long, value_parser = parse_range)]
    range: Option<(usize, usize)>,

    /// Keep the list order
    #[arg(long)]
    no_shuffle: bool,

    #[arg(long)]
    case_sensitive: bool,

    /// Accept answers without accents
    #[arg(long)]
    ignore_accents: bool,

    /// RNG seed (overrides WOORDJES_SEED)
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    value.parse::<Direction>().map_err(|err| err.to_string())
}

fn parse_range(value: &str) -> Result<(usize, usize), String> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| format!("expected START-END, got `{value}`"))?;
    let start = start.trim().parse().map_err(|_| format!("bad start in `{value}`"))?;
    let end = end.trim().parse().map_err(|_| format!("bad end in `{value}`"))?;
    Ok((start, end))
}

impl PracticeArgs {
    fn settings(&self, mode: StudyMode, config: &Config) -> StudySettings {
        StudySettings {
            mode,
            direction: self.direction,
            shuffle: !self.no_shuffle,
            case_sensitive: self.case_sensitive,
            accent_sensitive: !self.ignore_accents,
            seed: self.seed.or(config.seed),
            ..StudySettings::default()
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let mut config = Config::from_env();
    let cli = Cli::parse();
    if let Some(history) = cli.history {
        config.history_path = history;
    }

    let console = match cli.command {
        Command::Learn { .. } | Command::Type { .. } | Command::Choice { .. } => ConsoleLogs::Quiet,
        Command::Forecast { .. } | Command::Stats => ConsoleLogs::Full,
    };
    let _log_guard = init_tracing(&config.log_level, config.log_dir.as_deref(), console);

    match cli.command {
        Command::Learn {
            practice,
            resume,
            swipe,
        } => learn(&config, &practice, resume, swipe),
        Command::Type { practice } => typing(&config, &practice),
        Command::Choice { practice } => choice(&config, &practice),
        Command::Forecast { set_id } => forecast(&config, set_id),
        Command::Stats => stats(&config),
    }
}

fn learn(config: &Config, args: &PracticeArgs, resume: bool, swipe: bool) -> Result<()> {
    let items = load_words(args.words.as_deref(), args.file.as_deref())?;
    let mode = if swipe {
        StudyMode::Flashcard
    } else {
        StudyMode::Learn
    };
    let mut settings = args.settings(mode, config);
    if let Some((start, end)) = args.range {
        settings.selected_word_ids = Some(select_range(&items, start, end));
    }

    let snapshot = if resume {
        latest_snapshot([store::load_snapshot(&config.snapshot_path)?])
    } else {
        None
    };
    let mut queue = match snapshot {
        Some(snapshot) => {
            AdaptiveQueue::resume(&items, settings.queue_options(), snapshot, mode, args.set_id)
                .context(RESUME_MISMATCH)?
        }
        None => AdaptiveQueue::build(&items, settings.queue_options())?,
    };
    if queue.is_empty() {
        bail!("no words left to practice");
    }

    let started = Instant::now();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = run_learn(&mut queue, &settings, &mut stdin.lock(), &mut stdout)?;

    match outcome.end {
        SessionEnd::Finished => {
            store::clear_snapshot(&config.snapshot_path)?;
            let summary = queue.summary(started.elapsed().as_secs());
            finish(config, args.set_id, &summary, &mut stdout)?;
            record_progress(config, args.set_id, &items, &outcome, queue.mistakes(), &mut stdout)
        }
        SessionEnd::Quit => {
            let snapshot = queue.snapshot(mode, args.set_id, Utc::now().timestamp_millis());
            store::save_snapshot(&config.snapshot_path, &snapshot)?;
            writeln!(stdout, "\nprogress saved; continue with --resume")?;
            Ok(())
        }
    }
}

fn typing(config: &Config, args: &PracticeArgs) -> Result<()> {
    let items = load_words(args.words.as_deref(), args.file.as_deref())?;
    let mut settings = args.settings(StudyMode::Typing, config);
    if let Some((start, end)) = args.range {
        settings.selected_word_ids = Some(select_range(&items, start, end));
    }

    let mut run = PassThroughRun::build(
        &items,
        &settings.queue_options(),
        RetryRule::RetryUntilCorrect,
    )?;
    if run.is_empty() {
        bail!("no words left to practice");
    }

    let started = Instant::now();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = run_typing(&mut run, &settings, &mut stdin.lock(), &mut stdout)?;
    match outcome.end {
        SessionEnd::Finished => {
            let summary = run.summary(started.elapsed().as_secs());
            finish(config, args.set_id, &summary, &mut stdout)?;
            record_progress(config, args.set_id, &items, &outcome, run.mistakes(), &mut stdout)
        }
        SessionEnd::Quit => Ok(()),
    }
}

fn choice(config: &Config, args: &PracticeArgs) -> Result<()> {
    let items = load_words(args.words.as_deref(), args.file.as_deref())?;
    let mut settings = args.settings(StudyMode::MultipleChoice, config);
    if let Some((start, end)) = args.range {
        settings.selected_word_ids = Some(select_range(&items, start, end));
    }

    let progress = store::load_progress(&config.progress_path, args.set_id)?;
    let mut run = PassThroughRun::build(
        &items,
        &settings.queue_options(),
        RetryRule::AdvanceAlways,
    )?;
    if run.is_empty() {
        bail!("no words left to practice");
    }

    let mut rng = seeded_rng(settings.seed);
    let started = Instant::now();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = run_choice(&mut run, &progress, &mut rng, &mut stdin.lock(), &mut stdout)?;
    match outcome.end {
        SessionEnd::Finished => {
            let summary = run.summary(started.elapsed().as_secs());
            finish(config, args.set_id, &summary, &mut stdout)?;
            record_progress(config, args.set_id, &items, &outcome, run.mistakes(), &mut stdout)
        }
        SessionEnd::Quit => Ok(()),
    }
}

/// Add a finished session to the word progress and list the most missed words
fn record_progress<O: Write>(
    config: &Config,
    set_id: Option<u64>,
    items: &[PracticeItem],
    outcome: &SessionOutcome,
    mistake_ids: &[ItemId],
    output: &mut O,
) -> Result<()> {
    let mut progress = store::load_progress(&config.progress_path, set_id)?;
    progress.record_session(
        &outcome.correct_ids,
        mistake_ids,
        outcome
            .wrong_guesses
            .iter()
            .map(|guess| (&guess.item, guess.given.as_str())),
        Utc::now(),
    );
    store::save_progress(&config.progress_path, &progress).with_context(|| {
        format!(
            "word progress could not be saved to {}",
            config.progress_path.display()
        )
    })?;
    write_most_missed(output, &progress.most_missed(MOST_MISSED_LIMIT), items)
}

fn finish<O: Write>(
    config: &Config,
    set_id: Option<u64>,
    summary: &SessionSummary,
    output: &mut O,
) -> Result<()> {
    writeln!(
        output,
        "\nscore {}% ({} mistakes, {} s)",
        summary.score, summary.mistakes_count, summary.duration_seconds
    )?;
    let record = SessionRecord::from_summary(set_id, Utc::now(), summary);
    store::append_session(&config.history_path, record).with_context(|| {
        format!(
            "session finished but could not be saved to {}",
            config.history_path.display()
        )
    })?;
    Ok(())
}

fn forecast(config: &Config, set_id: Option<u64>) -> Result<()> {
    let sessions = store::load_history(&config.history_path)?;
    let forecasts = forecasts_by_set(&sessions, set_id, Utc::now())?;
    write_set_forecasts(&mut io::stdout(), &forecasts)
}

fn stats(config: &Config) -> Result<()> {
    let sessions = store::load_history(&config.history_path)?;
    let stats = dashboard_stats(&sessions, Utc::now().date_naive());
    write_stats(&mut io::stdout(), &stats)
}
