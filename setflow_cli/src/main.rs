use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use setflow_core::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "setflow")]
#[command(about = "Guided workout session tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run today's guided workout (default)
    Workout {
        /// Weekday override (e.g. monday); defaults to today
        #[arg(long)]
        day: Option<String>,

        /// Auto-complete (for testing) - log every set with target numbers
        /// and fast-forward rest periods
        #[arg(long)]
        auto_complete: bool,
    },

    /// Show aggregate progress statistics
    Stats,

    /// Roll up logged sets from the WAL into the CSV archive
    Rollup {
        /// Clean up processed WAL files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

/// Events consumed by the workout loop
///
/// Rest ticks carry a generation number so a tick queued just before its
/// ticker was cancelled cannot leak into the next rest period.
enum Event {
    Tick(u64),
    Line(String),
}

fn main() -> Result<()> {
    // Initialize logging
    setflow_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Workout { day, auto_complete }) => {
            cmd_workout(data_dir, day, auto_complete, &config)
        }
        Some(Commands::Stats) => cmd_stats(data_dir, &config),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(data_dir, cleanup),
        None => cmd_workout(data_dir, None, false, &config),
    }
}

fn cmd_workout(
    data_dir: PathBuf,
    day: Option<String>,
    auto_complete: bool,
    config: &Config,
) -> Result<()> {
    // Ensure directories exist
    let wal_dir = data_dir.join("wal");
    std::fs::create_dir_all(&wal_dir)?;

    let wal_path = wal_dir.join("logged_sets.wal");
    let csv_path = data_dir.join("sets.csv");

    // Load and validate the plan
    let plan = get_default_plan();
    let errors = plan.validate();
    if !errors.is_empty() {
        eprintln!("Plan validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::PlanValidation("Invalid plan".into()));
    }

    // Resolve the training day (today unless overridden)
    let weekday = match day {
        Some(ref d) => match chrono::Weekday::from_str(d) {
            Ok(wd) => wd,
            Err(_) => {
                eprintln!("Unknown day: {}. Using today.", d);
                Local::now().date_naive().weekday()
            }
        },
        None => Local::now().date_naive().weekday(),
    };

    let plan_day = match plan.day_for(weekday) {
        Some(day) => day,
        None => {
            println!("No schedule for {:?}.", weekday);
            return Ok(());
        }
    };

    if plan_day.is_rest_day() {
        println!("Rest day - no workout scheduled for {:?}.", weekday);
        return Ok(());
    }

    display_day_header(plan, plan_day, weekday);

    // History feeds the per-exercise recommendation rule; freshly logged
    // sets are prepended so it stays newest-first.
    let mut history = load_user_history(&wal_path, &csv_path, config.user.user_id)?;

    let mut session = WorkoutSession::new();
    session.start(plan_day.entries.clone())?;

    // Single event channel: one stdin reader for the whole session, plus a
    // short-lived ticker per rest period.
    let (event_tx, event_rx) = mpsc::channel::<Event>();
    if !auto_complete {
        spawn_input_reader(event_tx.clone());
    }

    let mut sink = JsonlSink::new(&wal_path);
    let mut alert = TerminalAlert::new(config.alerts.sound);
    let mut rest_generation: u64 = 0;
    let today = Local::now().date_naive();

    while session.is_active() {
        let entry = match session.current_entry() {
            Some(e) => e.clone(),
            None => break,
        };

        println!(
            "\nExercise {} of {}: {} ({})",
            session.current_exercise_index() + 1,
            session.exercise_count(),
            entry.exercise.name,
            entry.exercise.primary_muscle
        );
        println!(
            "  Set {} of {} - target {} reps",
            session.current_set(),
            entry.total_sets(),
            entry.target_reps()
        );

        let (weight, reps, rpe) = if auto_complete {
            (None, entry.target_reps(), Some(7))
        } else {
            prompt_set_numbers(&event_rx, entry.target_reps())?
        };

        let set = LoggedSet {
            id: Uuid::new_v4(),
            user_id: config.user.user_id,
            exercise_id: entry.exercise.id,
            date: today,
            sets_done: session.current_set(),
            reps_done: reps,
            weight_used: weight,
            rpe,
        };
        sink.append(&set)?;
        history.insert(0, set);
        println!("  ✓ Set logged");

        if let Some(rec) = recommend_adjustment(&history, entry.exercise.id) {
            println!("  ℹ {}", rec);
        }

        match session.complete_set()? {
            SetOutcome::Rest { seconds } => {
                rest_generation += 1;
                run_rest_period(
                    seconds,
                    auto_complete,
                    rest_generation,
                    &event_tx,
                    &event_rx,
                    &mut alert,
                )?;
            }
            SetOutcome::ExerciseFinished => match session.advance_exercise()? {
                AdvanceOutcome::NextExercise => {}
                AdvanceOutcome::WorkoutComplete => {
                    tracing::info!("Workout finished for {:?}", weekday);
                    println!("\n✓ Workout complete!");
                }
            },
        }
    }

    Ok(())
}

/// Count down one rest period, reacting to ticks and skip input
fn run_rest_period(
    seconds: u32,
    auto_complete: bool,
    generation: u64,
    event_tx: &Sender<Event>,
    event_rx: &Receiver<Event>,
    alert: &mut TerminalAlert,
) -> Result<()> {
    let mut timer = RestTimer::new();
    timer.start(seconds)?;

    if auto_complete {
        // Fast-forward the countdown without waiting on the wall clock
        loop {
            match timer.tick() {
                TimerTick::Counting(_) => continue,
                TimerTick::Expired => {
                    alert.rest_complete();
                    break;
                }
                TimerTick::Idle => break,
            }
        }
        return Ok(());
    }

    println!("  Rest {} (press Enter to skip)", timer.formatted());

    let tick_tx = event_tx.clone();
    let ticker = Ticker::spawn(Duration::from_secs(1), move || {
        tick_tx.send(Event::Tick(generation)).is_ok()
    });

    while timer.is_active() {
        match event_rx.recv() {
            Ok(Event::Tick(gen)) if gen == generation => match timer.tick() {
                TimerTick::Counting(_) => {
                    print!("\r  Rest {} ", timer.formatted());
                    let _ = io::stdout().flush();
                }
                TimerTick::Expired => {
                    alert.rest_complete();
                }
                TimerTick::Idle => {}
            },
            // Tick from a previous, already-cancelled rest period
            Ok(Event::Tick(_)) => {}
            Ok(Event::Line(_)) => {
                timer.skip();
                println!("  Rest skipped");
            }
            Err(_) => {
                // Input closed; nothing left to wait for
                timer.skip();
            }
        }
    }

    // Joins the worker: no tick outlives the rest period
    ticker.cancel();
    Ok(())
}

fn cmd_stats(data_dir: PathBuf, config: &Config) -> Result<()> {
    let wal_path = data_dir.join("wal").join("logged_sets.wal");
    let csv_path = data_dir.join("sets.csv");

    let history = load_user_history(&wal_path, &csv_path, config.user.user_id)?;
    let stats = compute_stats(&history, Local::now().date_naive());

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROGRESS                               │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Total workouts: {}", stats.total_workouts);
    println!("  Total sets:     {}", stats.total_sets);
    println!("  Total volume:   {:.1}", stats.total_volume);
    println!("  Current streak: {} day(s)", stats.current_streak);
    println!();

    Ok(())
}

fn cmd_rollup(data_dir: PathBuf, cleanup: bool) -> Result<()> {
    let wal_dir = data_dir.join("wal");
    let wal_path = wal_dir.join("logged_sets.wal");
    let csv_path = data_dir.join("sets.csv");

    if !wal_path.exists() {
        println!("No WAL file found - nothing to roll up.");
        return Ok(());
    }

    let count = setflow_core::csv_rollup::wal_to_csv_and_archive(&wal_path, &csv_path)?;

    println!("✓ Rolled up {} sets to CSV", count);
    println!("  CSV: {}", csv_path.display());

    if cleanup {
        let cleaned = setflow_core::csv_rollup::cleanup_processed_wals(&wal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed WAL files", cleaned);
        }
    }

    Ok(())
}

fn display_day_header(plan: &WeeklyPlan, day: &PlanDay, weekday: chrono::Weekday) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} DAY ({:?})", day.label.to_uppercase(), weekday);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Plan: {} ({})", plan.name, plan.difficulty);
    for entry in &day.entries {
        println!(
            "  → {} - {}x{} (rest {}s)",
            entry.exercise.name,
            entry.total_sets(),
            entry.target_reps(),
            entry.rest_seconds()
        );
    }
}

/// One stdin reader per process, feeding lines into the event channel
fn spawn_input_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break, // EOF or closed terminal
                Ok(_) => {
                    if tx.send(Event::Line(line.trim().to_string())).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

/// Prompt for the numbers of the set just performed
fn prompt_set_numbers(
    events: &Receiver<Event>,
    target_reps: u32,
) -> Result<(Option<f64>, u32, Option<u8>)> {
    print!("  Weight used (blank for bodyweight): ");
    io::stdout().flush()?;
    let weight = next_line(events)?.parse::<f64>().ok();

    print!("  Reps done [{}]: ", target_reps);
    io::stdout().flush()?;
    let reps = next_line(events)?.parse::<u32>().unwrap_or(target_reps);

    print!("  RPE 1-10 [7]: ");
    io::stdout().flush()?;
    let rpe = match next_line(events)?.parse::<u8>() {
        Ok(v) if (1..=10).contains(&v) => Some(v),
        _ => Some(7),
    };

    Ok((weight, reps, rpe))
}

/// Wait for the next input line, discarding stale ticks
fn next_line(events: &Receiver<Event>) -> Result<String> {
    loop {
        match events.recv() {
            Ok(Event::Line(line)) => return Ok(line),
            Ok(Event::Tick(_)) => continue,
            Err(_) => return Err(Error::Other("input stream closed".into())),
        }
    }
}

/// Terminal-bell alert for rest expiry; failures are swallowed
struct TerminalAlert {
    sound: bool,
}

impl TerminalAlert {
    fn new(sound: bool) -> Self {
        Self { sound }
    }
}

impl Alert for TerminalAlert {
    fn rest_complete(&mut self) {
        let mut stdout = io::stdout();
        if self.sound {
            let _ = stdout.write_all(b"\x07");
        }
        let _ = writeln!(stdout, "\n  Rest Time Complete!");
        let _ = stdout.flush();
    }
}
