use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use card_football::core::config::DEFAULT_SUBSTITUTES;
use card_football::games::football::{MatchEvents, Stage};
use card_football::{Action, FootballRules, MatchConfig, MatchState, RulesEngine, Side};

/// Play a card football match in the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "card-football",
    version,
    about = "Card football: positional battles and penalty shootouts"
)]
struct Args {
    /// Home team (non-dealer) name, prompted when absent
    #[arg(long)]
    home: Option<String>,

    /// Away team (dealer) name, prompted when absent
    #[arg(long)]
    away: Option<String>,

    /// Formation such as 4-4-2 or 4-2-3-1, prompted when absent
    #[arg(long)]
    formation: Option<String>,

    /// Seed for the shuffle and substitute picks (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Play every step automatically; attackers never substitute
    #[arg(long)]
    auto: bool,

    /// Face-down substitutes dealt to each side
    #[arg(long, default_value_t = DEFAULT_SUBSTITUTES)]
    substitutes: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).context("invalid --log-level")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let rules = FootballRules::new(MatchConfig::new().with_substitutes(args.substitutes));
    info!(seed, auto = args.auto, "starting");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut state = rules.new_match(seed);

    loop {
        if matches!(state.stage(), Stage::Setup) {
            state = set_up(&rules, &state, &args, &mut input)?;
            continue;
        }

        if rules.is_terminal(&state).is_some() {
            print_result(&state);
            return Ok(());
        }

        let action = if args.auto {
            rules.auto_action(&state)
        } else {
            choose_action(&rules, &state, &mut input)?
        };
        let Some(action) = action else {
            println!("Match abandoned.");
            return Ok(());
        };

        let transition = rules.apply_action(&state, &action)?;
        debug!(action = %action, applied = transition.applied, "stepped");
        state = transition.state;
        print_events(&state, &transition.events);
        if matches!(state.stage(), Stage::BattleResult(..)) {
            println!("  Score: {}", state.snapshot().scoreline());
        }
    }
}

/// Read names and formation until setup succeeds.
///
/// Values passed on the command line are used first; a rejected value is
/// asked for again, unless running unattended.
fn set_up(
    rules: &FootballRules,
    state: &MatchState,
    args: &Args,
    input: &mut impl BufRead,
) -> Result<MatchState> {
    let mut home = args.home.clone();
    let mut away = args.away.clone();
    let mut formation = args.formation.clone();

    loop {
        let home_name = match home.take() {
            Some(name) => name,
            None => prompt(input, "Home Team name: ")?,
        };
        let away_name = match away.take() {
            Some(name) => name,
            None => prompt(input, "Away Team name: ")?,
        };
        let shape = match formation.take() {
            Some(shape) => shape,
            None => prompt(input, "Formation (e.g. 4-4-2): ")?,
        };

        let setup = Action::setup(home_name, away_name, shape);
        match rules.apply_action(state, &setup) {
            Ok(transition) => {
                print_events(&transition.state, &transition.events);
                return Ok(transition.state);
            }
            Err(err) if err.is_validation() && !args.auto => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
}

fn choose_action(
    rules: &FootballRules,
    state: &MatchState,
    input: &mut impl BufRead,
) -> Result<Option<Action>> {
    let actions = rules.legal_actions(state);
    if let Some(penalty) = state.snapshot().penalty {
        println!("  {}", penalty.context);
    }

    loop {
        for (i, action) in actions.iter().enumerate() {
            println!("  [{}] {}", i + 1, action);
        }
        println!("  [q] quit");

        let answer = prompt(input, "> ")?;
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=actions.len()).contains(&n) => return Ok(Some(actions[n - 1].clone())),
            _ => println!("Pick a number between 1 and {}.", actions.len()),
        }
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn print_events(state: &MatchState, events: &MatchEvents) {
    let names = state.names();
    for event in events {
        println!("{}", event.describe(&names));
    }
}

fn print_result(state: &MatchState) {
    let snapshot = state.snapshot();
    if let Some(outcome) = snapshot.outcome {
        println!();
        println!("{}", outcome.summary);
        if let Some(goals) = outcome.penalty_goals {
            println!(
                "Penalties: {} {} - {} {}",
                snapshot.sides[Side::NonDealer].name,
                goals[Side::NonDealer],
                goals[Side::Dealer],
                snapshot.sides[Side::Dealer].name,
            );
        }
    }
}
