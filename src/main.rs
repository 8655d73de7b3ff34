mod cli;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tearank::catalogue::{self, SortState};
use tearank::config;
use tearank::discover;
use tearank::error::{Result, TeaError};
use tearank::loader::fetch::Source;
use tearank::loader::{self, Catalogue, LoadOptions, LoadState};
use tearank::report::{self, View};
use tearank::teasonality::personalities::{EXTRA_QUESTION, PERSONALITIES};
use tearank::teasonality::{Quiz, QuizStep};
use tearank::types::config::TearankConfig;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// No matches, alternate ending, or an unfinished quiz.
    pub const INCOMPLETE: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_catalogue(cli: &cli::Cli, cfg: &TearankConfig) -> Result<Catalogue> {
    let location = cli.source.as_deref().unwrap_or(&cfg.source.location);
    let source = Source::resolve(location, &cli.root);
    let options = LoadOptions {
        timeout: Duration::from_secs(cfg.source.timeout_secs),
        retries: cfg.source.retries,
    };

    let mut state = LoadState::Pending;
    state.replace(loader::load(&source, &options));
    state.into_catalogue()
}

fn run(cli: &cli::Cli) -> Result<i32> {
    let cfg = config::load_config(&cli.root)?;

    match &cli.command {
        cli::Commands::List(cmd) => {
            let catalogue = load_catalogue(cli, &cfg)?;
            let state = SortState {
                key: cmd.sort.into(),
                direction: cmd.direction.into(),
            };
            let teas = catalogue::sort(&catalogue.records, state);
            let view = View::Catalogue {
                source: &catalogue.source,
                sort: state,
                teas: &teas,
            };
            let format = cli::output_format(cmd.format, cfg.output.format);
            println!("{}", report::render(&view, format)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Discover(cmd) => {
            let mut profile = cfg.discover.clone();
            if let Some(caffeine) = cmd.caffeine {
                profile.caffeine = caffeine.into();
            }
            if let Some(flavor) = cmd.flavor {
                profile.flavor = flavor.into();
            }
            if !cmd.like.is_empty() {
                profile.liked_types = cmd.like.iter().cloned().collect();
            }
            if !cmd.dislike.is_empty() {
                profile.disliked_types = cmd.dislike.iter().cloned().collect();
            }
            if cmd.max_price.is_some() {
                profile.max_price = cmd.max_price;
            }
            profile.validate()?;

            let catalogue = load_catalogue(cli, &cfg)?;
            let matches = discover::rerank(&catalogue.records, &profile);
            let view = View::Discover {
                profile: &profile,
                matches: &matches,
            };
            let format = cli::output_format(cmd.format, cfg.output.format);
            println!("{}", report::render(&view, format)?);

            if matches.is_empty() {
                Ok(exit_code::INCOMPLETE)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Quiz(cmd) => {
            let catalogue = load_catalogue(cli, &cfg)?;
            let mut quiz = Quiz::new();

            if cmd.answers.is_empty() {
                prompt_quiz(&mut quiz, cmd.enjoys_tea)?;
            } else {
                for answer in &cmd.answers {
                    quiz.answer(*answer)?;
                }
                match (quiz.step(), cmd.enjoys_tea) {
                    (QuizStep::ExtraQuestion, Some(enjoys)) => {
                        quiz.answer_extra(matches!(enjoys, cli::YesNo::Yes))?;
                    }
                    (step, Some(_)) => {
                        tracing::warn!(%step, "--enjoys-tea ignored, extra question not reached");
                    }
                    _ => {}
                }
            }

            let mut rng = match cmd.seed.or(cfg.sampler.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let outcome = quiz.outcome(&catalogue.records, &mut rng);
            let format = cli::output_format(cmd.format, cfg.output.format);
            println!("{}", report::render(&View::Teasonality(&outcome), format)?);

            if outcome.personality.is_some() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::INCOMPLETE)
            }
        }
        cli::Commands::Personalities(cmd) => {
            let view = View::Personalities {
                personalities: &PERSONALITIES,
            };
            let format = cli::output_format(cmd.format, cfg.output.format);
            println!("{}", report::render(&view, format)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

/// Walks the quiz on stdin. Prompts go to stderr so stdout holds only the report.
fn prompt_quiz(quiz: &mut Quiz, enjoys_tea: Option<cli::YesNo>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    while let Some(question) = quiz.current_question() {
        eprintln!("\n{}", question.text);
        for (index, option) in question.options.iter().enumerate() {
            eprintln!("  {}) {}", index + 1, option.label);
        }
        let choice = loop {
            let line = read_prompt(&mut input, "Choose 1-3: ")?;
            match line.parse::<usize>() {
                Ok(choice @ 1..=3) => break choice,
                _ => eprintln!("please enter 1, 2 or 3"),
            }
        };
        quiz.answer(question.options[choice - 1].value)?;
    }

    if quiz.step() == QuizStep::ExtraQuestion {
        let enjoys = match enjoys_tea {
            Some(answer) => matches!(answer, cli::YesNo::Yes),
            None => {
                let line = read_prompt(&mut input, &format!("\n{EXTRA_QUESTION} [y/n]: "))?;
                let normalized = line.to_ascii_lowercase();
                normalized == "y" || normalized == "yes"
            }
        };
        quiz.answer_extra(enjoys)?;
    }
    Ok(())
}

fn read_prompt(input: &mut impl BufRead, prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    io::stderr().flush().map_err(TeaError::Io)?;
    let mut line = String::new();
    if input.read_line(&mut line).map_err(TeaError::Io)? == 0 {
        return Err(TeaError::InvalidAnswer("input ended before the quiz finished".to_string()));
    }
    Ok(line.trim().to_string())
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
