//! Cave Adventure entry point
//!
//! Parses command-line flags, loads the story and runs the title menu.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use cave_adventure::persistence::{JsonFileStore, SessionStore};
use cave_adventure::platform::Terminal;
use cave_adventure::{Error, Result, Session, SessionManager, Settings, StoryGraph, TextSpeed};

const BANNER: &str = include_str!("../content/banner.txt");

const MAIN_MENU: [&str; 4] = ["New Game", "Load Game", "Delete Game", "Exit"];

#[derive(Debug, Parser)]
#[command(name = "cave-adventure", version, about = "A text adventure in the Cave of Shadows")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Save file (overrides settings)
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Story document to play instead of the bundled adventure
    #[arg(long)]
    story: Option<PathBuf>,

    /// Text speed for new games: instant, fast, normal or slow
    #[arg(long)]
    text_speed: Option<TextSpeed>,

    /// Validate the story and exit
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if let Some(path) = &self.save_file {
            settings.save_file = path.clone();
        }
        if let Some(path) = &self.story {
            settings.story_file = Some(path.clone());
        }
        if let Some(speed) = self.text_speed {
            settings.text_speed = speed;
        }
        settings
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // Closed stdin at a prompt is a normal way to quit
        Err(Error::Prompt(e)) if e.kind() == io::ErrorKind::UnexpectedEof => ExitCode::SUCCESS,
        Err(e) => {
            if let Error::InvalidStory(problems) = &e {
                for problem in problems {
                    eprintln!("  - {problem}");
                }
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings();
    let graph = match &settings.story_file {
        Some(path) => StoryGraph::load(path)?,
        None => StoryGraph::bundled()?,
    };
    log::info!("Story ready: {} locations", graph.len());

    if cli.check {
        println!("Story OK: {} locations, start \"{}\"", graph.len(), graph.start());
        return Ok(());
    }

    let manager = SessionManager::new(Arc::new(graph), JsonFileStore::new(&settings.save_file))
        .with_preferences(settings.display_preferences());
    let mut term = Terminal::stdio();

    term.say(&format!("Welcome to...\n{BANNER}"))?;
    if let Some(title) = manager.graph().title() {
        term.say(title)?;
    }

    loop {
        let session = match term.menu("Choose an option: ", &MAIN_MENU)? {
            0 => new_game(&manager, &mut term)?,
            1 => match load_game(&manager, &mut term) {
                Ok(Some(session)) => session,
                Ok(None) => continue,
                Err(e) if ends_game_only(&e) => {
                    abandon_game(&mut term, &e)?;
                    continue;
                }
                Err(e) => return Err(e),
            },
            2 => {
                delete_game(&manager, &mut term)?;
                continue;
            }
            _ => return Ok(()),
        };

        match play(&manager, &mut term, session) {
            Ok(()) => {}
            Err(e) if ends_game_only(&e) => abandon_game(&mut term, &e)?,
            Err(e) => return Err(e),
        }
    }
}

/// A broken save ends that game, not the program
fn ends_game_only(e: &Error) -> bool {
    matches!(e, Error::UnknownLocation(_) | Error::ChoiceOutOfRange { .. })
}

fn abandon_game<R: BufRead, W: Write>(term: &mut Terminal<R, W>, e: &Error) -> Result<()> {
    log::error!("{}", e);
    term.say(&format!("This game cannot continue: {e}"))?;
    Ok(())
}

fn new_game<S, R, W>(manager: &SessionManager<S>, term: &mut Terminal<R, W>) -> Result<Session>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    loop {
        let name = term.text("What will you name this save? ")?;
        match manager.create(&name) {
            Ok(session) => return Ok(session),
            Err(e) if e.is_recoverable() => term.say(&format!("{e}. Please pick another name."))?,
            Err(e) => return Err(e),
        }
    }
}

fn load_game<S, R, W>(
    manager: &SessionManager<S>,
    term: &mut Terminal<R, W>,
) -> Result<Option<Session>>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    let saves = manager.list_all()?;
    if saves.is_empty() {
        term.say("No saved games found.")?;
        return Ok(None);
    }

    let labels: Vec<String> = saves.iter().map(|s| s.label()).collect();
    let options: Vec<&str> = labels.iter().map(String::as_str).collect();
    let choice = term.menu("Choose a game: ", &options)?;

    let mut session = match manager.load(&saves[choice].name) {
        Ok(session) => session,
        Err(e) if e.is_recoverable() => {
            term.say(&e.to_string())?;
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    term.say(&format!("{} has been chosen.", session.game_name()))?;

    if manager.can_rewind(&session)?
        && term.confirm("This game has ended. Go back to just before the ending?")?
    {
        manager.rewind(&mut session)?;
    }
    Ok(Some(session))
}

fn delete_game<S, R, W>(manager: &SessionManager<S>, term: &mut Terminal<R, W>) -> Result<()>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    let saves = manager.list_all()?;
    if saves.is_empty() {
        term.say("No saved games found.")?;
        return Ok(());
    }

    let mut labels: Vec<String> = saves.iter().map(|s| s.label()).collect();
    labels.push("Go back".to_string());
    let options: Vec<&str> = labels.iter().map(String::as_str).collect();
    let choice = term.menu("Choose a game: ", &options)?;

    if let Some(save) = saves.get(choice) {
        if manager.delete(&save.name)? {
            term.say(&format!("{} has been deleted.", save.name))?;
        }
    }
    Ok(())
}

fn play<S, R, W>(
    manager: &SessionManager<S>,
    term: &mut Terminal<R, W>,
    mut session: Session,
) -> Result<()>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    let prefs = session.display_preferences().unwrap_or_default();
    term.set_text_speed(prefs.text_speed);

    loop {
        let node = manager.current_node(&session)?;
        term.say(&format!("\nYou are at {}", node.id))?;
        term.reveal(&node.description)?;
        if !node.items.is_empty() {
            term.say(&format!("You found: {}", node.items.join(", ")))?;
        }

        if !manager.advance(&mut session, term)? {
            break;
        }
    }

    if !session.inventory().is_empty() {
        term.say(&format!("You carried: {}", session.inventory().join(", ")))?;
    }
    term.say("Game Over.\n")?;
    Ok(())
}
