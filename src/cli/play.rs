//! Play command implementation.

use std::io;
use std::path::PathBuf;

use paddy::config::SessionConfig;
use paddy::game::GameState;
use paddy::persist::{FileStore, SnapshotStore};
use paddy::report::CsvReporter;
use paddy::session::RoundController;
use paddy::RandomAgent;
use tracing::info;

use super::console::{Console, SetupChoice};
use super::CliError;

/// Flags of the `play` command.
#[derive(Debug, Clone)]
pub(crate) struct PlayOptions {
    /// Board size; asked interactively when neither this nor `load` is set.
    pub(crate) size: Option<usize>,
    /// Resume the saved game instead of starting a new one.
    pub(crate) load: bool,
    /// Opponent seed.
    pub(crate) seed: Option<u64>,
    /// Snapshot file override.
    pub(crate) save_path: Option<PathBuf>,
    /// Export file override.
    pub(crate) export_path: Option<PathBuf>,
    /// JSON configuration file.
    pub(crate) config: Option<PathBuf>,
    /// Colour the board.
    pub(crate) color: bool,
}

impl PlayOptions {
    fn session_config(&self) -> Result<SessionConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_file(path)?,
            None => SessionConfig::default(),
        };
        if self.size.is_some() {
            config.board_size = self.size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(path) = &self.save_path {
            config.save_path.clone_from(path);
        }
        if let Some(path) = &self.export_path {
            config.export_path.clone_from(path);
        }
        Ok(config)
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an explicit load
/// fails, or input ends before the game is decided.
pub(crate) fn execute(options: &PlayOptions) -> Result<(), CliError> {
    let config = options.session_config()?;
    let mut console = Console::new(io::stdin().lock(), io::stdout(), options.color);
    let store = FileStore::new(&config.save_path);

    let state = if options.load {
        store.load()?
    } else if let Some(size) = config.board_size {
        GameState::new(size)?
    } else {
        setup(&mut console, &store)?
    };

    let agent = config.seed.map_or_else(RandomAgent::from_entropy, RandomAgent::new);
    info!(seed = agent.seed(), "opponent ready");

    let reporter = CsvReporter::new(&config.export_path);
    let mut controller = RoundController::new(state, console, agent, store, reporter);
    let outcome = controller.run(None)?;
    info!(%outcome, rounds = controller.rounds_played(), "session finished");
    Ok(())
}

/// Ask for a new game or the saved one. Invalid board sizes are reported
/// and asked again; a failed load is fatal.
fn setup<R, W>(console: &mut Console<R, W>, store: &FileStore) -> Result<GameState, CliError>
where
    R: io::BufRead,
    W: io::Write,
{
    match console.ask_setup()? {
        SetupChoice::Load => Ok(store.load()?),
        SetupChoice::New => loop {
            let size = console.ask_board_size()?;
            match GameState::new(size) {
                Ok(state) => return Ok(state),
                Err(e) => console.report(&e),
            }
        },
    }
}
