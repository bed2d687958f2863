pub mod game;
pub mod grid;
pub mod journal;
pub mod replay;
pub mod scenario;
pub mod state;
pub mod types;

pub use game::{CellView, Game, SearchOutcome, SearchTarget};
pub use grid::Grid;
pub use journal::{ActionJournal, ActionRecord};
pub use replay::*;
pub use scenario::{GridSpec, PlayerSpec, Scenario, ScenarioError, UnitSpec};
pub use state::{GameState, Player, Unit, UnitStats};
pub use types::*;
