//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `GameState`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие места
//!   - `advance_street` – следующая улица или шоудаун
//!   - `play_hand` – сыграть раздачу целиком через `DecisionSource`

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod side_pots;
pub mod validation;

pub use actions::{DecisionContext, DecisionSource, PlayerAction, PlayerActionKind};
pub use betting::{AppliedAction, BettingRound};
pub use errors::EngineError;
pub use game_loop::{GameState, HandPhase, HandStatus, MAX_ILLEGAL_ATTEMPTS};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use side_pots::{PotAward, PotLedger, SidePot, StreetContribution};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайный индекс в диапазоне `0..upper`.
    fn choose_index(&mut self, upper: usize) -> usize;
}
