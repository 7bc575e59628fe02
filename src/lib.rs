//! Движок No-Limit Texas Hold'em.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, места, конфиг стола;
//! - `eval` – оценка лучшей 5-карточной руки из 5..7 карт;
//! - `engine` – раунды ставок, сайд-поты, оркестрация раздачи (`GameState`);
//! - `infra` – реализации RNG.
//!
//! Логирование через фасад `log`: подключение логгера – забота бинарника.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Card, Chips, HandSummary, SeatIndex, Street, TableConfig, TableStakes};
pub use engine::{
    DecisionContext, DecisionSource, EngineError, GameState, HandStatus, PlayerAction, PlayerActionKind,
    RandomSource,
};
pub use eval::{evaluate_best_hand, EvaluatedHand, HandCategory};
pub use infra::{DeterministicRng, SystemRng};
