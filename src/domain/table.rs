use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::errors::EngineError;

/// Максимум мест: 2 карманные карты на место + 8 карт борда (с сжиганием)
/// должны поместиться в 52-карточную колоду.
pub const MAX_SEATS: usize = 22;

/// Стейки стола (SB/BB/ante).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Анте с каждого места (0 = без анте).
    #[serde(default)]
    pub ante: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips, ante: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
            ante,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.small_blind.is_zero() {
            return Err("TableStakes: small_blind = 0".into());
        }
        if self.big_blind < self.small_blind {
            return Err(format!(
                "TableStakes: big_blind ({}) < small_blind ({})",
                self.big_blind, self.small_blind
            ));
        }
        Ok(())
    }
}

/// Конфиг игры: стартовые стеки по местам и стейки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Стартовый стек для каждого места; индекс вектора = SeatIndex.
    pub starting_stacks: Vec<Chips>,
    pub stakes: TableStakes,
}

impl TableConfig {
    /// Все места с одинаковым стеком.
    pub fn uniform(seats: usize, stack: Chips, stakes: TableStakes) -> Self {
        Self {
            starting_stacks: vec![stack; seats],
            stakes,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.starting_stacks.len()
    }

    /// Жёсткая валидация конфига. Меньше двух мест – фатальная ошибка.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.starting_stacks.len() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        if self.starting_stacks.len() > MAX_SEATS {
            return Err(EngineError::InvalidConfig(format!(
                "TableConfig: {} seats, max is {MAX_SEATS}",
                self.starting_stacks.len()
            )));
        }
        if self.starting_stacks.iter().filter(|s| !s.is_zero()).count() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        self.stakes.validate().map_err(EngineError::InvalidConfig)
    }

    /// Загрузить конфиг из JSON и сразу провалидировать.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let cfg: TableConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(format!("TableConfig JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
