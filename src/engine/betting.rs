use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{SeatIndex, SeatState};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::positions::collect_seats_after;
use crate::engine::validation::{validate_action, ValidatedAction};

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться места.
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Последний агрессор (bet/raise/all-in сверху).
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<SeatIndex>,
}

/// Что произошло после применения действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedAction {
    pub seat: SeatIndex,
    /// Сколько фишек ушло со стека.
    pub added: Chips,
    pub folded: bool,
    pub all_in: bool,
    /// Ставка подняла текущий максимум улицы.
    pub raised: bool,
}

impl BettingRound {
    /// Префлоп: блайнды уже поставлены, первым ходит место после BB.
    pub fn preflop(seats: &[SeatState], big_blind_seat: SeatIndex, big_blind: Chips) -> Self {
        let current_bet = seats.iter().map(|s| s.committed).max().unwrap_or(Chips::ZERO);
        Self {
            street: Street::Preflop,
            current_bet,
            min_raise: big_blind,
            last_aggressor: Some(big_blind_seat),
            to_act: collect_seats_after(seats, big_blind_seat, SeatState::is_active),
        }
    }

    /// Постфлоп: ставок нет, первым ходит первое активное место после кнопки.
    pub fn postflop(street: Street, seats: &[SeatState], button: SeatIndex, big_blind: Chips) -> Self {
        Self {
            street,
            current_bet: Chips::ZERO,
            min_raise: big_blind,
            last_aggressor: None,
            to_act: collect_seats_after(seats, button, SeatState::is_active),
        }
    }

    /// Закрытый раунд: ходить некому (вне раздачи или после шоудауна).
    pub fn closed(street: Street, big_blind: Chips) -> Self {
        Self {
            street,
            current_bet: Chips::ZERO,
            min_raise: big_blind,
            last_aggressor: None,
            to_act: Vec::new(),
        }
    }

    /// Чей сейчас ход. None – раунд завершён.
    ///
    /// Пропускаем тех, кто уже не может ходить (фолд/all-in). Если активное
    /// место осталось одно и оно уже уравняло максимум – ходить некому.
    pub fn next_actor(&self, seats: &[SeatState]) -> Option<SeatIndex> {
        let active = seats.iter().filter(|s| s.is_active()).count();
        let in_hand = seats.iter().filter(|s| s.is_in_hand()).count();
        if in_hand <= 1 {
            return None;
        }
        self.to_act.iter().copied().find(|&seat| {
            seats.get(seat as usize).is_some_and(|p| {
                p.is_active() && !(active == 1 && p.committed >= self.current_bet)
            })
        })
    }

    /// Проверка, завершён ли раунд ставок.
    pub fn is_round_complete(&self, seats: &[SeatState]) -> bool {
        self.next_actor(seats).is_none()
    }

    /// Применить действие. При ошибке валидации ни раунд, ни места не меняются.
    pub fn apply(
        &mut self,
        seats: &mut [SeatState],
        seat: SeatIndex,
        action: &PlayerActionKind,
    ) -> Result<AppliedAction, EngineError> {
        let player = seats
            .get(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?;
        let validated = validate_action(player, action, self)?;

        let mut applied = AppliedAction {
            seat,
            added: Chips::ZERO,
            folded: false,
            all_in: false,
            raised: false,
        };

        match validated {
            ValidatedAction::Fold => {
                seats[seat as usize].fold();
                applied.folded = true;
                self.mark_acted(seat);
            }
            ValidatedAction::Commit { amount, .. } => {
                let player = &mut seats[seat as usize];
                applied.added = player.commit(amount);
                applied.all_in = player.is_all_in();
                let new_bet = player.committed;

                if new_bet > self.current_bet {
                    let raise_size = new_bet - self.current_bet;
                    // Короткий all-in не меняет шаг рейза, но всем остальным
                    // всё равно нужно доставить до нового максимума.
                    let new_min_raise = raise_size.max(self.min_raise);
                    let new_to_act = collect_seats_after(seats, seat, SeatState::is_active)
                        .into_iter()
                        .filter(|&s| s != seat)
                        .collect();
                    self.on_raise(seat, new_bet, new_min_raise, new_to_act);
                    applied.raised = true;
                } else {
                    self.mark_acted(seat);
                }
            }
        }

        Ok(applied)
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Обновить состояние после bet/raise: новый максимум, шаг рейза,
    /// агрессор и очередь (все остальные активные по кругу).
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips, min_raise: Chips, new_to_act: Vec<SeatIndex>) {
        self.current_bet = new_bet;
        self.min_raise = min_raise;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
    }
}
