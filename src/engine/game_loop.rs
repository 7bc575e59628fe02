use std::collections::HashMap;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, SeatResult, Street};
use crate::domain::player::SeatState;
use crate::domain::table::TableConfig;
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{DecisionContext, DecisionSource, PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, clockwise_after, collect_seats_after, next_button};
use crate::engine::side_pots::{PotAward, PotLedger, StreetContribution};
use crate::engine::validation::diff_to_call;
use crate::engine::RandomSource;
use crate::eval::{evaluate_best_hand, EvaluatedHand};

/// Сколько раз подряд `play_hand` переспрашивает место после
/// некорректной ставки, прежде чем принудительно сфолдить его.
pub const MAX_ILLEGAL_ATTEMPTS: usize = 3;

/// Фаза жизненного цикла раздачи.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPhase {
    /// Раздача не идёт, можно начинать новую.
    Idle,
    InProgress,
    /// Нарушен баланс фишек – дальше играть нельзя.
    Aborted,
}

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Ждём действия от места.
    AwaitingAction(SeatIndex),
    /// Раунд ставок на улице завершён, нужен `advance_street`.
    StreetComplete(Street),
    Finished(HandSummary),
}

/// Состояние игры за одним столом: места, кнопка, текущая раздача.
///
/// Оркестрирует улицы: анте и блайнды → префлоп → флоп/тёрн/ривер →
/// шоудаун → выплаты и сдвиг кнопки.
pub struct GameState<R: RandomSource> {
    config: TableConfig,
    seats: Vec<SeatState>,
    button: SeatIndex,
    rng: R,
    deck: Deck,
    board: Vec<Card>,
    street: Street,
    phase: HandPhase,
    betting: BettingRound,
    ledger: PotLedger,
    history: HandHistory,
    hand_id: HandId,
    /// Сколько фишек снято со стеков с начала раздачи.
    chips_in: Chips,
}

impl<R: RandomSource> GameState<R> {
    /// Создать игру. Меньше двух мест – фатальная ошибка конфигурации.
    pub fn new(config: TableConfig, mut rng: R) -> Result<Self, EngineError> {
        config.validate()?;

        let seats: Vec<SeatState> = config
            .starting_stacks
            .iter()
            .enumerate()
            .map(|(i, stack)| SeatState::new(i as SeatIndex, *stack))
            .collect();

        let alive: Vec<SeatIndex> = seats.iter().filter(|s| s.is_alive()).map(|s| s.seat).collect();
        let button = alive
            .get(rng.choose_index(alive.len()))
            .copied()
            .ok_or(EngineError::NotEnoughPlayers)?;

        let betting = BettingRound::closed(Street::Preflop, config.stakes.big_blind);

        Ok(Self {
            config,
            seats,
            button,
            rng,
            deck: Deck { cards: Vec::new() },
            board: Vec::new(),
            street: Street::Preflop,
            phase: HandPhase::Idle,
            betting,
            ledger: PotLedger::default(),
            history: HandHistory::new(),
            hand_id: 0,
            chips_in: Chips::ZERO,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    pub fn seat(&self, seat: SeatIndex) -> Option<&SeatState> {
        self.seats.get(seat as usize)
    }

    pub fn button(&self) -> SeatIndex {
        self.button
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    pub fn hand_id(&self) -> HandId {
        self.hand_id
    }

    pub fn betting(&self) -> &BettingRound {
        &self.betting
    }

    pub fn ledger(&self) -> &PotLedger {
        &self.ledger
    }

    /// История текущей (или последней завершённой) раздачи.
    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    /// Банки + невнесённые в банки ставки текущей улицы.
    pub fn pot_size(&self) -> Chips {
        self.ledger.total() + self.seats.iter().map(|s| s.committed).sum()
    }

    /// Все фишки за столом: стеки + банк. Не меняется между раздачами.
    pub fn total_chips(&self) -> Chips {
        self.seats.iter().map(|s| s.holdings).sum::<Chips>() + self.pot_size()
    }

    pub fn alive_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_alive()).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.alive_count() < 2
    }

    /// Чей сейчас ход (None – раздача не идёт или ставки на улице закрыты).
    pub fn current_actor(&self) -> Option<SeatIndex> {
        if self.phase != HandPhase::InProgress {
            return None;
        }
        self.betting.next_actor(&self.seats)
    }

    /// Что предложить месту: колл, минимальный рейз, потолок.
    pub fn decision_context(&self, seat: SeatIndex) -> Result<DecisionContext, EngineError> {
        self.ensure_in_progress()?;
        let player = self.seat(seat).ok_or(EngineError::InvalidSeat(seat))?;
        Ok(DecisionContext {
            seat,
            street: self.street,
            pot: self.pot_size(),
            community_cards: self.board.clone(),
            hole_cards: player.hole_cards.clone(),
            min_call: diff_to_call(player, &self.betting),
            min_raise: self.betting.min_raise,
            max_raise: player.holdings,
        })
    }

    /// Старт новой раздачи:
    /// - перемешивает колоду;
    /// - постит анте и блайнды;
    /// - раздаёт карманные карты;
    /// - настраивает префлоп-раунд ставок.
    pub fn start_hand(&mut self) -> Result<HandStatus, EngineError> {
        match self.phase {
            HandPhase::Aborted => return Err(EngineError::HandAborted),
            HandPhase::InProgress => return Err(EngineError::HandAlreadyInProgress),
            HandPhase::Idle => {}
        }
        if self.is_game_over() {
            return Err(EngineError::NotEnoughPlayers);
        }
        if !self.seats[self.button as usize].is_alive() {
            self.button = next_button(&self.seats, self.button).ok_or(EngineError::NotEnoughPlayers)?;
        }

        self.hand_id += 1;
        let mut deck = Deck::standard_52();
        self.rng.shuffle(&mut deck.cards);
        self.deck = deck;
        self.board.clear();
        self.street = Street::Preflop;
        self.history = HandHistory::new();
        self.chips_in = Chips::ZERO;
        for seat in self.seats.iter_mut() {
            seat.prepare_for_hand();
        }
        self.ledger = PotLedger::new(self.seats.iter().filter(|s| s.is_alive()).map(|s| s.seat));
        self.phase = HandPhase::InProgress;

        self.history.push(HandEventKind::HandStarted {
            hand_id: self.hand_id,
            button: self.button,
        });
        log::info!(
            "hand #{} started: button={}, seats in={}",
            self.hand_id,
            self.button,
            self.alive_count()
        );

        self.post_antes()?;
        let big_blind_seat = self.post_blinds()?;
        self.betting = BettingRound::preflop(&self.seats, big_blind_seat, self.config.stakes.big_blind);
        self.deal_hole_cards()?;

        Ok(self.pending_status())
    }

    /// Анте уходят сразу в банк отдельным "слоем" до блайндов, чтобы
    /// all-in с одного анте корректно ограничил main pot.
    fn post_antes(&mut self) -> Result<(), EngineError> {
        let ante = self.config.stakes.ante;
        if ante.is_zero() {
            return Ok(());
        }

        let order = collect_seats_after(&self.seats, self.button, SeatState::is_alive);
        let mut contributions = Vec::with_capacity(order.len());
        let mut antes = Vec::with_capacity(order.len());
        for seat in order {
            let player = &mut self.seats[seat as usize];
            let paid = player.pay(ante);
            contributions.push(StreetContribution {
                seat,
                committed: paid,
                all_in: player.is_all_in(),
                in_hand: true,
            });
            antes.push((seat, paid));
            self.chips_in += paid;
        }

        let collected = self.ledger.collect_street(&contributions);
        self.guard(collected)?;
        self.verify_conservation()?;
        self.history.push(HandEventKind::AntesPosted { antes });
        Ok(())
    }

    /// Постинг блайндов. Возвращает место большого блайнда.
    fn post_blinds(&mut self) -> Result<SeatIndex, EngineError> {
        let stakes = self.config.stakes.clone();
        let (sb_seat, bb_seat) = blind_seats(&self.seats, self.button).ok_or(EngineError::NotEnoughPlayers)?;

        let sb_paid = self.seats[sb_seat as usize].commit(stakes.small_blind);
        let bb_paid = self.seats[bb_seat as usize].commit(stakes.big_blind);
        self.chips_in += sb_paid + bb_paid;

        self.history.push(HandEventKind::BlindsPosted {
            small_blind: (sb_seat, sb_paid),
            big_blind: (bb_seat, bb_paid),
        });
        log::debug!("blinds: sb seat {sb_seat} = {sb_paid}, bb seat {bb_seat} = {bb_paid}");
        Ok(bb_seat)
    }

    /// Раздача карманных карт – по одной, по кругу от первого после кнопки.
    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let order = collect_seats_after(&self.seats, self.button, SeatState::is_in_hand);
        let hands = self
            .deck
            .deal_hole_cards(&order)
            .ok_or(EngineError::DeckExhausted)?;

        for (seat, cards) in order.into_iter().zip(hands) {
            self.seats[seat as usize].hole_cards = cards.to_vec();
            self.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: cards.to_vec(),
            });
        }
        Ok(())
    }

    /// Применить действие места. Некорректная ставка возвращается как
    /// ошибка, состояние не меняется – место можно переспросить.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<HandStatus, EngineError> {
        self.ensure_in_progress()?;

        if self.current_actor() != Some(action.seat) {
            return Err(EngineError::NotSeatsTurn(action.seat));
        }

        let applied = match self.betting.apply(&mut self.seats, action.seat, &action.kind) {
            Ok(applied) => applied,
            Err(err) => {
                log::warn!("seat {} action {:?} rejected: {err}", action.seat, action.kind);
                return Err(err);
            }
        };
        self.chips_in += applied.added;

        let new_holdings = self.seats[action.seat as usize].holdings;
        self.history.push(HandEventKind::PlayerActed {
            seat: action.seat,
            action: action.kind,
            added: applied.added,
            new_holdings,
            pot_after: self.pot_size(),
        });
        log::debug!(
            "{:?}: seat {} {:?} (+{}, holdings {})",
            self.street,
            action.seat,
            action.kind,
            applied.added,
            new_holdings
        );

        // Остался один – забирает всё без вскрытия.
        if self.in_hand_count() <= 1 {
            return self.finish_uncontested().map(HandStatus::Finished);
        }

        Ok(self.pending_status())
    }

    /// Перейти на следующую улицу (или к шоудауну после ривера).
    /// Допустимо только когда раунд ставок на текущей улице завершён.
    pub fn advance_street(&mut self) -> Result<HandStatus, EngineError> {
        self.ensure_in_progress()?;

        if self.in_hand_count() <= 1 {
            return self.finish_uncontested().map(HandStatus::Finished);
        }
        if !self.betting.is_round_complete(&self.seats) {
            return Err(EngineError::BettingRoundIncomplete);
        }

        self.collect_street()?;

        match self.street.next() {
            Some((next, count)) => {
                self.deal_board(next, count)?;
                self.betting =
                    BettingRound::postflop(next, &self.seats, self.button, self.config.stakes.big_blind);
                Ok(self.pending_status())
            }
            None => self.finish_showdown().map(HandStatus::Finished),
        }
    }

    /// Сразу к шоудауну: собрать ставки, открыть недостающий борд,
    /// сравнить руки. Оставшиеся раунды ставок пропускаются.
    pub fn force_showdown(&mut self) -> Result<HandSummary, EngineError> {
        self.ensure_in_progress()?;

        if self.in_hand_count() <= 1 {
            return self.finish_uncontested();
        }

        self.collect_street()?;
        while let Some((next, count)) = self.street.next() {
            self.deal_board(next, count)?;
        }
        self.betting = BettingRound::closed(self.street, self.config.stakes.big_blind);
        self.finish_showdown()
    }

    /// Сыграть раздачу целиком, спрашивая решения у `decider`.
    ///
    /// На некорректную ставку место переспрашивается; после
    /// `MAX_ILLEGAL_ATTEMPTS` подряд – принудительный фолд.
    pub fn play_hand<D: DecisionSource>(&mut self, decider: &mut D) -> Result<HandSummary, EngineError> {
        let mut status = self.start_hand()?;
        loop {
            status = match status {
                HandStatus::AwaitingAction(seat) => self.prompt_seat(seat, decider)?,
                HandStatus::StreetComplete(_) => self.advance_street()?,
                HandStatus::Finished(summary) => return Ok(summary),
            };
        }
    }

    fn prompt_seat<D: DecisionSource>(&mut self, seat: SeatIndex, decider: &mut D) -> Result<HandStatus, EngineError> {
        let ctx = self.decision_context(seat)?;
        for _ in 0..MAX_ILLEGAL_ATTEMPTS {
            let kind = decider.decide(&ctx);
            match self.apply_action(PlayerAction::new(seat, kind)) {
                Err(err) if err.is_recoverable() => continue,
                other => return other,
            }
        }
        log::warn!("seat {seat}: {MAX_ILLEGAL_ATTEMPTS} illegal actions in a row, forcing fold");
        self.apply_action(PlayerAction::new(seat, PlayerActionKind::Fold))
    }

    fn pending_status(&self) -> HandStatus {
        match self.betting.next_actor(&self.seats) {
            Some(seat) => HandStatus::AwaitingAction(seat),
            None => HandStatus::StreetComplete(self.street),
        }
    }

    fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_in_hand()).count()
    }

    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        match self.phase {
            HandPhase::InProgress => Ok(()),
            HandPhase::Aborted => Err(EngineError::HandAborted),
            HandPhase::Idle => Err(EngineError::NoActiveHand),
        }
    }

    /// Открыть карты борда (с сжиганием одной).
    fn deal_board(&mut self, street: Street, count: usize) -> Result<(), EngineError> {
        let cards = self
            .deck
            .burn_and_draw(count)
            .ok_or(EngineError::DeckExhausted)?;
        self.board.extend_from_slice(&cards);
        self.street = street;

        self.history.push(HandEventKind::BoardDealt {
            street,
            cards: self.board.clone(),
        });
        log::debug!("{street:?}: board {:?}", self.board.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        Ok(())
    }

    /// Передать ставки улицы в банки и обнулить их у мест.
    fn collect_street(&mut self) -> Result<(), EngineError> {
        let contributions: Vec<StreetContribution> = self
            .seats
            .iter()
            .filter(|s| s.is_alive())
            .map(|s| StreetContribution {
                seat: s.seat,
                committed: s.committed,
                all_in: s.is_all_in(),
                in_hand: s.is_in_hand(),
            })
            .collect();

        let collected = self.ledger.collect_street(&contributions);
        let collected = self.guard(collected)?;
        for seat in self.seats.iter_mut() {
            seat.committed = Chips::ZERO;
        }
        self.verify_conservation()?;

        self.history.push(HandEventKind::StreetCollected {
            street: self.street,
            collected,
            pots_total: self.ledger.total(),
        });
        Ok(())
    }

    /// Все сфолдили, кроме одного: он забирает все банки.
    fn finish_uncontested(&mut self) -> Result<HandSummary, EngineError> {
        self.collect_street()?;
        let winner = self
            .seats
            .iter()
            .find(|s| s.is_in_hand())
            .map(|s| s.seat)
            .ok_or(EngineError::Internal("нет оставшегося места"))?;

        log::debug!("seat {winner} wins uncontested");
        let awards = self.ledger.award_uncontested(winner);
        self.settle(awards, HashMap::new())
    }

    /// Шоудаун: оценить руки всех дошедших и раздать банки.
    fn finish_showdown(&mut self) -> Result<HandSummary, EngineError> {
        self.street = Street::Showdown;

        let in_hand: Vec<SeatIndex> = self.seats.iter().filter(|s| s.is_in_hand()).map(|s| s.seat).collect();
        let mut hands: HashMap<SeatIndex, EvaluatedHand> = HashMap::with_capacity(in_hand.len());
        for &seat in &in_hand {
            let player = &self.seats[seat as usize];
            let hand = evaluate_best_hand(&player.hole_cards, &self.board)?;
            self.history.push(HandEventKind::ShowdownReveal {
                seat,
                hole_cards: player.hole_cards.clone(),
                category: hand.category,
                score: hand.score(),
            });
            log::debug!("showdown: seat {seat} shows {hand}");
            hands.insert(seat, hand);
        }

        let odd_chip_order = clockwise_after(self.seats.len(), self.button);
        let awards = self.ledger.distribute(&in_hand, &hands, &odd_chip_order)?;
        self.settle(awards, hands)
    }

    /// Выплаты, проверка баланса, сброс банков и сдвиг кнопки.
    fn settle(
        &mut self,
        awards: Vec<PotAward>,
        mut hands: HashMap<SeatIndex, EvaluatedHand>,
    ) -> Result<HandSummary, EngineError> {
        let total_pot = self.ledger.total();
        let paid: Chips = awards.iter().map(|a| a.amount).sum();
        if paid != total_pot {
            let err = EngineError::ChipConservation {
                expected: total_pot,
                actual: paid,
            };
            self.abort(&err);
            return Err(err);
        }

        let mut payouts: HashMap<SeatIndex, Chips> = HashMap::new();
        for award in &awards {
            *payouts.entry(award.seat).or_insert(Chips::ZERO) += award.amount;
            self.history.push(HandEventKind::PotAwarded {
                pot_index: award.pot_index,
                seat: award.seat,
                amount: award.amount,
            });
        }

        let results: Vec<SeatResult> = self
            .seats
            .iter()
            .filter(|s| s.is_in_hand())
            .map(|s| SeatResult {
                seat: s.seat,
                hand: hands.remove(&s.seat),
                payout: payouts.get(&s.seat).copied().unwrap_or(Chips::ZERO),
            })
            .collect();

        for seat in self.seats.iter_mut() {
            let payout = payouts.get(&seat.seat).copied().unwrap_or(Chips::ZERO);
            seat.settle(payout);
        }

        let summary = HandSummary {
            hand_id: self.hand_id,
            street_reached: self.street,
            board: self.board.clone(),
            pots: self.ledger.pots().to_vec(),
            total_pot,
            results,
        };

        self.history.push(HandEventKind::HandFinished { hand_id: self.hand_id });
        log::info!(
            "hand #{} finished on {:?}: pot {}, payouts {:?}",
            self.hand_id,
            summary.street_reached,
            total_pot,
            summary.results.iter().map(|r| (r.seat, r.payout.0)).collect::<Vec<_>>()
        );

        self.ledger = PotLedger::default();
        self.chips_in = Chips::ZERO;
        self.betting = BettingRound::closed(self.street, self.config.stakes.big_blind);
        self.phase = HandPhase::Idle;
        if let Some(next) = next_button(&self.seats, self.button) {
            self.button = next;
        }

        Ok(summary)
    }

    /// Банки обязаны сходиться с фишками, снятыми со стеков.
    fn verify_conservation(&mut self) -> Result<(), EngineError> {
        let actual = self.ledger.total();
        if actual != self.chips_in {
            let err = EngineError::ChipConservation {
                expected: self.chips_in,
                actual,
            };
            self.abort(&err);
            return Err(err);
        }
        Ok(())
    }

    fn guard<T>(&mut self, result: Result<T, EngineError>) -> Result<T, EngineError> {
        if let Err(err @ EngineError::ChipConservation { .. }) = &result {
            let err = err.clone();
            self.abort(&err);
        }
        result
    }

    fn abort(&mut self, err: &EngineError) {
        log::error!("hand #{} aborted: {err}", self.hand_id);
        self.history.push(HandEventKind::HandAborted {
            hand_id: self.hand_id,
            reason: err.to_string(),
        });
        self.phase = HandPhase::Aborted;
    }
}
