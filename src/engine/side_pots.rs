use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};
use crate::engine::errors::EngineError;
use crate::eval::EvaluatedHand;

/// Сайд-пот: часть банка, в которую участвуют только некоторые места.
///
/// Состав `eligible_seats` фиксируется при создании банка и дальше
/// не растёт; фолды учитываются только на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    /// Порядковый номер создания (0 = main pot).
    pub index: usize,
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Вклад одного места за улицу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreetContribution {
    pub seat: SeatIndex,
    pub committed: Chips,
    pub all_in: bool,
    pub in_hand: bool,
}

/// Выплата из конкретного банка конкретному месту.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub pot_index: usize,
    pub seat: SeatIndex,
    pub amount: Chips,
}

/// Бухгалтерия банков одной раздачи.
///
/// Каждая улица "сворачивается" в упорядоченные слои: по одному на каждую
/// различную сумму all-in плюс остаток сверху. Банки живут до конца раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotLedger {
    pots: Vec<SidePot>,
    /// Кто будет претендовать на следующий открытый банк.
    open_eligible: Vec<SeatIndex>,
    /// Последний банк закрыт капом all-in – следующие фишки идут в новый.
    last_capped: bool,
}

impl PotLedger {
    /// Новая раздача: на первый банк претендуют все места, получившие карты.
    pub fn new(seats: impl IntoIterator<Item = SeatIndex>) -> Self {
        let mut open_eligible: Vec<SeatIndex> = seats.into_iter().collect();
        open_eligible.sort_unstable();
        open_eligible.dedup();
        Self {
            pots: Vec::new(),
            open_eligible,
            last_capped: false,
        }
    }

    pub fn pots(&self) -> &[SidePot] {
        &self.pots
    }

    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Свернуть ставки улицы в банки. Возвращает сколько фишек собрано.
    ///
    /// Для каждой различной суммы all-in (по возрастанию) открытый банк
    /// получает слой min(committed, cap) - предыдущий cap от каждого места,
    /// после чего закрывается, а all-in на этой сумме больше не претендуют
    /// на следующие банки. Остаток выше старшего капа – в новый открытый банк.
    pub fn collect_street(&mut self, contributions: &[StreetContribution]) -> Result<Chips, EngineError> {
        // Сфолдившие не могут претендовать на банки, созданные позже.
        self.open_eligible.retain(|seat| {
            contributions
                .iter()
                .find(|c| c.seat == *seat)
                .map_or(true, |c| c.in_hand)
        });

        let expected: Chips = contributions.iter().map(|c| c.committed).sum();

        let mut caps: Vec<Chips> = contributions
            .iter()
            .filter(|c| c.all_in && !c.committed.is_zero())
            .map(|c| c.committed)
            .collect();
        caps.sort_unstable();
        caps.dedup();

        let mut collected = Chips::ZERO;
        let mut prev = Chips::ZERO;

        for cap in caps {
            let layer: Chips = contributions
                .iter()
                .map(|c| c.committed.min(cap).saturating_sub(prev))
                .sum();
            self.add_to_open(layer);
            collected += layer;

            let capped: Vec<SeatIndex> = contributions
                .iter()
                .filter(|c| c.all_in && c.committed == cap)
                .map(|c| c.seat)
                .collect();
            self.close_open(&capped);
            prev = cap;
        }

        let remainder: Chips = contributions
            .iter()
            .map(|c| c.committed.saturating_sub(prev))
            .sum();
        self.add_to_open(remainder);
        collected += remainder;

        if collected != expected {
            return Err(EngineError::ChipConservation {
                expected,
                actual: collected,
            });
        }

        log::debug!(
            "pots after street: {:?}",
            self.pots.iter().map(|p| (p.amount.0, p.eligible_seats.len())).collect::<Vec<_>>()
        );

        Ok(collected)
    }

    fn add_to_open(&mut self, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        if !self.last_capped {
            if let Some(pot) = self.pots.last_mut() {
                pot.amount += amount;
                return;
            }
        }
        self.pots.push(SidePot {
            index: self.pots.len(),
            amount,
            eligible_seats: self.open_eligible.clone(),
        });
        self.last_capped = false;
    }

    fn close_open(&mut self, capped: &[SeatIndex]) {
        self.last_capped = true;
        self.open_eligible.retain(|s| !capped.contains(s));
    }

    /// Все банки единственному оставшемуся месту, без сравнения рук.
    pub fn award_uncontested(&self, winner: SeatIndex) -> Vec<PotAward> {
        self.pots
            .iter()
            .filter(|p| !p.amount.is_zero())
            .map(|p| PotAward {
                pot_index: p.index,
                seat: winner,
                amount: p.amount,
            })
            .collect()
    }

    /// Раздать банки на шоудауне, от самого старого (самый узкий кап) к новым.
    ///
    /// `in_hand` – места, дошедшие до вскрытия; `hands` – их лучшие руки;
    /// `odd_chip_order` – порядок мест от первого после кнопки, по нему
    /// раздаются лишние фишки при делении.
    pub fn distribute(
        &self,
        in_hand: &[SeatIndex],
        hands: &HashMap<SeatIndex, EvaluatedHand>,
        odd_chip_order: &[SeatIndex],
    ) -> Result<Vec<PotAward>, EngineError> {
        let mut awards = Vec::new();

        for pot in &self.pots {
            if pot.amount.is_zero() {
                continue;
            }

            let mut contenders: Vec<SeatIndex> = pot
                .eligible_seats
                .iter()
                .copied()
                .filter(|s| in_hand.contains(s))
                .collect();
            if contenders.is_empty() {
                // Все претенденты сфолдили – банк разыгрывают оставшиеся.
                contenders = in_hand.to_vec();
            }
            if contenders.is_empty() {
                return Err(EngineError::Internal("банк без претендентов"));
            }

            if let [only] = contenders.as_slice() {
                awards.push(PotAward {
                    pot_index: pot.index,
                    seat: *only,
                    amount: pot.amount,
                });
                continue;
            }

            let mut best: Option<&EvaluatedHand> = None;
            let mut winners: Vec<SeatIndex> = Vec::new();
            for &seat in &contenders {
                let hand = hands
                    .get(&seat)
                    .ok_or(EngineError::Internal("нет руки для места на шоудауне"))?;
                match best {
                    Some(b) if hand < b => {}
                    Some(b) if hand == b => winners.push(seat),
                    _ => {
                        best = Some(hand);
                        winners.clear();
                        winners.push(seat);
                    }
                }
            }

            awards.extend(split_pot(pot, &winners, odd_chip_order));
        }

        Ok(awards)
    }
}

/// Делим банк поровну; остаток по одной фишке – первым победителям
/// по порядку `odd_chip_order`.
fn split_pot(pot: &SidePot, winners: &[SeatIndex], odd_chip_order: &[SeatIndex]) -> Vec<PotAward> {
    let mut ordered: Vec<SeatIndex> = odd_chip_order
        .iter()
        .copied()
        .filter(|s| winners.contains(s))
        .collect();
    // Места вне порядка (не должно случаться) – в конец, по номеру.
    let mut rest: Vec<SeatIndex> = winners.iter().copied().filter(|s| !ordered.contains(s)).collect();
    rest.sort_unstable();
    ordered.extend(rest);

    let n = ordered.len() as u64;
    let share = pot.amount.0 / n;
    let remainder = pot.amount.0 % n;

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, seat)| PotAward {
            pot_index: pot.index,
            seat,
            amount: Chips(share + u64::from((i as u64) < remainder)),
        })
        .collect()
}
