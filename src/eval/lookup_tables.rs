use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Циклическая последовательность рангов для стритов: "A23456789TJQKA".
/// Туз стоит с обеих сторон – играет и младшим (wheel), и старшим (broadway).
pub const STRAIGHT_SEQUENCE: [Rank; 14] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Количество 5-карточных окон в последовательности (A2345 .. TJQKA).
pub const STRAIGHT_WINDOWS: usize = STRAIGHT_SEQUENCE.len() - 4;

/// Маски всех стритов, индекс 0 = wheel, индекс 9 = broadway.
pub const STRAIGHT_MASKS: [RankMask; STRAIGHT_WINDOWS] = build_straight_masks();

const fn build_straight_masks() -> [RankMask; STRAIGHT_WINDOWS] {
    let mut masks = [0; STRAIGHT_WINDOWS];
    let mut w = 0;
    while w < STRAIGHT_WINDOWS {
        let mut i = 0;
        while i < 5 {
            masks[w] |= rank_to_bit(STRAIGHT_SEQUENCE[w + i]);
            i += 1;
        }
        w += 1;
    }
    masks
}

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    let idx = (rank as u8).saturating_sub(2); // Rank::Two = 2
    1u16 << idx
}

/// Построить маску из списка рангов.
pub fn mask_from_ranks(ranks: impl IntoIterator<Item = Rank>) -> RankMask {
    ranks.into_iter().fold(0, |mask, r| mask | rank_to_bit(r))
}

/// Найти старшее окно стрита в маске рангов.
///
/// Возвращает ранги окна от старшего к младшему; для wheel это `5 4 3 2 A`.
pub fn best_straight_window(rank_mask: RankMask) -> Option<[Rank; 5]> {
    (0..STRAIGHT_WINDOWS)
        .rev()
        .find(|&w| rank_mask & STRAIGHT_MASKS[w] == STRAIGHT_MASKS[w])
        .map(|w| {
            let mut window = [Rank::Two; 5];
            for (i, slot) in window.iter_mut().enumerate() {
                *slot = STRAIGHT_SEQUENCE[w + 4 - i];
            }
            window
        })
}
