use crate::domain::{SeatIndex, SeatState};

/// Все места по кругу, начиная со следующего за `start`; сам `start` – последним.
pub fn clockwise_after(seat_count: usize, start: SeatIndex) -> Vec<SeatIndex> {
    if seat_count == 0 {
        return Vec::new();
    }
    (1..=seat_count)
        .map(|offset| ((start as usize + offset) % seat_count) as SeatIndex)
        .collect()
}

/// Места по кругу после `start`, удовлетворяющие условию.
pub fn collect_seats_after<F>(seats: &[SeatState], start: SeatIndex, pred: F) -> Vec<SeatIndex>
where
    F: Fn(&SeatState) -> bool,
{
    clockwise_after(seats.len(), start)
        .into_iter()
        .filter(|&s| seats.get(s as usize).is_some_and(&pred))
        .collect()
}

/// Найти следующее место по кругу (исключая `start`), удовлетворяющее условию.
pub fn next_seat_where<F>(seats: &[SeatState], start: SeatIndex, pred: F) -> Option<SeatIndex>
where
    F: Fn(&SeatState) -> bool,
{
    collect_seats_after(seats, start, pred)
        .into_iter()
        .find(|&s| s != start)
}

/// Следующая позиция кнопки: ближайшее живое место после текущей.
pub fn next_button(seats: &[SeatState], button: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(seats, button, SeatState::is_alive)
}

/// Места малого и большого блайндов для живых мест.
///
/// Хедз-ап: кнопка ставит SB, второе место – BB.
pub fn blind_seats(seats: &[SeatState], button: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let alive = collect_seats_after(seats, button, SeatState::is_alive);
    match alive.len() {
        0 | 1 => None,
        2 => {
            let bb = alive.iter().copied().find(|&s| s != button)?;
            Some((button, bb))
        }
        _ => Some((alive[0], alive[1])),
    }
}
