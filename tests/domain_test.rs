//! Интеграционные тесты для доменной модели (crate::domain).

use std::collections::HashSet;

use holdem_engine::domain::*;

#[test]
fn card_parse_and_display() {
    let card: Card = "Ah".parse().unwrap();
    assert_eq!(card, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(card.to_string(), "Ah");

    let card: Card = "tD".parse().unwrap();
    assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(card.to_string(), "Td");

    let cards = parse_cards("2c  7s Kd").unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[1], Card::new(Rank::Seven, Suit::Spades));
}

#[test]
fn card_parse_errors() {
    assert!("A".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
    assert!(parse_cards("Ah Zz").is_err());
}

#[test]
fn rank_values() {
    assert_eq!(Rank::Two.value(), 2);
    assert_eq!(Rank::Ace.value(), 14);
    assert_eq!(Rank::from_value(11), Some(Rank::Jack));
    assert_eq!(Rank::from_value(1), None);
    assert!(Rank::Ace > Rank::King);
}

#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);
    let unique: HashSet<Card> = deck.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);
    assert_eq!(deck.cards[0], Card::new(Rank::Two, Suit::Diamonds));
    assert_eq!(deck.cards[51], Card::new(Rank::Ace, Suit::Spades));
}

#[test]
fn burn_and_draw_takes_one_extra_card() {
    let mut deck = Deck::standard_52();
    let flop = deck.burn_and_draw(3).unwrap();
    assert_eq!(flop.len(), 3);
    assert_eq!(deck.len(), 48);
    // сверху колоды – последний элемент; As сожжён
    assert_eq!(flop[0], Card::new(Rank::King, Suit::Spades));

    let mut short = Deck { cards: deck.cards[..2].to_vec() };
    assert!(short.burn_and_draw(2).is_none());
    assert_eq!(short.len(), 2, "при нехватке колода не трогается");
}

#[test]
fn hole_cards_are_dealt_round_robin() {
    let mut deck = Deck::standard_52();
    let hands = deck.deal_hole_cards(&[2, 0, 1]).unwrap();
    assert_eq!(hands.len(), 3);
    assert_eq!(deck.len(), 46);
    // первая карта первому месту, вторая – через круг
    assert_eq!(hands[0][0], Card::new(Rank::Ace, Suit::Spades));
    assert_eq!(hands[1][0], Card::new(Rank::King, Suit::Spades));
    assert_eq!(hands[0][1], Card::new(Rank::Jack, Suit::Spades));

    let mut tiny = Deck { cards: deck.cards[..5].to_vec() };
    assert!(tiny.deal_hole_cards(&[0, 1, 2]).is_none());
}

#[test]
fn chips_arithmetic_saturates() {
    assert_eq!(Chips(5) + Chips(7), Chips(12));
    assert_eq!(Chips(5) - Chips(7), Chips::ZERO);
    assert_eq!(Chips(5).saturating_sub(Chips(2)), Chips(3));
    let total: Chips = [Chips(1), Chips(2), Chips(3)].iter().sum();
    assert_eq!(total, Chips(6));
    assert_eq!(Chips(42).to_string(), "42");
}

#[test]
fn seat_state_lifecycle() {
    let mut seat = SeatState::new(0, Chips(30));
    assert!(seat.is_active());

    assert_eq!(seat.commit(Chips(10)), Chips(10));
    assert_eq!(seat.committed, Chips(10));
    assert_eq!(seat.holdings, Chips(20));

    // ставка больше стека – берётся остаток, место all-in
    assert_eq!(seat.commit(Chips(50)), Chips(20));
    assert_eq!(seat.status, PlayerStatus::AllIn);
    assert!(seat.is_in_hand());

    seat.settle(Chips::ZERO);
    assert_eq!(seat.status, PlayerStatus::Busted);
    seat.prepare_for_hand();
    assert_eq!(seat.status, PlayerStatus::Busted);

    let empty = SeatState::new(1, Chips::ZERO);
    assert!(!empty.is_alive());
}

#[test]
fn streets_progress_with_board_counts() {
    assert_eq!(Street::Preflop.next(), Some((Street::Flop, 3)));
    assert_eq!(Street::Flop.next(), Some((Street::Turn, 1)));
    assert_eq!(Street::Turn.next(), Some((Street::River, 1)));
    assert_eq!(Street::River.next(), None);
}
