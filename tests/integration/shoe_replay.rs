//! Full-shoe replays through the public `Session` API.
//!
//! Replays board text end to end and checks the bookkeeping each bettor
//! ends up with, plus the properties that must hold for any input.

use bakura::engine::{parse_outcomes, RosterEntry, Session, SessionConfig};
use bakura::strategy::{MetaAdvisor, ProgressionConfig};
use bakura::types::{HandMark, Outcome, PatternKind, Side};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn session_with(kinds: &[PatternKind], progression: ProgressionConfig) -> Session {
    Session::new(SessionConfig {
        unit: dec!(10),
        roster: kinds.iter().copied().map(RosterEntry::new).collect(),
        progression,
    })
    .unwrap()
}

fn replay(session: &mut Session, board: &str) {
    let outcomes = parse_outcomes(board).unwrap();
    session.add_hands(&outcomes);
}

fn board_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('B'), Just('P'), Just('T')], 0..80)
        .prop_map(|hands| hands.into_iter().collect())
}

/// Both progression switches, in every combination.
fn progression_strategy() -> impl Strategy<Value = ProgressionConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(count_first_miss, tie_advances_sequence)| {
        ProgressionConfig {
            count_first_miss,
            tie_advances_sequence,
            ..ProgressionConfig::default()
        }
    })
}

#[test]
fn test_banker_only_reference_scenario() {
    let mut session = session_with(&[PatternKind::BankerOnly], ProgressionConfig::default());

    let expected_next_stake = [dec!(10), dec!(15), dec!(25), dec!(25), dec!(50), dec!(10)];
    for (hand, expected) in "BPPPBB".chars().zip(expected_next_stake) {
        session.add_hand(hand.to_string().parse::<Outcome>().unwrap());
        let snap = session.snapshot();
        assert_eq!(snap.bettors[0].next_stake, Some(expected), "after {}", snap.board);
    }

    let snap = session.snapshot();
    let view = &snap.bettors[0];
    assert_eq!(view.total_hits, 3);
    assert_eq!(view.total_misses, 3);
    assert_eq!(view.miss_streak, 0);
    assert_eq!(view.rung, 0);
}

#[test]
fn test_alternator_ignores_outcomes() {
    let mut session = session_with(&[PatternKind::AlternatorStartBanker], ProgressionConfig::default());
    let mut expected = Side::Banker;
    for outcome in parse_outcomes("PPPBTBBPTPBB").unwrap() {
        assert_eq!(session.snapshot().bettors[0].next_side, Some(expected));
        session.add_hand(outcome);
        if outcome != Outcome::Tie {
            expected = expected.opposite();
        }
    }
}

#[test]
fn test_terrific_twos_seeded_by_player() {
    let mut session = session_with(&[PatternKind::TerrificTwos], ProgressionConfig::default());
    // T is free, P seeds: sequence P P B B P P B B P P
    replay(&mut session, "TP");
    let predictions: Vec<Side> = parse_outcomes("PPBBPPBBPPP")
        .unwrap()
        .into_iter()
        .map(|o| {
            let side = session.snapshot().bettors[0].next_side.unwrap();
            session.add_hand(o);
            side
        })
        .collect();
    assert_eq!(
        predictions,
        [
            Side::Player, Side::Player, Side::Banker, Side::Banker, Side::Player,
            Side::Player, Side::Banker, Side::Banker, Side::Player, Side::Player,
            Side::Player,
        ]
    );
    // Playing the sequence back exactly hits every time
    let snap = session.snapshot();
    let view = &snap.bettors[0];
    assert_eq!(view.total_misses, 0);
    assert_eq!(view.total_hits, 11);
}

#[test]
fn test_reset_mid_shoe_is_clean() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    replay(&mut session, "BPPPPPPBTP");
    session.reset();
    replay(&mut session, "B");

    let snap = session.snapshot();
    assert_eq!(snap.shoe, 2);
    assert_eq!(snap.board, "B");
    for bettor in &snap.bettors {
        assert_eq!(bettor.log.len(), 1);
        assert_eq!(bettor.miss_streak, 0);
    }
}

const SEQUENCE_KINDS: [PatternKind; 5] = [
    PatternKind::TerrificTwos,
    PatternKind::ThreePattern,
    PatternKind::OneTwoOne,
    PatternKind::TwoThreeTwo,
    PatternKind::Pattern1313,
];

proptest! {
    #[test]
    fn test_every_bettor_logs_every_hand(board in board_strategy(), progression in progression_strategy()) {
        let mut session = session_with(PatternKind::ALL, progression);
        replay(&mut session, &board);
        for bettor in session.bettors() {
            prop_assert_eq!(bettor.log().len(), board.len());
            let judged = bettor.log().iter().filter(|m| **m != HandMark::Free).count() as u32;
            prop_assert_eq!(judged, bettor.total_hits() + bettor.total_misses());
        }
    }

    #[test]
    fn test_ties_never_judged(board in board_strategy(), progression in progression_strategy()) {
        let mut session = session_with(PatternKind::ALL, progression);
        replay(&mut session, &board);
        for bettor in session.bettors() {
            for (outcome, mark) in session.history().iter().zip(bettor.log()) {
                if *outcome == Outcome::Tie {
                    prop_assert_eq!(*mark, HandMark::Free);
                }
            }
        }
    }

    #[test]
    fn test_rung_always_within_ladder(board in board_strategy(), progression in progression_strategy()) {
        let mut session = session_with(PatternKind::ALL, progression);
        for outcome in parse_outcomes(&board).unwrap() {
            session.add_hand(outcome);
            for bettor in session.bettors() {
                prop_assert!(bettor.rung() <= 11);
                prop_assert_eq!(bettor.rung(), (bettor.miss_streak() as usize).min(11));
            }
        }
    }

    #[test]
    fn test_sequence_position_tracks_real_hands(
        board in board_strategy(),
        progression in progression_strategy(),
    ) {
        let ties_advance = progression.tie_advances_sequence;
        let mut session = session_with(&SEQUENCE_KINDS, progression);
        replay(&mut session, &board);

        // The first non-tie hand seeds; later hands advance the pointer,
        // ties only when configured to.
        let history = session.history();
        let seed = history.iter().position(|o| *o != Outcome::Tie);
        let advanced = seed.map_or(0, |idx| {
            history[idx + 1..]
                .iter()
                .filter(|o| ties_advance || **o != Outcome::Tie)
                .count()
        });
        for bettor in session.bettors() {
            match bettor.pattern().steps().map(|s| s.len()) {
                Some(len) => {
                    prop_assert_eq!(bettor.pattern().position(), Some(advanced % len));
                }
                None => {
                    prop_assert!(seed.is_none());
                }
            }
        }
    }

    #[test]
    fn test_snapshot_does_not_disturb_replay(board in board_strategy(), progression in progression_strategy()) {
        let mut plain = session_with(PatternKind::ALL, progression.clone());
        replay(&mut plain, &board);

        let mut observed = session_with(PatternKind::ALL, progression);
        let advisor = MetaAdvisor::default();
        for outcome in parse_outcomes(&board).unwrap() {
            let snap = observed.snapshot();
            let _ = advisor.suggest(&snap.bettors);
            observed.add_hand(outcome);
        }

        prop_assert_eq!(plain.snapshot().bettors, observed.snapshot().bettors);
    }

    #[test]
    fn test_stakes_positive_and_bounded(board in board_strategy(), progression in progression_strategy()) {
        let mut session = session_with(PatternKind::ALL, progression);
        for outcome in parse_outcomes(&board).unwrap() {
            session.add_hand(outcome);
            for view in session.snapshot().bettors {
                if let Some(stake) = view.next_stake {
                    prop_assert!(stake > Decimal::ZERO);
                    // Top rung is 30 units; a doubled stake at most twice that
                    prop_assert!(stake <= dec!(600));
                }
            }
        }
    }
}
