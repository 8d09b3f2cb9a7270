use uuid::Uuid;

use crate::config::loader::GameConfig;
use crate::game::error::ArenaError;
use crate::game::state::Arena;
use crate::game::types::{Coordinate, Direction, PlayerId, PlayerInitialState};

fn config(size: i32, starts: &[(i32, i32, Direction)]) -> GameConfig {
    GameConfig {
        clients_to_play: starts.len(),
        area_virtual_size: size,
        initial_states: starts
            .iter()
            .map(|&(x, y, dir)| PlayerInitialState {
                start_position: Coordinate::new(x, y),
                initial_direction: dir,
            })
            .collect(),
    }
}

/// Arena with one player seated per start, in order.
fn arena_with(size: i32, starts: &[(i32, i32, Direction)]) -> (Arena, Vec<PlayerId>) {
    let mut arena = Arena::new(&config(size, starts)).expect("valid arena");
    let ids: Vec<PlayerId> = starts.iter().map(|_| Uuid::new_v4()).collect();
    for (i, id) in ids.iter().enumerate() {
        arena.create_player(*id, i + 1).expect("seat available");
    }
    (arena, ids)
}

fn alive(arena: &Arena, id: PlayerId) -> bool {
    arena.player(id).map(|p| p.is_alive()).unwrap_or(false)
}

#[test]
fn test_head_on_collision_is_a_draw() {
    let (mut arena, ids) = arena_with(5, &[(1, 2, Direction::Right), (3, 2, Direction::Left)]);
    let (a, b) = (ids[0], ids[1]);

    let status = arena.step();

    assert_eq!(arena.grid().candidate(a), Some(Coordinate::new(2, 2)));
    assert_eq!(arena.grid().candidate(b), Some(Coordinate::new(2, 2)));
    assert!(!alive(&arena, a));
    assert!(!alive(&arena, b));
    assert!(status.finished);
    assert!(status.is_draw);
    assert_eq!(status.winner(), None);
    assert_eq!(status.players.len(), 2);
    assert!(status.players.iter().all(|p| !p.is_alive));
}

#[test]
fn test_contested_cell_does_not_depend_on_join_order() {
    let starts = [
        (1, 2, Direction::Right),
        (3, 2, Direction::Left),
        (0, 0, Direction::Down),
    ];
    let reversed = [starts[2], starts[1], starts[0]];

    let (mut forward, f_ids) = arena_with(5, &starts);
    let (mut backward, b_ids) = arena_with(5, &reversed);

    let f_status = forward.step();
    let b_status = backward.step();

    assert_eq!(f_status.finished, b_status.finished);
    assert_eq!(f_status.is_draw, b_status.is_draw);
    assert!(f_status.finished);
    assert!(!f_status.is_draw);
    assert_eq!(f_status.winner(), Some(f_ids[2]));
    assert_eq!(b_status.winner(), Some(b_ids[0]));
    assert!(!alive(&forward, f_ids[0]) && !alive(&forward, f_ids[1]));
    assert!(!alive(&backward, b_ids[1]) && !alive(&backward, b_ids[2]));
}

#[test]
fn test_clean_tick_grows_every_trail_by_one() {
    let (mut arena, ids) = arena_with(10, &[(1, 1, Direction::Right), (8, 8, Direction::Left)]);
    for id in &ids {
        assert_eq!(arena.grid().trail_length(*id), 1);
    }

    for tick in 1..=3 {
        let status = arena.step();
        assert!(!status.finished);
        arena.flush();
        for id in &ids {
            assert_eq!(arena.grid().trail_length(*id), 1 + tick);
        }
    }
    assert_eq!(arena.grid().owner(Coordinate::new(4, 1)), Some(ids[0]));
    assert_eq!(arena.grid().owner(Coordinate::new(5, 8)), Some(ids[1]));
}

#[test]
fn test_wall_kills_and_survivor_wins() {
    let (mut arena, ids) = arena_with(5, &[(0, 0, Direction::Left), (4, 4, Direction::Up)]);

    let status = arena.step();

    assert!(status.finished);
    assert!(!status.is_draw);
    assert_eq!(status.winner(), Some(ids[1]));
    // Dead players are still reported until the flush.
    assert_eq!(arena.players().len(), 2);

    arena.flush();
    assert_eq!(arena.players().len(), 1);
    assert!(arena.player(ids[0]).is_none());
    assert_eq!(arena.grid().trail_length(ids[0]), 0);
    assert_eq!(arena.grid().trail_length(ids[1]), 2);
}

#[test]
fn test_moving_onto_own_trail_is_fatal() {
    let (mut arena, ids) = arena_with(10, &[(2, 2, Direction::Right), (9, 9, Direction::Up)]);
    let a = ids[0];

    for turn in [Direction::Down, Direction::Left] {
        assert!(!arena.step().finished);
        arena.flush();
        assert!(arena.change_player_direction(a, turn));
    }
    assert!(!arena.step().finished);
    arena.flush();
    assert!(arena.change_player_direction(a, Direction::Up));

    let status = arena.step();
    assert_eq!(arena.player(a).map(|p| p.position), Some(Coordinate::new(2, 2)));
    assert!(!alive(&arena, a));
    assert_eq!(status.winner(), Some(ids[1]));
}

#[test]
fn test_other_trail_is_fatal() {
    let (mut arena, ids) = arena_with(6, &[(0, 0, Direction::Right), (2, 1, Direction::Up)]);
    let (a, b) = (ids[0], ids[1]);

    assert!(!arena.step().finished);
    arena.flush();
    assert_eq!(arena.grid().owner(Coordinate::new(2, 0)), Some(b));

    assert!(arena.change_player_direction(b, Direction::Right));
    let status = arena.step();

    assert!(!alive(&arena, a));
    assert!(alive(&arena, b));
    assert_eq!(status.winner(), Some(b));
}

#[test]
fn test_removed_player_leaves_no_trace() {
    let (mut arena, ids) = arena_with(
        5,
        &[(0, 2, Direction::Right), (1, 0, Direction::Down), (4, 4, Direction::Up)],
    );
    let (a, b) = (ids[0], ids[1]);

    assert!(!arena.step().finished);
    arena.flush();
    assert_eq!(arena.grid().owner(Coordinate::new(1, 2)), Some(a));

    arena.remove_player(a);
    for x in 0..5 {
        for y in 0..5 {
            assert_ne!(arena.grid().owner(Coordinate::new(x, y)), Some(a));
        }
    }
    assert_eq!(arena.grid().candidate(a), None);

    // B now drives through A's former cell.
    let status = arena.step();
    assert_eq!(arena.player(b).map(|p| p.position), Some(Coordinate::new(1, 2)));
    assert!(alive(&arena, b));
    assert!(!status.finished);
}

#[test]
fn test_unknown_players_are_ignored() {
    let (mut arena, ids) = arena_with(5, &[(0, 0, Direction::Right), (4, 4, Direction::Left)]);
    let stranger = Uuid::new_v4();

    arena.remove_player(stranger);
    assert!(!arena.change_player_direction(stranger, Direction::Up));
    assert_eq!(arena.players().len(), 2);

    arena.remove_player(ids[0]);
    arena.remove_player(ids[0]);
    assert_eq!(arena.players().len(), 1);
    assert!(!arena.change_player_direction(ids[0], Direction::Down));
}

#[test]
fn test_one_direction_change_between_flushes() {
    let (mut arena, ids) = arena_with(10, &[(5, 5, Direction::Right), (0, 9, Direction::Up)]);
    let a = ids[0];

    assert!(!arena.change_player_direction(a, Direction::Left));
    assert!(arena.change_player_direction(a, Direction::Up));
    assert!(!arena.change_player_direction(a, Direction::Right));

    arena.step();
    assert!(!arena.change_player_direction(a, Direction::Right));
    assert_eq!(arena.player(a).map(|p| p.direction), Some(Direction::Up));

    arena.flush();
    assert!(arena.change_player_direction(a, Direction::Right));
    assert_eq!(arena.player(a).map(|p| p.position), Some(Coordinate::new(5, 4)));
}

#[test]
fn test_create_player_claims_normalized_start() {
    let mut arena = Arena::new(&config(10, &[(-3, 4, Direction::Left), (2, -1, Direction::Up)])).unwrap();
    assert_eq!(arena.initial_states()[0].start_position, Coordinate::new(7, 4));
    assert_eq!(arena.initial_states()[1].start_position, Coordinate::new(2, 9));

    let id = Uuid::new_v4();
    arena.create_player(id, 1).unwrap();
    assert_eq!(arena.grid().owner(Coordinate::new(7, 4)), Some(id));
    assert_eq!(arena.player(id).map(|p| p.direction), Some(Direction::Left));
}

#[test]
fn test_create_player_errors() {
    let mut arena = Arena::new(&config(5, &[(0, 0, Direction::Right)])).unwrap();
    let id = Uuid::new_v4();

    assert_eq!(
        arena.create_player(id, 0),
        Err(ArenaError::NoInitialState { index: 0, available: 1 })
    );
    assert_eq!(
        arena.create_player(id, 2),
        Err(ArenaError::NoInitialState { index: 2, available: 1 })
    );
    arena.create_player(id, 1).unwrap();
    assert_eq!(arena.create_player(id, 1), Err(ArenaError::DuplicatePlayer(id)));
    assert_eq!(arena.players().len(), 1);
}

#[test]
fn test_invalid_area_is_rejected() {
    let err = Arena::new(&config(0, &[(0, 0, Direction::Right)])).unwrap_err();
    assert_eq!(err, ArenaError::InvalidAreaSize(0));
}

#[test]
fn test_drain_changes_reports_moves_and_removals() {
    let (mut arena, ids) = arena_with(5, &[(0, 0, Direction::Left), (2, 2, Direction::Down)]);

    let joined = arena.drain_changes();
    assert_eq!(joined.players.len(), 2);
    assert!(arena.drain_changes().is_empty());

    arena.refresh_all_players_positions();
    let refreshed = arena.drain_changes();
    assert_eq!(refreshed.players.iter().map(|p| p.id).collect::<Vec<_>>(), ids);
    assert_eq!(refreshed.players[1].position, Coordinate::new(2, 2));

    arena.step();
    arena.flush();
    let delta = arena.drain_changes();
    assert_eq!(delta.removed, vec![ids[0]]);
    assert_eq!(delta.players.len(), 1);
    assert_eq!(delta.players[0].position, Coordinate::new(2, 3));
}

#[test]
fn test_dead_players_stop_moving() {
    let (mut arena, ids) = arena_with(
        5,
        &[(0, 0, Direction::Up), (2, 2, Direction::Down), (4, 2, Direction::Up)],
    );
    arena.step();
    assert!(!alive(&arena, ids[0]));
    assert_eq!(arena.player(ids[0]).map(|p| p.position), Some(Coordinate::new(0, -1)));

    // Still present until flushed; the next move phase must skip it.
    let status = arena.step();
    assert_eq!(arena.player(ids[0]).map(|p| p.position), Some(Coordinate::new(0, -1)));
    assert!(!status.finished);
}

#[test]
fn test_empty_arena_reports_a_draw() {
    let (mut arena, ids) = arena_with(5, &[(0, 0, Direction::Right)]);
    arena.remove_player(ids[0]);
    let status = arena.step();
    assert!(status.finished);
    assert!(status.is_draw);
    assert!(status.players.is_empty());
}

#[test]
fn test_start_at_integer_limit_dies_on_the_wall() {
    let (mut arena, ids) = arena_with(5, &[(i32::MAX, 2, Direction::Right), (2, 2, Direction::Down)]);

    let status = arena.step();

    assert!(!alive(&arena, ids[0]));
    assert_eq!(arena.player(ids[0]).map(|p| p.position), Some(Coordinate::new(i32::MAX, 2)));
    assert!(status.finished);
    assert_eq!(status.winner(), Some(ids[1]));
}

#[test]
fn test_unresolvable_start_is_rejected() {
    let err = Arena::new(&config(5, &[(0, 0, Direction::Up), (3, i32::MIN, Direction::Up)])).unwrap_err();
    assert_eq!(err, ArenaError::UnresolvableStart(2));
}
