use mandalart_core::{resolve_role, sync_target, CellPos, CellRole, GridState, SYNC_LINKS};

fn pos(row: usize, col: usize) -> CellPos {
    CellPos::new(row, col).unwrap()
}

#[test]
fn every_sub_goal_propagates_to_its_outer_center() {
    let expected = [
        ((3, 3), (1, 1)),
        ((3, 4), (1, 4)),
        ((3, 5), (1, 7)),
        ((4, 3), (4, 1)),
        ((4, 5), (4, 7)),
        ((5, 3), (7, 1)),
        ((5, 4), (7, 4)),
        ((5, 5), (7, 7)),
    ];

    let mut state = GridState::new();
    for (index, ((sr, sc), (tr, tc))) in expected.into_iter().enumerate() {
        let text = format!("goal {index}");
        state.set_cell(pos(sr, sc), text.as_str());
        assert_eq!(state.text(pos(tr, tc)), text);
    }
    assert!(state.grid().is_synced());
}

#[test]
fn writing_health_mirrors_to_top_left_center() {
    let mut state = GridState::new();
    let grid = state.set_cell(pos(3, 3), "Health");
    assert_eq!(grid.cell(pos(1, 1)), "Health");
}

#[test]
fn non_source_writes_touch_only_one_cell() {
    for target in CellPos::all().filter(|p| sync_target(*p).is_none()) {
        let mut state = GridState::new();
        let before = state.snapshot();
        state.set_cell(target, "x");

        for other in CellPos::all() {
            let expected = if other == target { "x" } else { before.cell(other) };
            assert_eq!(state.text(other), expected, "write to {target:?} leaked to {other:?}");
        }
    }
}

#[test]
fn source_writes_touch_exactly_two_cells() {
    for (source, target) in SYNC_LINKS {
        let mut state = GridState::new();
        state.set_cell(source, "sub");
        let changed: Vec<CellPos> = CellPos::all()
            .filter(|p| !state.text(*p).is_empty())
            .collect();
        assert_eq!(changed, {
            let mut pair = vec![source, target];
            pair.sort();
            pair
        });
    }
}

#[test]
fn clearing_a_sub_goal_clears_its_center() {
    let mut state = GridState::new();
    state.set_cell(pos(5, 4), "Hobbies");
    state.set_cell(pos(5, 4), "");
    assert_eq!(state.text(pos(7, 4)), "");
}

#[test]
fn reset_empties_all_cells() {
    let mut state = GridState::new();
    for p in CellPos::all() {
        if resolve_role(p).role != CellRole::SyncedCenter {
            state.set_cell(p, format!("{},{}", p.row(), p.col()));
        }
    }
    assert!(!state.grid().is_empty());

    state.reset();
    for p in CellPos::all() {
        assert_eq!(state.text(p), "");
    }
}

#[test]
fn load_snapshot_trusts_unsynced_pairs() {
    let mut rows = vec![vec![String::new(); 9]; 9];
    rows[3][3] = "Health".to_string();
    rows[1][1] = "Wealth".to_string();

    let mut state = GridState::new();
    state.load_snapshot(rows).unwrap();
    assert_eq!(state.text(pos(3, 3)), "Health");
    assert_eq!(state.text(pos(1, 1)), "Wealth");
    assert!(!state.grid().is_synced());
}
