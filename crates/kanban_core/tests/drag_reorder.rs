use kanban_core::{
    BoardError, BoardService, Column, DragLocation, DragResult, MemoryKeyValueRepository,
    Priority, SortConfig, SortMode, SortOrder, TaskId, TaskInput,
};

type Board = BoardService<MemoryKeyValueRepository>;

fn board_with(tasks: &[(&str, Column)]) -> (Board, Vec<TaskId>) {
    let mut board = BoardService::load(MemoryKeyValueRepository::new()).unwrap();
    let ids = tasks
        .iter()
        .map(|(title, column)| {
            board
                .create(TaskInput::new(*title).column(*column))
                .unwrap()
                .id
        })
        .collect();
    (board, ids)
}

fn lane(board: &Board, column: Column) -> Vec<String> {
    board
        .tasks()
        .filter(|task| task.column == column)
        .map(|task| task.title.clone())
        .collect()
}

fn drag(id: &TaskId, from: (Column, usize), to: Option<(Column, usize)>) -> DragResult {
    DragResult {
        task_id: id.clone(),
        source: DragLocation::new(from.0, from.1),
        destination: to.map(|(column, index)| DragLocation::new(column, index)),
    }
}

#[test]
fn cancelled_drag_changes_nothing() {
    let (mut board, ids) = board_with(&[("a", Column::Todo), ("b", Column::Todo)]);
    let stored = board.repo().get("task-manager-tasks").unwrap().to_string();

    let changed = board.reorder(&drag(&ids[0], (Column::Todo, 0), None)).unwrap();
    assert!(!changed);
    assert_eq!(lane(&board, Column::Todo), vec!["a", "b"]);
    assert_eq!(board.repo().get("task-manager-tasks").unwrap(), stored);
}

#[test]
fn drop_on_source_slot_changes_nothing() {
    let (mut board, ids) = board_with(&[("a", Column::Todo), ("b", Column::Todo)]);
    let before = board.tasks().cloned().collect::<Vec<_>>();

    let changed = board
        .reorder(&drag(&ids[1], (Column::Todo, 1), Some((Column::Todo, 1))))
        .unwrap();
    assert!(!changed);
    assert_eq!(board.tasks().cloned().collect::<Vec<_>>(), before);
}

#[test]
fn move_to_current_column_and_index_is_a_no_op() {
    let (mut board, ids) = board_with(&[
        ("a", Column::Todo),
        ("x", Column::Done),
        ("b", Column::Todo),
    ]);
    let before = board.tasks().cloned().collect::<Vec<_>>();

    assert!(!board.move_to_column(&ids[2], Column::Todo, 1).unwrap());
    assert!(!board.move_to_column(&ids[2], Column::Todo, 99).unwrap());
    assert_eq!(board.tasks().cloned().collect::<Vec<_>>(), before);
}

#[test]
fn move_across_columns_sets_column_and_position() {
    let (mut board, ids) = board_with(&[
        ("a", Column::Todo),
        ("x", Column::Done),
        ("b", Column::Todo),
    ]);

    let changed = board
        .reorder(&drag(&ids[1], (Column::Done, 0), Some((Column::Todo, 1))))
        .unwrap();
    assert!(changed);
    assert_eq!(board.get(&ids[1]).unwrap().column, Column::Todo);
    assert_eq!(lane(&board, Column::Todo), vec!["a", "x", "b"]);
    assert!(lane(&board, Column::Done).is_empty());
}

#[test]
fn move_within_column_down_and_up() {
    let (mut board, ids) = board_with(&[
        ("a", Column::Todo),
        ("b", Column::Todo),
        ("c", Column::Todo),
    ]);

    board.move_to_column(&ids[0], Column::Todo, 2).unwrap();
    assert_eq!(lane(&board, Column::Todo), vec!["b", "c", "a"]);

    board.move_to_column(&ids[2], Column::Todo, 0).unwrap();
    assert_eq!(lane(&board, Column::Todo), vec!["c", "b", "a"]);

    board.move_to_column(&ids[0], Column::Todo, 1).unwrap();
    assert_eq!(lane(&board, Column::Todo), vec!["c", "a", "b"]);
}

#[test]
fn index_past_lane_end_appends() {
    let (mut board, ids) = board_with(&[
        ("a", Column::Todo),
        ("p", Column::InProgress),
        ("q", Column::InProgress),
    ]);

    board.move_to_column(&ids[0], Column::InProgress, 10).unwrap();
    assert_eq!(lane(&board, Column::InProgress), vec!["p", "q", "a"]);
    assert!(lane(&board, Column::Todo).is_empty());
}

#[test]
fn move_into_empty_column() {
    let (mut board, ids) = board_with(&[("a", Column::Todo), ("b", Column::Todo)]);

    assert!(board.move_to_column(&ids[1], Column::Done, 0).unwrap());
    assert_eq!(lane(&board, Column::Done), vec!["b"]);
    assert_eq!(lane(&board, Column::Todo), vec!["a"]);
    assert_eq!(board.len(), 2);
}

#[test]
fn move_persists_new_order() {
    let (mut board, ids) = board_with(&[("a", Column::Todo), ("b", Column::Todo)]);
    board.move_to_column(&ids[1], Column::Todo, 0).unwrap();

    let reloaded = BoardService::load(board.into_repo()).unwrap();
    assert_eq!(lane(&reloaded, Column::Todo), vec!["b", "a"]);
}

#[test]
fn drag_under_sorted_mode_updates_custom_order() {
    let mut board = BoardService::load(MemoryKeyValueRepository::new()).unwrap();
    let low = board
        .create(TaskInput::new("low").priority(Priority::Low))
        .unwrap();
    board
        .create(TaskInput::new("high").priority(Priority::High))
        .unwrap();
    board
        .set_sort_config(SortConfig::new(SortMode::Priority, SortOrder::Asc))
        .unwrap();

    let changed = board
        .reorder(&drag(&low.id, (Column::Todo, 0), Some((Column::Todo, 1))))
        .unwrap();
    assert!(changed);
    let sorted = board.view("");
    assert_eq!(sorted.todo[0].title, "high");
    assert_eq!(sorted.todo[1].title, "low");

    board.reset_sort_config().unwrap();
    let custom = board.view("");
    let titles = custom
        .todo
        .iter()
        .map(|task| task.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["high", "low"]);
}

#[test]
fn moving_unknown_task_is_not_found() {
    let (mut board, _) = board_with(&[("a", Column::Todo)]);

    let err = board
        .reorder(&drag(
            &"ghost".to_string(),
            (Column::Todo, 0),
            Some((Column::Done, 0)),
        ))
        .unwrap_err();
    assert!(matches!(err, BoardError::NotFound(_)));
}
