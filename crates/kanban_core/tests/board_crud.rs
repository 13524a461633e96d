use kanban_core::{
    BoardError, BoardService, Column, KeyValueRepository, MemoryKeyValueRepository, Priority,
    RepoError, RepoResult, TaskInput, ValidationRule,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

fn empty_board() -> BoardService<MemoryKeyValueRepository> {
    BoardService::load(MemoryKeyValueRepository::new()).unwrap()
}

#[test]
fn create_appends_task_with_fresh_id() {
    let mut board = empty_board();
    let mut seen = HashSet::new();

    for index in 0..20 {
        let before = board.len();
        let task = board.create(TaskInput::new(format!("task {index}"))).unwrap();
        assert_eq!(board.len(), before + 1);
        assert!(seen.insert(task.id.clone()), "duplicate id {}", task.id);
        assert_eq!(board.tasks().last().unwrap().id, task.id);
    }
}

#[test]
fn create_stores_normalized_fields_and_creation_time() {
    let mut board = empty_board();
    let task = board
        .create(
            TaskInput::new("  review PR  ")
                .description("  check tests  ")
                .priority(Priority::High)
                .column(Column::InProgress),
        )
        .unwrap();

    assert_eq!(task.title, "review PR");
    assert_eq!(task.description.as_deref(), Some("check tests"));
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.column, Column::InProgress);
    assert!(task.created_at > 0);
    assert_eq!(board.get(&task.id), Some(&task));
}

#[test]
fn create_rejects_invalid_input_without_side_effects() {
    let mut board = empty_board();
    board.create(TaskInput::new("keep")).unwrap();
    let persisted_before = board
        .repo()
        .get("task-manager-tasks")
        .map(str::to_string);

    let err = board
        .create(TaskInput::new("").description("x".repeat(501)))
        .unwrap_err();
    match err {
        BoardError::Validation(validation) => assert_eq!(
            validation.violations,
            vec![
                ValidationRule::TitleRequired,
                ValidationRule::DescriptionTooLong {
                    length: 501,
                    max: 500
                },
            ]
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(board.len(), 1);
    assert_eq!(
        board.repo().get("task-manager-tasks").map(str::to_string),
        persisted_before
    );
}

#[test]
fn update_replaces_fields_and_keeps_identity_and_position() {
    let mut board = empty_board();
    let first = board.create(TaskInput::new("first")).unwrap();
    let second = board.create(TaskInput::new("second")).unwrap();
    let third = board.create(TaskInput::new("third")).unwrap();

    let updated = board
        .update(
            &second.id,
            TaskInput::new("second, revised")
                .priority(Priority::Low)
                .column(Column::Done),
        )
        .unwrap();

    assert_eq!(updated.id, second.id);
    assert_eq!(updated.created_at, second.created_at);
    assert_eq!(updated.title, "second, revised");
    assert_eq!(updated.column, Column::Done);
    let order = board.tasks().map(|t| t.id.clone()).collect::<Vec<_>>();
    assert_eq!(order, vec![first.id, second.id, third.id]);
}

#[test]
fn update_can_clear_description() {
    let mut board = empty_board();
    let task = board
        .create(TaskInput::new("with notes").description("notes"))
        .unwrap();

    let updated = board.update(&task.id, TaskInput::new("with notes")).unwrap();
    assert_eq!(updated.description, None);
}

#[test]
fn update_validates_before_lookup() {
    let mut board = empty_board();
    let task = board.create(TaskInput::new("valid")).unwrap();

    let err = board.update(&task.id, TaskInput::new(" ")).unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
    assert_eq!(board.get(&task.id).unwrap().title, "valid");
}

#[test]
fn update_unknown_id_returns_not_found() {
    let mut board = empty_board();
    let err = board.update("missing", TaskInput::new("x")).unwrap_err();
    assert!(matches!(err, BoardError::NotFound(id) if id == "missing"));
}

#[test]
fn delete_removes_task_and_returns_it() {
    let mut board = empty_board();
    let keep = board.create(TaskInput::new("keep")).unwrap();
    let gone = board.create(TaskInput::new("gone")).unwrap();

    let removed = board.delete(&gone.id).unwrap();
    assert_eq!(removed.id, gone.id);
    assert_eq!(board.len(), 1);
    assert!(board.get(&gone.id).is_none());
    assert_eq!(board.tasks().next().unwrap().id, keep.id);
}

#[test]
fn delete_unknown_id_fails_and_leaves_length_unchanged() {
    let mut board = empty_board();
    board.create(TaskInput::new("only")).unwrap();

    let err = board.delete("does-not-exist").unwrap_err();
    assert!(matches!(err, BoardError::NotFound(_)));
    assert_eq!(board.len(), 1);
}

#[test]
fn delete_twice_reports_not_found_the_second_time() {
    let mut board = empty_board();
    let task = board.create(TaskInput::new("once")).unwrap();

    board.delete(&task.id).unwrap();
    assert!(matches!(
        board.delete(&task.id).unwrap_err(),
        BoardError::NotFound(_)
    ));
}

#[test]
fn clear_removes_everything_and_persists_empty_list() {
    let mut board = empty_board();
    board.create(TaskInput::new("a")).unwrap();
    board.create(TaskInput::new("b")).unwrap();

    assert_eq!(board.clear().unwrap(), 2);
    assert!(board.is_empty());
    assert_eq!(board.repo().get("task-manager-tasks"), Some("[]"));
}

#[test]
fn stats_count_completed_tasks() {
    let mut board = empty_board();
    assert_eq!(board.stats().completion_percentage, 0);

    board.create(TaskInput::new("a").column(Column::Done)).unwrap();
    board.create(TaskInput::new("b").column(Column::Todo)).unwrap();
    board.create(TaskInput::new("c").column(Column::InProgress)).unwrap();

    let stats = board.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completion_percentage, 33);
    assert_eq!(stats.count(Column::Todo), 1);
    assert_eq!(stats.count(Column::InProgress), 1);
    assert_eq!(stats.count(Column::Done), 1);
}

struct ReadOnlyRepository;

impl KeyValueRepository for ReadOnlyRepository {
    fn load(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(None)
    }

    fn save(&mut self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::SchemaNotReady {
            found: 0,
            expected: 1,
        })
    }

    fn remove(&mut self, _key: &str) -> RepoResult<()> {
        Ok(())
    }
}

#[test]
fn load_surfaces_storage_write_failures() {
    let err = BoardService::load(ReadOnlyRepository).err().unwrap();
    assert!(matches!(err, BoardError::Repo(_)));
}

struct SwitchableRepository {
    inner: MemoryKeyValueRepository,
    failing: Rc<Cell<bool>>,
}

impl KeyValueRepository for SwitchableRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> RepoResult<()> {
        if self.failing.get() {
            return Err(RepoError::SchemaNotReady {
                found: 0,
                expected: 1,
            });
        }
        self.inner.save(key, value)
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn failed_save_reports_error_and_keeps_in_memory_change() {
    let failing = Rc::new(Cell::new(false));
    let repo = SwitchableRepository {
        inner: MemoryKeyValueRepository::new(),
        failing: Rc::clone(&failing),
    };
    let mut board = BoardService::load(repo).unwrap();
    board.create(TaskInput::new("saved")).unwrap();

    failing.set(true);
    let err = board.create(TaskInput::new("unsaved")).unwrap_err();
    assert!(matches!(err, BoardError::Repo(_)));
    assert_eq!(board.len(), 2);

    let stored = board.repo().inner.get("task-manager-tasks").unwrap();
    assert!(stored.contains("saved"));
    assert!(!stored.contains("unsaved"));
}
