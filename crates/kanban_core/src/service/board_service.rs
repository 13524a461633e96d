//! Board store use-case service.
//!
//! # Responsibility
//! - Own the authoritative task collection, its custom order and the active
//!   sort configuration.
//! - Validate writes, persist after every mutation, recover from corrupt
//!   persisted records on load.
//!
//! # Invariants
//! - `order` and `tasks` always hold exactly the same ids, without duplicates.
//! - `order` is the custom order; only `create`, `delete`, `clear` and
//!   `move_to_column` change it.
//! - Failed validation or an unknown id leaves state and storage untouched.
//! - A failed save leaves the in-memory mutation applied and reports the error.

use crate::config::{CoreConfig, SORT_CONFIG_KEY, TASKS_KEY};
use crate::model::sort::{SortConfig, SortOrder};
use crate::model::task::{new_task_id, Column, Task, TaskId, TaskInput, TaskValidationError};
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::view::projection::{project, BoardView};
use crate::view::stats::BoardStats;
use chrono::Utc;
use log::{error, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type BoardResult<T> = Result<T, BoardError>;

/// Error for board store operations.
#[derive(Debug)]
pub enum BoardError {
    /// Input broke one or more task rules.
    Validation(TaskValidationError),
    /// Referenced task does not exist.
    NotFound(TaskId),
    /// Storage transport failure.
    Repo(RepoError),
    /// A record could not be encoded for storage.
    Serialization(serde_json::Error),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode board record: {err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for BoardError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// A persisted record that was discarded while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceCorruption {
    pub key: String,
    pub message: String,
}

impl Display for PersistenceCorruption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "corrupt record `{}`: {}", self.key, self.message)
    }
}

/// Storage keys for the two persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKeys {
    pub tasks: String,
    pub sort_config: String,
}

impl Default for RecordKeys {
    fn default() -> Self {
        Self {
            tasks: TASKS_KEY.to_string(),
            sort_config: SORT_CONFIG_KEY.to_string(),
        }
    }
}

impl From<&CoreConfig> for RecordKeys {
    fn from(config: &CoreConfig) -> Self {
        Self {
            tasks: config.tasks_key.clone(),
            sort_config: config.sort_config_key.clone(),
        }
    }
}

/// Board store over a key-value repository.
pub struct BoardService<R: KeyValueRepository> {
    repo: R,
    keys: RecordKeys,
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
    sort_config: SortConfig,
    recovered: Vec<PersistenceCorruption>,
}

impl<R: KeyValueRepository> BoardService<R> {
    /// Loads the board from `repo` under the well-known record keys.
    pub fn load(repo: R) -> BoardResult<Self> {
        Self::load_with_keys(repo, RecordKeys::default())
    }

    /// Loads the board from `repo` under caller-chosen record keys.
    ///
    /// Missing records start empty/default. Unparsable records are discarded,
    /// logged and kept in `recovered_corruptions()`. The sort config record is
    /// written back immediately, which is a no-op when it was intact.
    ///
    /// # Errors
    /// - `BoardError::Repo` when the repository itself cannot be read or written.
    pub fn load_with_keys(repo: R, keys: RecordKeys) -> BoardResult<Self> {
        let started_at = Instant::now();
        let mut recovered = Vec::new();

        let stored_tasks: Vec<Task> =
            decode_record(&repo, &keys.tasks, &mut recovered)?.unwrap_or_default();
        let sort_config: SortConfig =
            decode_record(&repo, &keys.sort_config, &mut recovered)?.unwrap_or_default();

        let mut tasks = HashMap::with_capacity(stored_tasks.len());
        let mut order = Vec::with_capacity(stored_tasks.len());
        let mut duplicates = 0_usize;
        for task in stored_tasks {
            if tasks.contains_key(&task.id) {
                duplicates += 1;
                continue;
            }
            order.push(task.id.clone());
            tasks.insert(task.id.clone(), task);
        }
        if duplicates > 0 {
            recovered.push(PersistenceCorruption {
                key: keys.tasks.clone(),
                message: format!("dropped {duplicates} task(s) with duplicate ids"),
            });
        }

        for corruption in &recovered {
            warn!(
                "event=board_load module=service status=recovered key={} error={}",
                corruption.key, corruption.message
            );
        }

        let mut service = Self {
            repo,
            keys,
            tasks,
            order,
            sort_config,
            recovered,
        };
        service.save_sort_config()?;

        info!(
            "event=board_load module=service status=ok tasks={} recovered={} duration_ms={}",
            service.order.len(),
            service.recovered.len(),
            started_at.elapsed().as_millis()
        );
        Ok(service)
    }

    /// Creates a task at the end of the custom order.
    ///
    /// # Errors
    /// - `BoardError::Validation` with every violated rule; nothing is stored.
    pub fn create(&mut self, input: TaskInput) -> BoardResult<Task> {
        let valid = input.validate()?;

        let mut id = new_task_id();
        while self.tasks.contains_key(&id) {
            id = new_task_id();
        }
        let task = Task::from_input(id.clone(), Utc::now().timestamp_millis(), valid);

        self.order.push(id.clone());
        self.tasks.insert(id.clone(), task.clone());
        info!(
            "event=task_create module=service status=ok task_id={} column={}",
            id, task.column
        );

        self.save_tasks()?;
        Ok(task)
    }

    /// Replaces the mutable fields of an existing task in place.
    ///
    /// `id`, `created_at` and custom-order position are preserved.
    ///
    /// # Errors
    /// - `BoardError::Validation` with every violated rule.
    /// - `BoardError::NotFound` when `id` is unknown.
    pub fn update(&mut self, id: &str, input: TaskInput) -> BoardResult<Task> {
        let valid = input.validate()?;
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
        task.apply(valid);
        let updated = task.clone();
        info!("event=task_update module=service status=ok task_id={id}");

        self.save_tasks()?;
        Ok(updated)
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    /// - `BoardError::NotFound` when `id` is unknown.
    pub fn delete(&mut self, id: &str) -> BoardResult<Task> {
        let removed = self
            .tasks
            .remove(id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
        self.order.retain(|key| key != id);
        info!("event=task_delete module=service status=ok task_id={id}");

        self.save_tasks()?;
        Ok(removed)
    }

    /// Removes every task (board reset). Returns how many were removed.
    pub fn clear(&mut self) -> BoardResult<usize> {
        let removed = self.order.len();
        self.tasks.clear();
        self.order.clear();
        info!("event=board_clear module=service status=ok removed={removed}");

        self.save_tasks()?;
        Ok(removed)
    }

    /// Moves a task to `target_index` within `target`'s custom-order lane.
    ///
    /// The index addresses the unfiltered lane as it would look without the
    /// moved task; indexes past the end append to the lane. Returns `false`
    /// when the task already sits at that column and index.
    ///
    /// # Errors
    /// - `BoardError::NotFound` when `id` is unknown.
    pub fn move_to_column(
        &mut self,
        id: &str,
        target: Column,
        target_index: usize,
    ) -> BoardResult<bool> {
        let source = self
            .tasks
            .get(id)
            .map(|task| task.column)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
        let Some(position) = self.order.iter().position(|key| key == id) else {
            return Err(BoardError::NotFound(id.to_string()));
        };

        let source_index = self.order[..position]
            .iter()
            .filter(|key| column_of(&self.tasks, key) == Some(source))
            .count();
        let mut target_len = lane_positions(&self.order, &self.tasks, target).len();
        if source == target {
            target_len -= 1;
        }
        let target_index = target_index.min(target_len);

        if source == target && source_index == target_index {
            return Ok(false);
        }

        let moved = self.order.remove(position);
        let lane = lane_positions(&self.order, &self.tasks, target);
        let insert_at = match lane.get(target_index) {
            Some(&slot) => slot,
            None => lane
                .last()
                .map_or(position.min(self.order.len()), |&last| last + 1),
        };
        self.order.insert(insert_at, moved);
        if let Some(task) = self.tasks.get_mut(id) {
            task.column = target;
        }
        info!(
            "event=task_move module=service status=ok task_id={id} from={source} to={target} index={target_index}"
        );

        self.save_tasks()?;
        Ok(true)
    }

    /// Replaces the active sort configuration and persists it.
    pub fn set_sort_config(&mut self, config: SortConfig) -> BoardResult<()> {
        self.sort_config = config;
        self.save_sort_config()
    }

    /// Restores `{mode: custom, order: asc}`.
    pub fn reset_sort_config(&mut self) -> BoardResult<()> {
        self.set_sort_config(SortConfig::default())
    }

    /// Flips asc/desc, keeping the mode. Returns the new order.
    pub fn toggle_sort_order(&mut self) -> BoardResult<SortOrder> {
        let config = SortConfig {
            order: self.sort_config.order.toggled(),
            ..self.sort_config
        };
        self.set_sort_config(config)?;
        Ok(config.order)
    }

    /// Writes both records.
    pub fn save(&mut self) -> BoardResult<()> {
        self.save_tasks()?;
        self.save_sort_config()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Tasks in custom order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort_config
    }

    /// Records discarded by the last load.
    pub fn recovered_corruptions(&self) -> &[PersistenceCorruption] {
        &self.recovered
    }

    /// Projected lanes for the current sort config and `search_query`.
    pub fn view(&self, search_query: &str) -> BoardView {
        project(self.tasks(), self.sort_config, search_query)
    }

    /// Aggregate counts over the whole (unfiltered) board.
    pub fn stats(&self) -> BoardStats {
        BoardStats::from_tasks(self.tasks())
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn into_repo(self) -> R {
        self.repo
    }

    fn save_tasks(&mut self) -> BoardResult<()> {
        let ordered = self.tasks().collect::<Vec<_>>();
        let encoded = serde_json::to_string(&ordered)?;
        let count = ordered.len();
        self.write_record(&self.keys.tasks.clone(), &encoded)?;
        info!("event=board_save module=service status=ok record=tasks tasks={count}");
        Ok(())
    }

    fn save_sort_config(&mut self) -> BoardResult<()> {
        let encoded = serde_json::to_string(&self.sort_config)?;
        self.write_record(&self.keys.sort_config.clone(), &encoded)
    }

    fn write_record(&mut self, key: &str, value: &str) -> BoardResult<()> {
        self.repo.save(key, value).map_err(|err| {
            error!("event=board_save module=service status=error key={key} error={err}");
            BoardError::from(err)
        })
    }
}

fn decode_record<R, T>(
    repo: &R,
    key: &str,
    recovered: &mut Vec<PersistenceCorruption>,
) -> BoardResult<Option<T>>
where
    R: KeyValueRepository,
    T: serde::de::DeserializeOwned,
{
    let Some(raw) = repo.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            recovered.push(PersistenceCorruption {
                key: key.to_string(),
                message: err.to_string(),
            });
            Ok(None)
        }
    }
}

fn column_of(tasks: &HashMap<TaskId, Task>, id: &str) -> Option<Column> {
    tasks.get(id).map(|task| task.column)
}

/// Positions in `order` whose task currently sits in `column`.
fn lane_positions(order: &[TaskId], tasks: &HashMap<TaskId, Task>, column: Column) -> Vec<usize> {
    order
        .iter()
        .enumerate()
        .filter(|(_, id)| column_of(tasks, id) == Some(column))
        .map(|(slot, _)| slot)
        .collect()
}
