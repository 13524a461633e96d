//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kanban_core` linkage and storage wiring outside any UI host.
//! - Print the board at the configured database path, lane by lane.

use kanban_core::db::open_db;
use kanban_core::{
    init_logging, BoardService, Column, CoreConfig, RecordKeys, SqliteKeyValueRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());

    match print_board(&CoreConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kanban board unavailable: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_board(config: &CoreConfig) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let repo = SqliteKeyValueRepository::try_new(&conn)?;
    let board = BoardService::load_with_keys(repo, RecordKeys::from(config))?;
    for corruption in board.recovered_corruptions() {
        log::warn!("event=cli_load module=cli status=recovered key={}", corruption.key);
        eprintln!("warning: {corruption}");
    }

    let stats = board.stats();
    println!(
        "board db={} tasks={} completed={} progress={}%",
        config.db_path.display(),
        stats.total,
        stats.completed,
        stats.completion_percentage
    );

    let view = board.view("");
    for column in Column::ALL {
        println!("{} ({})", column.title(), stats.count(column));
        for task in view.lane(column) {
            let deadline = task
                .deadline
                .map(|deadline| format!(" due {}", deadline.display()))
                .unwrap_or_default();
            println!("  - [{:?}] {}{}", task.priority, task.title, deadline);
        }
    }
    Ok(())
}
