//! Given steps for task CRUD scenarios.

use super::world::{TaskBoardWorld, run_async};
use crate::test_helpers::create_task;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty task board")]
fn empty_task_board(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let (_, listing) = world.request("GET", "/tasks", None)?;
    eyre::ensure!(
        listing.as_array().is_some_and(Vec::is_empty),
        "expected an empty board, found {listing}"
    );
    Ok(())
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_exists(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = run_async(create_task(&world.app, &title, "Created for this scenario"))
        .wrap_err("create task for scenario")?;
    world.current_task_id = Some(id);
    Ok(())
}
