//! When steps for task CRUD scenarios.

use super::world::TaskBoardWorld;
use rstest_bdd_macros::when;
use serde_json::{Value, json};

#[when(r#"a task titled "{title}" with description "{description}" is posted"#)]
fn post_task_with_description(
    world: &mut TaskBoardWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let payload = json!({ "title": title, "description": description }).to_string();
    post_task(world, &payload)
}

#[when(r#"a task titled "{title}" without a description is posted"#)]
fn post_task_without_description(
    world: &mut TaskBoardWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let payload = json!({ "title": title }).to_string();
    post_task(world, &payload)
}

#[when(r#"the task is updated to title "{title}" and status "{status}""#)]
fn update_task(
    world: &mut TaskBoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let payload = json!({ "title": title, "status": status }).to_string();
    world.request("PUT", &format!("/tasks/{id}"), Some(&payload))?;
    Ok(())
}

#[when("task {id:u64} is deleted")]
fn delete_task(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    world.request("DELETE", &format!("/tasks/{id}"), None)?;
    Ok(())
}

#[when(r#"a "{method}" request is sent to "{uri}""#)]
fn send_request(
    world: &mut TaskBoardWorld,
    method: String,
    uri: String,
) -> Result<(), eyre::Report> {
    world.request(&method, &uri, None)?;
    Ok(())
}

fn post_task(world: &mut TaskBoardWorld, payload: &str) -> Result<(), eyre::Report> {
    let (_, body) = world.request("POST", "/tasks", Some(payload))?;
    world.current_task_id = body.get("id").and_then(Value::as_u64);
    Ok(())
}
