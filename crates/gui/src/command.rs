//! JSON command protocol for scripting the editor headlessly.

use serde::{Deserialize, Serialize};
use shared::{EditMode, WallCell};

use crate::harness::EditorHarness;
use crate::state::editor::EditOutcome;

/// A command executed against an `EditorHarness`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add a wall cell directly
    AddWall { x: i32, z: i32 },
    /// Remove a wall cell directly
    RemoveWall { x: i32, z: i32 },
    /// Switch the edit mode
    SetMode { mode: EditMode },
    /// Click the center of a cell through the pointer pipeline
    Click { x: i32, z: i32 },
    /// Replace all walls
    LoadWalls { walls: Vec<WallCell> },
    /// Report mode, cells and mesh statistics
    Inspect,
    /// Export walls as persisted JSON
    ExportWalls,
    /// Remove every wall
    Clear,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut EditorHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddWall { x, z } => {
            let added = harness.add_wall(x, z);
            CommandResponse::ok_with_data(serde_json::json!({ "added": added }))
        }

        AgentCommand::RemoveWall { x, z } => {
            let removed = harness.remove_wall(x, z);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::SetMode { mode } => {
            harness.set_mode(mode);
            CommandResponse::ok()
        }

        AgentCommand::Click { x, z } => match harness.click_cell(x, z) {
            Some(outcome) => {
                let result = match outcome {
                    EditOutcome::Added(_) => "added",
                    EditOutcome::Removed(_) => "removed",
                    EditOutcome::Unchanged(_) => "unchanged",
                };
                CommandResponse::ok_with_data(serde_json::json!({ "result": result }))
            }
            None => CommandResponse::err(format!("cell ({x}, {z}) is not pickable")),
        },

        AgentCommand::LoadWalls { walls } => {
            harness.editor.replace_all(&walls);
            CommandResponse::ok_with_data(serde_json::json!({ "walls": harness.wall_count() }))
        }

        AgentCommand::Inspect => {
            let mesh = harness.mesh();
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": harness.editor.mode(),
                "wall_count": harness.wall_count(),
                "beam_count": harness.beam_count(),
                "vertex_count": mesh.geometry.vertex_count(),
                "triangle_count": mesh.geometry.triangle_count(),
                "cells": harness.cells(),
            }))
        }

        AgentCommand::ExportWalls => {
            let json = harness.export_walls_json();
            CommandResponse::ok_with_data(serde_json::json!({ "walls_json": json }))
        }

        AgentCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut EditorHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut EditorHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_set_mode() {
        let json = r#"{"command": "set_mode", "mode": "WALL_DELETE"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::SetMode { mode: EditMode::WallDelete }));
    }

    #[test]
    fn test_command_serde_add_wall() {
        let cmd: AgentCommand =
            serde_json::from_str(r#"{"command": "add_wall", "x": 3, "z": -1}"#).unwrap();
        match cmd {
            AgentCommand::AddWall { x, z } => assert_eq!((x, z), (3, -1)),
            _ => panic!("Expected AddWall"),
        }
    }

    #[test]
    fn test_execute_click_and_inspect() {
        let mut h = EditorHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "click", "x": 0, "z": 0}"#).unwrap();
        assert_eq!(resp.data.unwrap()["result"], "added");

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["wall_count"], 1);
        assert_eq!(data["mode"], "WALL_ADD");
        assert_eq!(data["vertex_count"], 24);
    }

    #[test]
    fn test_execute_batch() {
        let mut h = EditorHarness::new();
        let batch = r#"[
            {"command": "add_wall", "x": 0, "z": 0},
            {"command": "add_wall", "x": 0, "z": 0},
            {"command": "add_wall", "x": 1, "z": 0},
            {"command": "set_mode", "mode": "WALL_DELETE"},
            {"command": "click", "x": 1, "z": 0}
        ]"#;
        let responses = execute_json_batch(&mut h, batch).unwrap();
        assert_eq!(responses.len(), 5);
        assert_eq!(responses[1].data.as_ref().unwrap()["added"], false);
        assert_eq!(responses[4].data.as_ref().unwrap()["result"], "removed");
        assert_eq!(h.wall_count(), 1);
    }

    #[test]
    fn test_execute_export_walls() {
        let mut h = EditorHarness::new();
        h.add_wall(2, 2);
        let resp = execute_json(&mut h, r#"{"command": "export_walls"}"#).unwrap();
        let data = resp.data.unwrap();
        let json = data["walls_json"].as_str().unwrap();
        assert!(json.contains(r#""x":2"#));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = EditorHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
    }
}
