//! Room discovery.
//!
//! Rooms live two levels below the mesh root, `<mesh_dir>/<scene>/<room>/`,
//! and count as valid when they contain [`MESH_FILE_NAME`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Canonical mesh file inside a room directory.
pub const MESH_FILE_NAME: &str = "mesh.obj";

/// A room directory that holds a mesh.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Room {
    /// Scene directory name.
    pub scene: String,
    /// Room directory name.
    pub name: String,
    /// Room directory path.
    pub path: PathBuf,
}

impl Room {
    /// Identifier used for field and chunk file names: `{scene}__{room}`.
    pub fn id(&self) -> String {
        format!("{}__{}", self.scene, self.name)
    }

    /// Path to the room's mesh.
    pub fn mesh_path(&self) -> PathBuf {
        self.path.join(MESH_FILE_NAME)
    }
}

fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|source| PipelineError::Discovery {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    Ok(dirs)
}

/// Collect every `<scene>/<room>` under `mesh_dir` that contains a mesh.
///
/// Rooms without a mesh and stray files are skipped. The result is sorted by
/// scene then room and truncated to `limit` when one is given.
///
/// # Errors
/// Returns `Discovery` if `mesh_dir` or a scene directory cannot be listed.
pub fn find_valid_rooms(mesh_dir: &Path, limit: Option<usize>) -> Result<Vec<Room>> {
    let mut rooms = Vec::new();
    for (scene, scene_path) in subdirectories(mesh_dir)? {
        for (name, path) in subdirectories(&scene_path)? {
            if path.join(MESH_FILE_NAME).exists() {
                rooms.push(Room {
                    scene: scene.clone(),
                    name,
                    path,
                });
            }
        }
    }

    rooms.sort();
    if let Some(limit) = limit {
        rooms.truncate(limit);
    }
    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_and_mesh_path() {
        let room = Room {
            scene: "scene0".to_string(),
            name: "room3".to_string(),
            path: PathBuf::from("outputs/scene0/room3"),
        };
        assert_eq!(room.id(), "scene0__room3");
        assert_eq!(room.mesh_path(), PathBuf::from("outputs/scene0/room3/mesh.obj"));
    }

    #[test]
    fn test_missing_root_is_error() {
        let result = find_valid_rooms(Path::new("/nonexistent/roomsdf/meshes"), None);
        assert!(matches!(result, Err(PipelineError::Discovery { .. })));
    }
}
