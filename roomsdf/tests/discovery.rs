//! Room discovery against a real directory tree.

use std::fs;
use std::path::Path;

use roomsdf::{find_valid_rooms, MESH_FILE_NAME};
use tempfile::TempDir;

fn add_room(root: &Path, scene: &str, room: &str, with_mesh: bool) {
    let dir = root.join(scene).join(room);
    fs::create_dir_all(&dir).unwrap();
    if with_mesh {
        fs::write(dir.join(MESH_FILE_NAME), "v 0 0 0\n").unwrap();
    }
}

#[test]
fn rooms_without_mesh_are_ignored() {
    let root = TempDir::new().unwrap();
    add_room(root.path(), "sceneA", "room1", true);
    add_room(root.path(), "sceneA", "room2", false);

    let rooms = find_valid_rooms(root.path(), None).unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].scene, "sceneA");
    assert_eq!(rooms[0].name, "room1");
    assert_eq!(rooms[0].mesh_path(), root.path().join("sceneA/room1/mesh.obj"));
}

#[test]
fn rooms_are_sorted_and_limited() {
    let root = TempDir::new().unwrap();
    add_room(root.path(), "sceneB", "room0", true);
    add_room(root.path(), "sceneA", "room2", true);
    add_room(root.path(), "sceneA", "room1", true);
    fs::write(root.path().join("README.txt"), "not a scene").unwrap();
    fs::write(root.path().join("sceneA").join("notes.txt"), "not a room").unwrap();

    let ids: Vec<String> = find_valid_rooms(root.path(), None)
        .unwrap()
        .iter()
        .map(|room| room.id())
        .collect();
    assert_eq!(ids, ["sceneA__room1", "sceneA__room2", "sceneB__room0"]);

    let limited = find_valid_rooms(root.path(), Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[1].id(), "sceneA__room2");

    assert!(find_valid_rooms(root.path(), Some(0)).unwrap().is_empty());
}

#[test]
fn empty_root_has_no_rooms() {
    let root = TempDir::new().unwrap();
    assert!(find_valid_rooms(root.path(), None).unwrap().is_empty());
}
