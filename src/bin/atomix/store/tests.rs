//! Save file tests

use atomix::Position;

use super::*;


fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("atomix-{}-{}.json", name, std::process::id()))
}


#[tokio::test]
async fn save_and_load() {
    let path = temp_path("save");
    let store = FileStore::new(&path);
    let snapshot = Snapshot {
        level: 2,
        atoms: vec![Position::new(3, 1)],
        moves: 5,
        seconds: 61,
        finished: false,
    };

    store.save(&snapshot).await.expect("Could not save");
    assert_eq!(store.load().await.expect("Could not load"), Some(snapshot));
    let _ = fs::remove_file(&path).await;
}


#[tokio::test]
async fn missing_file() {
    let store = FileStore::new(temp_path("missing"));
    assert_eq!(store.load().await.expect("Could not load"), None);
}


#[tokio::test]
async fn corrupt_file() {
    let path = temp_path("corrupt");
    fs::write(&path, "not a game").await.expect("Could not write file");
    assert!(FileStore::new(&path).load().await.is_err());
    let _ = fs::remove_file(&path).await;
}
