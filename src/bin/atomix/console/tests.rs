//! Console tests

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use atomix::Position;

use super::*;


const LEVELS: &str = concat!(
    "level 1\n",
    "board\n",
    "####\n",
    "#H.#\n",
    "#..#\n",
    "####\n",
    "goal 2 1\n",
    "H\n",
    "end\n",
    "level 2\n",
    "board\n",
    "#####\n",
    "#H.O#\n",
    "#####\n",
    "goal 1 1\n",
    "HO\n",
    "end\n",
);


fn levels() -> Arc<LevelPack> {
    Arc::new(LEVELS.parse().expect("Could not parse levels"))
}


fn temp_store(name: &str) -> (FileStore, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!("atomix-console-{}-{}.json", name, std::process::id()));
    (FileStore::new(&path), path)
}


async fn run(input: &str, store: Option<FileStore>) -> Vec<String> {
    let mut output = Vec::new();
    serve(input.as_bytes(), &mut output, levels(), 1, store).await.expect("Console failed");
    String::from_utf8(output)
        .expect("Output is not valid UTF-8")
        .lines()
        .map(ToString::to_string)
        .collect()
}


#[tokio::test]
async fn intro() {
    let output = run("", None).await;
    assert_eq!(output[..6], [
        "level 1",
        "####",
        "#H.#",
        "#..#",
        "####",
        "atom 0: H at (1, 1)",
    ]);
}


#[tokio::test]
async fn play_through() {
    let output = run("move 0 right\nstatus\nnext\nm 1 l\nquit\nmove 0 down\n", None).await;

    assert!(output.contains(&"atom 0 slid right from (1, 1) to (2, 1)".to_string()));
    assert!(output.contains(&"#.H#".to_string()));
    assert!(output.iter().any(|l| l.starts_with("solved level 1 in 1 moves")));
    assert!(output.contains(&"type 'next' to continue with level 2".to_string()));
    assert!(output.iter().any(|l| l.starts_with("level 1: 1 moves") && l.ends_with("solved, undo available")));
    assert!(output.contains(&"level 2".to_string()));
    assert!(output.iter().any(|l| l.starts_with("solved level 2 in 1 moves")));
    assert!(output.contains(&"that was the last level".to_string()));
    assert!(!output.iter().any(|l| l.contains("slid down")));
}


#[tokio::test]
async fn errors() {
    let output = run("move 0 up\njump\nundo\nmove 4 left\nlevel 9\nsave\n", None).await;
    let errors: Vec<_> = output.iter().filter(|l| l.starts_with("error")).collect();
    assert_eq!(errors, [
        "error: Could not move: atom is blocked in that direction",
        "error: no such command 'jump'",
        "error: Could not undo: nothing to undo",
        "error: Could not move: no atom with id 4",
        "error: Could not start level: invalid level: no level number 9",
        "error: No save file configured: found None",
    ]);
}


#[tokio::test]
async fn undo_redraws() {
    let output = run("move 0 down\nundo\nboard\n", None).await;
    assert!(output.contains(&"atom 0 returned to (1, 1)".to_string()));
    assert_eq!(output.iter().filter(|l| *l == "#H.#").count(), 4);
}


#[tokio::test]
async fn resume_saved_game() {
    let (store, path) = temp_store("resume");
    store.save(&Snapshot {
        level: 1,
        atoms: vec![Position::new(1, 2)],
        moves: 3,
        seconds: 10,
        finished: false,
    }).await.expect("Could not save");

    let output = run("status\nmove 0 up\npause\n", Some(store.clone())).await;
    assert!(output.contains(&"#..#".to_string()));
    assert!(output.contains(&"level 1: 3 moves, 10 seconds, in progress, undo unavailable".to_string()));
    assert!(output.contains(&"paused".to_string()));

    let saved = store.load().await.expect("Could not load").expect("No saved game");
    assert_eq!(saved.atoms, vec![Position::new(1, 1)]);
    assert_eq!(saved.moves, 4);
    assert!(!saved.finished);
    let _ = tokio::fs::remove_file(&path).await;
}


#[tokio::test]
async fn finished_game_is_not_resumed() {
    let (store, path) = temp_store("finished");
    store.save(&Snapshot {
        level: 1,
        atoms: vec![Position::new(2, 1)],
        moves: 1,
        seconds: 4,
        finished: true,
    }).await.expect("Could not save");

    let output = run("status\nmove 0 right\n", Some(store.clone())).await;
    assert!(output.iter().any(|l| l.starts_with("level 1: 0 moves")));

    let saved = store.load().await.expect("Could not load").expect("No saved game");
    assert!(saved.finished);
    assert_eq!(saved.moves, 1);
    let _ = tokio::fs::remove_file(&path).await;
}


#[tokio::test]
async fn paused_game_rejects_moves() {
    let output = run("pause\nmove 0 right\nundo\nstatus\nresume\nmove 0 right\nstatus\n", None).await;
    let errors: Vec<_> = output.iter().filter(|l| l.starts_with("error")).collect();
    assert_eq!(errors, [
        "error: Game is paused, type 'resume' to continue: found None",
        "error: Game is paused, type 'resume' to continue: found None",
    ]);
    assert!(output.contains(&"level 1: 0 moves, 0 seconds, in progress (paused), undo unavailable".to_string()));
    assert!(output.iter().any(|l| l.starts_with("solved level 1 in 1 moves")));
    assert!(output.iter().any(|l| l.starts_with("level 1: 1 moves") && l.ends_with("solved, undo available")));
}


#[tokio::test]
async fn switching_levels_ends_pause() {
    let output = run("pause\nlevel 2\nm 1 l\n", None).await;
    assert!(output.iter().any(|l| l.starts_with("solved level 2 in 1 moves")));
    assert!(!output.iter().any(|l| l.starts_with("error")));
}


#[tokio::test]
async fn spawned_console() {
    let (client, server) = io::duplex(1024);
    let task = tokio::spawn(async move {
        let (reader, writer) = io::split(server);
        serve(reader, writer, levels(), 1, None).await
    });

    let (mut replies, mut commands) = io::split(client);
    commands.write_all(b"move 0 right\nquit\n").await.expect("Could not send commands");

    let mut output = String::new();
    replies.read_to_string(&mut output).await.expect("Could not read replies");
    task.await.expect("Console panicked").expect("Console failed");

    assert!(output.lines().any(|l| l.starts_with("solved level 1 in 1 moves")));
}


#[tokio::test]
async fn served_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Could not bind");
    let addr = listener.local_addr().expect("Could not get address");
    let task = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("Could not accept");
        let (reader, writer) = stream.into_split();
        serve(reader, writer, levels(), 2, None).await
    });

    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("Could not connect");
    stream.write_all(b"status\nm 1 left\nquit\n").await.expect("Could not send commands");

    let mut output = String::new();
    stream.read_to_string(&mut output).await.expect("Could not read replies");
    task.await.expect("Console panicked").expect("Console failed");

    let output: Vec<_> = output.lines().collect();
    assert_eq!(output[0], "level 2");
    assert!(output.iter().any(|l| l.starts_with("level 2: 0 moves") && l.ends_with("in progress, undo unavailable")));
    assert!(output.contains(&"that was the last level"));
}
