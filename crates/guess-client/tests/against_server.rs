// crates/guess-client/tests/against_server.rs

use guess_client::{list_players, PlayerClient};
use guess_core::{GuessOutcome, TARGET_MAX, TARGET_MIN};
use guess_server::{Config, Server};

async fn start_server() -> (String, String) {
    let server = Server::bind(&Config::ephemeral()).await.unwrap();
    let players = server.player_addr().unwrap().to_string();
    let observers = server.observer_addr().unwrap().to_string();
    tokio::spawn(server.run());
    (players, observers)
}

#[tokio::test]
async fn player_finds_the_number() {
    let (players, _) = start_server().await;
    let mut player = PlayerClient::start(&players).await.unwrap();

    let mut found = None;
    for guess in TARGET_MIN..=TARGET_MAX {
        if player.guess(guess).await.unwrap() == GuessOutcome::Correct {
            found = Some(guess);
            break;
        }
    }

    assert!(found.is_some());
    assert!(player.is_finished());
    assert!(player.guess(1).await.is_err());
}

#[tokio::test]
async fn admin_lists_active_players() {
    let (players, observers) = start_server().await;
    assert!(list_players(&observers).await.unwrap().is_empty());

    let _first = PlayerClient::start(&players).await.unwrap();
    let _second = PlayerClient::start(&players).await.unwrap();

    let listed = list_players(&observers).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p.ip.is_loopback()));
}

#[tokio::test]
async fn binary_search_with_hints() {
    let (players, _) = start_server().await;
    let mut player = PlayerClient::start(&players).await.unwrap();

    // Close/Far narrows the candidates; every guess must stay consistent
    // with all previous hints.
    let mut candidates: Vec<i64> = (TARGET_MIN..=TARGET_MAX).collect();
    while let Some(&guess) = candidates.first() {
        let outcome = player.guess(guess).await.unwrap();
        if outcome == GuessOutcome::Correct {
            return;
        }
        candidates.retain(|&c| {
            c != guess
                && match outcome {
                    GuessOutcome::Close => (c - guess).abs() < 5,
                    _ => (c - guess).abs() >= 5,
                }
        });
    }
    panic!("ran out of candidates without a Correct reply");
}
