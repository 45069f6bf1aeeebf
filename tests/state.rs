use songamizer::api::{Playlist, Track};
use songamizer::color::CardColor;
use songamizer::state::{AppState, Screen};

fn playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.into(),
        name: name.into(),
    }
}

fn track(name: &str) -> Track {
    Track {
        name: name.into(),
        artist: "Artist".into(),
        year: Some("2001".into()),
        stream_url: None,
        spotify_url: None,
    }
}

fn in_game() -> AppState {
    let mut state = AppState::new();
    state.show_playlists();
    state.replace_playlists(vec![playlist("1", "Hits"), playlist("2", "Rock")]);
    state.select(playlist("1", "Hits"));
    assert!(state.enter_game());
    state
}

#[test]
fn test_starts_on_connect() {
    let state = AppState::new();
    assert_eq!(state.screen(), Screen::Connect);
    assert_eq!(state.play_count(), 0);
    assert!(state.session().is_none());
}

#[test]
fn test_enter_game_needs_selection() {
    let mut state = AppState::new();
    state.show_playlists();
    assert!(!state.enter_game());
    assert_eq!(state.screen(), Screen::Playlist);
}

#[test]
fn test_find_playlist_by_id_then_position() {
    let mut state = AppState::new();
    state.replace_playlists(vec![playlist("10", "Ten"), playlist("abc", "Letters"), playlist("1", "One")]);
    assert_eq!(state.find_playlist("abc").map(|p| p.name.as_str()), Some("Letters"));
    // An id match beats a position match.
    assert_eq!(state.find_playlist("1").map(|p| p.name.as_str()), Some("One"));
    assert_eq!(state.find_playlist("2").map(|p| p.name.as_str()), Some("Letters"));
    assert!(state.find_playlist("0").is_none());
    assert!(state.find_playlist("4").is_none());
    assert!(state.find_playlist("nope").is_none());
}

#[test]
fn test_play_count_grows_per_track() {
    let mut state = in_game();
    for i in 1..=3 {
        state.record_track(track(&format!("t{i}")));
        assert_eq!(state.play_count(), i);
    }
}

#[test]
fn test_reveal_without_track_does_nothing() {
    let mut state = in_game();
    assert!(state.reveal().is_none());
    assert_eq!(state.screen(), Screen::Game);
    // The failed reveal did not use up a color.
    state.record_track(track("a"));
    assert_eq!(state.reveal().map(|c| c.color), Some(CardColor::Pink));
}

#[test]
fn test_reveal_captures_count_and_color() {
    let mut state = in_game();
    state.record_track(track("a"));
    state.record_track(track("b"));
    let card = state.reveal().cloned().unwrap();
    assert_eq!(card.name, "b");
    assert_eq!(card.play_count, 2);
    assert_eq!(card.color, CardColor::Pink);
    assert_eq!(state.screen(), Screen::Reveal);

    state.record_track(track("c"));
    assert!(state.reveal_card().is_none());
    assert_eq!(state.reveal().map(|c| c.color), Some(CardColor::Orange));
}

#[test]
fn test_reset_round_keeps_collection_and_colors() {
    let mut state = in_game();
    state.record_track(track("a"));
    state.reveal();
    state.reset_round();
    assert_eq!(state.play_count(), 0);
    assert!(state.current_track().is_none());
    assert_eq!(state.screen(), Screen::Playlist);
    assert_eq!(state.playlists().len(), 2);
    assert_eq!(state.selected().map(|p| p.id.as_str()), Some("1"));

    assert!(state.enter_game());
    state.record_track(track("b"));
    assert_eq!(state.reveal().map(|c| c.color), Some(CardColor::Orange));
}

#[test]
fn test_selection_kept_during_game_reload() {
    let mut state = in_game();
    state.replace_playlists(vec![playlist("2", "Rock")]);
    assert_eq!(state.selected().map(|p| p.id.as_str()), Some("1"));
}

#[test]
fn test_discard_track_keeps_counter() {
    let mut state = in_game();
    state.record_track(track("a"));
    state.reveal();
    state.discard_track();
    assert!(state.current_track().is_none());
    assert!(state.reveal_card().is_none());
    assert_eq!(state.play_count(), 1);
    assert!(state.reveal().is_none());
}

#[test]
fn test_clear_forgets_everything() {
    let mut state = in_game();
    state.record_track(track("a"));
    state.clear();
    assert_eq!(state.screen(), Screen::Connect);
    assert!(state.playlists().is_empty());
    assert!(state.selected().is_none());
    assert_eq!(state.play_count(), 0);
}
