use std::fs;
use std::path::PathBuf;

use draft_hub::board::{BoardQuery, SortKey, big_board, filter_by_name, sort_players};
use draft_hub::dataset::{Dataset, PlayerBio, ScoutService};
use draft_hub::rankings::{Medal, RankDeviation};
use draft_hub::stat_hub::StatHub;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_dataset() -> Dataset {
    Dataset::from_json(&read_fixture("small_board.json")).expect("fixture should parse")
}

fn names<'a>(players: &[&'a PlayerBio]) -> Vec<&'a str> {
    players.iter().map(|p| p.name.as_str()).collect()
}

fn bio(player_id: u32, name: &str) -> PlayerBio {
    PlayerBio {
        player_id,
        name: name.to_string(),
        height: None,
        weight: None,
        current_team: None,
        league: None,
        photo_url: None,
    }
}

#[test]
fn search_is_case_insensitive_and_keeps_order() {
    let players = [bio(1, "John Smith"), bio(2, "Bob Jones"), bio(3, "Amy Lee")];
    let ordered: Vec<&PlayerBio> = players.iter().collect();
    let hits = filter_by_name(ordered, "jo");
    assert_eq!(names(&hits), vec!["John Smith", "Bob Jones"]);
}

#[test]
fn search_does_not_trim_the_query() {
    let players = [bio(1, "John Smith"), bio(2, "Bob Jones"), bio(3, "Amy Lee")];
    let ordered: Vec<&PlayerBio> = players.iter().collect();
    assert!(filter_by_name(ordered.clone(), "smith ").is_empty());
    assert_eq!(names(&filter_by_name(ordered, "SMITH")), vec!["John Smith"]);
}

#[test]
fn scout_sort_puts_unranked_last_in_original_order() {
    let dataset = fixture_dataset();
    let sorted = sort_players(&dataset, &dataset.bio, SortKey::Scout(ScoutService::Espn));
    assert_eq!(
        names(&sorted),
        vec!["Bob Jones", "John Smith", "Amy Lee", "Zed Quinn", "Dan Moore"]
    );
}

#[test]
fn average_sort_uses_same_policy() {
    let dataset = fixture_dataset();
    let sorted = sort_players(&dataset, &dataset.bio, SortKey::AverageRank);
    assert_eq!(
        names(&sorted),
        vec!["Amy Lee", "Bob Jones", "John Smith", "Zed Quinn", "Dan Moore"]
    );
}

#[test]
fn board_sorts_then_filters() {
    let dataset = fixture_dataset();
    let hub = StatHub::build(&dataset);
    let query = BoardQuery {
        search: "JO".to_string(),
        sort: SortKey::default(),
    };
    let rows = big_board(&dataset, &hub.medals, &query);
    let listed: Vec<&str> = rows.iter().map(|r| r.player.name.as_str()).collect();
    assert_eq!(listed, vec!["Bob Jones", "John Smith"]);
}

#[test]
fn board_rows_carry_chips_average_and_medals() {
    let dataset = fixture_dataset();
    let hub = StatHub::build(&dataset);
    let rows = big_board(&dataset, &hub.medals, &BoardQuery::default());
    assert_eq!(rows.len(), dataset.bio.len());

    let john = rows.iter().find(|r| r.player.player_id == 1).unwrap();
    assert_eq!(john.average_rank, Some(10.0));
    assert_eq!(john.chips[0].deviation, RankDeviation::Favorable);
    assert_eq!(john.chips[1].deviation, RankDeviation::Unfavorable);
    assert!(john.medals.iter().any(|m| m.medal == Medal::Gold));

    let zed = rows.iter().find(|r| r.player.player_id == 4).unwrap();
    assert_eq!(zed.average_rank, None);
    assert!(zed.medals.is_empty());
    assert!(zed.chips.iter().all(|c| c.rank.is_none()));
}

#[test]
fn no_matches_is_an_empty_board() {
    let dataset = fixture_dataset();
    let hub = StatHub::build(&dataset);
    let query = BoardQuery {
        search: "nobody".to_string(),
        sort: SortKey::AverageRank,
    };
    assert!(big_board(&dataset, &hub.medals, &query).is_empty());
}
