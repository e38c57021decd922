mod common;

use common::StubBackend;
use game::{
    api::{ApiError, Method},
    battle::{BattleId, BattleStatus, TurnOutcome},
};

fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

//====================================================================

#[test]
fn create_returns_battle_id() {
    let backend = StubBackend::new();
    let api = backend.api();

    let battle_id = api
        .create_battle(&roster(&["Arthur", "Lancelot"]), &roster(&["Mordred"]), 5)
        .wait()
        .unwrap();

    assert!(!battle_id.as_str().is_empty());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "http://stub.local/battles");

    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "team_a": ["Arthur", "Lancelot"], "team_b": ["Mordred"], "level": 5 })
    );
}

#[test]
fn fetched_rosters_match_creation() {
    let backend = StubBackend::new();
    let api = backend.api();

    let team_a = roster(&["Arthur", "Lancelot"]);
    let team_b = roster(&["Mordred", "Morgana", "Merlin"]);

    let battle_id = api.create_battle(&team_a, &team_b, 5).wait().unwrap();
    let summary = api.get_battle(&battle_id).wait().unwrap();

    assert_eq!(summary.team_a.len(), team_a.len());
    assert_eq!(summary.team_b.len(), team_b.len());
    assert_eq!(summary.team_a[1].name(), "Lancelot");
    assert_eq!(summary.state, BattleStatus::Ongoing);
    assert_eq!(summary.turn, 0);
}

#[test]
fn next_turn_advances_by_one() {
    let backend = StubBackend::new();
    let api = backend.api();

    let battle_id = api
        .create_battle(&roster(&["Arthur"]), &roster(&["Mordred"]), 5)
        .wait()
        .unwrap();
    let before = api.get_battle(&battle_id).wait().unwrap();

    let outcome = api.next_turn(&battle_id).wait().unwrap();

    let TurnOutcome::Advanced { result, summary } = outcome else {
        panic!("battle should still be ongoing");
    };

    assert_eq!(summary.turn, before.turn + 1);
    assert!(summary.log.len() >= before.log.len());
    assert_eq!(result.as_deref(), Some("Arthur attacks Mordred"));
    assert_eq!(
        backend.count(Method::Post, &format!("/battles/{}/turn", battle_id)),
        1
    );
}

#[test]
fn finished_battle_answers_not_ongoing() {
    let backend = StubBackend::new().finish_after(1);
    let api = backend.api();

    let battle_id = api
        .create_battle(&roster(&["Arthur"]), &roster(&["Mordred"]), 5)
        .wait()
        .unwrap();

    let last = api.next_turn(&battle_id).wait().unwrap();
    assert_eq!(
        last.summary().map(|summary| summary.state),
        Some(BattleStatus::Victory)
    );

    let outcome = api.next_turn(&battle_id).wait().unwrap();
    assert!(matches!(
        outcome,
        TurnOutcome::NotOngoing {
            state: BattleStatus::Victory,
            ..
        }
    ));
}

#[test]
fn unknown_battle_surfaces_detail() {
    let backend = StubBackend::new();
    let api = backend.api();

    let err = api
        .get_battle(&BattleId::new("missing"))
        .wait()
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Status { code: 404, ref detail } if detail == "Battle not found"
    ));
}

#[test]
fn autoplay_passes_turn_limit() {
    let backend = StubBackend::new();
    let api = backend.api();

    let battle_id = api
        .create_battle(&roster(&["Arthur"]), &roster(&["Mordred"]), 5)
        .wait()
        .unwrap();

    let outcome = api.autoplay(&battle_id, Some(3)).wait().unwrap();

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.summary.turn, 3);
    assert_eq!(
        backend.count(
            Method::Post,
            &format!("/battles/{}/autoplay?max_turns=3", battle_id)
        ),
        1
    );

    // Without a limit the backend plays until the battle ends
    let backend = StubBackend::new().finish_after(4);
    let api = backend.api();
    let battle_id = api
        .create_battle(&roster(&["Arthur"]), &roster(&["Mordred"]), 5)
        .wait()
        .unwrap();

    let outcome = api.autoplay(&battle_id, None).wait().unwrap();
    assert_eq!(outcome.summary.state, BattleStatus::Victory);
    assert_eq!(outcome.results.len(), 4);
    assert_eq!(
        backend.count(Method::Post, &format!("/battles/{}/autoplay", battle_id)),
        1
    );
}

#[test]
fn list_contains_created_battles() {
    let backend = StubBackend::new();
    let api = backend.api();

    let first = api
        .create_battle(&roster(&["Arthur"]), &roster(&["Mordred"]), 5)
        .wait()
        .unwrap();
    let second = api
        .create_battle(&roster(&["Gawain"]), &roster(&["Morgana"]), 3)
        .wait()
        .unwrap();

    assert_ne!(first, second);

    let battles = api.list_battles().wait().unwrap();
    assert_eq!(battles.len(), 2);
    assert_eq!(battles[&second].team_a[0].name(), "Gawain");
    assert_eq!(battles[&second].team_a[0].character.level, 3);
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let backend = StubBackend::new();
    let api = game::api::BattleApi::new("http://stub.local/", backend.clone());

    assert_eq!(api.base_url(), "http://stub.local");
    api.list_battles().wait().unwrap();
    assert_eq!(backend.count(Method::Get, "/battles"), 1);
}
