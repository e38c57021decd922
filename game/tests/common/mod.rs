#![allow(dead_code)]

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use game::api::{
    BattleApi, HttpRequest, HttpResponse, JobPromise, Method, Transport, TransportResult,
};
use serde_json::{json, Value};

//====================================================================

pub const STUB_BASE: &str = "http://stub.local";

struct StubBattle {
    team_a: Vec<String>,
    team_b: Vec<String>,
    level: u32,
    turn: u32,
    state: &'static str,
    log: Vec<String>,
}

impl StubBattle {
    fn fighter(name: &str, level: u32) -> Value {
        json!({
            "character": {
                "name": name, "element": "Fire", "level": level,
                "health": 100 * level, "speed": 10 * level, "damage": 16 * level
            },
            "current_health": 100 * level,
            "is_alive": true,
            "status_effects": {}
        })
    }

    fn summary(&self) -> Value {
        let team = |names: &[String]| {
            names
                .iter()
                .map(|name| Self::fighter(name, self.level))
                .collect::<Vec<_>>()
        };

        json!({
            "state": self.state,
            "turn": self.turn,
            "team_a": team(&self.team_a),
            "team_b": team(&self.team_b),
            "active_character": self.team_a.first(),
            "log": self.log,
        })
    }
}

#[derive(Default)]
struct StubState {
    battles: BTreeMap<String, StubBattle>,
    next_id: u32,
    requests: Vec<HttpRequest>,

    deferred: bool,
    queued: Vec<(JobPromise<TransportResult>, TransportResult)>,

    /// Battles end in victory once they reach this turn.
    finish_after: Option<u32>,
    fail_create: bool,
}

/// In-memory stand-in for the battle backend.
#[derive(Clone, Default)]
pub struct StubBackend {
    state: Rc<RefCell<StubState>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers are held back until [`StubBackend::release`].
    pub fn deferred(self) -> Self {
        self.state.borrow_mut().deferred = true;
        self
    }

    pub fn finish_after(self, turns: u32) -> Self {
        self.state.borrow_mut().finish_after = Some(turns);
        self
    }

    pub fn fail_create(self) -> Self {
        self.state.borrow_mut().fail_create = true;
        self
    }

    pub fn api(&self) -> BattleApi {
        BattleApi::new(STUB_BASE, self.clone())
    }

    /// Resolves every held back answer in the order the requests were sent.
    pub fn release(&self) {
        let queued = std::mem::take(&mut self.state.borrow_mut().queued);
        queued
            .into_iter()
            .for_each(|(promise, response)| promise.set_value(response));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{}{}", STUB_BASE, path);
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }

    fn respond(&self, request: &HttpRequest) -> HttpResponse {
        let mut state = self.state.borrow_mut();

        let path = request.url.trim_start_matches(STUB_BASE);
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let segments = path.trim_matches('/').split('/').collect::<Vec<_>>();

        match (request.method, segments.as_slice()) {
            (Method::Post, ["battles"]) => {
                if state.fail_create {
                    return reply(500, json!({ "detail": "Unable to create battle" }));
                }

                let body: Value = serde_json::from_str(request.body.as_deref().unwrap_or("{}"))
                    .unwrap_or(Value::Null);
                let names = |team: &str| -> Vec<String> {
                    serde_json::from_value(body[team].clone()).unwrap_or_default()
                };

                state.next_id += 1;
                let battle_id = format!("battle-{}", state.next_id);
                let battle = StubBattle {
                    team_a: names("team_a"),
                    team_b: names("team_b"),
                    level: body["level"].as_u64().unwrap_or(1) as u32,
                    turn: 0,
                    state: "ongoing",
                    log: Vec::new(),
                };
                state.battles.insert(battle_id.clone(), battle);

                reply(200, json!({ "battle_id": battle_id }))
            }

            (Method::Get, ["battles"]) => {
                let battles = state
                    .battles
                    .iter()
                    .map(|(id, battle)| (id.clone(), battle.summary()))
                    .collect::<serde_json::Map<_, _>>();
                reply(200, Value::Object(battles))
            }

            (Method::Get, ["battles", id]) => match state.battles.get(*id) {
                Some(battle) => reply(200, battle.summary()),
                None => not_found(),
            },

            (Method::Post, ["battles", id, "turn"]) => {
                let finish_after = state.finish_after;
                let Some(battle) = state.battles.get_mut(*id) else {
                    return not_found();
                };

                if battle.state != "ongoing" {
                    return reply(
                        200,
                        json!({ "state": battle.state, "message": "Battle is not ongoing" }),
                    );
                }

                let result = play_turn(battle, finish_after);
                reply(200, json!({ "result": result, "summary": battle.summary() }))
            }

            (Method::Post, ["battles", id, "autoplay"]) => {
                let finish_after = state.finish_after;
                let max_turns = query
                    .strip_prefix("max_turns=")
                    .and_then(|turns| turns.parse::<u32>().ok())
                    .unwrap_or(100);

                let Some(battle) = state.battles.get_mut(*id) else {
                    return not_found();
                };

                let mut results = Vec::new();
                while battle.state == "ongoing" && (results.len() as u32) < max_turns {
                    results.push(play_turn(battle, finish_after));
                }

                reply(200, json!({ "results": results, "summary": battle.summary() }))
            }

            _ => not_found(),
        }
    }
}

fn play_turn(battle: &mut StubBattle, finish_after: Option<u32>) -> String {
    battle.turn += 1;

    let attacker = battle.team_a.first().cloned().unwrap_or_default();
    let target = battle.team_b.first().cloned().unwrap_or_default();
    let line = format!("{} attacks {}", attacker, target);
    battle.log.push(line.clone());

    if finish_after.is_some_and(|turns| battle.turn >= turns) {
        battle.state = "victory";
    }

    line
}

fn reply(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

fn not_found() -> HttpResponse {
    reply(404, json!({ "detail": "Battle not found" }))
}

impl Transport for StubBackend {
    fn send(&self, request: HttpRequest) -> JobPromise<TransportResult> {
        let response = self.respond(&request);

        let mut state = self.state.borrow_mut();
        state.requests.push(request);

        match state.deferred {
            true => {
                let promise = JobPromise::new();
                state.queued.push((promise.clone(), Ok(response)));
                promise
            }
            false => JobPromise::resolved(Ok(response)),
        }
    }
}
