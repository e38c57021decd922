//====================================================================

use std::collections::BTreeMap;

use crate::{
    api::{ApiCall, ApiError, BattleApi},
    battle::{AutoplayOutcome, BattleId, BattleSummary, TurnOutcome},
};

//====================================================================

/// Rosters and level sent when the battle is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleRequest {
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    pub level: u32,
}

impl Default for BattleRequest {
    fn default() -> Self {
        Self {
            team_a: vec!["Arthur".into(), "Lancelot".into()],
            team_b: vec!["Mordred".into(), "Morgana".into()],
            level: 5,
        }
    }
}

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Creating,
    Fetching,
    Ready,
    /// Creation or the first fetch failed. Stays here until restart.
    Failed,
}

enum Phase {
    Uninitialized,
    Creating(ApiCall<BattleId>),
    Fetching(ApiCall<BattleSummary>),
    Ready,
    Failed,
}

/// Holds the one battle this client plays and the calls in flight for it.
pub struct BattleSession {
    api: BattleApi,
    request: BattleRequest,
    started: bool,
    phase: Phase,

    battle_id: Option<BattleId>,
    battle: Option<BattleSummary>,
    last_result: Option<String>,

    turns: Vec<ApiCall<TurnOutcome>>,
    autoplays: Vec<ApiCall<AutoplayOutcome>>,
    listing: Option<ApiCall<BTreeMap<BattleId, BattleSummary>>>,
}

impl BattleSession {
    pub fn new(api: BattleApi, request: BattleRequest) -> Self {
        Self {
            api,
            request,
            started: false,
            phase: Phase::Uninitialized,
            battle_id: None,
            battle: None,
            last_result: None,
            turns: Vec::new(),
            autoplays: Vec::new(),
            listing: None,
        }
    }

    /// Sends the creation request. Only the first call does anything.
    pub fn start(&mut self) -> bool {
        if self.started {
            log::trace!("Battle session already started");
            return false;
        }
        self.started = true;

        log::info!(
            "Creating battle {:?} vs {:?} at level {}",
            self.request.team_a,
            self.request.team_b,
            self.request.level
        );

        self.phase = Phase::Creating(self.api.create_battle(
            &self.request.team_a,
            &self.request.team_b,
            self.request.level,
        ));

        true
    }

    /// Collects finished calls. Returns true when the held snapshot was
    /// replaced.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.poll_setup();

        let mut finished_turns = Vec::new();
        self.turns.retain(|call| match call.poll() {
            Some(result) => {
                finished_turns.push(result);
                false
            }
            None => true,
        });

        let mut finished_autoplays = Vec::new();
        self.autoplays.retain(|call| match call.poll() {
            Some(result) => {
                finished_autoplays.push(result);
                false
            }
            None => true,
        });

        finished_turns
            .into_iter()
            .for_each(|result| changed |= self.apply_turn(result));

        finished_autoplays
            .into_iter()
            .for_each(|result| changed |= self.apply_autoplay(result));

        if let Some(result) = self.listing.as_ref().and_then(|call| call.poll()) {
            self.listing = None;
            match result {
                Ok(battles) => {
                    log::info!("Backend holds {} battles", battles.len());
                    battles.iter().for_each(|(id, summary)| {
                        log::info!("  {} - turn {} ({})", id, summary.turn, summary.state)
                    });
                }
                Err(e) => log::error!("Unable to list battles: {}", e),
            }
        }

        changed
    }

    fn poll_setup(&mut self) -> bool {
        if let Phase::Creating(call) = &self.phase {
            match call.poll() {
                None => return false,
                Some(Ok(battle_id)) => {
                    log::info!("Created battle '{}'", battle_id);
                    self.phase = Phase::Fetching(self.api.get_battle(&battle_id));
                    self.battle_id = Some(battle_id);
                }
                Some(Err(e)) => {
                    log::error!("Unable to create battle: {}", e);
                    self.phase = Phase::Failed;
                    return false;
                }
            }
        }

        if let Phase::Fetching(call) = &self.phase {
            match call.poll() {
                None => return false,
                Some(Ok(summary)) => {
                    log::debug!("Fetched battle at turn {} ({})", summary.turn, summary.state);
                    self.battle = Some(summary);
                    self.phase = Phase::Ready;
                    return true;
                }
                Some(Err(e)) => {
                    log::error!("Unable to fetch battle: {}", e);
                    self.phase = Phase::Failed;
                }
            }
        }

        false
    }

    fn apply_turn(&mut self, result: Result<TurnOutcome, ApiError>) -> bool {
        match result {
            Ok(TurnOutcome::Advanced { result, summary }) => {
                if let Some(line) = &result {
                    log::info!("Turn {}: {}", summary.turn, line);
                }
                self.last_result = result;
                self.replace_snapshot(summary);
                true
            }
            Ok(TurnOutcome::NotOngoing { state, message }) => {
                log::info!("{} ({})", message, state);
                false
            }
            Err(e) => {
                log::error!("Unable to advance turn: {}", e);
                false
            }
        }
    }

    fn apply_autoplay(&mut self, result: Result<AutoplayOutcome, ApiError>) -> bool {
        match result {
            Ok(AutoplayOutcome { results, summary }) => {
                results.iter().for_each(|line| log::debug!("{}", line));
                log::info!(
                    "Autoplay ran {} turns, now at turn {}",
                    results.len(),
                    summary.turn
                );

                if let Some(line) = results.into_iter().last() {
                    self.last_result = Some(line);
                }
                self.replace_snapshot(summary);
                true
            }
            Err(e) => {
                log::error!("Unable to autoplay battle: {}", e);
                false
            }
        }
    }

    fn replace_snapshot(&mut self, summary: BattleSummary) {
        if summary.state.is_finished() {
            log::info!("Battle finished: {}", summary.state);
        }
        self.battle = Some(summary);
    }

    /// Asks the backend to play one turn. Requests already in flight do not
    /// hold this one back.
    pub fn request_next_turn(&mut self) -> bool {
        let Some(battle_id) = &self.battle_id else {
            log::warn!("No battle to advance yet");
            return false;
        };

        log::debug!("Requesting next turn ({} already pending)", self.turns.len());
        self.turns.push(self.api.next_turn(battle_id));
        true
    }

    pub fn request_autoplay(&mut self, max_turns: Option<u32>) -> bool {
        let Some(battle_id) = &self.battle_id else {
            log::warn!("No battle to autoplay yet");
            return false;
        };

        log::debug!("Requesting autoplay (max turns: {:?})", max_turns);
        self.autoplays.push(self.api.autoplay(battle_id, max_turns));
        true
    }

    /// Logs every battle the backend currently holds.
    pub fn request_battle_list(&mut self) -> bool {
        if self.listing.is_some() {
            return false;
        }

        self.listing = Some(self.api.list_battles());
        true
    }

    //----------------------------------------------

    #[inline]
    pub fn battle_id(&self) -> Option<&BattleId> {
        self.battle_id.as_ref()
    }

    #[inline]
    pub fn battle(&self) -> Option<&BattleSummary> {
        self.battle.as_ref()
    }

    #[inline]
    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Turn and autoplay calls still waiting on the backend.
    #[inline]
    pub fn pending_turns(&self) -> usize {
        self.turns.len() + self.autoplays.len()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::Uninitialized => SessionPhase::Uninitialized,
            Phase::Creating(_) => SessionPhase::Creating,
            Phase::Fetching(_) => SessionPhase::Fetching,
            Phase::Ready => SessionPhase::Ready,
            Phase::Failed => SessionPhase::Failed,
        }
    }
}

//====================================================================
