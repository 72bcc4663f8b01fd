//! Scripted player controller for testing and replays
//!
//! This controller answers from a predetermined queue of responses. Each
//! decision consumes the next response; once the script runs out, or when
//! the next entry doesn't fit the decision, the controller falls back to the
//! first legal option like `ZeroController`.

use crate::core::{Alignment, CardId, MarkerKind, SealIndex, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{
    AllocationRequest, ConfirmRequest, PrepAction, PrepRequest, Response, SealRequest,
    TargetRequest, ZeroController,
};
use std::collections::VecDeque;

/// A controller that follows a predetermined sequence of responses
pub struct ScriptedController {
    side: Side,
    script: VecDeque<Response>,
    fallback: ZeroController,
    /// Script entries that did not fit the decision they were offered to
    mismatches: usize,
}

impl ScriptedController {
    /// Create a new scripted controller with a sequence of responses
    pub fn new(side: Side, script: Vec<Response>) -> Self {
        ScriptedController {
            side,
            script: script.into(),
            fallback: ZeroController::new(side),
            mismatches: 0,
        }
    }

    /// Responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    /// Pop the next entry if `extract` accepts it; a mismatching entry is
    /// dropped so the script can't stall on it
    fn next<T>(&mut self, extract: impl FnOnce(Response) -> Option<T>) -> Option<T> {
        let response = self.script.pop_front()?;
        let value = extract(response);
        if value.is_none() {
            self.mismatches += 1;
        }
        value
    }
}

impl PlayerController for ScriptedController {
    fn side(&self) -> Side {
        self.side
    }

    fn choose_alignment(&mut self, view: &GameStateView) -> Alignment {
        match self.next(|r| match r {
            Response::Alignment(a) => Some(a),
            _ => None,
        }) {
            Some(alignment) => alignment,
            None => self.fallback.choose_alignment(view),
        }
    }

    fn choose_prep_action(&mut self, view: &GameStateView, request: &PrepRequest) -> PrepAction {
        match self.next(|r| match r {
            Response::Prep(action) => Some(action),
            _ => None,
        }) {
            Some(action) => action,
            None => self.fallback.choose_prep_action(view, request),
        }
    }

    fn choose_marker_target(
        &mut self,
        view: &GameStateView,
        request: &AllocationRequest,
    ) -> Option<CardId> {
        match self.next(|r| match r {
            Response::Marker(choice) => Some(choice),
            _ => None,
        }) {
            Some(choice) => choice,
            None => self.fallback.choose_marker_target(view, request),
        }
    }

    fn choose_ability_target(
        &mut self,
        view: &GameStateView,
        request: &TargetRequest,
    ) -> Option<CardId> {
        match self.next(|r| match r {
            Response::Target(choice) => Some(choice),
            _ => None,
        }) {
            Some(choice) => choice,
            None => self.fallback.choose_ability_target(view, request),
        }
    }

    fn choose_seal(&mut self, view: &GameStateView, request: &SealRequest) -> Option<SealIndex> {
        match self.next(|r| match r {
            Response::Seal(choice) => Some(choice),
            _ => None,
        }) {
            Some(choice) => choice,
            None => self.fallback.choose_seal(view, request),
        }
    }

    fn confirm(&mut self, view: &GameStateView, request: &ConfirmRequest) -> bool {
        match self.next(|r| match r {
            Response::Confirm(yes) => Some(yes),
            _ => None,
        }) {
            Some(yes) => yes,
            None => self.fallback.confirm(view, request),
        }
    }

    fn choose_marker_kind(&mut self, view: &GameStateView, source: CardId) -> MarkerKind {
        match self.next(|r| match r {
            Response::MarkerKind(kind) => Some(kind),
            _ => None,
        }) {
            Some(kind) => kind,
            None => self.fallback.choose_marker_kind(view, source),
        }
    }
}
