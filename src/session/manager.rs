//! Session engine: create, resume, advance and persist player sessions.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::persistence::SessionStore;
use crate::settings::DisplayPreferences;
use crate::story::{Node, StoryGraph};

use super::ChoiceProvider;
use super::state::{Session, SessionState, SessionSummary};

/// Drives sessions through a story graph and keeps the save store in step
///
/// Persistence happens only at defined points: after `create`, after every
/// accepted transition in `advance`, and on explicit `persist` calls.
pub struct SessionManager<S, C = SystemClock> {
    graph: Arc<StoryGraph>,
    store: S,
    clock: C,
    preferences: DisplayPreferences,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(graph: Arc<StoryGraph>, store: S) -> Self {
        Self::with_clock(graph, store, SystemClock)
    }
}

impl<S: SessionStore, C: Clock> SessionManager<S, C> {
    pub fn with_clock(graph: Arc<StoryGraph>, store: S, clock: C) -> Self {
        Self {
            graph,
            store,
            clock,
            preferences: DisplayPreferences::default(),
        }
    }

    /// Builder: preferences given to new saves and to saves that lack them
    pub fn with_preferences(mut self, preferences: DisplayPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a new game at the story's start node and save it immediately
    pub fn create(&self, name: &str) -> Result<Session> {
        if self.store.load_all()?.iter().any(|s| s.game_name() == name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let start = self.graph.get_node(self.graph.start())?;
        let mut session = Session::new(name, start.id.as_str());
        session.enter(start);
        session.init_display_preferences(self.preferences);
        self.persist(&mut session)?;

        log::info!("Created game \"{}\"", name);
        Ok(session)
    }

    /// Restore a saved game exactly as persisted
    ///
    /// A save without display preferences receives the configured ones; they
    /// are written out on the next persist.
    pub fn load(&self, name: &str) -> Result<Session> {
        let mut session = self
            .store
            .load_all()?
            .into_iter()
            .find(|s| s.game_name() == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        if session.init_display_preferences(self.preferences) {
            log::debug!("Attached display preferences to \"{}\"", name);
        }
        log::info!(
            "Loaded game \"{}\" at \"{}\"",
            name,
            session.current_location()
        );
        Ok(session)
    }

    /// Remove a saved game. Returns false if there was nothing to remove.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut all = self.store.load_all()?;
        let Some(pos) = all.iter().position(|s| s.game_name() == name) else {
            return Ok(false);
        };
        all.remove(pos);
        self.store.save_all(&all)?;

        log::info!("Deleted game \"{}\"", name);
        Ok(true)
    }

    /// All saves in stored order
    pub fn list_all(&self) -> Result<Vec<SessionSummary>> {
        Ok(self
            .store
            .load_all()?
            .iter()
            .map(Session::summary)
            .collect())
    }

    /// Node the session currently occupies
    ///
    /// A missing node means the save is corrupted; it is reported, never
    /// repaired.
    pub fn current_node(&self, session: &Session) -> Result<&Node> {
        self.graph.get_node(session.current_location())
    }

    pub fn state(&self, session: &Session) -> Result<SessionState> {
        session.state(&self.graph)
    }

    /// Take one step through the story
    ///
    /// Returns `false` without touching the store when the session is at an
    /// ending. A lone unlabeled transition is followed without consulting
    /// `chooser`; otherwise the chooser picks from the option labels.
    pub fn advance(&self, session: &mut Session, chooser: &mut dyn ChoiceProvider) -> Result<bool> {
        let node = self.current_node(session)?;
        if node.is_terminal() {
            return Ok(false);
        }

        let transition = match node.auto_continue() {
            Some(t) => t,
            None => {
                let labels = node.labels();
                let index = chooser.choose(&labels)?;
                node.options.get(index).ok_or(Error::ChoiceOutOfRange {
                    index,
                    count: labels.len(),
                })?
            }
        };

        let next = self.graph.get_node(&transition.target)?;
        log::debug!(
            "\"{}\": {} -> {}",
            session.game_name(),
            node.id,
            next.id
        );
        let mut moved = session.clone();
        moved.enter(next);
        self.persist(&mut moved)?;
        *session = moved;
        Ok(true)
    }

    /// Whether the session sits at an ending it can step back from
    pub fn can_rewind(&self, session: &Session) -> Result<bool> {
        Ok(self.current_node(session)?.is_terminal() && session.previous_location().is_some())
    }

    /// Undo an ending by returning to the previous location
    ///
    /// Only applies at a terminal node with known history. Nothing is
    /// written; the next accepted transition persists the new path.
    pub fn rewind(&self, session: &mut Session) -> Result<bool> {
        if !self.can_rewind(session)? {
            return Ok(false);
        }
        if let Some(prior) = session.previous_location() {
            self.graph.get_node(prior)?;
        }
        let ending = session.current_location().to_string();
        session.step_back();
        log::info!(
            "Rewound \"{}\" from \"{}\" to \"{}\"",
            session.game_name(),
            ending,
            session.current_location()
        );
        Ok(true)
    }

    /// Write the session into the store, replacing any save with the same name
    ///
    /// `session` is only stamped once the store accepts the write, so on
    /// error it still matches what is on disk.
    pub fn persist(&self, session: &mut Session) -> Result<()> {
        let mut stamped = session.clone();
        stamped.touch(self.clock.unix_timestamp());

        let mut all = self.store.load_all()?;
        match all.iter_mut().find(|s| s.game_name() == stamped.game_name()) {
            Some(slot) => *slot = stamped.clone(),
            None => all.push(stamped.clone()),
        }
        self.store.save_all(&all)?;
        *session = stamped;
        Ok(())
    }
}
