//! Player session record
//!
//! Everything that must be persisted to resume a game lives here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clock::format_timestamp;
use crate::error::Result;
use crate::settings::DisplayPreferences;
use crate::story::{Node, StoryGraph};

/// Where a session stands in the story
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// At a node with outgoing transitions
    Active(String),
    /// At an ending; no further transitions are possible
    Terminal(String),
}

/// One player's progress, keyed by `game_name`
///
/// Fields map one-to-one onto the persisted record. Fields this engine
/// does not know about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    game_name: String,
    current_location: String,
    #[serde(default)]
    previous_location: Option<String>,
    /// Unix timestamp (seconds) of the last persist
    #[serde(default)]
    last_updated: f64,
    #[serde(default)]
    inventory: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_preferences: Option<DisplayPreferences>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Session {
    /// Session at `location` with no history
    pub fn new(game_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            current_location: location.into(),
            previous_location: None,
            last_updated: 0.0,
            inventory: Vec::new(),
            display_preferences: None,
            extra: Map::new(),
        }
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    pub fn previous_location(&self) -> Option<&str> {
        self.previous_location.as_deref()
    }

    pub fn last_updated(&self) -> f64 {
        self.last_updated
    }

    /// Items collected so far, in pickup order
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn display_preferences(&self) -> Option<DisplayPreferences> {
        self.display_preferences
    }

    /// Persisted fields the engine does not interpret
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Classify the session against the story graph
    pub fn state(&self, graph: &StoryGraph) -> Result<SessionState> {
        let location = self.current_location.clone();
        Ok(if graph.is_terminal(&self.current_location)? {
            SessionState::Terminal(location)
        } else {
            SessionState::Active(location)
        })
    }

    /// Attach display preferences unless some are already set
    pub(crate) fn init_display_preferences(&mut self, prefs: DisplayPreferences) -> bool {
        if self.display_preferences.is_some() {
            return false;
        }
        self.display_preferences = Some(prefs);
        true
    }

    pub(crate) fn touch(&mut self, timestamp: f64) {
        self.last_updated = timestamp;
    }

    /// Enter `node`: record history if the location changes, pick up items
    pub(crate) fn enter(&mut self, node: &Node) {
        if node.id != self.current_location {
            let prior = std::mem::replace(&mut self.current_location, node.id.clone());
            self.previous_location = Some(prior);
        }
        self.collect(&node.items);
    }

    /// Step back to the previous location, forgetting it
    pub(crate) fn step_back(&mut self) -> bool {
        match self.previous_location.take() {
            Some(prior) => {
                self.current_location = prior;
                true
            }
            None => false,
        }
    }

    fn collect(&mut self, items: &[String]) {
        for item in items {
            if !self.inventory.contains(item) {
                self.inventory.push(item.clone());
            }
        }
    }

    /// Menu entry for this save
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            name: self.game_name.clone(),
            last_updated: self.last_updated,
        }
    }
}

/// Save listing entry for selection menus
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub name: String,
    pub last_updated: f64,
}

impl SessionSummary {
    /// "<name> - last updated: DD-MM-YYYY HH:MM:SS"
    pub fn label(&self) -> String {
        format!(
            "{} - last updated: {}",
            self.name,
            format_timestamp(self.last_updated)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TextSpeed;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_enter_tracks_previous_only_on_change() {
        let mut session = Session::new("p1", "A");
        session.enter(&Node::new("A", ""));
        assert_eq!(session.previous_location(), None);

        session.enter(&Node::new("B", ""));
        assert_eq!(session.current_location(), "B");
        assert_eq!(session.previous_location(), Some("A"));

        session.enter(&Node::new("B", ""));
        assert_eq!(session.previous_location(), Some("A"));
    }

    #[test]
    fn test_enter_collects_items_once() {
        let mut session = Session::new("p1", "A");
        let chest = Node::new("Chest", "").with_items(["Crystal Relic"]);
        let hoard = Node::new("Hoard", "").with_items(["Crystal Relic", "Ancient Treasure"]);
        session.enter(&chest);
        session.enter(&hoard);
        session.enter(&chest);
        assert_eq!(session.inventory(), ["Crystal Relic", "Ancient Treasure"]);
    }

    #[test]
    fn test_step_back() {
        let mut session = Session::new("p1", "A");
        assert!(!session.step_back());
        session.enter(&Node::new("B", ""));
        assert!(session.step_back());
        assert_eq!(session.current_location(), "A");
        assert_eq!(session.previous_location(), None);
    }

    #[test]
    fn test_display_preferences_set_once() {
        let mut session = Session::new("p1", "A");
        let slow = DisplayPreferences {
            text_speed: TextSpeed::Slow,
        };
        assert!(session.init_display_preferences(slow));
        assert!(!session.init_display_preferences(DisplayPreferences::default()));
        assert_eq!(session.display_preferences(), Some(slow));
    }

    #[test]
    fn test_record_format() {
        let mut session = Session::new("p1", "Dark Tunnel");
        session.touch(1_700_000_000.5);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            json!({
                "game_name": "p1",
                "current_location": "Dark Tunnel",
                "previous_location": null,
                "last_updated": 1_700_000_000.5,
                "inventory": []
            })
        );
    }

    #[test]
    fn test_legacy_record_with_unknown_fields() {
        // Shape written by earlier releases: no history, plus fields we never read
        let legacy = json!({
            "current_location": "Wide Path",
            "inventory": ["Lantern"],
            "game_name": "old save",
            "last_updated": 1_690_000_000,
            "typewriter_color": "green"
        });
        let session: Session = serde_json::from_value(legacy.clone()).unwrap();
        assert_eq!(session.game_name(), "old save");
        assert_eq!(session.previous_location(), None);
        assert_eq!(session.last_updated(), 1_690_000_000.0);
        assert_eq!(session.extra().get("typewriter_color"), Some(&json!("green")));

        let back = serde_json::to_value(&session).unwrap();
        assert_eq!(back["typewriter_color"], json!("green"));
        assert_eq!(back["inventory"], json!(["Lantern"]));
    }

    #[test]
    fn test_state() {
        let graph = StoryGraph::new(
            "A",
            vec![Node::new("A", "").with_option("go", "B"), Node::new("B", "")],
        );
        assert_eq!(
            Session::new("p1", "A").state(&graph).unwrap(),
            SessionState::Active("A".into())
        );
        assert_eq!(
            Session::new("p1", "B").state(&graph).unwrap(),
            SessionState::Terminal("B".into())
        );
        assert!(Session::new("p1", "Z").state(&graph).is_err());
    }

    #[test]
    fn test_summary_label() {
        let summary = SessionSummary {
            name: "p1".into(),
            last_updated: 1_700_000_000.0,
        };
        assert!(summary.label().starts_with("p1 - last updated: "));
    }
}
