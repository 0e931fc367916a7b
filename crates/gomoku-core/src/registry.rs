//! The connection registry: who is connected, and in what role.
//!
//! The registry owns the session records — nothing else mutates them. A
//! session appears here once it joins (players and watchers alike); a bare
//! connection that has not joined yet has no record. Records keep their
//! insertion order so the roster broadcast is stable across updates.
//!
//! Tearing down the underlying channel is the transport gateway's job; the
//! registry only drops the record. The coupled "player left ⇒ full game
//! reset" rule is enforced by the controller, which inspects the outcome
//! values returned by [`ConnectionRegistry::remove`] and
//! [`ConnectionRegistry::quit`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::Color;
use crate::protocol::{RosterEntry, RosterSnapshot};

/// Opaque per-connection identifier, assigned by the transport layer.
pub type SessionId = Uuid;

/// A session's standing in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Black,
    White,
    Watcher,
    /// Connected but holding no seat; the state every role falls back to
    /// after a full reset.
    Unassigned,
}

impl Role {
    /// True for the two player roles.
    pub fn is_player(self) -> bool {
        matches!(self, Role::Black | Role::White)
    }

    /// The player color this role holds, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Role::Black => Some(Color::Black),
            Role::White => Some(Color::White),
            Role::Watcher | Role::Unassigned => None,
        }
    }
}

impl From<Color> for Role {
    fn from(color: Color) -> Role {
        match color {
            Color::Black => Role::Black,
            Color::White => Role::White,
        }
    }
}

/// One connected client: channel id, seat, display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub role: Role,
    pub name: String,
}

/// What [`ConnectionRegistry::quit`] did with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitOutcome {
    /// The session held a player seat; the caller must perform a full reset.
    PlayerLeft,
    /// The session was a watcher or unassigned; it stays connected with its
    /// role demoted to [`Role::Unassigned`].
    Demoted,
    /// No session with that id is registered.
    Unknown,
}

/// The set of registered sessions and their role assignments.
///
/// A `Vec` keyed by linear id search: the session count is a handful, and
/// insertion order doubles as roster order.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    sessions: Vec<Session>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered sessions, including unassigned ones.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn position(&self, id: SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == id)
    }

    /// Registers a session, replacing any existing record with the same id
    /// in place. Idempotent with respect to the id.
    pub fn upsert(&mut self, session: Session) {
        match self.position(session.id) {
            Some(idx) => self.sessions[idx] = session,
            None => self.sessions.push(session),
        }
    }

    /// Removes and returns the session record, if registered.
    ///
    /// When the returned session holds a player role the caller must reset
    /// the game and demote all remaining roles.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        self.position(id).map(|idx| self.sessions.remove(idx))
    }

    /// True iff some session currently holds the given player color.
    pub fn is_color_taken(&self, color: Color) -> bool {
        self.sessions.iter().any(|s| s.role.color() == Some(color))
    }

    /// The session's display name, if registered.
    pub fn name_of(&self, id: SessionId) -> Option<&str> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }

    /// The session's role; `None` when the id is not registered.
    pub fn role_of(&self, id: SessionId) -> Option<Role> {
        self.sessions.iter().find(|s| s.id == id).map(|s| s.role)
    }

    /// Sessions holding a player seat, in roster order.
    pub fn players(&self) -> Vec<RosterEntry> {
        self.sessions
            .iter()
            .filter(|s| s.role.is_player())
            .map(RosterEntry::from)
            .collect()
    }

    /// Sessions watching the game, in roster order.
    pub fn watchers(&self) -> Vec<RosterEntry> {
        self.sessions
            .iter()
            .filter(|s| s.role == Role::Watcher)
            .map(RosterEntry::from)
            .collect()
    }

    /// The aggregate snapshot for roster broadcasts.
    ///
    /// Unassigned sessions show up in neither projection but still count
    /// towards `online_count`.
    pub fn roster(&self) -> RosterSnapshot {
        RosterSnapshot {
            players: self.players(),
            watchers: self.watchers(),
            online_count: self.sessions.len(),
        }
    }

    /// Voluntary seat release.
    ///
    /// A player quitting empties both seats (via the caller's full reset);
    /// a watcher quitting merely becomes unassigned and stays connected.
    pub fn quit(&mut self, id: SessionId) -> QuitOutcome {
        match self.position(id) {
            None => QuitOutcome::Unknown,
            Some(idx) if self.sessions[idx].role.is_player() => QuitOutcome::PlayerLeft,
            Some(idx) => {
                self.sessions[idx].role = Role::Unassigned;
                QuitOutcome::Demoted
            }
        }
    }

    /// Downgrades every session to [`Role::Unassigned`].
    ///
    /// Invoked alongside a board reset: seats must be re-claimed after any
    /// full reset.
    pub fn demote_all(&mut self) {
        for session in &mut self.sessions {
            session.role = Role::Unassigned;
        }
    }
}

impl From<&Session> for RosterEntry {
    fn from(session: &Session) -> RosterEntry {
        RosterEntry {
            id: session.id,
            role: session.role,
            name: session.name.clone(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role, name: &str) -> Session {
        Session {
            id: Uuid::new_v4(),
            role,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_upsert_appends_new_sessions() {
        let mut registry = ConnectionRegistry::new();
        registry.upsert(session(Role::Black, "alice"));
        registry.upsert(session(Role::Watcher, "bob"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_upsert_with_same_id_replaces_in_place() {
        let mut registry = ConnectionRegistry::new();
        let s = session(Role::Watcher, "alice");
        let id = s.id;
        registry.upsert(s);

        // Rejoin with the same channel id but a new role and name.
        registry.upsert(Session {
            id,
            role: Role::Black,
            name: "alice2".to_string(),
        });

        assert_eq!(registry.len(), 1, "registry size must be unchanged");
        assert_eq!(registry.role_of(id), Some(Role::Black));
        assert_eq!(registry.name_of(id), Some("alice2"));
    }

    #[test]
    fn test_is_color_taken_tracks_join_and_remove() {
        let mut registry = ConnectionRegistry::new();
        assert!(!registry.is_color_taken(Color::Black));
        assert!(!registry.is_color_taken(Color::White));

        let s = session(Role::Black, "alice");
        let id = s.id;
        registry.upsert(s);
        assert!(registry.is_color_taken(Color::Black));
        assert!(!registry.is_color_taken(Color::White));

        registry.remove(id);
        assert!(!registry.is_color_taken(Color::Black));
    }

    #[test]
    fn test_remove_returns_the_record() {
        let mut registry = ConnectionRegistry::new();
        let s = session(Role::White, "bob");
        let id = s.id;
        registry.upsert(s);

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.role, Role::White);
        assert_eq!(removed.name, "bob");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_returns_none() {
        let mut registry = ConnectionRegistry::new();
        assert_eq!(registry.remove(Uuid::new_v4()), None);
    }

    #[test]
    fn test_projections_exclude_unassigned_sessions() {
        let mut registry = ConnectionRegistry::new();
        registry.upsert(session(Role::Black, "alice"));
        registry.upsert(session(Role::Watcher, "carol"));
        registry.upsert(session(Role::Unassigned, "dave"));

        assert_eq!(registry.players().len(), 1);
        assert_eq!(registry.watchers().len(), 1);

        let roster = registry.roster();
        assert_eq!(roster.players[0].name, "alice");
        assert_eq!(roster.watchers[0].name, "carol");
        // Unassigned sessions are still online.
        assert_eq!(roster.online_count, 3);
    }

    #[test]
    fn test_quit_as_player_reports_player_left() {
        let mut registry = ConnectionRegistry::new();
        let s = session(Role::White, "bob");
        let id = s.id;
        registry.upsert(s);

        assert_eq!(registry.quit(id), QuitOutcome::PlayerLeft);
        // The record itself stays; the controller handles the reset.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_quit_as_watcher_demotes_to_unassigned() {
        let mut registry = ConnectionRegistry::new();
        let s = session(Role::Watcher, "carol");
        let id = s.id;
        registry.upsert(s);

        assert_eq!(registry.quit(id), QuitOutcome::Demoted);
        assert_eq!(registry.role_of(id), Some(Role::Unassigned));
        assert_eq!(registry.roster().online_count, 1);
    }

    #[test]
    fn test_quit_unknown_session_is_reported() {
        let mut registry = ConnectionRegistry::new();
        assert_eq!(registry.quit(Uuid::new_v4()), QuitOutcome::Unknown);
    }

    #[test]
    fn test_demote_all_clears_every_seat() {
        let mut registry = ConnectionRegistry::new();
        registry.upsert(session(Role::Black, "alice"));
        registry.upsert(session(Role::White, "bob"));
        registry.upsert(session(Role::Watcher, "carol"));

        registry.demote_all();

        assert!(!registry.is_color_taken(Color::Black));
        assert!(!registry.is_color_taken(Color::White));
        assert!(registry.players().is_empty());
        assert!(registry.watchers().is_empty());
        assert_eq!(registry.roster().online_count, 3);
    }

    #[test]
    fn test_roster_preserves_join_order() {
        let mut registry = ConnectionRegistry::new();
        registry.upsert(session(Role::Watcher, "first"));
        registry.upsert(session(Role::Watcher, "second"));
        registry.upsert(session(Role::Watcher, "third"));

        let names: Vec<_> = registry
            .watchers()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
