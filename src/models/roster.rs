use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Closed set of participant groups listed before the presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoleCategory {
    #[serde(rename = "EXECUTIVES")]
    Executives,
    #[serde(rename = "ANALYSTS")]
    Analysts,
    #[serde(rename = "ATTENDEES")]
    Attendees,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 3] = [Self::Executives, Self::Analysts, Self::Attendees];

    /// Recognize a role heading; matching is exact
    pub fn from_heading(text: &str) -> Option<Self> {
        match text {
            "EXECUTIVES" => Some(Self::Executives),
            "ANALYSTS" => Some(Self::Analysts),
            "ATTENDEES" => Some(Self::Attendees),
            _ => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Executives => "EXECUTIVES",
            Self::Analysts => "ANALYSTS",
            Self::Attendees => "ATTENDEES",
        }
    }
}

/// Participants of a call grouped by role, with per-person titles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantRoster {
    /// Roles in the order their headings appeared
    by_role: Vec<(RoleCategory, Vec<String>)>,
    /// Person name -> title ("" when none was listed)
    titles: HashMap<String, String>,
}

impl ParticipantRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: RoleCategory) -> bool {
        self.by_role.iter().any(|(r, _)| *r == role)
    }

    /// Open an empty name list for `role`. Returns false if it already exists.
    pub fn start_role(&mut self, role: RoleCategory) -> bool {
        if self.has_role(role) {
            return false;
        }
        self.by_role.push((role, Vec::new()));
        true
    }

    /// Append a participant under `role`, creating the role if needed
    pub fn add_participant(&mut self, role: RoleCategory, name: &str, title: &str) {
        match self.by_role.iter_mut().find(|(r, _)| *r == role) {
            Some((_, names)) => names.push(name.to_string()),
            None => self.by_role.push((role, vec![name.to_string()])),
        }
        self.titles.insert(name.to_string(), title.to_string());
    }

    pub fn names(&self, role: RoleCategory) -> &[String] {
        self.by_role
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    pub fn roles(&self) -> impl Iterator<Item = (RoleCategory, &[String])> {
        self.by_role.iter().map(|(r, names)| (*r, names.as_slice()))
    }

    pub fn title(&self, name: &str) -> Option<&str> {
        self.titles.get(name).map(String::as_str)
    }

    pub fn titles(&self) -> &HashMap<String, String> {
        &self.titles
    }

    /// First role (in heading order) that lists `name`
    pub fn role_of(&self, name: &str) -> Option<RoleCategory> {
        self.by_role
            .iter()
            .find(|(_, names)| names.iter().any(|n| n == name))
            .map(|(r, _)| *r)
    }

    pub fn participant_count(&self) -> usize {
        self.by_role.iter().map(|(_, names)| names.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_role.is_empty()
    }

    /// Serializable view of the title map, ordered by roster position
    pub fn titles_view(&self) -> RosterTitles<'_> {
        RosterTitles(self)
    }
}

/// Serialized as `{"EXECUTIVES": [...], "ANALYSTS": [...]}` in heading order
impl Serialize for ParticipantRoster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.by_role.len()))?;
        for (role, names) in &self.by_role {
            map.serialize_entry(role.heading(), names)?;
        }
        map.end()
    }
}

/// Title map serialized as `{"name": "title"}` following roster order
pub struct RosterTitles<'a>(&'a ParticipantRoster);

impl Serialize for RosterTitles<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let roster = self.0;
        let mut map = serializer.serialize_map(Some(roster.titles.len()))?;
        let mut seen = std::collections::HashSet::new();
        for (_, names) in &roster.by_role {
            for name in names {
                if seen.insert(name.as_str()) {
                    let title = roster.titles.get(name).map(String::as_str).unwrap_or("");
                    map.serialize_entry(name, title)?;
                }
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> ParticipantRoster {
        let mut roster = ParticipantRoster::new();
        roster.start_role(RoleCategory::Executives);
        roster.add_participant(RoleCategory::Executives, "Jane Doe", "CFO");
        roster.start_role(RoleCategory::Analysts);
        roster.add_participant(RoleCategory::Analysts, "John Roe", "");
        roster
    }

    #[test]
    fn test_role_of_first_match_wins() {
        let mut roster = sample_roster();
        roster.add_participant(RoleCategory::Analysts, "Jane Doe", "CFO");

        assert_eq!(roster.role_of("Jane Doe"), Some(RoleCategory::Executives));
        assert_eq!(roster.role_of("John Roe"), Some(RoleCategory::Analysts));
        assert_eq!(roster.role_of("Nobody"), None);
    }

    #[test]
    fn test_start_role_twice() {
        let mut roster = ParticipantRoster::new();
        assert!(roster.start_role(RoleCategory::Executives));
        assert!(!roster.start_role(RoleCategory::Executives));
        assert_eq!(roster.roles().count(), 1);
    }

    #[test]
    fn test_serialize_preserves_heading_order() {
        let mut roster = ParticipantRoster::new();
        roster.start_role(RoleCategory::Executives);
        roster.add_participant(RoleCategory::Executives, "Jane Doe", "CFO");
        roster.start_role(RoleCategory::Analysts);

        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"{"EXECUTIVES":["Jane Doe"],"ANALYSTS":[]}"#);

        let titles = serde_json::to_string(&roster.titles_view()).unwrap();
        assert_eq!(titles, r#"{"Jane Doe":"CFO"}"#);
    }

    #[test]
    fn test_heading_recognizer() {
        for role in RoleCategory::ALL {
            assert_eq!(RoleCategory::from_heading(role.heading()), Some(role));
        }
        assert_eq!(RoleCategory::from_heading("Executives"), None);
    }
}
