//! Reader actions and the gesture → action table

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GestureLabel, HandpageError};

/// Command understood by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "increase_font")]
    IncreaseFont,
    #[serde(rename = "decrease_font")]
    DecreaseFont,
    #[serde(rename = "increase_spacing")]
    IncreaseSpacing,
    #[serde(rename = "decrease_spacing")]
    DecreaseSpacing,
    #[serde(rename = "next_page")]
    NextPage,
    #[serde(rename = "previous_page")]
    PreviousPage,
    /// Start, pause or resume narration depending on its state.
    #[serde(rename = "toggle_tts")]
    ToggleNarration,
    #[serde(rename = "stop_tts")]
    StopNarration,
}

impl Action {
    pub fn all() -> &'static [Action; 8] {
        &[
            Action::IncreaseFont,
            Action::DecreaseFont,
            Action::IncreaseSpacing,
            Action::DecreaseSpacing,
            Action::NextPage,
            Action::PreviousPage,
            Action::ToggleNarration,
            Action::StopNarration,
        ]
    }

    /// Action identifier passed to gesture callbacks
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncreaseFont => "increase_font",
            Self::DecreaseFont => "decrease_font",
            Self::IncreaseSpacing => "increase_spacing",
            Self::DecreaseSpacing => "decrease_spacing",
            Self::NextPage => "next_page",
            Self::PreviousPage => "previous_page",
            Self::ToggleNarration => "toggle_tts",
            Self::StopNarration => "stop_tts",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = HandpageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| HandpageError::UnknownAction(s.to_string()))
    }
}

/// Gesture → action bindings
///
/// A gesture with no binding is legal: it is still recognized and debounced,
/// it just triggers nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMap {
    bindings: BTreeMap<GestureLabel, Action>,
}

impl ActionMap {
    /// Map with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Action bound to a gesture
    pub fn get(&self, gesture: GestureLabel) -> Option<Action> {
        self.bindings.get(&gesture).copied()
    }

    /// Bind a gesture, returning the previous binding
    pub fn bind(&mut self, gesture: GestureLabel, action: Action) -> Option<Action> {
        self.bindings.insert(gesture, action)
    }

    /// Builder-style variant of [`ActionMap::bind`]
    pub fn with(mut self, gesture: GestureLabel, action: Action) -> Self {
        self.bind(gesture, action);
        self
    }

    /// Remove a binding, returning it
    pub fn unbind(&mut self, gesture: GestureLabel) -> Option<Action> {
        self.bindings.remove(&gesture)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GestureLabel, Action)> + '_ {
        self.bindings.iter().map(|(g, a)| (*g, *a))
    }
}

impl Default for ActionMap {
    fn default() -> Self {
        Self::empty()
            .with(GestureLabel::ThumbsUp, Action::IncreaseFont)
            .with(GestureLabel::ThumbsDown, Action::DecreaseFont)
            .with(GestureLabel::OpenPalm, Action::ToggleNarration)
            .with(GestureLabel::Fist, Action::StopNarration)
            .with(GestureLabel::PointUp, Action::NextPage)
            .with(GestureLabel::Peace, Action::PreviousPage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = ActionMap::default();
        assert_eq!(map.len(), 6);
        assert_eq!(map.get(GestureLabel::ThumbsUp), Some(Action::IncreaseFont));
        assert_eq!(map.get(GestureLabel::ThumbsDown), Some(Action::DecreaseFont));
        assert_eq!(map.get(GestureLabel::OpenPalm), Some(Action::ToggleNarration));
        assert_eq!(map.get(GestureLabel::Fist), Some(Action::StopNarration));
        assert_eq!(map.get(GestureLabel::PointUp), Some(Action::NextPage));
        assert_eq!(map.get(GestureLabel::Peace), Some(Action::PreviousPage));
    }

    #[test]
    fn test_bind_unbind() {
        let mut map = ActionMap::default();
        assert_eq!(
            map.bind(GestureLabel::Peace, Action::IncreaseSpacing),
            Some(Action::PreviousPage)
        );
        assert_eq!(map.get(GestureLabel::Peace), Some(Action::IncreaseSpacing));

        assert_eq!(map.unbind(GestureLabel::Fist), Some(Action::StopNarration));
        assert_eq!(map.get(GestureLabel::Fist), None);
        assert_eq!(map.len(), 5);

        assert!(ActionMap::empty().is_empty());
    }

    #[test]
    fn test_action_ids() {
        assert_eq!(Action::ToggleNarration.as_str(), "toggle_tts");
        assert_eq!(Action::StopNarration.as_str(), "stop_tts");
        for action in Action::all() {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), *action);
        }
        assert!("launch_rocket".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_map_json() {
        let map: ActionMap =
            serde_json::from_str(r#"{"thumbs_up":"next_page","fist":"stop_tts"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(GestureLabel::ThumbsUp), Some(Action::NextPage));
        assert_eq!(map.get(GestureLabel::Fist), Some(Action::StopNarration));
        assert_eq!(map.get(GestureLabel::Peace), None);

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"thumbs_up\":\"next_page\""));
    }
}
