// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The media record every codec must round-trip.
//!
//! `Media` is built once per measured operation and never mutated after
//! construction for serialization purposes. Equality is structural over
//! every field, `persons` included (order-sensitive).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player that a media item targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Player {
    Java,
    Flash,
}

impl Player {
    /// Stable ordinal used by binary layouts.
    pub fn ordinal(&self) -> u8 {
        match self {
            Player::Java => 0,
            Player::Flash => 1,
        }
    }

    /// Inverse of [`Player::ordinal`].
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Player::Java),
            1 => Some(Player::Flash),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Java => write!(f, "JAVA"),
            Player::Flash => write!(f, "FLASH"),
        }
    }
}

/// Benchmark payload: a media descriptor with scalar fields and a list of
/// people.
///
/// Serialized field names are the compact ones shared by every text codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "pl")]
    pub player: Player,
    #[serde(rename = "ul")]
    pub uri: String,
    #[serde(rename = "tl")]
    pub title: String,
    #[serde(rename = "wd")]
    pub width: i32,
    #[serde(rename = "hg")]
    pub height: i32,
    #[serde(rename = "fr")]
    pub format: String,
    #[serde(rename = "dr")]
    pub duration: i64,
    #[serde(rename = "sz")]
    pub size: i64,
    #[serde(rename = "br")]
    pub bitrate: i32,
    #[serde(rename = "pr")]
    pub persons: Vec<String>,
    /// Absent and empty are different values and must stay different
    /// through a round-trip.
    #[serde(rename = "c")]
    pub copyright: Option<String>,
}

impl Media {
    /// Full constructor. `persons` starts empty; use [`Media::add_person`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        copyright: Option<String>,
        format: impl Into<String>,
        player: Player,
        title: impl Into<String>,
        uri: impl Into<String>,
        duration: i64,
        size: i64,
        height: i32,
        width: i32,
        bitrate: i32,
    ) -> Self {
        Self {
            player,
            uri: uri.into(),
            title: title.into(),
            width,
            height,
            format: format.into(),
            duration,
            size,
            bitrate,
            persons: Vec::new(),
            copyright,
        }
    }

    /// Append a person to the credits list.
    pub fn add_person(&mut self, person: impl Into<String>) {
        self.persons.push(person.into());
    }

    /// The canonical fixture. Field values are identical on every call.
    pub fn fixture() -> Self {
        let mut media = Media::new(
            None,
            "video/mpg4",
            Player::Java,
            "Javaone Keynote",
            "http://javaone.com/keynote.mpg",
            18_000_000,
            58_982_400,
            480,
            640,
            262_144,
        );
        media.add_person("Bill Gates");
        media.add_person("Steve Jobs");
        media
    }

    /// Names of the fields whose values differ from `other`.
    pub fn differing_fields(&self, other: &Media) -> Vec<&'static str> {
        let checks = [
            ("width", self.width == other.width),
            ("height", self.height == other.height),
            ("duration", self.duration == other.duration),
            ("size", self.size == other.size),
            ("bitrate", self.bitrate == other.bitrate),
            ("player", self.player == other.player),
            ("uri", self.uri == other.uri),
            ("title", self.title == other.title),
            ("format", self.format == other.format),
            ("persons", self.persons == other.persons),
            ("copyright", self.copyright == other.copyright),
        ];

        checks
            .into_iter()
            .filter(|(_, same)| !same)
            .map(|(name, _)| name)
            .collect()
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Media width={}, height={}, duration={}, size={}, bitrate={}, player={}, uri={}, title={}, format={}, persons={:?}, copyright={}]",
            self.width,
            self.height,
            self.duration,
            self.size,
            self.bitrate,
            self.player,
            self.uri,
            self.title,
            self.format,
            self.persons,
            self.copyright.as_deref().unwrap_or("null"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_deterministic() {
        assert_eq!(Media::fixture(), Media::fixture());
        assert_eq!(Media::fixture().persons, vec!["Bill Gates", "Steve Jobs"]);
        assert!(Media::fixture().copyright.is_none());
    }

    #[test]
    fn test_equality_is_reflexive() {
        let media = Media::fixture();
        assert_eq!(media, media.clone());
        assert!(media.differing_fields(&media).is_empty());
    }

    #[test]
    fn test_absent_copyright_differs_from_empty() {
        let absent = Media::fixture();
        let mut empty = Media::fixture();
        empty.copyright = Some(String::new());

        assert_ne!(absent, empty);
        assert_ne!(empty, absent);
        assert_eq!(absent.differing_fields(&empty), vec!["copyright"]);
    }

    #[test]
    fn test_persons_order_matters() {
        let original = Media::fixture();
        let mut reordered = Media::fixture();
        reordered.persons.reverse();

        assert_ne!(original, reordered);
        assert_eq!(original.differing_fields(&reordered), vec!["persons"]);
    }

    #[test]
    fn test_player_ordinal() {
        for player in [Player::Java, Player::Flash] {
            assert_eq!(Player::from_ordinal(player.ordinal()), Some(player));
        }
        assert_eq!(Player::from_ordinal(7), None);
    }

    #[test]
    fn test_display_mentions_absent_copyright() {
        let text = Media::fixture().to_string();
        assert!(text.starts_with("[Media width=640"));
        assert!(text.ends_with("copyright=null]"));
    }
}
