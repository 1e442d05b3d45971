use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Day of the week a free-time slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

/// A recurring weekly window of free time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    /// Start of the window, 24-hour "HH:MM"
    pub start: String,
    /// End of the window, 24-hour "HH:MM"
    pub end: String,
}

/// Checks a 24-hour "HH:MM" string: hours 00-23, minutes 00-59.
pub fn is_valid_time(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let hour_ok = match bytes[0] {
        b'0' | b'1' => bytes[1].is_ascii_digit(),
        b'2' => (b'0'..=b'3').contains(&bytes[1]),
        _ => false,
    };
    hour_ok && (b'0'..=b'5').contains(&bytes[3]) && bytes[4].is_ascii_digit()
}

impl TimeSlot {
    /// Human-readable slot label, e.g. "Monday 10:00-12:00"
    pub fn label(&self) -> String {
        format!("{} {}-{}", self.day, self.start, self.end)
    }

    /// Checks both times and their ordering; run before a slot is stored.
    pub fn validate(&self) -> AppResult<()> {
        if !is_valid_time(&self.start) || !is_valid_time(&self.end) {
            return Err(AppError::InvalidInput(format!(
                "time slot for {} must use 24-hour HH:MM times",
                self.day
            )));
        }
        // Zero-padded HH:MM strings order correctly as text
        if self.start >= self.end {
            return Err(AppError::InvalidInput(format!(
                "time slot for {} must start before it ends",
                self.day
            )));
        }
        Ok(())
    }
}

/// Geographic coordinates resolved from a profile's location text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "lat,lng" is the form the places API expects
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A user profile with everything the recommendation pipeline needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    /// Free-text home location, e.g. "Cambridge, MA"
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub free_time: Vec<TimeSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Fresh profile with no hobbies, slots, or location yet
    pub fn new(username: String) -> Self {
        let now = Utc::now();
        Profile {
            username,
            location: String::new(),
            hobbies: Vec::new(),
            free_time: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A venue returned by the nearby-search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    /// Short address; empty when the provider omits it
    pub address: String,
    pub rating: Option<f64>,
    pub place_id: String,
}

impl Venue {
    /// Stable maps link built from the provider's place ID
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps/place/?q=place_id:{}",
            self.place_id
        )
    }
}

// ============================================================================
// Recommendation Response Types
// ============================================================================

/// A venue as presented to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedVenue {
    pub name: String,
    pub address: String,
    /// Rating as text so unrated venues can say "N/A"
    pub rating: String,
    pub map_link: String,
}

impl From<&Venue> for RecommendedVenue {
    fn from(venue: &Venue) -> Self {
        RecommendedVenue {
            name: venue.name.clone(),
            address: venue.address.clone(),
            rating: venue
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            map_link: venue.maps_link(),
        }
    }
}

/// Recommendations for a single free-time slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecommendation {
    /// Slot label, e.g. "Monday 10:00-12:00"
    pub time_slot: String,
    /// The hobby assigned to this slot
    pub hobby: String,
    pub recommendations: Vec<RecommendedVenue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_display() {
        assert_eq!(format!("{}", Weekday::Monday), "Monday");
        assert_eq!(format!("{}", Weekday::Sunday), "Sunday");
    }

    #[test]
    fn test_weekday_serde() {
        let json = serde_json::to_string(&Weekday::Wednesday).unwrap();
        assert_eq!(json, r#""Wednesday""#);

        let deserialized: Weekday = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Weekday::Wednesday);
    }

    #[test]
    fn test_is_valid_time_accepts_full_range() {
        for valid in ["00:00", "09:30", "10:05", "19:59", "20:00", "23:59"] {
            assert!(is_valid_time(valid), "{} should be valid", valid);
        }
    }

    #[test]
    fn test_is_valid_time_rejects_malformed_input() {
        for invalid in ["24:00", "23:60", "9:00", "09:5", "0900", "ab:cd", "09-00", ""] {
            assert!(!is_valid_time(invalid), "{} should be invalid", invalid);
        }
    }

    #[test]
    fn test_time_slot_label() {
        let slot = TimeSlot {
            day: Weekday::Monday,
            start: "10:00".to_string(),
            end: "12:00".to_string(),
        };
        assert_eq!(slot.label(), "Monday 10:00-12:00");
    }

    #[test]
    fn test_time_slot_validate_accepts_ordered_times() {
        let slot = TimeSlot {
            day: Weekday::Friday,
            start: "08:30".to_string(),
            end: "09:00".to_string(),
        };
        assert!(slot.validate().is_ok());
    }

    #[test]
    fn test_time_slot_validate_rejects_bad_pattern() {
        let slot = TimeSlot {
            day: Weekday::Friday,
            start: "8:30".to_string(),
            end: "09:00".to_string(),
        };
        assert!(matches!(slot.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_time_slot_validate_rejects_inverted_and_empty_windows() {
        let inverted = TimeSlot {
            day: Weekday::Saturday,
            start: "12:00".to_string(),
            end: "10:00".to_string(),
        };
        assert!(matches!(inverted.validate(), Err(AppError::InvalidInput(_))));

        let empty = TimeSlot {
            day: Weekday::Saturday,
            start: "12:00".to_string(),
            end: "12:00".to_string(),
        };
        assert!(matches!(empty.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_coordinates_display() {
        let coordinates = Coordinates {
            latitude: 42.3601,
            longitude: -71.0589,
        };
        assert_eq!(format!("{}", coordinates), "42.3601,-71.0589");
    }

    #[test]
    fn test_profile_serde_uses_camel_case() {
        let mut profile = Profile::new("alice".to_string());
        profile.free_time.push(TimeSlot {
            day: Weekday::Monday,
            start: "10:00".to_string(),
            end: "12:00".to_string(),
        });

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("freeTime").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("free_time").is_none());
    }

    #[test]
    fn test_venue_maps_link() {
        let venue = Venue {
            name: "Cambridge Pool".to_string(),
            address: "123 Main St".to_string(),
            rating: Some(4.5),
            place_id: "ChIJd8BlQ2BZwokRAFUEcm_qrcA".to_string(),
        };
        assert_eq!(
            venue.maps_link(),
            "https://www.google.com/maps/place/?q=place_id:ChIJd8BlQ2BZwokRAFUEcm_qrcA"
        );
    }

    #[test]
    fn test_recommended_venue_from_rated_venue() {
        let venue = Venue {
            name: "Cambridge Pool".to_string(),
            address: "123 Main St".to_string(),
            rating: Some(4.5),
            place_id: "abc123".to_string(),
        };

        let recommended = RecommendedVenue::from(&venue);
        assert_eq!(recommended.name, "Cambridge Pool");
        assert_eq!(recommended.address, "123 Main St");
        assert_eq!(recommended.rating, "4.5");
        assert_eq!(
            recommended.map_link,
            "https://www.google.com/maps/place/?q=place_id:abc123"
        );
    }

    #[test]
    fn test_recommended_venue_without_rating_says_na() {
        let venue = Venue {
            name: "New Studio".to_string(),
            address: String::new(),
            rating: None,
            place_id: "xyz789".to_string(),
        };

        let recommended = RecommendedVenue::from(&venue);
        assert_eq!(recommended.rating, "N/A");
        assert_eq!(recommended.address, "");
    }

    #[test]
    fn test_slot_recommendation_serde_uses_camel_case() {
        let slot = SlotRecommendation {
            time_slot: "Monday 10:00-12:00".to_string(),
            hobby: "Swimming".to_string(),
            recommendations: vec![],
        };

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["timeSlot"], "Monday 10:00-12:00");
        assert_eq!(json["hobby"], "Swimming");
        assert!(json["recommendations"].as_array().unwrap().is_empty());
    }
}
