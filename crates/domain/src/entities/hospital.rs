//! Hospital records as returned by the hospital search backend

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Coordinate, RouteQuery};

/// A hospital recommended for the user's symptom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Hospital name
    pub place_name: String,
    /// Street address
    #[serde(default)]
    pub address_name: String,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Opening hours as `"Monday: 09:00–18:00 / Tuesday: ..."`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Longitude
    #[serde(deserialize_with = "number_or_string")]
    pub x: f64,
    /// Latitude
    #[serde(deserialize_with = "number_or_string")]
    pub y: f64,
    /// Distance from the user in meters, as reported by the backend
    #[serde(
        default,
        deserialize_with = "optional_number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<String>,
}

impl Hospital {
    /// The hospital position
    ///
    /// # Errors
    ///
    /// Returns an error if the backend reported coordinates out of range.
    pub fn location(&self) -> Result<Coordinate, DomainError> {
        Coordinate::new(self.y, self.x)
    }

    /// Build the route query from the user's position to this hospital
    ///
    /// # Errors
    ///
    /// Returns an error if the hospital coordinates are invalid.
    pub fn route_query_from(&self, origin: Coordinate) -> Result<RouteQuery, DomainError> {
        Ok(RouteQuery::new(origin, self.location()?, self.place_name.clone()))
    }

    /// Opening hours grouped for display
    #[must_use]
    pub fn opening_hours_lines(&self) -> Vec<String> {
        format_opening_hours(self.opening_hours.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn optional_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<NumberOrString>::deserialize(deserializer)?.map(|raw| match raw {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s,
        }),
    )
}

/// Group `"Day: hours / Day: hours"` text into display lines
///
/// Monday through Friday collapse into a single 평일 line when they share the
/// same hours. Saturday and Sunday follow on their own lines.
#[must_use]
pub fn format_opening_hours(opening_hours: Option<&str>) -> Vec<String> {
    let Some(text) = opening_hours.filter(|t| !t.trim().is_empty()) else {
        return vec!["영업시간 정보 없음".to_string()];
    };

    let mut weekday: Vec<&str> = Vec::new();
    let mut saturday: Vec<&str> = Vec::new();
    let mut sunday: Option<&str> = None;

    for entry in text.split(" / ") {
        let Some((day, time)) = entry.split_once(": ") else {
            continue;
        };
        match day.trim() {
            "Monday" | "Tuesday" | "Wednesday" | "Thursday" | "Friday" => weekday.push(time),
            "Saturday" => saturday.push(time),
            "Sunday" => sunday = Some(time),
            _ => {},
        }
    }

    let mut unique_weekday = weekday;
    unique_weekday.sort_unstable();
    unique_weekday.dedup();

    let mut lines = Vec::with_capacity(3);
    match unique_weekday.as_slice() {
        [single] => lines.push(format!("평일: {single}")),
        _ => lines.push("평일: 요일별 영업시간 다름".to_string()),
    }
    lines.extend(saturday.into_iter().map(|t| format!("토요일: {t}")));
    if let Some(t) = sunday {
        lines.push(format!("일요일: {t}"));
    }
    lines
}

/// Move the hospital with the given name to the front of the list
///
/// Used when a hospital is picked from its map marker, so the matching card
/// is shown first. Unknown names leave the list untouched.
pub fn promote_hospital(hospitals: &mut Vec<Hospital>, place_name: &str) {
    if let Some(index) = hospitals.iter().position(|h| h.place_name == place_name) {
        let selected = hospitals.remove(index);
        hospitals.insert(0, selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> Hospital {
        Hospital {
            place_name: name.to_string(),
            address_name: "서울 강남구".to_string(),
            phone: None,
            opening_hours: None,
            x: 127.03,
            y: 37.50,
            distance: Some("850".to_string()),
        }
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "placeName": "강남내과의원",
            "addressName": "서울 강남구 역삼동",
            "phone": "02-123-4567",
            "x": "127.03",
            "y": 37.5,
            "distance": "420"
        }"#;
        let hospital: Hospital = serde_json::from_str(json).expect("deserialize");
        assert_eq!(hospital.place_name, "강남내과의원");
        assert!((hospital.x - 127.03).abs() < f64::EPSILON);
        assert!(hospital.opening_hours.is_none());
        let location = hospital.location().expect("valid");
        assert!((location.latitude() - 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_accepts_number_or_string() {
        let parse = |distance: &str| {
            let json =
                format!(r#"{{ "placeName": "A병원", "x": 127.0, "y": 37.5, "distance": {distance} }}"#);
            serde_json::from_str::<Hospital>(&json).expect("deserialize").distance
        };
        assert_eq!(parse("350").as_deref(), Some("350"));
        assert_eq!(parse(r#""350""#).as_deref(), Some("350"));
        assert_eq!(parse("12.5").as_deref(), Some("12.5"));
        assert_eq!(parse("null"), None);

        let json = r#"{ "placeName": "A병원", "x": 127.0, "y": 37.5 }"#;
        let hospital: Hospital = serde_json::from_str(json).expect("deserialize");
        assert!(hospital.distance.is_none());
    }

    #[test]
    fn test_route_query_from() {
        let origin = Coordinate::new_unchecked(37.5665, 126.978);
        let query = sample("A병원").route_query_from(origin).expect("valid");
        assert_eq!(query.destination_label, "A병원");
        assert!((query.destination.longitude() - 127.03).abs() < f64::EPSILON);
    }

    #[test]
    fn test_opening_hours_missing() {
        assert_eq!(format_opening_hours(None), vec!["영업시간 정보 없음"]);
        assert_eq!(format_opening_hours(Some("  ")), vec!["영업시간 정보 없음"]);
    }

    #[test]
    fn test_opening_hours_uniform_weekdays() {
        let text = "Monday: 09:00–18:00 / Tuesday: 09:00–18:00 / Wednesday: 09:00–18:00 / \
                    Thursday: 09:00–18:00 / Friday: 09:00–18:00 / Saturday: 09:00–13:00 / \
                    Sunday: Closed";
        assert_eq!(
            format_opening_hours(Some(text)),
            vec!["평일: 09:00–18:00", "토요일: 09:00–13:00", "일요일: Closed"]
        );
    }

    #[test]
    fn test_opening_hours_varied_weekdays() {
        let text = "Monday: 09:00–18:00 / Tuesday: 09:00–20:00";
        assert_eq!(
            format_opening_hours(Some(text)),
            vec!["평일: 요일별 영업시간 다름"]
        );
    }

    #[test]
    fn test_promote_hospital() {
        let mut list = vec![sample("A"), sample("B"), sample("C")];
        promote_hospital(&mut list, "C");
        let names: Vec<_> = list.iter().map(|h| h.place_name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);

        promote_hospital(&mut list, "missing");
        assert_eq!(list[0].place_name, "C");
    }
}
