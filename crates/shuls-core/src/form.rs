//! Mirroring the canonical selection into a host page's form fields.

use serde::{Deserialize, Serialize};

use crate::location::Location;

pub const LATITUDE_FIELD: &str = "latitude";
pub const LONGITUDE_FIELD: &str = "longitude";
pub const PLACE_ID_FIELD: &str = "place_id";

/// Values submitted with the host form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormFields {
    pub latitude: String,
    pub longitude: String,
    pub place_id: String,
}

impl FormFields {
    /// Field name / value pairs in submission order.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (LATITUDE_FIELD, self.latitude.as_str()),
            (LONGITUDE_FIELD, self.longitude.as_str()),
            (PLACE_ID_FIELD, self.place_id.as_str()),
        ]
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.pairs()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

impl From<&Location> for FormFields {
    fn from(location: &Location) -> Self {
        if location.is_blank() {
            return Self::default();
        }
        Self {
            latitude: location.latitude.to_string(),
            longitude: location.longitude.to_string(),
            place_id: location
                .place_id
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Plain form inputs of the host page.
pub trait FormSink: Send {
    fn set_value(&mut self, name: &str, value: &str);

    /// Notifies form-level listeners (autosave, dirty tracking) of an update.
    fn dispatch_change(&mut self, name: &str);
}

/// Writes selection changes to a [`FormSink`], one change event per field
/// whose value actually changed.
#[derive(Debug, Default)]
pub struct FormMirror {
    last: Option<FormFields>,
}

impl FormMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mirror for a form that already holds `fields` (server-rendered
    /// values), so the first sync only reports real changes.
    pub fn with_initial(fields: FormFields) -> Self {
        Self { last: Some(fields) }
    }

    /// Pushes `fields` to `sink`. Returns the names of the fields that changed.
    pub fn sync(&mut self, fields: &FormFields, sink: &mut dyn FormSink) -> Vec<&'static str> {
        let previous = self.last.replace(fields.clone());
        let mut changed = Vec::new();
        for (name, value) in fields.pairs() {
            let unchanged = previous
                .as_ref()
                .is_some_and(|last| last.value(name) == Some(value));
            if unchanged {
                continue;
            }
            sink.set_value(name, value);
            sink.dispatch_change(name);
            changed.push(name);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Coordinates, PlaceId};

    #[derive(Default)]
    struct RecordingSink {
        values: Vec<(String, String)>,
        changes: Vec<String>,
    }

    impl FormSink for RecordingSink {
        fn set_value(&mut self, name: &str, value: &str) {
            self.values.push((name.to_string(), value.to_string()));
        }

        fn dispatch_change(&mut self, name: &str) {
            self.changes.push(name.to_string());
        }
    }

    #[test]
    fn test_blank_location_mirrors_empty_strings() {
        let fields = FormFields::from(&Location::blank(1));
        assert_eq!(fields, FormFields::default());
    }

    #[test]
    fn test_pin_without_place_id_leaves_place_id_empty() {
        let pin = Location::dropped_pin(Coordinates::new(31.7767, 35.2345), 14);
        let fields = FormFields::from(&pin);
        assert_eq!(fields.latitude, "31.7767");
        assert_eq!(fields.longitude, "35.2345");
        assert_eq!(fields.place_id, "");
    }

    #[test]
    fn test_mirror_dispatches_change_only_for_changed_fields() {
        let mut mirror = FormMirror::new();
        let mut sink = RecordingSink::default();

        let first = Location::new(
            "10 Downing St",
            Coordinates::new(51.5034, -0.1276),
            Some(PlaceId::new("p1")),
            16,
        );
        let changed = mirror.sync(&FormFields::from(&first), &mut sink);
        assert_eq!(changed, vec![LATITUDE_FIELD, LONGITUDE_FIELD, PLACE_ID_FIELD]);
        assert_eq!(sink.changes.len(), 3);

        // Zoom-only change: nothing submitted changes.
        let changed = mirror.sync(&FormFields::from(&first.with_zoom(10)), &mut sink);
        assert!(changed.is_empty());
        assert_eq!(sink.changes.len(), 3);

        let pin = Location::dropped_pin(Coordinates::new(51.5034, -0.2), 16);
        let changed = mirror.sync(&FormFields::from(&pin), &mut sink);
        assert_eq!(changed, vec![LONGITUDE_FIELD, PLACE_ID_FIELD]);
        assert_eq!(
            sink.values.last(),
            Some(&(PLACE_ID_FIELD.to_string(), String::new()))
        );
    }

    #[test]
    fn test_mirror_with_initial_values_skips_unchanged_mount() {
        let seed = Location::blank(1);
        let mut mirror = FormMirror::with_initial(FormFields::from(&seed));
        let mut sink = RecordingSink::default();

        assert!(mirror.sync(&FormFields::from(&seed), &mut sink).is_empty());
        assert!(sink.changes.is_empty());
    }
}
