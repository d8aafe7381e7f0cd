//! Station domain entity

use chrono::{DateTime, Utc};

/// A docking location for fleet bikes
///
/// `parking_bays` is declared capacity only; nothing enforces it against
/// the count of bikes actually docked, which is read off `Ebike.station_id`.
#[derive(Debug, Clone)]
pub struct Station {
    /// Unique station ID
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Declared docking capacity
    pub parking_bays: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        parking_bays: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            parking_bays,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_station_carries_coordinates() {
        let s = Station::new("st-1", "Central Park Station", 40.785091, -73.968285, 12);
        assert_eq!(s.name, "Central Park Station");
        assert_eq!(s.parking_bays, 12);
        assert!((s.latitude - 40.785091).abs() < f64::EPSILON);
    }
}
