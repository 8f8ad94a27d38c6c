//! Sampled pen position

/// One sample along a stroke
///
/// `pressure` is either a device reading or [`Point::NO_PRESSURE`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
}

impl Point {
    /// Marker for "this sample carries no pressure"
    pub const NO_PRESSURE: f64 = -1.0;

    /// Size of one serialized point record: x, y, pressure as little-endian `f64`
    pub const RECORD_SIZE: usize = 24;

    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    /// Point without a pressure reading
    pub fn without_pressure(x: f64, y: f64) -> Self {
        Self::new(x, y, Self::NO_PRESSURE)
    }

    /// Returned in place of a missing point
    pub fn zero() -> Self {
        Self::without_pressure(0.0, 0.0)
    }

    pub fn has_pressure(&self) -> bool {
        self.pressure != Self::NO_PRESSURE
    }

    pub fn to_record(&self) -> [u8; Self::RECORD_SIZE] {
        let mut record = [0u8; Self::RECORD_SIZE];
        record[0..8].copy_from_slice(&self.x.to_le_bytes());
        record[8..16].copy_from_slice(&self.y.to_le_bytes());
        record[16..24].copy_from_slice(&self.pressure.to_le_bytes());
        record
    }

    /// Decode one record; `record` must be exactly [`Point::RECORD_SIZE`] bytes
    pub fn from_record(record: &[u8]) -> Option<Self> {
        if record.len() != Self::RECORD_SIZE {
            return None;
        }
        let field = |offset: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&record[offset..offset + 8]);
            f64::from_le_bytes(raw)
        };
        Some(Self::new(field(0), field(8), field(16)))
    }

    /// Euclidean distance to another point, ignoring pressure
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_little_endian_xyz() {
        let point = Point::new(1.5, -2.0, Point::NO_PRESSURE);
        let record = point.to_record();
        assert_eq!(&record[0..8], &1.5f64.to_le_bytes());
        assert_eq!(&record[16..24], &(-1.0f64).to_le_bytes());
        assert_eq!(Point::from_record(&record), Some(point));
        assert_eq!(Point::from_record(&record[..23]), None);
    }

    #[test]
    fn sentinel_is_not_pressure() {
        assert!(!Point::without_pressure(1.0, 2.0).has_pressure());
        assert!(Point::new(1.0, 2.0, 0.0).has_pressure());
        assert!(!Point::zero().has_pressure());
    }

    #[test]
    fn distance() {
        let a = Point::without_pressure(0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.7);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}
