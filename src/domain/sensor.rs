// Sensor domain model
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 1-based sensor index, rendered as `s1`, `s2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorId(u32);

impl SensorId {
    pub const FIRST: SensorId = SensorId(1);

    pub fn new(index: u32) -> Option<Self> {
        (index >= 1).then_some(Self(index))
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    /// All sensors of a plant with `count` sensors, in ascending order
    pub fn all(count: u32) -> impl Iterator<Item = SensorId> {
        (1..=count).map(SensorId)
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl FromStr for SensorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('s')
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(SensorId::new)
            .ok_or_else(|| s.to_string())
    }
}

impl Serialize for SensorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    Temperature,
    Vibration,
    Consumption,
}

impl Variable {
    pub const ALL: [Variable; 3] = [
        Variable::Temperature,
        Variable::Vibration,
        Variable::Consumption,
    ];

    pub fn column_prefix(&self) -> &'static str {
        match self {
            Variable::Temperature => "temp",
            Variable::Vibration => "vib",
            Variable::Consumption => "cons",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Temperature => "Temperature",
            Variable::Vibration => "Vibration",
            Variable::Consumption => "Consumption",
        }
    }

    pub fn column_for(&self, sensor: SensorId) -> String {
        format!("{}_{}", self.column_prefix(), sensor)
    }
}

impl FromStr for Variable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Spanish names match the labels plant operators see on the dashboard
        match s.to_ascii_lowercase().as_str() {
            "temperature" | "temperatura" | "temp" => Ok(Variable::Temperature),
            "vibration" | "vibracion" | "vib" => Ok(Variable::Vibration),
            "consumption" | "consumo" | "cons" => Ok(Variable::Consumption),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorLocation {
    pub sensor: SensorId,
    pub lat: f64,
    pub lon: f64,
}

impl SensorLocation {
    pub fn new(sensor: SensorId, lat: f64, lon: f64) -> Self {
        Self { sensor, lat, lon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_id_parse_and_display() {
        let sensor: SensorId = "s3".parse().unwrap();
        assert_eq!(sensor.index(), 3);
        assert_eq!(sensor.to_string(), "s3");

        assert!("s0".parse::<SensorId>().is_err());
        assert!("3".parse::<SensorId>().is_err());
        assert!("sx".parse::<SensorId>().is_err());
    }

    #[test]
    fn test_variable_aliases() {
        assert_eq!("temperatura".parse::<Variable>(), Ok(Variable::Temperature));
        assert_eq!("Vibracion".parse::<Variable>(), Ok(Variable::Vibration));
        assert_eq!("consumption".parse::<Variable>(), Ok(Variable::Consumption));
        assert!("pressure".parse::<Variable>().is_err());
    }

    #[test]
    fn test_column_for() {
        let sensor = SensorId::new(2).unwrap();
        assert_eq!(Variable::Temperature.column_for(sensor), "temp_s2");
        assert_eq!(Variable::Vibration.column_for(sensor), "vib_s2");
        assert_eq!(Variable::Consumption.column_for(sensor), "cons_s2");
    }
}
