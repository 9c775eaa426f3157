//! Sensor reading model

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Channels in one sensor sample. A record with any other field count is
/// malformed and rejected, never coerced.
pub const CHANNEL_COUNT: usize = 4;

/// One decoded sensor sample: four numeric channels in fixed order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub rainfall: f64,
    pub flow_rate: f64,
    pub water_level: f64,
    pub wind_speed: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseReadingError {
    #[error("expected {CHANNEL_COUNT} comma-separated values, got {0}")]
    FieldCount(usize),

    #[error("invalid numeric value: {0:?}")]
    InvalidNumber(String),
}

impl Reading {
    pub fn new(rainfall: f64, flow_rate: f64, water_level: f64, wind_speed: f64) -> Self {
        Self {
            rainfall,
            flow_rate,
            water_level,
            wind_speed,
        }
    }

    /// Channels in wire order.
    pub fn channels(&self) -> [f64; CHANNEL_COUNT] {
        [self.rainfall, self.flow_rate, self.water_level, self.wind_speed]
    }

    /// Durable record form: comma-separated decimal text, no trailing comma.
    pub fn to_record(&self) -> String {
        format!(
            "{},{},{},{}",
            self.rainfall, self.flow_rate, self.water_level, self.wind_speed
        )
    }
}

impl FromStr for Reading {
    type Err = ParseReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').collect();
        if fields.len() != CHANNEL_COUNT {
            return Err(ParseReadingError::FieldCount(fields.len()));
        }

        let mut channels = [0.0f64; CHANNEL_COUNT];
        for (slot, field) in channels.iter_mut().zip(&fields) {
            let value: f64 = field
                .trim()
                .parse()
                .map_err(|_| ParseReadingError::InvalidNumber(field.trim().to_string()))?;
            // Channels are finite reals; "NaN"/"inf" parse but are not valid data
            if !value.is_finite() {
                return Err(ParseReadingError::InvalidNumber(field.trim().to_string()));
            }
            *slot = value;
        }

        Ok(Reading::new(channels[0], channels[1], channels[2], channels[3]))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_record())
    }
}
