use serde::{Deserialize, Serialize};

/// A JSON value the feed may send either as a number or as a numeric string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(value) => Some(*value),
            Scalar::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                Some(*value as i64)
            }
            Scalar::Float(_) => None,
            Scalar::Text(value) => value.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(value) => value.trim().parse().ok(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(value) if value.trim().is_empty())
    }

    pub fn raw(&self) -> String {
        match self {
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Text(value) => value.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FeedWaypoint {
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<Scalar>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<Scalar>,
    #[serde(rename = "Timezone")]
    pub timezone: Option<String>,
    #[serde(rename = "Unix Arrival")]
    pub unix_arrival: Option<Scalar>,
    #[serde(rename = "Arrival Stoppage Time")]
    pub stoppage_time: Option<Scalar>,
    #[serde(rename = "Eggs Delivered")]
    pub delivered: Option<Scalar>,
    #[serde(rename = "Carrots eaten")]
    pub consumed: Option<Scalar>,
    #[serde(rename = "Population Num")]
    pub population: Option<Scalar>,
    #[serde(rename = "Population Year")]
    pub population_year: Option<Scalar>,
    #[serde(rename = "Wikipedia attr")]
    pub wikipedia: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedStatusUpdate {
    pub timestamp: String,
    pub update: String,
}
