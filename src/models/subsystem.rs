use serde::{Deserialize, Deserializer, Serialize};

/// Identifies one of the five fixed engine subsystems.
///
/// The declaration order is the enumeration order used to break ties when
/// picking the weakest subsystem, so it must not be rearranged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubsystemKey {
    Propulsion,
    Thermal,
    Structural,
    Avionics,
    Fuel,
}

impl SubsystemKey {
    /// All keys in enumeration order.
    pub const ALL: [SubsystemKey; 5] = [
        Self::Propulsion,
        Self::Thermal,
        Self::Structural,
        Self::Avionics,
        Self::Fuel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propulsion => "propulsion",
            Self::Thermal => "thermal",
            Self::Structural => "structural",
            Self::Avionics => "avionics",
            Self::Fuel => "fuel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "propulsion" => Some(Self::Propulsion),
            "thermal" => Some(Self::Thermal),
            "structural" => Some(Self::Structural),
            "avionics" => Some(Self::Avionics),
            "fuel" => Some(Self::Fuel),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubsystemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fictional rocket-engine subsystem and its readiness.
///
/// `status`, `cost_efficiency` and the audit's `practicality_index` are
/// percentages; any value read from a document is clamped into `0..=100`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSubsystem {
    pub name: String,
    #[serde(deserialize_with = "percent")]
    pub status: u8,
    pub specifications: String,
    /// Absent in documents written by early dashboard versions.
    #[serde(
        default,
        deserialize_with = "optional_percent",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_efficiency: Option<u8>,
    pub last_update: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optimization_history: Vec<OptimizationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feasibility_audit: Option<FeasibilityAudit>,
}

impl EngineSubsystem {
    pub fn genesis(name: &str, status: u8, specifications: &str) -> Self {
        Self {
            name: name.to_string(),
            status,
            specifications: specifications.to_string(),
            cost_efficiency: None,
            last_update: "Genesis".to_string(),
            optimization_history: Vec::new(),
            feasibility_audit: None,
        }
    }
}

/// A readiness change recorded against a subsystem after a cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRecord {
    pub cycle: u32,
    pub delta: i32,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityAudit {
    #[serde(deserialize_with = "percent")]
    pub practicality_index: u8,
    pub primary_risk: String,
    pub manufacturing_status: ManufacturingStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ManufacturingStatus {
    Theoretical,
    Prototyping,
    Production,
}

/// The fixed set of subsystems.
///
/// A struct rather than a map: a document missing any of the five keys, or
/// carrying a sixth, fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Subsystems {
    pub propulsion: EngineSubsystem,
    pub thermal: EngineSubsystem,
    pub structural: EngineSubsystem,
    pub avionics: EngineSubsystem,
    pub fuel: EngineSubsystem,
}

impl Subsystems {
    pub fn get(&self, key: SubsystemKey) -> &EngineSubsystem {
        match key {
            SubsystemKey::Propulsion => &self.propulsion,
            SubsystemKey::Thermal => &self.thermal,
            SubsystemKey::Structural => &self.structural,
            SubsystemKey::Avionics => &self.avionics,
            SubsystemKey::Fuel => &self.fuel,
        }
    }

    pub fn get_mut(&mut self, key: SubsystemKey) -> &mut EngineSubsystem {
        match key {
            SubsystemKey::Propulsion => &mut self.propulsion,
            SubsystemKey::Thermal => &mut self.thermal,
            SubsystemKey::Structural => &mut self.structural,
            SubsystemKey::Avionics => &mut self.avionics,
            SubsystemKey::Fuel => &mut self.fuel,
        }
    }

    /// Iterate in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (SubsystemKey, &EngineSubsystem)> {
        SubsystemKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_percent)
}

fn optional_percent<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(clamp_percent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_clamped_on_read() {
        let sub: EngineSubsystem = serde_json::from_str(
            r#"{"name":"X","status":140,"specifications":"s","costEfficiency":-3,"lastUpdate":"c1"}"#,
        )
        .unwrap();
        assert_eq!(sub.status, 100);
        assert_eq!(sub.cost_efficiency, Some(0));
    }

    #[test]
    fn fractional_status_rounds() {
        let sub: EngineSubsystem = serde_json::from_str(
            r#"{"name":"X","status":41.6,"specifications":"s","lastUpdate":"c1"}"#,
        )
        .unwrap();
        assert_eq!(sub.status, 42);
        assert!(sub.cost_efficiency.is_none());
        assert!(sub.feasibility_audit.is_none());
    }

    #[test]
    fn audit_practicality_is_clamped() {
        let audit: FeasibilityAudit = serde_json::from_str(
            r#"{"practicalityIndex":250,"primaryRisk":"heat","manufacturingStatus":"Prototyping"}"#,
        )
        .unwrap();
        assert_eq!(audit.practicality_index, 100);
        assert_eq!(audit.manufacturing_status, ManufacturingStatus::Prototyping);
    }

    #[test]
    fn keys_round_trip_through_strings() {
        for key in SubsystemKey::ALL {
            assert_eq!(SubsystemKey::from_str(key.as_str()), Some(key));
        }
        assert_eq!(SubsystemKey::from_str("warp"), None);
    }

    #[test]
    fn unknown_subsystem_key_is_rejected() {
        let sub = serde_json::to_value(EngineSubsystem::genesis("X", 10, "s")).unwrap();
        let doc = serde_json::json!({
            "propulsion": sub, "thermal": sub, "structural": sub,
            "avionics": sub, "fuel": sub, "warp": sub
        });
        assert!(serde_json::from_value::<Subsystems>(doc).is_err());
    }
}
