use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Room ordering strategy fed to both search phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    Area,
    Adjacency,
    Hybrid,
    DegreeArea,
}

impl SortMethod {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "area" => Some(Self::Area),
            "adjacency" | "degree" => Some(Self::Adjacency),
            "hybrid" => Some(Self::Hybrid),
            "degree_area" => Some(Self::DegreeArea),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Adjacency => "adjacency",
            Self::Hybrid => "hybrid",
            Self::DegreeArea => "degree_area",
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            format!("unknown sort method '{s}' (expected area, adjacency, hybrid, degree_area)")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    GreedyOnly,
    BacktrackingThenGreedy,
}

impl Algorithm {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "greedy" | "greedy_only" => Some(Self::GreedyOnly),
            "backtracking" | "backtracking_then_greedy" | "backtracking_greedy" => {
                Some(Self::BacktrackingThenGreedy)
            }
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GreedyOnly => "greedy_only",
            Self::BacktrackingThenGreedy => "backtracking_then_greedy",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            format!("unknown algorithm '{s}' (expected greedy_only, backtracking_then_greedy)")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub sort_method: SortMethod,
    pub allow_rotation: bool,
    pub step: f32,
    pub adjacency_weight: f32,
    pub area_weight: f32,
    pub timeout_seconds: f32,
    pub algorithm: Algorithm,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            sort_method: SortMethod::Hybrid,
            allow_rotation: true,
            step: 1.0,
            adjacency_weight: 0.7,
            area_weight: 0.3,
            timeout_seconds: 30.0,
            algorithm: Algorithm::BacktrackingThenGreedy,
        }
    }
}

/// Named parameter bundles offered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Simple,
    Optimal,
    Adjacency,
    Speed,
}

impl Preset {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "optimal" => Some(Self::Optimal),
            "adjacency" => Some(Self::Adjacency),
            "speed" => Some(Self::Speed),
            _ => None,
        }
    }

    pub fn config(self) -> PlacementConfig {
        match self {
            Self::Simple => PlacementConfig {
                sort_method: SortMethod::Area,
                allow_rotation: true,
                step: 1.0,
                adjacency_weight: 0.5,
                area_weight: 0.5,
                timeout_seconds: 15.0,
                algorithm: Algorithm::GreedyOnly,
            },
            Self::Optimal => PlacementConfig {
                sort_method: SortMethod::Hybrid,
                allow_rotation: true,
                step: 1.0,
                adjacency_weight: 0.7,
                area_weight: 0.3,
                timeout_seconds: 60.0,
                algorithm: Algorithm::BacktrackingThenGreedy,
            },
            Self::Adjacency => PlacementConfig {
                sort_method: SortMethod::DegreeArea,
                allow_rotation: true,
                step: 1.0,
                adjacency_weight: 0.9,
                area_weight: 0.1,
                timeout_seconds: 45.0,
                algorithm: Algorithm::BacktrackingThenGreedy,
            },
            Self::Speed => PlacementConfig {
                sort_method: SortMethod::Area,
                allow_rotation: true,
                step: 2.0,
                adjacency_weight: 0.6,
                area_weight: 0.4,
                timeout_seconds: 10.0,
                algorithm: Algorithm::GreedyOnly,
            },
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            format!("unknown preset '{s}' (expected simple, optimal, adjacency, speed)")
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    preset: Option<String>,
    sort_method: Option<String>,
    allow_rotation: Option<bool>,
    step: Option<NumberOrString>,
    adjacency_weight: Option<NumberOrString>,
    area_weight: Option<NumberOrString>,
    timeout_seconds: Option<NumberOrString>,
    timeout: Option<NumberOrString>,
    algorithm: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<PlacementConfig> {
    let config = PlacementConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(config, parsed)
}

/// Overlays a loosely-typed JSON object (config file body or a scenario's
/// init directive) onto `config`. Unknown keys are ignored.
pub fn merge_config_value(
    config: PlacementConfig,
    value: serde_json::Value,
) -> anyhow::Result<PlacementConfig> {
    let parsed: ConfigFile = serde_json::from_value(value)?;
    apply_config_file(config, parsed)
}

fn apply_config_file(
    mut config: PlacementConfig,
    parsed: ConfigFile,
) -> anyhow::Result<PlacementConfig> {
    if let Some(name) = parsed.preset.as_deref() {
        let preset = Preset::from_token(name)
            .ok_or_else(|| anyhow::anyhow!("unknown preset '{}'", name))?;
        config = preset.config();
    }
    if let Some(v) = parsed.sort_method.as_deref() {
        config.sort_method = v.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = parsed.allow_rotation {
        config.allow_rotation = v;
    }
    if let Some(v) = parsed.step.as_ref().and_then(|v| v.as_f32()) {
        config.step = v;
    }
    if let Some(v) = parsed.adjacency_weight.as_ref().and_then(|v| v.as_f32()) {
        config.adjacency_weight = v;
    }
    if let Some(v) = parsed.area_weight.as_ref().and_then(|v| v.as_f32()) {
        config.area_weight = v;
    }
    if let Some(v) = parsed
        .timeout_seconds
        .as_ref()
        .or(parsed.timeout.as_ref())
        .and_then(|v| v.as_f32())
    {
        config.timeout_seconds = v;
    }
    if let Some(v) = parsed.algorithm.as_deref() {
        config.algorithm = v.parse().map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_method_tokens_accept_ui_spelling() {
        assert_eq!(SortMethod::from_token("Degree-Area"), Some(SortMethod::DegreeArea));
        assert_eq!(SortMethod::from_token("HYBRID"), Some(SortMethod::Hybrid));
        assert!("perimeter".parse::<SortMethod>().is_err());
    }

    #[test]
    fn speed_preset_coarsens_grid() {
        let config = Preset::Speed.config();
        assert_eq!(config.step, 2.0);
        assert_eq!(config.algorithm, Algorithm::GreedyOnly);
    }

    #[test]
    fn merge_overlays_only_present_keys() {
        let value = serde_json::json!({
            "sortMethod": "degree_area",
            "step": "2",
            "timeout": 5,
        });
        let config = merge_config_value(PlacementConfig::default(), value).unwrap();
        assert_eq!(config.sort_method, SortMethod::DegreeArea);
        assert_eq!(config.step, 2.0);
        assert_eq!(config.timeout_seconds, 5.0);
        assert!(config.allow_rotation);
        assert_eq!(config.adjacency_weight, 0.7);
    }

    #[test]
    fn preset_is_applied_before_explicit_keys() {
        let value = serde_json::json!({ "preset": "simple", "algorithm": "backtracking" });
        let config = merge_config_value(PlacementConfig::default(), value).unwrap();
        assert_eq!(config.sort_method, SortMethod::Area);
        assert_eq!(config.algorithm, Algorithm::BacktrackingThenGreedy);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let value = serde_json::json!({ "preset": "fancy" });
        assert!(merge_config_value(PlacementConfig::default(), value).is_err());
    }
}
