//! Checks run on `dispatch_config.toml` before the engine sees it.
//!
//! Key check: the raw document is parsed as `toml::Value` and every dotted
//! key is compared with the fields `DispatchConfig` understands. Misspelled
//! keys are reported with the nearest valid key. Serde ignores them, so a
//! typo never stops a deployment, but it is logged.
//!
//! Range check: after deserialization, values the engine cannot compute with
//! become errors; values that are usable but unlikely become warnings.

use std::collections::HashSet;

use super::defaults;

/// Something in the config worth telling the operator about.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Dotted key path, e.g. `timing.handover_time_min`
    pub field: String,
    pub message: String,
    /// Closest known key when `field` is not recognised
    pub suggestion: Option<String>,
}

impl ValidationWarning {
    fn unknown_key(key: String, suggestion: Option<String>) -> Self {
        Self {
            message: format!("Unknown config key '{key}' is ignored"),
            field: key,
            suggestion,
        }
    }

    fn implausible(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
            suggestion: None,
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.suggestion {
            Some(s) => write!(f, "{} (closest valid key: '{s}')", self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for DispatchConfig.
///
/// Any new field added to DispatchConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [service]
        "service",
        "service.name",
        "service.region_name",
        // [timing]
        "timing",
        "timing.dispatch_time_min",
        "timing.on_scene_time_min",
        "timing.handover_time_min",
        // [travel]
        "travel",
        "travel.average_speed_kmh",
        // [region]
        "region",
        "region.lat_min",
        "region.lat_max",
        "region.lon_min",
        "region.lon_max",
        // [data]
        "data",
        "data.hospitals_csv",
        "data.model_dir",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// Key Paths
// ============================================================================

/// Every key in a TOML document as a dotted path, tables included.
///
/// `[timing]\ndispatch_time_min = 2.0` gives `timing` and
/// `timing.dispatch_time_min`. Arrays are treated as leaves.
pub fn dotted_keys(value: &toml::Value) -> Vec<String> {
    fn collect(table: &toml::Table, parent: Option<&str>, out: &mut Vec<String>) {
        for (name, child) in table {
            let path = parent.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
            if let toml::Value::Table(inner) = child {
                out.push(path.clone());
                collect(inner, Some(&path), out);
            } else {
                out.push(path);
            }
        }
    }

    let mut out = Vec::new();
    if let toml::Value::Table(root) = value {
        collect(root, None, &mut out);
    }
    out
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    dotted_keys(&value)
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning::unknown_key(key, suggestion)
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate policy ranges on a parsed DispatchConfig.
///
/// Returns (errors, warnings). Errors are values the engine cannot work
/// with and must prevent startup; warnings are suspicious but usable.
pub fn validate_ranges(config: &super::DispatchConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Speed is a divisor
    let speed = config.travel.average_speed_kmh;
    if !speed.is_finite() || speed <= 0.0 {
        errors.push(format!(
            "travel.average_speed_kmh = {speed} must be a positive number (used as divisor)"
        ));
    } else if speed > defaults::MAX_PLAUSIBLE_SPEED_KMH {
        warnings.push(ValidationWarning::implausible(
            "travel.average_speed_kmh",
            format!(
                "average_speed_kmh = {speed:.1} is above typical urban EMS speeds (<= {:.0} km/h)",
                defaults::MAX_PLAUSIBLE_SPEED_KMH
            ),
        ));
    }

    let t = &config.timing;
    for (name, value) in [
        ("timing.dispatch_time_min", t.dispatch_time_min),
        ("timing.on_scene_time_min", t.on_scene_time_min),
        ("timing.handover_time_min", t.handover_time_min),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("{name} = {value} must be a non-negative number of minutes"));
        } else if value > defaults::MAX_PLAUSIBLE_FIXED_TIME_MIN {
            warnings.push(ValidationWarning::implausible(
                name,
                format!(
                    "{name} = {value:.1} exceeds {:.0} minutes",
                    defaults::MAX_PLAUSIBLE_FIXED_TIME_MIN
                ),
            ));
        }
    }

    let r = &config.region;
    if !(r.lat_min.is_finite() && r.lat_max.is_finite()) || r.lat_min >= r.lat_max {
        errors.push(format!(
            "region.lat_min ({}) must be below region.lat_max ({})",
            r.lat_min, r.lat_max
        ));
    }
    if !(r.lon_min.is_finite() && r.lon_max.is_finite()) || r.lon_min >= r.lon_max {
        errors.push(format!(
            "region.lon_min ({}) must be below region.lon_max ({})",
            r.lon_min, r.lon_max
        ));
    }
    if r.lat_min < -90.0 || r.lat_max > 90.0 {
        errors.push("region latitude bounds must lie within [-90, 90]".to_string());
    }
    if r.lon_min < -180.0 || r.lon_max > 180.0 {
        errors.push("region longitude bounds must lie within [-180, 180]".to_string());
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
