//! Feed tank model with water source characterization.
//!
//! Beyond the steady-state flow balance, the feed tank characterizes the
//! raw water: treatment difficulty, recommended pretreatment train, a silt
//! density index estimate and membrane fouling potential. Outlet quality
//! accounts for settling at long residence times.

use crate::common::round_to;
use crate::error::{CalcResult, UnitError};
use crate::types::{FieldValue, UnitData, UnitResult};
use aq_core::engineering::{EngineeringError, Severity};
use serde::{Deserialize, Serialize};

/// Raw water quality parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterQuality {
    /// Turbidity (NTU)
    pub turbidity: f64,
    /// Total suspended solids (mg/L)
    pub tss: f64,
    /// Total dissolved solids (mg/L)
    pub tds: f64,
    /// Fats, oils and grease (mg/L)
    pub fog: f64,
    /// Biochemical oxygen demand (mg/L)
    pub bod: f64,
    /// Chemical oxygen demand (mg/L)
    pub cod: f64,
    pub ph: f64,
    /// Alkalinity (mg/L as CaCO3)
    pub alkalinity: f64,
    /// Hardness (mg/L as CaCO3)
    pub hardness: f64,
    /// Chloride (mg/L)
    pub chloride: f64,
    /// Sulfate (mg/L)
    pub sulfate: f64,
    /// Nitrate (mg/L)
    pub nitrate: f64,
    /// Phosphate (mg/L)
    pub phosphate: f64,
    /// Iron (mg/L)
    pub iron: f64,
    /// Manganese (mg/L)
    pub manganese: f64,
}

impl Default for WaterQuality {
    fn default() -> Self {
        Self {
            turbidity: 1.0,
            tss: 10.0,
            tds: 500.0,
            fog: 5.0,
            bod: 20.0,
            cod: 50.0,
            ph: 7.0,
            alkalinity: 100.0,
            hardness: 150.0,
            chloride: 50.0,
            sulfate: 30.0,
            nitrate: 10.0,
            phosphate: 2.0,
            iron: 0.5,
            manganese: 0.1,
        }
    }
}

/// Raw water source category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    #[default]
    SurfaceWater,
    Groundwater,
    Municipal,
    Industrial,
}

impl SourceType {
    /// Baseline pretreatment train for this kind of source.
    fn pretreatment_needs(self) -> &'static [&'static str] {
        match self {
            SourceType::SurfaceWater => &["coagulation", "sedimentation", "filtration"],
            SourceType::Groundwater => &["iron_removal", "hardness_removal"],
            SourceType::Municipal => &["chlorine_removal", "ph_adjustment"],
            SourceType::Industrial => {
                &["neutralization", "heavy_metal_removal", "organics_removal"]
            }
        }
    }
}

/// Feed tank operating point and source description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedTankInputs {
    /// Tank volume (m³)
    pub volume: f64,
    /// Tank height (m)
    pub height: f64,
    /// Fill level (%)
    pub level: f64,
    /// Raw water inflow (m³/h)
    pub inflow_rate: f64,
    /// Water temperature (°C)
    pub temperature: f64,
    pub source_type: SourceType,
    pub source_description: String,
    pub water_quality: WaterQuality,
}

impl Default for FeedTankInputs {
    fn default() -> Self {
        Self {
            volume: 1000.0,
            height: 10.0,
            level: 75.0,
            inflow_rate: 100.0,
            temperature: 25.0,
            source_type: SourceType::SurfaceWater,
            source_description: "River intake".to_string(),
            water_quality: WaterQuality::default(),
        }
    }
}

/// Feed tank with water source characterization.
#[derive(Debug, Clone)]
pub struct FeedTank {
    pub equipment_id: String,
}

impl FeedTank {
    pub fn new(equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
        }
    }

    /// Compute steady-state tank behavior and raw-water assessment.
    pub fn calculate(&self, inputs: &FeedTankInputs) -> CalcResult<UnitResult> {
        let errors = self.validate_inputs(inputs);
        if !errors.is_empty() {
            return Err(UnitError::Engineering(errors));
        }

        let water_volume = inputs.volume * inputs.level / 100.0;
        let residence_time = if inputs.inflow_rate > 0.0 {
            water_volume / inputs.inflow_rate
        } else {
            0.0
        };

        // Steady state: outlet matches inflow
        let outlet_flow = inputs.inflow_rate;
        let overflow_risk = inputs.level > 90.0;

        // Exponential-decay mixing approximation
        let water_age = residence_time * 0.37;

        let quality = &inputs.water_quality;
        let difficulty = assess_treatment_difficulty(quality);
        let pretreatment = recommend_pretreatment(inputs.source_type, quality);
        let sdi = estimate_sdi(quality);
        let fouling = assess_fouling_potential(quality);
        let outlet_quality = settle_outlet_quality(quality, residence_time);

        let warnings = self.validate_water_quality(quality);

        let mut data = UnitData::new();
        data.insert("outlet_flow".into(), round_to(outlet_flow, 2).into());
        data.insert("residence_time".into(), round_to(residence_time, 2).into());
        data.insert("water_volume".into(), round_to(water_volume, 1).into());
        data.insert("overflow_risk".into(), overflow_risk.into());
        data.insert("water_age".into(), round_to(water_age, 2).into());
        data.insert("treatment_difficulty".into(), difficulty.into());
        data.insert(
            "recommended_pretreatment".into(),
            FieldValue::List(pretreatment),
        );
        data.insert("sdi_estimate".into(), round_to(sdi, 1).into());
        data.insert("fouling_potential".into(), fouling.into());
        data.insert(
            "outlet_quality".into(),
            FieldValue::Quality(outlet_quality),
        );

        Ok(UnitResult::with_warnings(data, warnings))
    }

    fn validate_inputs(&self, inputs: &FeedTankInputs) -> Vec<EngineeringError> {
        let mut errors = Vec::new();

        if inputs.volume <= 0.0 {
            errors.push(
                EngineeringError::new(
                    "INVALID_VOLUME",
                    "Tank volume must be positive",
                    Severity::Error,
                )
                .for_equipment(&self.equipment_id),
            );
        }

        if !(0.0..=100.0).contains(&inputs.level) {
            errors.push(
                EngineeringError::new(
                    "INVALID_LEVEL",
                    "Tank level must be between 0-100%",
                    Severity::Error,
                )
                .for_equipment(&self.equipment_id),
            );
        }

        if inputs.inflow_rate < 0.0 {
            errors.push(
                EngineeringError::new(
                    "INVALID_INFLOW",
                    "Inflow rate cannot be negative",
                    Severity::Error,
                )
                .for_equipment(&self.equipment_id),
            );
        }

        errors
    }

    /// Advisory checks on raw-water quality; never blocking.
    fn validate_water_quality(&self, quality: &WaterQuality) -> Vec<EngineeringError> {
        let mut warnings = Vec::new();

        if quality.ph < 4.0 || quality.ph > 11.0 {
            warnings.push(
                EngineeringError::new(
                    "EXTREME_PH",
                    format!(
                        "pH {} is outside typical water treatment range (4-11)",
                        quality.ph
                    ),
                    Severity::Warning,
                )
                .for_equipment(&self.equipment_id),
            );
        }

        if quality.turbidity > 100.0 {
            warnings.push(
                EngineeringError::new(
                    "HIGH_TURBIDITY",
                    format!(
                        "Turbidity {} NTU is very high - extensive pretreatment required",
                        quality.turbidity
                    ),
                    Severity::Warning,
                )
                .for_equipment(&self.equipment_id),
            );
        }

        if quality.tds > 2000.0 {
            warnings.push(
                EngineeringError::new(
                    "HIGH_TDS",
                    format!("TDS {} mg/L may require RO treatment", quality.tds),
                    Severity::Info,
                )
                .for_equipment(&self.equipment_id),
            );
        }

        warnings
    }
}

/// Score raw water into a treatment-difficulty rating.
fn assess_treatment_difficulty(quality: &WaterQuality) -> &'static str {
    let mut score = 0u32;

    score += step_score(quality.turbidity, 5.0, 10.0);
    score += step_score(quality.tss, 20.0, 50.0);
    score += step_score(quality.tds, 500.0, 1000.0);
    score += step_score(quality.cod, 50.0, 100.0);
    score += step_score(quality.fog, 10.0, 20.0);

    // pH contribution: distance from the neutral band
    if quality.ph < 6.0 || quality.ph > 9.0 {
        score += 2;
    } else if quality.ph < 6.5 || quality.ph > 8.5 {
        score += 1;
    }

    if quality.hardness > 300.0 {
        score += 1;
    }

    match score {
        0..=1 => "low",
        2..=3 => "medium",
        4..=5 => "high",
        _ => "very_high",
    }
}

/// 0/1/2 points for crossing the soft and hard thresholds.
fn step_score(value: f64, soft: f64, hard: f64) -> u32 {
    if value > hard {
        2
    } else if value > soft {
        1
    } else {
        0
    }
}

/// Pretreatment train from source category plus quality-specific triggers.
fn recommend_pretreatment(source_type: SourceType, quality: &WaterQuality) -> Vec<String> {
    let mut recommendations: Vec<String> = source_type
        .pretreatment_needs()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut push_unique = |step: &str| {
        if !recommendations.iter().any(|r| r == step) {
            recommendations.push(step.to_string());
        }
    };

    if quality.turbidity > 5.0 {
        push_unique("coagulation");
    }
    if quality.ph < 6.5 || quality.ph > 8.5 {
        push_unique("ph_adjustment");
    }
    if quality.hardness > 200.0 {
        push_unique("hardness_removal");
    }
    if quality.iron > 0.3 {
        push_unique("iron_removal");
    }
    if quality.cod > 50.0 {
        push_unique("activated_carbon");
    }
    if quality.tss > 30.0 {
        push_unique("filtration");
    }
    if quality.fog > 10.0 {
        push_unique("oil_water_separation");
    }

    recommendations
}

/// Empirical Silt Density Index estimate from quality parameters.
fn estimate_sdi(quality: &WaterQuality) -> f64 {
    let sdi = 1.0
        + quality.turbidity * 0.2
        + quality.tss * 0.05
        + quality.iron * 2.0
        + quality.cod * 0.01
        + quality.fog * 0.1;

    sdi.clamp(1.0, 15.0)
}

/// Membrane fouling potential from organic, inorganic and colloidal load.
fn assess_fouling_potential(quality: &WaterQuality) -> &'static str {
    let mut score = 0u32;

    // Organic fouling
    if quality.cod > 10.0 {
        score += 1;
    }
    if quality.bod > 5.0 {
        score += 1;
    }
    if quality.fog > 5.0 {
        score += 1;
    }

    // Inorganic fouling
    if quality.hardness > 200.0 {
        score += 1;
    }
    if quality.iron > 0.2 {
        score += 1;
    }
    if quality.manganese > 0.05 {
        score += 1;
    }

    // Colloidal fouling
    if quality.turbidity > 1.0 {
        score += 1;
    }
    if quality.tss > 10.0 {
        score += 1;
    }

    match score {
        0..=2 => "low",
        3..=4 => "medium",
        _ => "high",
    }
}

/// Outlet quality after settling in the tank.
///
/// Suspended solids settle when residence time exceeds 2 h, up to 20%
/// removal; turbidity follows at half that efficiency.
fn settle_outlet_quality(inlet: &WaterQuality, residence_time: f64) -> WaterQuality {
    let mut outlet = inlet.clone();

    if residence_time > 2.0 {
        let settling_efficiency = (residence_time * 0.05).min(0.2);
        outlet.tss *= 1.0 - settling_efficiency;
        outlet.turbidity *= 1.0 - settling_efficiency * 0.5;
    }

    outlet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_state_outlet_matches_inflow() {
        let tank = FeedTank::new("FEED_TANK-001");
        let result = tank.calculate(&FeedTankInputs::default()).unwrap();

        assert_eq!(result.number("outlet_flow"), Some(100.0));
        // 1000 m³ * 75% / 100 m³/h
        assert_eq!(result.number("residence_time"), Some(7.5));
        assert_eq!(result.number("water_volume"), Some(750.0));
    }

    #[test]
    fn overflow_risk_above_ninety_percent() {
        let tank = FeedTank::new("FEED_TANK-001");
        let inputs = FeedTankInputs {
            level: 95.0,
            ..FeedTankInputs::default()
        };
        let result = tank.calculate(&inputs).unwrap();
        assert_eq!(
            result.data.get("overflow_risk"),
            Some(&FieldValue::Flag(true))
        );
    }

    #[test]
    fn invalid_level_rejected() {
        let tank = FeedTank::new("FEED_TANK-001");
        let inputs = FeedTankInputs {
            level: 120.0,
            ..FeedTankInputs::default()
        };
        let err = tank.calculate(&inputs).unwrap_err();
        assert!(err.findings().iter().any(|e| e.code == "INVALID_LEVEL"));
    }

    #[test]
    fn zero_inflow_means_zero_residence() {
        let tank = FeedTank::new("FEED_TANK-001");
        let inputs = FeedTankInputs {
            inflow_rate: 0.0,
            ..FeedTankInputs::default()
        };
        let result = tank.calculate(&inputs).unwrap();
        assert_eq!(result.number("residence_time"), Some(0.0));
        assert_eq!(result.number("outlet_flow"), Some(0.0));
    }

    #[test]
    fn clean_water_is_easy_to_treat() {
        let quality = WaterQuality {
            turbidity: 0.5,
            tss: 2.0,
            tds: 200.0,
            cod: 10.0,
            fog: 1.0,
            ..WaterQuality::default()
        };
        assert_eq!(assess_treatment_difficulty(&quality), "low");
    }

    #[test]
    fn dirty_industrial_water_is_very_high() {
        let quality = WaterQuality {
            turbidity: 50.0,
            tss: 200.0,
            tds: 1500.0,
            cod: 300.0,
            fog: 40.0,
            ph: 5.0,
            ..WaterQuality::default()
        };
        assert_eq!(assess_treatment_difficulty(&quality), "very_high");
    }

    #[test]
    fn groundwater_gets_iron_and_hardness_removal() {
        let recs = recommend_pretreatment(SourceType::Groundwater, &WaterQuality::default());
        assert!(recs.iter().any(|r| r == "iron_removal"));
        assert!(recs.iter().any(|r| r == "hardness_removal"));
        // No duplicates even when quality re-triggers a base step
        let high_iron = WaterQuality {
            iron: 1.0,
            ..WaterQuality::default()
        };
        let recs = recommend_pretreatment(SourceType::Groundwater, &high_iron);
        assert_eq!(recs.iter().filter(|r| *r == "iron_removal").count(), 1);
    }

    #[test]
    fn sdi_is_clamped() {
        let pristine = WaterQuality {
            turbidity: 0.0,
            tss: 0.0,
            iron: 0.0,
            cod: 0.0,
            fog: 0.0,
            ..WaterQuality::default()
        };
        assert_eq!(estimate_sdi(&pristine), 1.0);

        let filthy = WaterQuality {
            turbidity: 200.0,
            tss: 500.0,
            iron: 10.0,
            ..WaterQuality::default()
        };
        assert_eq!(estimate_sdi(&filthy), 15.0);
    }

    #[test]
    fn settling_needs_residence_time() {
        let inlet = WaterQuality::default();
        let quick = settle_outlet_quality(&inlet, 1.0);
        assert_eq!(quick.tss, inlet.tss);

        let slow = settle_outlet_quality(&inlet, 8.0);
        // Settling efficiency capped at 20%
        assert!((slow.tss - inlet.tss * 0.8).abs() < 1e-9);
        assert!((slow.turbidity - inlet.turbidity * 0.9).abs() < 1e-9);
    }

    #[test]
    fn extreme_ph_raises_warning() {
        let tank = FeedTank::new("FEED_TANK-001");
        let inputs = FeedTankInputs {
            water_quality: WaterQuality {
                ph: 3.0,
                ..WaterQuality::default()
            },
            ..FeedTankInputs::default()
        };
        let result = tank.calculate(&inputs).unwrap();
        assert!(result.warnings.iter().any(|w| w.code == "EXTREME_PH"));
    }
}
