//! HVAC calculators: pipe sizing, duct equivalent length, room airflow and
//! straight-run pressure loss.
//!
//! Every calculator exists in two layers.  The numeric functions take SI-ish
//! values and validate them; the `*Form` structs take the raw text a user typed
//! into the UI and apply the field parsing rules first.  Nothing here touches
//! storage.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_DENSITY_KG_M3, BEND_EQUIVALENT_LENGTH_M, BRANCH_EQUIVALENT_LENGTH_M, FRICTION_FACTOR,
    SECONDS_PER_HOUR,
};
use crate::error::CalcError;

type Result<T> = std::result::Result<T, CalcError>;

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

/// Parse a required numeric field.  Missing, blank, unparsable, non-finite,
/// zero and negative values are all rejected.  A decimal comma is accepted.
pub fn parse_required(field: &'static str, raw: Option<&str>) -> Result<f64> {
    let value = raw
        .map(|s| s.trim().replace(',', "."))
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or(CalcError::InvalidInput { field })?;
    require_positive(field, value)
}

/// Parse an optional count field.  Fractions are truncated ("2,5" is 2);
/// missing, unparsable and negative input counts as zero.
pub fn parse_count(raw: Option<&str>) -> u32 {
    raw.map(|s| s.trim().replace(',', "."))
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map_or(0, |v| v.trunc() as u32)
}

fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput { field })
    }
}

// ---------------------------------------------------------------------------
// Pipe sizing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeSizing {
    pub flow_m3h: f64,
    pub flow_m3s: f64,
    pub area_m2: f64,
    pub diameter_m: f64,
    pub diameter_mm: f64,
}

/// Circular cross-section needed to carry `flow_m3h` at `velocity_ms`.
pub fn pipe_sizing(flow_m3h: f64, velocity_ms: f64) -> Result<PipeSizing> {
    let flow_m3h = require_positive("flow", flow_m3h)?;
    let velocity_ms = require_positive("velocity", velocity_ms)?;

    let flow_m3s = flow_m3h / SECONDS_PER_HOUR;
    let area_m2 = flow_m3s / velocity_ms;
    let diameter_m = (4.0 * area_m2 / PI).sqrt();

    Ok(PipeSizing {
        flow_m3h,
        flow_m3s,
        area_m2,
        diameter_m,
        diameter_mm: diameter_m * 1000.0,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeSizingForm {
    pub flow: Option<String>,
    pub velocity: Option<String>,
}

impl PipeSizingForm {
    pub fn compute(&self) -> Result<PipeSizing> {
        let flow = parse_required("flow", self.flow.as_deref())?;
        let velocity = parse_required("velocity", self.velocity.as_deref())?;
        pipe_sizing(flow, velocity)
    }
}

// ---------------------------------------------------------------------------
// Duct equivalent length
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuctLength {
    pub straight_m: f64,
    pub bends: u32,
    pub branches: u32,
    pub bend_length_m: f64,
    pub branch_length_m: f64,
    pub total_m: f64,
}

pub fn duct_length(straight_m: f64, bends: u32, branches: u32) -> Result<DuctLength> {
    let straight_m = require_positive("length", straight_m)?;
    let bend_length_m = f64::from(bends) * BEND_EQUIVALENT_LENGTH_M;
    let branch_length_m = f64::from(branches) * BRANCH_EQUIVALENT_LENGTH_M;

    Ok(DuctLength {
        straight_m,
        bends,
        branches,
        bend_length_m,
        branch_length_m,
        total_m: straight_m + bend_length_m + branch_length_m,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuctLengthForm {
    pub length: Option<String>,
    pub bends: Option<String>,
    pub branches: Option<String>,
}

impl DuctLengthForm {
    pub fn compute(&self) -> Result<DuctLength> {
        let straight = parse_required("length", self.length.as_deref())?;
        duct_length(
            straight,
            parse_count(self.bends.as_deref()),
            parse_count(self.branches.as_deref()),
        )
    }
}

// ---------------------------------------------------------------------------
// Airflow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Airflow {
    pub volume_m3: f64,
    pub air_changes: f64,
    pub flow_m3h: f64,
    pub flow_m3s: f64,
}

/// Supply airflow for a room of `volume_m3` at `air_changes` per hour.
pub fn airflow(volume_m3: f64, air_changes: f64) -> Result<Airflow> {
    let volume_m3 = require_positive("volume", volume_m3)?;
    let air_changes = require_positive("airChanges", air_changes)?;
    let flow_m3h = volume_m3 * air_changes;

    Ok(Airflow {
        volume_m3,
        air_changes,
        flow_m3h,
        flow_m3s: flow_m3h / SECONDS_PER_HOUR,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirflowForm {
    pub volume: Option<String>,
    pub air_changes: Option<String>,
}

impl AirflowForm {
    pub fn compute(&self) -> Result<Airflow> {
        let volume = parse_required("volume", self.volume.as_deref())?;
        let changes = parse_required("airChanges", self.air_changes.as_deref())?;
        airflow(volume, changes)
    }
}

// ---------------------------------------------------------------------------
// Pressure loss
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureLoss {
    pub length_m: f64,
    pub diameter_mm: f64,
    pub velocity_ms: f64,
    pub pressure_loss_pa: f64,
}

/// Darcy-Weisbach loss of a straight round duct with fixed friction factor
/// and air density.
pub fn pressure_loss(length_m: f64, diameter_mm: f64, velocity_ms: f64) -> Result<PressureLoss> {
    let length_m = require_positive("length", length_m)?;
    let diameter_mm = require_positive("diameter", diameter_mm)?;
    let velocity_ms = require_positive("velocity", velocity_ms)?;

    let diameter_m = diameter_mm / 1000.0;
    let dynamic_pressure = AIR_DENSITY_KG_M3 * velocity_ms.powi(2) / 2.0;
    let pressure_loss_pa = FRICTION_FACTOR * (length_m / diameter_m) * dynamic_pressure;

    Ok(PressureLoss {
        length_m,
        diameter_mm,
        velocity_ms,
        pressure_loss_pa,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureLossForm {
    pub length: Option<String>,
    pub diameter: Option<String>,
    pub velocity: Option<String>,
}

impl PressureLossForm {
    pub fn compute(&self) -> Result<PressureLoss> {
        let length = parse_required("length", self.length.as_deref())?;
        let diameter = parse_required("diameter", self.diameter.as_deref())?;
        let velocity = parse_required("velocity", self.velocity.as_deref())?;
        pressure_loss(length, diameter, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn pipe_sizing_one_cubic_metre_per_second() {
        let r = pipe_sizing(3600.0, 1.0).unwrap();
        assert!((r.flow_m3s - 1.0).abs() < EPS);
        assert!((r.area_m2 - 1.0).abs() < EPS);
        assert!((r.diameter_m - 1.128_379).abs() < 1e-6);
        assert!((r.diameter_mm - 1128.379).abs() < 1e-3);
    }

    #[test]
    fn pipe_sizing_rejects_zero_velocity() {
        assert_eq!(
            pipe_sizing(3600.0, 0.0),
            Err(CalcError::InvalidInput { field: "velocity" })
        );
    }

    #[test]
    fn duct_length_adds_equivalents() {
        let r = duct_length(10.0, 2, 1).unwrap();
        assert!((r.bend_length_m - 3.0).abs() < EPS);
        assert!((r.branch_length_m - 2.0).abs() < EPS);
        assert!((r.total_m - 15.0).abs() < EPS);
    }

    #[test]
    fn duct_form_defaults_missing_counts_to_zero() {
        let form = DuctLengthForm {
            length: some("12"),
            bends: None,
            branches: some("abc"),
        };
        let r = form.compute().unwrap();
        assert_eq!((r.bends, r.branches), (0, 0));
        assert!((r.total_m - 12.0).abs() < EPS);
    }

    #[test]
    fn fractional_counts_are_truncated() {
        assert_eq!(parse_count(Some("2.5")), 2);
        assert_eq!(parse_count(Some(" 2,9 ")), 2);
        assert_eq!(parse_count(Some("4")), 4);
        assert_eq!(parse_count(Some("-1")), 0);
        assert_eq!(parse_count(Some("")), 0);

        let form = DuctLengthForm {
            length: some("10"),
            bends: some("2,5"),
            branches: some("1.0"),
        };
        let r = form.compute().unwrap();
        assert_eq!((r.bends, r.branches), (2, 1));
        assert!((r.total_m - 15.0).abs() < EPS);
    }

    #[test]
    fn duct_form_requires_straight_length() {
        let form = DuctLengthForm {
            length: None,
            bends: some("3"),
            branches: some("1"),
        };
        assert_eq!(form.compute(), Err(CalcError::InvalidInput { field: "length" }));
    }

    #[test]
    fn airflow_room_with_six_changes() {
        let r = airflow(50.0, 6.0).unwrap();
        assert!((r.flow_m3h - 300.0).abs() < EPS);
        assert!((r.flow_m3s - 0.083_333).abs() < 1e-6);
    }

    #[test]
    fn pressure_loss_reference_case() {
        let r = pressure_loss(10.0, 200.0, 5.0).unwrap();
        assert!((r.pressure_loss_pa - 15.0).abs() < EPS);
    }

    #[test]
    fn form_fields_reject_garbage_and_negatives() {
        assert!(parse_required("flow", Some("")).is_err());
        assert!(parse_required("flow", Some("   ")).is_err());
        assert!(parse_required("flow", Some("x12")).is_err());
        assert!(parse_required("flow", Some("-4")).is_err());
        assert!(parse_required("flow", Some("0")).is_err());
        assert!(parse_required("flow", Some("NaN")).is_err());
        assert!(parse_required("flow", None).is_err());
    }

    #[test]
    fn form_fields_accept_decimal_comma() {
        assert_eq!(parse_required("velocity", Some("2,5")), Ok(2.5));
        let form = PressureLossForm {
            length: some("10"),
            diameter: some("200"),
            velocity: some(" 5 "),
        };
        assert!((form.compute().unwrap().pressure_loss_pa - 15.0).abs() < EPS);
    }

    #[test]
    fn pipe_form_reports_first_invalid_field() {
        let form = PipeSizingForm {
            flow: some("0"),
            velocity: some("0"),
        };
        assert_eq!(form.compute(), Err(CalcError::InvalidInput { field: "flow" }));
    }

    #[test]
    fn airflow_form_parses_camel_case_json() {
        let form: AirflowForm =
            serde_json::from_str(r#"{"volume":"50","airChanges":"6"}"#).unwrap();
        assert!((form.compute().unwrap().flow_m3h - 300.0).abs() < EPS);
    }
}
