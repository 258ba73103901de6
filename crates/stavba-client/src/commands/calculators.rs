//! Calculator commands.  Stateless: they never touch the store.

use serde::Serialize;
use stavba_shared::calc::{
    Airflow, AirflowForm, DuctLength, DuctLengthForm, PipeSizing, PipeSizingForm, PressureLoss,
    PressureLossForm,
};

use crate::error::Result;

/// Calculator output plus the lines shown in the result panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcResultDto<T> {
    pub values: T,
    pub lines: Vec<String>,
}

/// Fixed-precision number with a decimal comma, as the labels use.
fn cz(value: f64, precision: usize) -> String {
    format!("{value:.precision$}").replace('.', ",")
}

pub fn calculate_pipe(form: PipeSizingForm) -> Result<CalcResultDto<PipeSizing>> {
    let r = form.compute()?;
    Ok(CalcResultDto {
        lines: vec![
            format!("Průtok: {} m³/s", cz(r.flow_m3s, 4)),
            format!("Plocha průřezu: {} m²", cz(r.area_m2, 4)),
            format!("Průměr potrubí: {} m ({} mm)", cz(r.diameter_m, 3), cz(r.diameter_mm, 1)),
        ],
        values: r,
    })
}

pub fn calculate_duct(form: DuctLengthForm) -> Result<CalcResultDto<DuctLength>> {
    let r = form.compute()?;
    Ok(CalcResultDto {
        lines: vec![
            format!("Kolena: {} × 1,5 m = {} m", r.bends, cz(r.bend_length_m, 1)),
            format!("Odbočky: {} × 2,0 m = {} m", r.branches, cz(r.branch_length_m, 1)),
            format!("Celková ekvivalentní délka: {} m", cz(r.total_m, 1)),
        ],
        values: r,
    })
}

pub fn calculate_airflow(form: AirflowForm) -> Result<CalcResultDto<Airflow>> {
    let r = form.compute()?;
    Ok(CalcResultDto {
        lines: vec![
            format!("Průtok vzduchu: {} m³/h", cz(r.flow_m3h, 1)),
            format!("Průtok vzduchu: {} m³/s", cz(r.flow_m3s, 4)),
        ],
        values: r,
    })
}

pub fn calculate_pressure(form: PressureLossForm) -> Result<CalcResultDto<PressureLoss>> {
    let r = form.compute()?;
    Ok(CalcResultDto {
        lines: vec![format!("Tlaková ztráta: {} Pa", cz(r.pressure_loss_pa, 2))],
        values: r,
    })
}
