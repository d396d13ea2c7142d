use crate::domain::model::{FormInput, SeriesQuery};
use crate::utils::error::{PullerError, Result};

pub const EMPTY_SERIES_MESSAGE: &str = "Provide at least one series ID.";

/// 以逗號切割序列代碼，去除空白並略過空項目
pub fn split_series_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_year(label: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|e| PullerError::validation(format!("Invalid {} '{}': {}", label, raw, e)))
}

impl SeriesQuery {
    pub fn from_form(form: &FormInput) -> Result<Self> {
        let series_ids = split_series_ids(&form.series_ids);
        if series_ids.is_empty() {
            return Err(PullerError::validation(EMPTY_SERIES_MESSAGE));
        }

        let start_year = parse_year("start year", &form.start_year)?;
        let end_year = parse_year("end year", &form.end_year)?;

        Ok(Self {
            series_ids,
            start_year,
            end_year,
            registration_key: form.registration_key.clone(),
        })
    }
}
