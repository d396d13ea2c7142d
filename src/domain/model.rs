use serde::{Deserialize, Deserializer};

pub const FIELD_SERIES_IDS: &str = "series_ids";
pub const FIELD_START_YEAR: &str = "start_year";
pub const FIELD_END_YEAR: &str = "end_year";
pub const FIELD_REGISTRATION_KEY: &str = "registration_key";

/// 表單原始輸入，四個欄位都保留使用者送出的文字 (已去除前後空白)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub series_ids: String,
    pub start_year: String,
    pub end_year: String,
    pub registration_key: String,
}

impl FormInput {
    /// GET 時顯示的預設表單
    pub fn with_defaults(registration_key: &str) -> Self {
        Self {
            series_ids: "CUUR0000SA0".to_string(),
            start_year: "2023".to_string(),
            end_year: "2024".to_string(),
            registration_key: registration_key.to_string(),
        }
    }

    /// 解析 `application/x-www-form-urlencoded` 內容。
    /// 同一欄位出現多次時取第一個，缺少的欄位視為空字串。
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut series_ids = None;
        let mut start_year = None;
        let mut end_year = None;
        let mut registration_key = None;

        for (key, value) in url::form_urlencoded::parse(body) {
            let slot = match &*key {
                FIELD_SERIES_IDS => &mut series_ids,
                FIELD_START_YEAR => &mut start_year,
                FIELD_END_YEAR => &mut end_year,
                FIELD_REGISTRATION_KEY => &mut registration_key,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.trim().to_string());
            }
        }

        Self {
            series_ids: series_ids.unwrap_or_default(),
            start_year: start_year.unwrap_or_default(),
            end_year: end_year.unwrap_or_default(),
            registration_key: registration_key.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub series_ids: Vec<String>,
    pub start_year: i64,
    pub end_year: i64,
    pub registration_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeriesResult {
    #[serde(rename = "seriesID", default, deserialize_with = "display_string")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<Observation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Observation {
    #[serde(default, deserialize_with = "display_string")]
    pub year: String,
    #[serde(rename = "periodName", default, deserialize_with = "display_string")]
    pub period_name: String,
    #[serde(default, deserialize_with = "display_string")]
    pub value: String,
}

/// 每個請求最後的結果，決定頁面要顯示什麼
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AwaitingInput,
    Success(Vec<SeriesResult>),
    ValidationFailure(String),
    RemoteFailure(String),
}

impl Outcome {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::ValidationFailure(message) | Outcome::RemoteFailure(message) => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn series(&self) -> &[SeriesResult] {
        match self {
            Outcome::Success(series) => series,
            _ => &[],
        }
    }
}

/// JSON 值轉為顯示用字串：null 變成空字串，其他非字串值使用 JSON 表示
pub fn value_to_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_display(&value))
}
