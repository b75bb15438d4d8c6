//! User-facing message catalog.

use serde::{Deserialize, Serialize};

/// Language for error messages and the HTML table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl Locale {
    pub(crate) fn count_too_small(self, min: i64) -> String {
        match self {
            Locale::En => format!("count is too small (minimum {})", min),
            Locale::Ko => "요청 인자 count가 너무 작습니다.".to_string(),
        }
    }

    pub(crate) fn count_too_large(self, max: i64) -> String {
        match self {
            Locale::En => format!("count is too large (maximum {})", max),
            Locale::Ko => "요청 인자 count가 너무 큽니다.".to_string(),
        }
    }

    pub(crate) fn not_an_integer(self, param: &str, value: &str) -> String {
        match self {
            Locale::En => format!("{} must be an integer, got '{}'", param, value),
            Locale::Ko => format!("요청 인자 {}는 정수여야 합니다: '{}'", param, value),
        }
    }

    pub(crate) fn inverted_range(self, start: i64, end: i64) -> String {
        match self {
            Locale::En => format!("start ({}) must not be after end ({})", start, end),
            Locale::Ko => format!("start({})가 end({})보다 큽니다.", start, end),
        }
    }

    pub(crate) fn no_data_for(self, device: &str) -> String {
        match self {
            Locale::En => format!("no data for {}", device),
            Locale::Ko => format!("{}의 자료가 없습니다.", device),
        }
    }

    pub(crate) fn no_matching_records(self) -> &'static str {
        match self {
            Locale::En => "no matching records",
            Locale::Ko => "검색된 자료가 없습니다.",
        }
    }

    /// Column headers of the HTML table, in display order.
    pub(crate) fn table_headers(self) -> [&'static str; 6] {
        match self {
            Locale::En => [
                "Name (sensor)",
                "Temperature",
                "Humidity",
                "PM10",
                "PM2.5",
                "Measured at",
            ],
            Locale::Ko => [
                "이름(센서)",
                "온도",
                "습도",
                "미세먼지(PM 10)",
                "초미세먼지(PM 2.5)",
                "측정시간",
            ],
        }
    }

    /// DataTables translation file, if the widget's built-in English is not wanted.
    pub(crate) fn datatables_language_url(self) -> Option<&'static str> {
        match self {
            Locale::En => None,
            Locale::Ko => Some("//cdn.datatables.net/plug-ins/9dcbecd42ad/i18n/Korean.json"),
        }
    }
}
