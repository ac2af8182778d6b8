use crate::markup::encode_query_value;
use crate::tail::{FilterSpec, TailError, normalize_log_name};
use percent_encoding::percent_decode_str;
use std::str::FromStr;

/// Query parameter names understood by the tail endpoint.
pub mod params {
    pub const LOG: &str = "log";
    pub const POINTER: &str = "pointer";
    pub const START_LINE_AT: &str = "startLineAt";
    pub const LINE_MIN_LENGTH: &str = "lineMinLength";
    pub const LINE_MAX_LENGTH: &str = "lineMaxLength";
    pub const LINE_CONTAINS: &str = "lineContains";
    pub const NOT_LINE_CONTAINS: &str = "notLineContains";
    pub const COLOR_LINE_BEGIN: &str = "colorLineBegin";
    pub const TRIM_TO_SIZE: &str = "trimToSize";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TailRequest {
    /// Normalized file name, e.g. `access.log`.
    pub log_name: String,
    /// `None` on first load.
    pub offset: Option<u64>,
    pub filters: FilterSpec,
}

impl TailRequest {
    pub fn new(log_name: Option<&str>, offset: Option<u64>, filters: FilterSpec) -> Self {
        Self {
            log_name: normalize_log_name(log_name),
            offset,
            filters,
        }
    }

    pub fn is_first_load(&self) -> bool {
        self.offset.is_none()
    }

    /// Parse a raw (still percent-encoded) query string.
    ///
    /// Empty values count as absent. When a parameter repeats, the first
    /// occurrence wins.
    pub fn from_query(query: &str) -> Result<Self, TailError> {
        let pairs = decode_query(query);
        let get = |key: &str| first_value(&pairs, key);

        let filters = FilterSpec {
            start_column: parse_number(params::START_LINE_AT, get(params::START_LINE_AT))?,
            min_length: parse_number(params::LINE_MIN_LENGTH, get(params::LINE_MIN_LENGTH))?,
            max_length: parse_number(params::LINE_MAX_LENGTH, get(params::LINE_MAX_LENGTH))?,
            must_contain: get(params::LINE_CONTAINS).map(str::to_string),
            must_not_contain: get(params::NOT_LINE_CONTAINS).map(str::to_string),
            truncate_to: parse_number(params::TRIM_TO_SIZE, get(params::TRIM_TO_SIZE))?,
            highlight_prefix: get(params::COLOR_LINE_BEGIN) == Some("true"),
        };

        let offset = parse_number(params::POINTER, get(params::POINTER))?;

        Ok(Self::new(get(params::LOG), offset, filters))
    }

    /// Parameters a poller must echo to keep seeing the same view: the log name
    /// and every filter that is set. The pointer is not included.
    pub fn echo_params(&self) -> Vec<(&'static str, String)> {
        let f = &self.filters;
        let mut out = vec![(params::LOG, self.log_name.clone())];

        let numbers = [
            (params::START_LINE_AT, f.start_column),
            (params::LINE_MIN_LENGTH, f.min_length),
            (params::LINE_MAX_LENGTH, f.max_length),
            (params::TRIM_TO_SIZE, f.truncate_to),
        ];
        out.extend(
            numbers
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v.to_string()))),
        );

        if let Some(s) = &f.must_contain {
            out.push((params::LINE_CONTAINS, s.clone()));
        }
        if let Some(s) = &f.must_not_contain {
            out.push((params::NOT_LINE_CONTAINS, s.clone()));
        }
        if f.highlight_prefix {
            out.push((params::COLOR_LINE_BEGIN, "true".to_string()));
        }

        out
    }

    /// Encode as a query string [`TailRequest::from_query`] parses back to an
    /// equal request.
    pub fn to_query(&self) -> String {
        let mut pairs = self.echo_params();
        if let Some(offset) = self.offset {
            pairs.push((params::POINTER, offset.to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", encode_query_value(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Split `a=1&b=2` into decoded pairs. `+` is a space, as in HTML form encoding.
fn decode_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8_lossy()
        .into_owned()
}

fn parse_number<T: FromStr>(param: &'static str, value: Option<&str>) -> Result<Option<T>, TailError> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| TailError::invalid_parameter(param, v))
        })
        .transpose()
}
