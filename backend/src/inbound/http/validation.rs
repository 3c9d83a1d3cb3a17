//! Request parsing helpers shared by the HTTP handlers.
//!
//! Every failure becomes an `invalid_request` [`Error`] whose details name
//! the offending field and a stable reason code.

use chrono::NaiveDate;
use pagination::{PAGE_PARAM, PER_PAGE_PARAM, PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::{EntryId, Error, UnknownFilterValue};

/// Reason codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidFilter,
    InvalidPage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidFilter => "invalid_filter",
            ErrorCode::InvalidPage => "invalid_page",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn invalid(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn invalid_value(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    invalid(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_entry_id(value: &str, field: FieldName) -> Result<EntryId, Error> {
    value.parse().map_err(|_| {
        let name = field.as_str();
        invalid_value(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        invalid_value(
            field,
            format!("{name} must be a YYYY-MM-DD date"),
            ErrorCode::InvalidDate,
            value,
        )
    })
}

pub(crate) fn parse_filter<T>(value: Option<&str>, field: FieldName) -> Result<T, Error>
where
    T: std::str::FromStr<Err = UnknownFilterValue> + Default,
{
    match value {
        None => Ok(T::default()),
        Some(raw) => raw.parse().map_err(|err: UnknownFilterValue| {
            invalid_value(field, err.to_string(), ErrorCode::InvalidFilter, raw)
        }),
    }
}

pub(crate) fn parse_page_request(
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<PageRequest, Error> {
    PageRequest::from_query(page, per_page).map_err(|err| {
        let field = match err {
            PageRequestError::ZeroPage => FieldName::new(PAGE_PARAM),
            PageRequestError::PerPageOutOfRange { .. } => FieldName::new(PER_PAGE_PARAM),
        };
        invalid(field, err.to_string(), ErrorCode::InvalidPage)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateBucket, ErrorCode as DomainCode, StatusFilter, TimesheetStatus};
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a str> {
        err.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    fn missing_fields_name_the_field() {
        let err = require::<u8>(None, FieldName::new("hours")).expect_err("missing");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: hours");
        assert_eq!(detail(&err, "field"), Some("hours"));
        assert_eq!(detail(&err, "code"), Some("missing_field"));
    }

    #[rstest]
    #[case("2026-01-15", true)]
    #[case("2026-02-30", false)]
    #[case("15/01/2026", false)]
    fn dates_use_iso_format(#[case] raw: &str, #[case] ok: bool) {
        let parsed = parse_date(raw, FieldName::new("date"));
        assert_eq!(parsed.is_ok(), ok);
        if let Err(err) = parsed {
            assert_eq!(detail(&err, "code"), Some("invalid_date"));
            assert_eq!(detail(&err, "value"), Some(raw));
        }
    }

    #[rstest]
    fn entry_ids_must_be_uuids() {
        let err = parse_entry_id("entry-1", FieldName::new("entryId")).expect_err("not a uuid");
        assert_eq!(detail(&err, "code"), Some("invalid_uuid"));
    }

    #[rstest]
    fn absent_filters_use_defaults() {
        let status: StatusFilter = parse_filter(None, FieldName::new("status")).expect("default");
        let range: DateBucket = parse_filter(None, FieldName::new("range")).expect("default");
        assert_eq!(status, StatusFilter::All);
        assert_eq!(range, DateBucket::ThisMonth);
    }

    #[rstest]
    fn known_filters_parse() {
        let status: StatusFilter =
            parse_filter(Some("missing"), FieldName::new("status")).expect("known status");
        assert_eq!(status, StatusFilter::Only(TimesheetStatus::Missing));
    }

    #[rstest]
    fn unknown_filters_are_rejected() {
        let err = parse_filter::<DateBucket>(Some("next-month"), FieldName::new("range"))
            .expect_err("unknown range");
        assert_eq!(detail(&err, "field"), Some("range"));
        assert_eq!(detail(&err, "code"), Some("invalid_filter"));
    }

    #[rstest]
    #[case(Some(0), None, "page")]
    #[case(None, Some(0), "perPage")]
    #[case(None, Some(101), "perPage")]
    fn page_bounds_are_enforced(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] field: &str,
    ) {
        let err = parse_page_request(page, per_page).expect_err("out of range");
        assert_eq!(detail(&err, "field"), Some(field));
        assert_eq!(detail(&err, "code"), Some("invalid_page"));
    }
}
