//! Query parameters for stream requests

use super::definitions::{ReportKind, StreamDefinition};
use crate::dates::{format_last_modified, infer_date, last_day_of_month, DATE_FORMAT};
use crate::error::{Error, Result};
use crate::types::{value_to_string, Context};
use chrono::NaiveDate;

/// Context keys forwarded as query parameters when present
const CONTEXT_PARAMS: &[&str] = &["organization_id", "account_id"];

/// Inputs that vary per request
#[derive(Debug, Clone, Copy)]
pub struct ParamInputs<'a> {
    /// Partition context
    pub context: Option<&'a Context>,
    /// Page to request, if the endpoint pages
    pub page: Option<u32>,
    /// Bookmark, or `start_date` when there is none
    pub starting_value: Option<&'a str>,
    /// `reports_start_date` setting
    pub reports_start_date: Option<&'a str>,
    /// Local date used for report ranges
    pub today: NaiveDate,
}

/// Build the query string for one request of `def`
pub fn url_params(
    def: &StreamDefinition,
    inputs: &ParamInputs<'_>,
) -> Result<Vec<(String, String)>> {
    let mut params = Vec::new();

    if let Some(context) = inputs.context {
        for key in CONTEXT_PARAMS {
            // Reports only take the organization
            if def.report.is_some() && *key != "organization_id" {
                continue;
            }
            if let Some(value) = context.get(*key).and_then(value_to_string) {
                params.push(((*key).to_string(), value));
            }
        }
    }

    if let Some(page) = inputs.page {
        params.push(("page".to_string(), page.to_string()));
    }

    if let Some(kind) = def.report {
        let from = inputs
            .reports_start_date
            .or(inputs.starting_value)
            .ok_or_else(|| Error::missing_field("reports_start_date"))?;
        let from_date = infer_date(from)?.date_naive().format(DATE_FORMAT);
        let to_date = last_day_of_month(inputs.today).format(DATE_FORMAT);

        params.push(("from_date".to_string(), from_date.to_string()));
        params.push(("to_date".to_string(), to_date.to_string()));
        if kind == ReportKind::CashBased {
            params.push(("cash_based".to_string(), "true".to_string()));
        }
    } else if let Some(start) = inputs.starting_value {
        params.push((
            "last_modified_time".to_string(),
            format_last_modified(infer_date(start)?),
        ));
    }

    Ok(params)
}
