//! Stream definitions and the registry that ties them into a tree

use super::schemas;
use crate::error::{Error, Result};
use crate::schema::JsonSchema;
use crate::types::{value_to_string, Context, JsonValue, ReplicationMethod};
use std::time::Duration;

/// Pause between calls to endpoints that are fetched once per parent record
const DETAIL_DELAY: Duration = Duration::from_millis(1010);

/// Basis of a report stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Accrual basis
    Accrual,
    /// Cash basis (`cash_based=true`)
    CashBased,
}

/// Static description of one Zoho Books stream
#[derive(Debug, Clone, Copy)]
pub struct StreamDefinition {
    /// Stream name as emitted in Singer messages
    pub name: &'static str,
    /// Path relative to the API base; `{key}` placeholders come from the context
    pub path: &'static str,
    /// Primary key properties
    pub primary_keys: &'static [&'static str],
    /// Replication key for incremental syncs
    pub replication_key: Option<&'static str>,
    /// JSONPath selecting records in the response body
    pub records_path: &'static str,
    /// Stream whose records drive this one
    pub parent: Option<&'static str>,
    /// Record fields copied into the context handed to child streams
    pub child_context_keys: &'static [&'static str],
    /// Wait after every request for this stream
    pub request_delay: Option<Duration>,
    /// Set for report endpoints, which take a date range instead of filters
    pub report: Option<ReportKind>,
    /// Whether the list responses carry `page_context`
    pub paginated: bool,
    /// Schema factory
    pub schema: fn() -> JsonSchema,
}

impl StreamDefinition {
    /// Replication method implied by the replication key
    pub fn replication_method(&self) -> ReplicationMethod {
        if self.replication_key.is_some() {
            ReplicationMethod::Incremental
        } else {
            ReplicationMethod::FullTable
        }
    }

    /// Build the context a child stream receives for `record`.
    ///
    /// The parent's own context is carried over so `organization_id` reaches
    /// every level of the tree.
    pub fn child_context(&self, record: &JsonValue, parent: Option<&Context>) -> Result<Context> {
        let mut context = parent.cloned().unwrap_or_default();
        for key in self.child_context_keys {
            let value = record
                .get(*key)
                .filter(|v| value_to_string(v).is_some())
                .ok_or_else(|| Error::RecordExtraction {
                    path: (*key).to_string(),
                    message: format!("record from '{}' has no usable value", self.name),
                })?;
            context.insert((*key).to_string(), value.clone());
        }
        Ok(context)
    }
}

/// All streams exposed by the tap, parents before children
pub static ZOHO_BOOKS_STREAMS: &[StreamDefinition] = &[
    StreamDefinition {
        name: "organization_id",
        path: "/organizations",
        primary_keys: &["organization_id"],
        replication_key: None,
        records_path: "$.organizations[*]",
        parent: None,
        child_context_keys: &["organization_id"],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::organization_id,
    },
    StreamDefinition {
        name: "journals_id",
        path: "/journals",
        primary_keys: &["journal_id"],
        replication_key: None,
        records_path: "$.journals[*]",
        parent: Some("organization_id"),
        child_context_keys: &["journal_id"],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::journals_id,
    },
    StreamDefinition {
        name: "journals",
        path: "/journals/{journal_id}",
        primary_keys: &["journal_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.journal",
        parent: Some("journals_id"),
        child_context_keys: &[],
        request_delay: Some(DETAIL_DELAY),
        report: None,
        paginated: false,
        schema: schemas::journals,
    },
    StreamDefinition {
        name: "chart_of_accounts",
        path: "/chartofaccounts",
        primary_keys: &["account_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.chartofaccounts[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::chart_of_accounts,
    },
    StreamDefinition {
        name: "items",
        path: "/items",
        primary_keys: &["item_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.items[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::items,
    },
    StreamDefinition {
        name: "invoices",
        path: "/invoices",
        primary_keys: &["invoice_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.invoices[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::invoices,
    },
    StreamDefinition {
        name: "contacts",
        path: "/contacts",
        primary_keys: &["contact_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.contacts[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::contacts,
    },
    StreamDefinition {
        name: "bills",
        path: "/bills",
        primary_keys: &["bill_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.bills[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::bills,
    },
    StreamDefinition {
        name: "sales_orders",
        path: "/salesorders",
        primary_keys: &["salesorder_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.salesorders[*]",
        parent: Some("organization_id"),
        child_context_keys: &["salesorder_id"],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::sales_orders,
    },
    StreamDefinition {
        name: "sales_orders_details",
        path: "/salesorders/{salesorder_id}",
        primary_keys: &["salesorder_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.salesorder",
        parent: Some("sales_orders"),
        child_context_keys: &[],
        request_delay: Some(DETAIL_DELAY),
        report: None,
        paginated: false,
        schema: schemas::sales_orders_details,
    },
    StreamDefinition {
        name: "purchase_orders",
        path: "/purchaseorders",
        primary_keys: &["purchaseorder_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.purchaseorders[*]",
        parent: Some("organization_id"),
        child_context_keys: &["purchaseorder_id"],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::purchase_orders,
    },
    StreamDefinition {
        name: "purchase_orders_details",
        path: "/purchaseorders/{purchaseorder_id}",
        primary_keys: &["purchaseorder_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.purchaseorder",
        parent: Some("purchase_orders"),
        child_context_keys: &[],
        request_delay: Some(DETAIL_DELAY),
        report: None,
        paginated: false,
        schema: schemas::purchase_orders_details,
    },
    StreamDefinition {
        name: "vendors",
        path: "/vendors",
        primary_keys: &["contact_id"],
        replication_key: Some("last_modified_time"),
        records_path: "$.contacts[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: None,
        paginated: true,
        schema: schemas::vendors,
    },
    StreamDefinition {
        name: "profit_and_loss",
        path: "/reports/profitandloss",
        primary_keys: &[],
        replication_key: None,
        records_path: "$.profit_and_loss[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: Some(ReportKind::Accrual),
        paginated: true,
        schema: schemas::profit_and_loss,
    },
    StreamDefinition {
        name: "profit_and_loss_cash_based",
        path: "/reports/profitandloss",
        primary_keys: &[],
        replication_key: None,
        records_path: "$.profit_and_loss[*]",
        parent: Some("organization_id"),
        child_context_keys: &[],
        request_delay: None,
        report: Some(ReportKind::CashBased),
        paginated: true,
        schema: schemas::profit_and_loss,
    },
];

/// Lookup and tree navigation over a set of stream definitions
#[derive(Debug, Clone, Copy)]
pub struct StreamRegistry {
    streams: &'static [StreamDefinition],
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::zoho_books()
    }
}

impl StreamRegistry {
    /// Registry over an arbitrary definition table
    pub fn new(streams: &'static [StreamDefinition]) -> Self {
        Self { streams }
    }

    /// Registry of every Zoho Books stream
    pub fn zoho_books() -> Self {
        Self::new(ZOHO_BOOKS_STREAMS)
    }

    /// All definitions in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &'static StreamDefinition> {
        self.streams.iter()
    }

    /// Find a stream by name
    pub fn get(&self, name: &str) -> Result<&'static StreamDefinition> {
        self.streams
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::StreamNotFound {
                stream: name.to_string(),
            })
    }

    /// Streams without a parent
    pub fn roots(&self) -> Vec<&'static StreamDefinition> {
        self.streams.iter().filter(|s| s.parent.is_none()).collect()
    }

    /// Direct children of `name`
    pub fn children(&self, name: &str) -> Vec<&'static StreamDefinition> {
        self.streams
            .iter()
            .filter(|s| s.parent == Some(name))
            .collect()
    }

    /// Every stream below `name`, depth first
    pub fn descendants(&self, name: &str) -> Vec<&'static StreamDefinition> {
        let mut out = Vec::new();
        for child in self.children(name) {
            out.push(child);
            out.extend(self.descendants(child.name));
        }
        out
    }
}
