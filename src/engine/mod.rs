//! Execution engine module
//!
//! Walks the stream tree and turns API pages into Singer messages.
//!
//! # Overview
//!
//! - Root streams run once; every child runs once per parent record with
//!   the context the parent record produces
//! - `SCHEMA` is written before a stream's first record
//! - Bookmarks advance to the newest replication value seen, and `STATE`
//!   is written after each stream partition finishes

mod types;

pub use types::{SyncConfig, SyncStats};

use crate::catalog::Catalog;
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::output::{MessageWriter, SingerMessage};
use crate::pagination::{NoPaginator, PageContextPaginator, PaginationState, Paginator};
use crate::schema::{conform_record, JsonSchema};
use crate::state::{is_newer, StateManager};
use crate::streams::{url_params, ParamInputs, StreamDefinition, StreamRegistry};
use crate::template;
use crate::types::{value_to_string, Context, JsonValue};
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine<W: Write + Send> {
    /// HTTP client
    client: HttpClient,
    /// Stream definitions
    registry: StreamRegistry,
    /// Stream and field selection
    catalog: Catalog,
    /// State manager
    state: StateManager,
    /// Singer output
    writer: MessageWriter<W>,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
    /// Schemas in effect, after field deselection
    schemas: HashMap<&'static str, JsonSchema>,
    /// Streams whose `SCHEMA` has been written
    schemas_sent: HashSet<&'static str>,
    /// Streams that already logged unknown properties
    conform_warned: HashSet<&'static str>,
    /// Streams that ran at least once
    streams_seen: HashSet<&'static str>,
}

impl<W: Write + Send> SyncEngine<W> {
    /// Create a new sync engine
    pub fn new(
        client: HttpClient,
        catalog: Catalog,
        state: StateManager,
        writer: MessageWriter<W>,
    ) -> Self {
        Self {
            client,
            registry: StreamRegistry::zoho_books(),
            catalog,
            state,
            writer,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
            schemas: HashMap::new(),
            schemas_sent: HashSet::new(),
            conform_warned: HashSet::new(),
            streams_seen: HashSet::new(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a different stream table
    #[must_use]
    pub fn with_registry(mut self, registry: StreamRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Unwrap the output sink
    pub fn into_writer(self) -> MessageWriter<W> {
        self.writer
    }

    /// Sync every selected stream.
    ///
    /// A final `STATE` is written even when a stream fails, so bookmarks of
    /// completed partitions survive.
    pub async fn sync_all(&mut self) -> Result<SyncStats> {
        let start = Instant::now();
        self.check_report_start()?;
        let mut result = Ok(());

        for root in self.registry.roots() {
            if !self.needs_sync(root) {
                debug!(stream = root.name, "Skipping unselected stream tree");
                continue;
            }
            if let Err(e) = self.sync_stream(root, None).await {
                result = Err(e);
                break;
            }
        }

        let final_state = self.emit_state().await.and_then(|()| self.writer.flush());
        result?;
        final_state?;

        self.stats.streams_synced = self.streams_seen.len();
        let elapsed = start.elapsed().as_millis();
        self.stats.duration_ms = u64::try_from(elapsed).unwrap_or(u64::MAX);
        info!(
            records = self.stats.records_synced,
            pages = self.stats.pages_fetched,
            streams = self.stats.streams_synced,
            partitions = self.stats.partitions_synced,
            duration_ms = self.stats.duration_ms,
            "Sync completed"
        );

        Ok(self.stats.clone())
    }

    /// Report streams need a `from_date`, so fail before the first request
    /// when a selected one has no start to derive it from
    fn check_report_start(&self) -> Result<()> {
        if self.config.start_date.is_some() || self.config.reports_start_date.is_some() {
            return Ok(());
        }

        let report = self
            .registry
            .iter()
            .find(|d| d.report.is_some() && self.catalog.is_selected(d.name));
        if let Some(def) = report {
            warn!(
                stream = def.name,
                "Report stream selected without a start date"
            );
            return Err(Error::missing_field("reports_start_date"));
        }
        Ok(())
    }

    /// Whether `def` or anything below it is selected
    fn needs_sync(&self, def: &StreamDefinition) -> bool {
        self.catalog.is_selected(def.name)
            || self
                .registry
                .descendants(def.name)
                .iter()
                .any(|d| self.catalog.is_selected(d.name))
    }

    /// Sync one partition of `def`, then its children for every record
    fn sync_stream(
        &mut self,
        def: &'static StreamDefinition,
        context: Option<Context>,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let selected = self.catalog.is_selected(def.name);
            let ctx = context.as_ref();
            self.streams_seen.insert(def.name);

            if selected {
                self.emit_schema(def)?;
            }

            let starting_value = self
                .state
                .starting_value(def.name, ctx)
                .await
                .or_else(|| self.config.start_date.clone());

            let empty = Context::new();
            let path = template::render(def.path, ctx.unwrap_or(&empty))?;
            let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

            let decoder = JsonDecoder::with_path(def.records_path);
            let paginator: Box<dyn Paginator> = if def.paginated {
                Box::new(PageContextPaginator::new())
            } else {
                Box::new(NoPaginator::new())
            };
            let mut pagination = PaginationState::new(paginator.start_page());

            let children: Vec<&'static StreamDefinition> = self
                .registry
                .children(def.name)
                .into_iter()
                .filter(|c| self.needs_sync(c))
                .collect();
            let deselected = if selected {
                self.catalog.deselected_properties(def.name)
            } else {
                vec![]
            };

            info!(stream = def.name, context = ?context, "Beginning sync");
            let mut newest: Option<String> = None;
            let mut emitted = 0usize;

            loop {
                let params = url_params(
                    def,
                    &ParamInputs {
                        context: ctx,
                        page: pagination.page,
                        starting_value: starting_value.as_deref(),
                        reports_start_date: self.config.reports_start_date.as_deref(),
                        today: chrono::Local::now().date_naive(),
                    },
                )?;
                let request = RequestConfig::new()
                    .queries(params)
                    .delay_after(def.request_delay);

                let response = self.client.get(&url, request).await?;
                self.stats.add_page();

                let records = match &response.body {
                    Some(body) => decoder.decode_value(body)?,
                    None => vec![],
                };
                let page_records = records.len();

                for record in records {
                    if let Some(value) = def
                        .replication_key
                        .and_then(|key| record.get(key))
                        .and_then(value_to_string)
                    {
                        if newest.as_deref().map_or(true, |n| is_newer(&value, n)) {
                            newest = Some(value);
                        }
                    }

                    let child_context = if children.is_empty() {
                        None
                    } else {
                        Some(def.child_context(&record, ctx)?)
                    };

                    if selected {
                        self.emit_record(def, record, &deselected)?;
                        emitted += 1;
                    }

                    if let Some(child_context) = child_context {
                        for &child in &children {
                            self.sync_stream(child, Some(child_context.clone())).await?;
                        }
                    }
                }

                let next = paginator.process_response(
                    response.body.as_ref(),
                    page_records,
                    &mut pagination,
                )?;
                if next.is_done() {
                    break;
                }
            }

            if let (Some(key), Some(value)) = (def.replication_key, newest) {
                self.state.advance(def.name, ctx, key, &value).await;
            }

            self.stats.add_partition();
            info!(
                stream = def.name,
                records = emitted,
                pages = pagination.pages_fetched,
                "Finished sync"
            );

            if selected {
                self.emit_state().await?;
            }
            Ok(())
        })
    }

    /// Schema in effect for `def`: the catalog's if it has one, minus
    /// deselected fields
    fn schema_for(&mut self, def: &'static StreamDefinition) -> &JsonSchema {
        let catalog = &self.catalog;
        self.schemas.entry(def.name).or_insert_with(|| {
            let mut schema = catalog.schema(def.name).unwrap_or_else(|| (def.schema)());
            for property in catalog.deselected_properties(def.name) {
                schema.properties.remove(&property);
            }
            schema
        })
    }

    fn emit_schema(&mut self, def: &'static StreamDefinition) -> Result<()> {
        if self.schemas_sent.contains(def.name) {
            return Ok(());
        }

        let schema = self.schema_for(def).to_json();
        let key_properties = def.primary_keys.iter().map(|k| (*k).to_string()).collect();
        let bookmark_properties = def
            .replication_key
            .map(str::to_string)
            .into_iter()
            .collect();

        self.writer.write(&SingerMessage::schema(
            def.name,
            schema,
            key_properties,
            bookmark_properties,
        ))?;
        self.schemas_sent.insert(def.name);
        Ok(())
    }

    fn emit_record(
        &mut self,
        def: &'static StreamDefinition,
        mut record: JsonValue,
        deselected: &[String],
    ) -> Result<()> {
        let dropped = conform_record(self.schema_for(def), &mut record);
        let dropped: Vec<String> = dropped
            .into_iter()
            .filter(|p| !deselected.contains(p))
            .collect();
        if !dropped.is_empty() && self.conform_warned.insert(def.name) {
            warn!(
                stream = def.name,
                properties = ?dropped,
                "Properties not in the schema were removed from records"
            );
        }

        self.writer.write(&SingerMessage::record(def.name, record))?;
        self.stats.add_records(1);
        Ok(())
    }

    async fn emit_state(&mut self) -> Result<()> {
        let value = self.state.to_value().await?;
        self.writer.write(&SingerMessage::state(value))
    }
}
