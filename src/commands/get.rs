//! `get`: list every resource of a kind in a scope and summarize its status

use std::fmt;
use std::str::FromStr;

use super::Deadline;
use crate::error::Result;
use crate::models::ConditionStatus;
use crate::report::{ReportRow, StatusTable};
use crate::resources::ResourceDescriptor;
use crate::store::{ResourceStore, Scope};

/// Row filter on the Ready status, e.g. `ready=false`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSelector {
    pub ready: ConditionStatus,
}

impl FromStr for StatusSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("invalid status selector '{}', expected ready=<value>", s))?;
        if !key.trim().eq_ignore_ascii_case("ready") {
            return Err(format!("unsupported status selector key '{}'", key));
        }
        let ready = match value.trim().to_lowercase().as_str() {
            "true" => ConditionStatus::True,
            "false" => ConditionStatus::False,
            "unknown" => ConditionStatus::Unknown,
            other => return Err(format!("invalid ready status '{}'", other)),
        };
        Ok(Self { ready })
    }
}

impl fmt::Display for StatusSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ready={}", self.ready.as_str().to_lowercase())
    }
}

/// Result of a `get` invocation
#[derive(Debug)]
pub enum GetOutcome {
    /// Nothing matched; not an error
    Empty {
        plural: &'static str,
        scope: Scope,
        /// Set when rows existed but the selector filtered all of them out
        selector: Option<StatusSelector>,
    },
    Table(StatusTable),
}

/// Read-only status listing for one kind
#[derive(Debug)]
pub struct GetCommand {
    descriptor: &'static ResourceDescriptor,
    scope: Scope,
    selector: Option<StatusSelector>,
}

impl GetCommand {
    pub fn new(descriptor: &'static ResourceDescriptor, scope: Scope) -> Self {
        Self {
            descriptor,
            scope,
            selector: None,
        }
    }

    pub fn with_selector(mut self, selector: Option<StatusSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// One list call; rows keep the store's order. A malformed object fails
    /// the whole listing.
    pub async fn run(&self, store: &dyn ResourceStore, deadline: &Deadline) -> Result<GetOutcome> {
        let objects = deadline
            .run(store.list(self.descriptor, &self.scope))
            .await?;

        let listed = objects.len();
        let mut rows = Vec::with_capacity(listed);
        for obj in objects {
            let adapter = self.descriptor.adapt(obj)?;
            let row = ReportRow::from_adapter(adapter.as_ref());
            if self.selector.is_none_or(|s| s.ready == row.ready) {
                rows.push(row);
            }
        }

        if rows.is_empty() {
            return Ok(GetOutcome::Empty {
                plural: self.descriptor.plural,
                scope: self.scope.clone(),
                selector: self.selector.filter(|_| listed > 0),
            });
        }

        Ok(GetOutcome::Table(StatusTable::new(
            self.descriptor,
            self.scope.is_all(),
            &rows,
        )))
    }
}
