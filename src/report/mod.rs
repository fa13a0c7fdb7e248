//! Status report rows and table rendering
//!
//! A row is computed fresh from an adapter for every render; the header is
//! fixed per kind by its descriptor.

use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

use crate::models::{ConditionStatus, ReadySummary};
use crate::resources::{FluxAdapter, ResourceDescriptor};

/// Render a boolean as `True` / `False`
pub fn title_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Status summary of one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub namespace: String,
    pub name: String,
    pub ready: ConditionStatus,
    pub message: String,
    /// Values for the kind's extra columns, in descriptor order
    pub extra: Vec<String>,
    pub suspended: bool,
}

impl ReportRow {
    pub fn from_adapter(adapter: &dyn FluxAdapter) -> Self {
        let summary = ReadySummary::from_conditions(adapter.conditions());
        Self {
            namespace: adapter.namespace().to_string(),
            name: adapter.name().to_string(),
            ready: summary.status,
            message: summary.message,
            extra: adapter.status_columns(),
            suspended: adapter.is_suspended(),
        }
    }
}

/// Header plus one record per resource, in fetch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl StatusTable {
    pub fn new(descriptor: &ResourceDescriptor, all_namespaces: bool, rows: &[ReportRow]) -> Self {
        let mut header = Vec::with_capacity(descriptor.status_columns.len() + 5);
        if all_namespaces {
            header.push("Namespace".to_string());
        }
        header.extend(["Name", "Ready", "Message"].map(String::from));
        header.extend(descriptor.status_columns.iter().map(|c| c.to_string()));
        header.push("Suspended".to_string());

        let width = header.len();
        let rows = rows
            .iter()
            .map(|row| {
                let mut record = Vec::with_capacity(width);
                if all_namespaces {
                    record.push(row.namespace.clone());
                }
                record.push(row.name.clone());
                record.push(row.ready.to_string());
                record.push(row.message.clone());
                // Pad or cut so every record matches the header
                let mut extra = row.extra.clone();
                extra.resize(descriptor.status_columns.len(), String::new());
                record.extend(extra);
                record.push(title_bool(row.suspended).to_string());
                record
            })
            .collect();

        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Left-aligned, whitespace-padded table
    pub fn render(&self, no_header: bool) -> String {
        let mut builder = Builder::default();
        if !no_header {
            builder.push_record(self.header.iter().map(String::as_str));
        }
        for row in &self.rows {
            builder.push_record(row.iter().map(String::as_str));
        }

        let table = builder
            .build()
            .with(Style::blank())
            .with(Padding::new(0, 3, 0, 0))
            .to_string();

        table
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FluxResourceKind;
    use crate::resources::descriptor_for;

    fn row(name: &str, ready: ConditionStatus, extra: &[&str], suspended: bool) -> ReportRow {
        ReportRow {
            namespace: "flux-system".to_string(),
            name: name.to_string(),
            ready,
            message: "msg".to_string(),
            extra: extra.iter().map(|s| s.to_string()).collect(),
            suspended,
        }
    }

    #[test]
    fn test_title_bool() {
        assert_eq!(title_bool(true), "True");
        assert_eq!(title_bool(false), "False");
    }

    #[test]
    fn test_header_follows_descriptor() {
        let descriptor = descriptor_for(FluxResourceKind::ImageRepository);
        let table = StatusTable::new(descriptor, true, &[]);
        assert_eq!(
            table.header(),
            ["Namespace", "Name", "Ready", "Message", "Last Scan", "Tags", "Suspended"]
        );

        let descriptor = descriptor_for(FluxResourceKind::Alert);
        let table = StatusTable::new(descriptor, false, &[]);
        assert_eq!(table.header(), ["Name", "Ready", "Message", "Suspended"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_records_match_header_width() {
        let descriptor = descriptor_for(FluxResourceKind::ImageRepository);
        let rows = [
            row("a", ConditionStatus::True, &["2025-01-01T00:00:00Z"], false),
            row("b", ConditionStatus::Unknown, &["x", "3", "extra"], true),
        ];
        let table = StatusTable::new(descriptor, false, &rows);
        for record in table.rows() {
            assert_eq!(record.len(), table.header().len());
        }
        assert_eq!(table.rows()[0][4], "");
        assert_eq!(table.rows()[1][1], "Unknown");
        assert_eq!(table.rows()[1][5], "True");
    }

    #[test]
    fn test_render_is_left_aligned() {
        let descriptor = descriptor_for(FluxResourceKind::Kustomization);
        let rows = [
            row("app-a", ConditionStatus::True, &["v1.2.0"], false),
            row("b", ConditionStatus::False, &[""], true),
        ];
        let table = StatusTable::new(descriptor, false, &rows);

        let rendered = table.render(false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("Name"));
        assert!(lines[1].trim_start().starts_with("app-a"));
        assert!(lines[2].trim_start().starts_with("b "));
        // Columns line up across rows
        assert_eq!(lines[0].find("Ready"), lines[1].find("True"));

        let rendered = table.render(true);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.trim_start().starts_with("app-a"));
    }
}
