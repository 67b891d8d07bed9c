//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kindred_domain::{PersonId, Position};
use kindred_graph::{FamilyGraph, RecordRef};
use kindred_layout::Layout;
use kindred_session::ImportReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Outcome of one simulated drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSummary {
    /// Person that was dragged
    pub id: PersonId,
    /// Their name
    pub name: String,
    /// Requested drag target
    pub target: Position,
    /// Position computed by the layout
    pub layout_anchor: Position,
    /// Drop point, where the spring now pulls
    pub anchor: Position,
    /// Where the person is drawn after the run
    pub live: Position,
    /// Whether the spring came to rest
    pub settled: bool,
    /// Seconds simulated
    pub elapsed: f64,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format every laid out person, in layout order.
    pub fn format_layout(&self, graph: &FamilyGraph, layout: &Layout) -> Result<String> {
        let rows: Vec<(PersonId, &str, u32, Position)> = layout
            .positions
            .iter()
            .filter_map(|(id, pos)| {
                let person = graph.person(*id)?;
                Some((*id, person.name.as_str(), layout.generation(*id)?, *pos))
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                let people: Vec<serde_json::Value> = rows
                    .iter()
                    .map(|(id, name, generation, pos)| {
                        serde_json::json!({
                            "id": id.to_string(),
                            "name": name,
                            "generation": generation,
                            "x": pos.x,
                            "y": pos.y,
                            "z": pos.z
                        })
                    })
                    .collect();
                let json = serde_json::json!({
                    "people": people,
                    "bounds": layout.bounds
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if rows.is_empty() {
                    return Ok(self.colorize("No people found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Generation", "X", "Y", "Z"]);
                for (id, name, generation, pos) in &rows {
                    builder.push_record([
                        id.short(),
                        name.to_string(),
                        generation.to_string(),
                        format!("{:.2}", pos.x),
                        format!("{:.2}", pos.y),
                        format!("{:.2}", pos.z),
                    ]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format an import report.
    pub fn format_report(&self, report: &ImportReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let skipped: Vec<serde_json::Value> = report
                    .skipped
                    .iter()
                    .map(|skip| {
                        let (kind, id) = describe(&skip.record);
                        serde_json::json!({
                            "record": kind,
                            "id": id,
                            "reason": skip.issue.to_string()
                        })
                    })
                    .collect();
                let json = serde_json::json!({
                    "people_imported": report.people_imported,
                    "relationships_imported": report.relationships_imported,
                    "skipped": skipped
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut out = if report.is_clean() {
                    self.success(&report.summary())
                } else {
                    self.warning(&report.summary())
                };

                if !report.is_clean() {
                    let mut builder = Builder::default();
                    builder.push_record(["Record", "ID", "Reason"]);
                    for skip in &report.skipped {
                        let (kind, id) = describe(&skip.record);
                        builder.push_record([kind.to_string(), id, skip.issue.to_string()]);
                    }
                    out.push('\n');
                    out.push_str(&Self::render(builder));
                }
                Ok(out)
            }
        }
    }

    /// Format the outcome of a simulated drag.
    pub fn format_simulation(&self, summary: &DragSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "id": summary.id.to_string(),
                    "name": summary.name,
                    "target": point(&summary.target),
                    "layout_anchor": point(&summary.layout_anchor),
                    "anchor": point(&summary.anchor),
                    "live": point(&summary.live),
                    "distance": (summary.live - summary.anchor).norm(),
                    "settled": summary.settled,
                    "elapsed": summary.elapsed
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["", "X", "Y", "Z"]);
                for (label, pos) in [
                    ("Target", summary.target),
                    ("Layout anchor", summary.layout_anchor),
                    ("Drop point", summary.anchor),
                    ("Live", summary.live),
                ] {
                    builder.push_record([
                        label.to_string(),
                        format!("{:.3}", pos.x),
                        format!("{:.3}", pos.y),
                        format!("{:.3}", pos.z),
                    ]);
                }

                let state = if summary.settled {
                    self.success(&format!("{} settled after {:.2}s", summary.name, summary.elapsed))
                } else {
                    self.info(&format!(
                        "{} still moving after {:.2}s ({:.3} from the drop point)",
                        summary.name,
                        summary.elapsed,
                        (summary.live - summary.anchor).norm()
                    ))
                };
                Ok(format!("{}\n{}", Self::render(builder), state))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn describe(record: &RecordRef) -> (&'static str, String) {
    match record {
        RecordRef::Person(id) => ("person", id.to_string()),
        RecordRef::Relationship(id) => ("relationship", id.to_string()),
    }
}

fn point(pos: &Position) -> serde_json::Value {
    serde_json::json!({ "x": pos.x, "y": pos.y, "z": pos.z })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_domain::NewPerson;
    use kindred_graph::GraphConfig;
    use kindred_layout::{compute_layout, LayoutConfig};

    fn family() -> (FamilyGraph, Layout) {
        let mut graph = FamilyGraph::new(GraphConfig::default());
        graph.add_person(NewPerson::named("Ada")).unwrap();
        graph.add_person(NewPerson::named("Bea")).unwrap();
        let layout = compute_layout(
            graph.people(),
            graph.relationships(),
            &LayoutConfig::default(),
        );
        (graph, layout)
    }

    fn summary(settled: bool) -> DragSummary {
        DragSummary {
            id: PersonId::new(),
            name: "Ada".to_string(),
            target: Position::new(9.0, 0.0, 0.0),
            layout_anchor: Position::zeros(),
            anchor: Position::new(3.0, 0.0, 0.0),
            live: Position::new(3.0, 0.0, 0.0),
            settled,
            elapsed: 2.0,
        }
    }

    #[test]
    fn test_layout_table() {
        let (graph, layout) = family();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_layout(&graph, &layout).unwrap();
        assert!(output.contains("Generation"));
        assert!(output.contains("Ada"));
        assert!(output.contains("-1.50"));
    }

    #[test]
    fn test_layout_json() {
        let (graph, layout) = family();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_layout(&graph, &layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let people = value["people"].as_array().unwrap();
        assert_eq!(people.len(), 2);
        let mut xs: Vec<f64> = people.iter().map(|p| p["x"].as_f64().unwrap()).collect();
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs, vec![-1.5, 1.5]);
        assert!(people.iter().all(|p| p["generation"] == 0));
        assert!(people.iter().any(|p| p["name"] == "Ada"));
    }

    #[test]
    fn test_empty_layout() {
        let graph = FamilyGraph::new(GraphConfig::default());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_layout(&graph, &Layout::default()).unwrap();
        assert!(output.contains("No people found"));
    }

    #[test]
    fn test_clean_report() {
        let report = ImportReport {
            people_imported: 2,
            ..Default::default()
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            formatter.format_report(&report).unwrap(),
            "✓ 2 people, 0 relationships imported, 0 skipped"
        );
    }

    #[test]
    fn test_simulation_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let settled = formatter.format_simulation(&summary(true)).unwrap();
        assert!(settled.contains("Drop point"));
        assert!(settled.contains("✓ Ada settled after 2.00s"));

        let moving = formatter.format_simulation(&summary(false)).unwrap();
        assert!(moving.contains("ℹ Ada still moving"));
    }

    #[test]
    fn test_simulation_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_simulation(&summary(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["anchor"]["x"], 3.0);
        assert_eq!(value["distance"], 0.0);
        assert_eq!(value["settled"], true);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
