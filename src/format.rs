//! Plain-text table rendering of scene graphs.

use std::io::Write;

use crate::error::Result;
use crate::graph::Graph;

/// Extra width every column gets beyond its header.
const MIN_PADDING: usize = 2;

/// Render the entity and relation tables of a graph.
///
/// All cells are lowercased. Modifiers are joined with commas; relation
/// endpoints are shown by entity head.
pub fn render_table(graph: &Graph, show_entities: bool, show_relations: bool) -> String {
    let mut out = String::new();

    if show_entities {
        let rows: Vec<Vec<String>> = graph
            .entities
            .iter()
            .map(|entity| {
                vec![
                    entity.head.to_lowercase(),
                    entity.span.to_lowercase(),
                    entity
                        .modifiers
                        .iter()
                        .map(|m| m.span.to_lowercase())
                        .collect::<Vec<_>>()
                        .join(","),
                ]
            })
            .collect();
        out.push_str("Entities:\n");
        out.push_str(&table(&["Head", "Span", "Modifiers"], &rows));
    }

    if show_relations {
        let head = |index: usize| {
            graph
                .entities
                .get(index)
                .map(|entity| entity.head.to_lowercase())
                .unwrap_or_default()
        };
        let rows: Vec<Vec<String>> = graph
            .relations
            .iter()
            .map(|relation| {
                vec![
                    head(relation.subject),
                    relation.relation.to_lowercase(),
                    head(relation.object),
                ]
            })
            .collect();
        out.push_str("Relations:\n");
        out.push_str(&table(&["Subject", "Relation", "Object"], &rows));
    }

    out
}

/// Write the tables of `render_table` to `out`.
pub fn write_table<W: Write>(
    out: &mut W,
    graph: &Graph,
    show_entities: bool,
    show_relations: bool,
) -> Result<()> {
    out.write_all(render_table(graph, show_entities, show_relations).as_bytes())?;
    Ok(())
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .fold(header.chars().count() + MIN_PADDING, usize::max)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&rule(&widths, '+', '+'));
    out.push_str(&row(headers, &widths));
    out.push_str(&rule(&widths, '|', '|'));
    for cells in rows {
        out.push_str(&row(cells, &widths));
    }
    out.push_str(&rule(&widths, '+', '+'));
    out
}

fn rule(widths: &[usize], begin: char, end: char) -> String {
    let segments: Vec<String> = widths.iter().map(|&w| "-".repeat(w + 2)).collect();
    format!("{}{}{}\n", begin, segments.join("+"), end)
}

fn row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {:<width$} ", cell.as_ref(), width = width))
        .collect();
    format!("|{}|\n", padded.join("|"))
}
