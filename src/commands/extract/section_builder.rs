use serde_json::Value;
use tracing::debug;

use super::{
    ExtractError, HeadingMatcher, child_reference, compute_parent_section, extract_table_summary,
    get_page_no, is_table_node, resolve_ref,
};
use crate::model::{Section, TableSummary};
use crate::util::is_truthy;

const BODY_LAYER: &str = "body";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BuildStats {
    pub(crate) tables_kept: usize,
    pub(crate) tables_dropped_before_heading: usize,
    pub(crate) lines_dropped_before_heading: usize,
    pub(crate) nodes_skipped_non_body: usize,
}

#[derive(Debug)]
pub(crate) struct Extraction {
    pub(crate) sections: Vec<Section>,
    pub(crate) stats: BuildStats,
}

#[derive(Debug)]
struct OpenSection {
    section_id: String,
    title: Option<String>,
    body_lines: Vec<String>,
    start_page: Option<i64>,
    end_page: Option<i64>,
    tables: Vec<TableSummary>,
}

impl OpenSection {
    fn widen_pages(&mut self, page: Option<i64>) {
        let Some(page) = page else {
            return;
        };
        self.start_page = Some(self.start_page.map_or(page, |start| start.min(page)));
        self.end_page = Some(self.end_page.map_or(page, |end| end.max(page)));
    }

    fn seal(self) -> Section {
        let body = self.body_lines.join("\n").trim().to_string();

        Section {
            parent_section: compute_parent_section(&self.section_id),
            section_body_text: (!body.is_empty()).then_some(body),
            section: self.section_id,
            section_title: self.title,
            section_start_page: self.start_page,
            section_end_page: self.end_page,
            tables: self.tables,
        }
    }
}

// At most one section is open; the next heading or the end of the walk seals it.
#[derive(Debug, Default)]
pub(super) struct SectionBuilder {
    sections: Vec<Section>,
    current: Option<OpenSection>,
    stats: BuildStats,
}

impl SectionBuilder {
    pub(super) fn open_section(
        &mut self,
        section_id: String,
        title: Option<String>,
        page: Option<i64>,
    ) {
        self.flush();
        self.current = Some(OpenSection {
            section_id,
            title,
            body_lines: Vec::new(),
            start_page: page,
            end_page: page,
            tables: Vec::new(),
        });
    }

    pub(super) fn push_body_line(&mut self, line: &str, page: Option<i64>) {
        match self.current.as_mut() {
            Some(open) => {
                open.body_lines.push(line.to_string());
                open.widen_pages(page);
            }
            None => self.stats.lines_dropped_before_heading += 1,
        }
    }

    pub(super) fn push_table(&mut self, table: TableSummary) {
        match self.current.as_mut() {
            Some(open) => {
                open.widen_pages(table.page_no);
                open.tables.push(table);
                self.stats.tables_kept += 1;
            }
            None => self.stats.tables_dropped_before_heading += 1,
        }
    }

    pub(super) fn skip_non_body(&mut self) {
        self.stats.nodes_skipped_non_body += 1;
    }

    pub(super) fn flush(&mut self) {
        if let Some(open) = self.current.take() {
            let section = open.seal();
            debug!(
                section = %section.section,
                tables = section.tables.len(),
                start_page = ?section.section_start_page,
                end_page = ?section.section_end_page,
                "sealed section"
            );
            self.sections.push(section);
        }
    }

    pub(super) fn finish(mut self) -> Extraction {
        self.flush();
        Extraction {
            sections: self.sections,
            stats: self.stats,
        }
    }
}

#[derive(Debug)]
pub(crate) struct SectionExtractor {
    matcher: HeadingMatcher,
}

impl SectionExtractor {
    pub(crate) fn new() -> anyhow::Result<Self> {
        Ok(Self {
            matcher: HeadingMatcher::new()?,
        })
    }

    pub(crate) fn extract(&self, doc: &Value) -> Result<Extraction, ExtractError> {
        let mut walk = TreeWalk {
            doc,
            matcher: &self.matcher,
            builder: SectionBuilder::default(),
            path: Vec::new(),
        };

        let children = doc
            .get("body")
            .and_then(|body| body.get("children"))
            .and_then(Value::as_array);

        for child in children.into_iter().flatten() {
            let Some(reference) = child_reference(child) else {
                continue;
            };
            let node = resolve_ref(doc, reference)?;
            walk.visit(reference, node)?;
        }

        Ok(walk.builder.finish())
    }
}

struct TreeWalk<'a> {
    doc: &'a Value,
    matcher: &'a HeadingMatcher,
    builder: SectionBuilder,
    path: Vec<&'a str>,
}

impl<'a> TreeWalk<'a> {
    fn visit(&mut self, reference: &'a str, node: &'a Value) -> Result<(), ExtractError> {
        // Null, false, zero and empty targets are skipped without counting as non-body.
        if !is_truthy(node) {
            return Ok(());
        }
        if !node.is_object() {
            return Err(ExtractError::lookup(
                reference,
                reference,
                "reference does not point to a node",
            ));
        }

        if node.get("content_layer").and_then(Value::as_str) != Some(BODY_LAYER) {
            self.builder.skip_non_body();
            return Ok(());
        }

        if let Some(children) = node
            .get("children")
            .and_then(Value::as_array)
            .filter(|children| !children.is_empty())
        {
            if self.path.contains(&reference) {
                return Err(ExtractError::lookup(reference, reference, "cyclic reference"));
            }

            self.path.push(reference);
            for child in children {
                let Some(child_ref) = child_reference(child) else {
                    continue;
                };
                let child_node = resolve_ref(self.doc, child_ref)?;
                self.visit(child_ref, child_node)?;
            }
            self.path.pop();
            return Ok(());
        }

        if is_table_node(node) {
            self.builder.push_table(extract_table_summary(node));
            return Ok(());
        }

        let text = node.get("text").and_then(Value::as_str).unwrap_or_default().trim();
        if text.is_empty() {
            return Ok(());
        }

        let page = get_page_no(node);
        match self.matcher.match_heading(text) {
            Some(heading) => self
                .builder
                .open_section(heading.section_id, heading.title, page),
            None => self.builder.push_body_line(text, page),
        }

        Ok(())
    }
}
