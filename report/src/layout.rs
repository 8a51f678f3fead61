//! Places a [`ReportDocument`] onto US Letter pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.
//! Content flows top to bottom and continues on a new page once the bottom
//! margin is reached; table rows are never split across pages.

use crate::document::{Block, ReportDocument, Table};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;

const LEADING: f32 = 1.2;
const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const TABLE_SIZE: f32 = 12.0;
const ROW_HEIGHT: f32 = 24.0;
const CELL_PADDING: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Rule {
        from: (f32, f32),
        to: (f32, f32),
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Primitive>,
}

/// Positions every block; always returns at least one page.
pub fn layout(document: &ReportDocument) -> Vec<Page> {
    let mut cursor = Cursor::new();

    for block in &document.blocks {
        match block {
            Block::Title(text) => cursor.text_line(text, TITLE_SIZE, true),
            Block::Heading(text) => cursor.text_line(text, HEADING_SIZE, true),
            Block::Paragraph(text) => cursor.text_line(text, BODY_SIZE, false),
            Block::Spacer(height) => cursor.space(*height),
            Block::Table(table) => cursor.table(table),
        }
    }

    cursor.pages
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn page(&mut self) -> &mut Page {
        // `pages` starts non-empty and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.page().items.is_empty() {
            self.new_page();
        }
    }

    fn space(&mut self, height: f32) {
        self.y -= height;
        if self.y < MARGIN {
            self.new_page();
        }
    }

    fn text_line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_room(size * LEADING);

        let baseline = self.y - size;
        self.page().items.push(Primitive::Text {
            x: MARGIN,
            y: baseline,
            size,
            bold,
            text: text.to_string(),
        });
        self.y -= size * LEADING;
    }

    fn table(&mut self, table: &Table) {
        // Tables are centred in the content area.
        let content_width = PAGE_WIDTH - 2.0 * MARGIN;
        let left = MARGIN + (content_width - table.width()).max(0.0) / 2.0;

        let header = table.header.iter().map(|cells| (cells, true));
        let body = table.rows.iter().map(|cells| (cells, false));

        let mut first_on_page = true;
        for (cells, bold) in header.chain(body) {
            if self.y - ROW_HEIGHT < MARGIN {
                self.new_page();
                first_on_page = true;
            }
            if first_on_page {
                self.rule((left, self.y), (left + table.width(), self.y));
                first_on_page = false;
            }
            self.row(table, left, cells, bold);
        }
    }

    fn row(&mut self, table: &Table, left: f32, cells: &[String], bold: bool) {
        let top = self.y;
        let bottom = top - ROW_HEIGHT;
        let baseline = top - ROW_HEIGHT / 2.0 - TABLE_SIZE * 0.35;

        let mut x = left;
        self.rule((x, top), (x, bottom));
        for (width, cell) in table.column_widths.iter().zip(cells) {
            self.page().items.push(Primitive::Text {
                x: x + CELL_PADDING,
                y: baseline,
                size: TABLE_SIZE,
                bold,
                text: cell.clone(),
            });
            x += width;
            self.rule((x, top), (x, bottom));
        }
        self.rule((left, bottom), (left + table.width(), bottom));

        self.y = bottom;
    }

    fn rule(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.page().items.push(Primitive::Rule { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(page: &Page) -> Vec<&str> {
        page.items
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                Primitive::Rule { .. } => None,
            })
            .collect()
    }

    fn within_margins(page: &Page) -> bool {
        page.items.iter().all(|p| match p {
            Primitive::Text { y, .. } => *y >= MARGIN && *y <= PAGE_HEIGHT - MARGIN,
            Primitive::Rule { from, to } => from.1 >= MARGIN && to.1 >= MARGIN,
        })
    }

    #[test]
    fn empty_document_has_one_blank_page() {
        let doc = ReportDocument {
            title: "t".into(),
            blocks: Vec::new(),
        };
        assert_eq!(layout(&doc), vec![Page::default()]);
    }

    #[test]
    fn text_flows_downwards() {
        let doc = ReportDocument {
            title: "t".into(),
            blocks: vec![
                Block::Title("Title".into()),
                Block::Paragraph("first".into()),
                Block::Paragraph("second".into()),
            ],
        };

        let pages = layout(&doc);
        let ys: Vec<f32> = pages[0]
            .items
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { y, .. } => Some(*y),
                Primitive::Rule { .. } => None,
            })
            .collect();

        assert_eq!(pages.len(), 1);
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn long_tables_continue_on_next_page() {
        let table = Table {
            column_widths: vec![200.0, 200.0],
            header: Some(vec!["Name".into(), "Value".into()]),
            rows: (0..60).map(|i| vec![format!("row {i}"), i.to_string()]).collect(),
        };
        let doc = ReportDocument {
            title: "t".into(),
            blocks: vec![Block::Table(table)],
        };

        let pages = layout(&doc);

        assert!(pages.len() > 1);
        assert!(pages.iter().all(within_margins));
        assert_eq!(texts(&pages[0])[0], "Name");
        let all: Vec<&str> = pages.iter().flat_map(texts).collect();
        assert!(all.contains(&"row 59"));
    }

    #[test]
    fn tables_are_centred() {
        let doc = ReportDocument {
            title: "t".into(),
            blocks: vec![Block::Table(Table {
                column_widths: vec![200.0, 200.0],
                header: None,
                rows: vec![vec!["a".into(), "b".into()]],
            })],
        };

        let pages = layout(&doc);
        let Primitive::Rule { from, to } = &pages[0].items[0] else {
            panic!("expected top rule first");
        };

        assert_eq!(from.0, MARGIN + 34.0);
        assert_eq!(to.0, PAGE_WIDTH - MARGIN - 34.0);
    }
}
