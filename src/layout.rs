/*!
 * In-memory page buffer
 *
 * Every drawing operation is recorded against a page and kept until the
 * document is written, so finished pages can still be revisited (page
 * numbers are stamped only once the total is known).
 */

use crate::error::Result;
use crate::style::{Font, Rgb, Style};

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;
const FALLBACK_WIDTH: u16 = 556;

/// Advance width of `c` in thousandths of the font size
fn char_width(font: Font, c: char) -> u16 {
    let table = match font {
        Font::Courier => return COURIER_WIDTH,
        Font::Helvetica => &HELVETICA_WIDTHS,
        Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
    };
    match c as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points when set in `font` at `size`
pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    units as f32 * size / 1000.0
}

/// Split `text` into rows no wider than `width`.
///
/// Monospace text is cut at a fixed column so indentation survives;
/// proportional text breaks between words. Always yields at least one row.
pub fn wrap_text(font: Font, size: f32, width: f32, text: &str) -> Vec<String> {
    if font == Font::Courier {
        let per_row = ((width * 1000.0) / (COURIER_WIDTH as f32 * size)).floor().max(1.0) as usize;
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return vec![String::new()];
        }
        return chars.chunks(per_row).map(|row| row.iter().collect()).collect();
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(font, size, &candidate) <= width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        // A single word wider than the row is broken by character
        for c in word.chars() {
            let mut next = current.clone();
            next.push(c);
            if !current.is_empty() && text_width(font, size, &next) > width {
                rows.push(std::mem::take(&mut current));
                current.push(c);
            } else {
                current = next;
            }
        }
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Horizontal alignment of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A single drawing operation; `y` is measured from the top of the page
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// One row of text whose top edge sits at `y`
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: String,
    },
    /// A horizontal line
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: Rgb,
    },
}

/// Drawing operations recorded for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    ops: Vec<DrawOp>,
}

impl Page {
    /// Operations in drawing order
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text rows in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// Current write position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    /// Vertical offset from the top of the page
    pub y: f32,
    /// Index of the page being written
    pub page: usize,
}

/// Page buffer plus the cursor and text state threaded through a build
#[derive(Debug)]
pub struct Layout {
    style: Style,
    pages: Vec<Page>,
    cursor: RenderCursor,
    font: Font,
    size: f32,
    color: Rgb,
    running_header: Option<String>,
}

impl Layout {
    /// Create an empty layout; the first page appears on the first write
    pub fn new(style: Style) -> Self {
        Self {
            cursor: RenderCursor {
                y: style.margins.top,
                page: 0,
            },
            font: style.body_font,
            size: 12.0,
            color: style.palette.text,
            pages: Vec::new(),
            running_header: None,
            style,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn cursor(&self) -> RenderCursor {
        self.cursor
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Select the font and size for following text
    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.size = size;
    }

    /// Select the fill color for following text
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Label drawn at the top of every page started from now on
    pub fn set_running_header(&mut self, header: Option<String>) {
        self.running_header = header;
    }

    /// Height of one row in the current font
    pub fn line_height(&self) -> f32 {
        self.size * self.font.line_factor()
    }

    /// Advance the cursor by a number of rows in the current font
    pub fn move_down(&mut self, rows: f32) {
        self.cursor.y += rows * self.line_height();
    }

    /// Start a new page and draw the running header on it.
    ///
    /// A page that has not been written to yet is reused rather than
    /// left blank. Font, size and color are kept.
    pub fn add_page(&mut self) {
        self.cursor.page = self.pages.len();
        self.cursor.y = self.style.margins.top;
        if let Some(header) = self.running_header.clone() {
            self.draw_header(&header);
        }
    }

    /// Start a new page if the cursor sits below `threshold`
    pub fn break_if_below(&mut self, threshold: f32) -> bool {
        if self.cursor.y > threshold {
            self.add_page();
            true
        } else {
            false
        }
    }

    /// Lay out `text` at the cursor, wrapping to the content width
    pub fn text(&mut self, text: &str, align: Align) {
        let width = self.style.content_width();
        let rows = wrap_text(self.font, self.size, width, text);
        for row in rows {
            if self.cursor.y + self.line_height() > self.style.max_y() {
                self.add_page();
            }
            let x = match align {
                Align::Left => self.style.margins.left,
                Align::Center => {
                    let row_width = text_width(self.font, self.size, &row);
                    self.style.margins.left + (width - row_width).max(0.0) / 2.0
                }
            };
            let op = DrawOp::Text {
                x,
                y: self.cursor.y,
                font: self.font,
                size: self.size,
                color: self.color,
                text: row,
            };
            self.push(op);
            self.cursor.y += self.line_height();
        }
    }

    /// Draw a horizontal rule across the content width at the cursor
    pub fn rule(&mut self, color: Rgb, width: f32) {
        let op = DrawOp::Rule {
            x1: self.style.margins.left,
            x2: self.style.page_width - self.style.margins.right,
            y: self.cursor.y,
            width,
            color,
        };
        self.push(op);
    }

    /// Add an operation to an already written page without moving the cursor
    pub fn overlay(&mut self, page: usize, op: DrawOp) -> Result<()> {
        match self.pages.get_mut(page) {
            Some(target) => {
                target.ops.push(op);
                Ok(())
            }
            None => Err(crate::error!(
                Unexpected,
                "page {} does not exist ({} pages)",
                page + 1,
                self.pages.len()
            )),
        }
    }

    fn draw_header(&mut self, header: &str) {
        let font = self.style.heading_font;
        let size = 10.0;
        let width = self.style.content_width();
        let x = self.style.margins.left + (width - text_width(font, size, header)).max(0.0) / 2.0;
        let op = DrawOp::Text {
            x,
            y: 30.0,
            font,
            size,
            color: self.style.palette.header,
            text: header.to_string(),
        };
        self.push(op);
    }

    fn push(&mut self, op: DrawOp) {
        while self.pages.len() <= self.cursor.page {
            self.pages.push(Page::default());
        }
        self.pages[self.cursor.page].ops.push(op);
    }
}
