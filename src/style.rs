/*!
 * Presentation settings: page geometry, fonts and colors
 */

/// Standard PDF fonts used by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    Courier,
}

impl Font {
    /// PostScript name of the font
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::Courier => "Courier",
        }
    }

    /// Resource name the font is registered under in each page
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::Courier => "F3",
        }
    }

    /// All fonts, in resource order
    pub fn all() -> [Font; 3] {
        [Font::Helvetica, Font::HelveticaBold, Font::Courier]
    }

    /// Ascender height as a fraction of the font size
    pub fn ascent(self) -> f32 {
        match self {
            Font::Courier => 0.629,
            Font::Helvetica | Font::HelveticaBold => 0.718,
        }
    }

    /// Line height as a fraction of the font size
    pub fn line_factor(self) -> f32 {
        match self {
            Font::Courier => 0.786,
            Font::Helvetica | Font::HelveticaBold => 0.925,
        }
    }
}

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Components scaled to the 0..=1 range used by PDF operators
    pub fn components(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Colors used across the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Body text
    pub text: Rgb,
    /// Group and file titles
    pub title: Rgb,
    /// Running header and the rule under each directory tree
    pub header: Rgb,
    /// Thin rule under each file title
    pub rule: Rgb,
    /// Error notes and truncation notices
    pub error: Rgb,
}

/// Layout settings for the whole document
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    pub margins: Margins,
    pub palette: Palette,
    /// Font for titles and headers
    pub heading_font: Font,
    /// Font for notes and page numbers
    pub body_font: Font,
    /// Font for trees and file content
    pub mono_font: Font,
    /// Start a new page when a tree line would start below this offset
    pub tree_break_y: f32,
    /// Start a new page when a file title would start below this offset
    pub heading_break_y: f32,
    /// Start a new page when a content line would start below this offset
    pub content_break_y: f32,
    /// Distance from the bottom edge to the page number
    pub page_number_offset: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margins: Margins {
                top: 70.0,
                bottom: 60.0,
                left: 50.0,
                right: 50.0,
            },
            palette: Palette {
                text: Rgb::BLACK,
                title: Rgb(0x2c, 0x3e, 0x50),
                header: Rgb(0x34, 0x49, 0x5e),
                rule: Rgb(0xbd, 0xc3, 0xc7),
                error: Rgb(0xe7, 0x4c, 0x3c),
            },
            heading_font: Font::HelveticaBold,
            body_font: Font::Helvetica,
            mono_font: Font::Courier,
            tree_break_y: 720.0,
            heading_break_y: 700.0,
            content_break_y: 750.0,
            page_number_offset: 40.0,
        }
    }
}

impl Style {
    /// Width available between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// Lowest offset text may occupy before running into the bottom margin
    pub fn max_y(&self) -> f32 {
        self.page_height - self.margins.bottom
    }
}
