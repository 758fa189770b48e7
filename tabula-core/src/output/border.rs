//! Box-drawing glyph sets for rendered tables.

/// Glyphs used to draw one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub corner_up_left: &'static str,
    pub corner_up_right: &'static str,
    pub corner_bottom_left: &'static str,
    pub corner_bottom_right: &'static str,
    pub division_up: &'static str,
    pub division_bottom: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
    pub intersection: &'static str,
    pub vertical_left: &'static str,
    pub vertical_right: &'static str,
}

/// Border style selected by the `--border-style` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// Heavy lines (code 1)
    #[default]
    Default,
    /// Light lines (code 2)
    Simple,
    /// Light lines with rounded corners (code 3)
    Rounded,
    /// Double lines (code 4)
    Double,
    /// Double horizontals, light verticals (code 5)
    SimpleDouble,
}

impl BorderStyle {
    /// Resolves a style code, falling back to [`BorderStyle::Default`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => BorderStyle::Default,
            2 => BorderStyle::Simple,
            3 => BorderStyle::Rounded,
            4 => BorderStyle::Double,
            5 => BorderStyle::SimpleDouble,
            other => {
                tracing::warn!("Unknown border style {}, using the default", other);
                BorderStyle::Default
            }
        }
    }

    pub fn border(self) -> Border {
        match self {
            BorderStyle::Default => Border {
                corner_up_left: "┏",
                corner_up_right: "┓",
                corner_bottom_left: "┗",
                corner_bottom_right: "┛",
                division_up: "┳",
                division_bottom: "┻",
                horizontal: "━",
                vertical: "┃",
                intersection: "╋",
                vertical_left: "┣",
                vertical_right: "┫",
            },
            BorderStyle::Simple => Border {
                corner_up_left: "┌",
                corner_up_right: "┐",
                corner_bottom_left: "└",
                corner_bottom_right: "┘",
                ..LIGHT
            },
            BorderStyle::Rounded => Border {
                corner_up_left: "╭",
                corner_up_right: "╮",
                corner_bottom_left: "╰",
                corner_bottom_right: "╯",
                ..LIGHT
            },
            BorderStyle::Double => Border {
                corner_up_left: "╔",
                corner_up_right: "╗",
                corner_bottom_left: "╚",
                corner_bottom_right: "╝",
                division_up: "╦",
                division_bottom: "╩",
                horizontal: "═",
                vertical: "║",
                intersection: "╬",
                vertical_left: "╠",
                vertical_right: "╣",
            },
            BorderStyle::SimpleDouble => Border {
                corner_up_left: "╒",
                corner_up_right: "╕",
                corner_bottom_left: "╘",
                corner_bottom_right: "╛",
                division_up: "╤",
                division_bottom: "╧",
                horizontal: "═",
                vertical: "│",
                intersection: "╪",
                vertical_left: "╞",
                vertical_right: "╡",
            },
        }
    }
}

// Shared by the simple and rounded styles, which differ only in corners.
const LIGHT: Border = Border {
    corner_up_left: "┌",
    corner_up_right: "┐",
    corner_bottom_left: "└",
    corner_bottom_right: "┘",
    division_up: "┬",
    division_bottom: "┴",
    horizontal: "─",
    vertical: "│",
    intersection: "┼",
    vertical_left: "├",
    vertical_right: "┤",
};
