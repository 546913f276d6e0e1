//! Braille glyph tables for Nemeth and UEB
//!
//! Every literal marker a layout engine places on the page comes from here.
//! Glyphs are written in North American braille ASCII.

use serde::{Deserialize, Serialize};

/// Braille code used for the mathematics on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptMode {
    #[default]
    Nemeth,
    Ueb,
}

impl ScriptMode {
    pub fn is_nemeth(&self) -> bool {
        matches!(self, ScriptMode::Nemeth)
    }

    /// Glyph table for this script
    pub fn glyphs(&self) -> &'static GlyphTable {
        match self {
            ScriptMode::Nemeth => &NEMETH,
            ScriptMode::Ueb => &UEB,
        }
    }
}

/// Markers used when drawing number lines and matrices.
///
/// `tick`, `segment_fill`, `line_fill` and the circles are single cells; the
/// number line draws them one per column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    pub minus: &'static str,
    pub line_fill: &'static str,
    pub tick: &'static str,
    pub segment_fill: &'static str,
    pub begin_arrow: &'static str,
    pub end_arrow: &'static str,
    pub begin_overflow_arrow: &'static str,
    pub end_overflow_arrow: &'static str,
    pub filled_circle: &'static str,
    pub hollow_circle: &'static str,
    pub omission: &'static str,
    pub ellipsis: &'static str,
}

pub const NEMETH: GlyphTable = GlyphTable {
    minus: "-",
    line_fill: "3",
    tick: "7",
    segment_fill: "g",
    begin_arrow: "{",
    end_arrow: "o",
    begin_overflow_arrow: "{{",
    end_overflow_arrow: "oo",
    filled_circle: "&",
    hollow_circle: "%",
    omission: "=",
    ellipsis: "'''",
};

pub const UEB: GlyphTable = GlyphTable {
    minus: "\"-",
    line_fill: "\"",
    tick: "7",
    segment_fill: "=",
    begin_arrow: "[",
    end_arrow: "o",
    begin_overflow_arrow: "[[",
    end_overflow_arrow: "oo",
    filled_circle: "&",
    hollow_circle: "%",
    omission: "\"=",
    ellipsis: "444",
};

/// Enclosing bracket drawn around a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BracketType {
    #[default]
    Parentheses,
    SquareBrackets,
    CurlyBraces,
    VerticalBars,
    DoubleVerticalBars,
    AngleBrackets,
    Floor,
    None,
}

impl BracketType {
    pub const ALL: [BracketType; 8] = [
        BracketType::Parentheses,
        BracketType::SquareBrackets,
        BracketType::CurlyBraces,
        BracketType::VerticalBars,
        BracketType::DoubleVerticalBars,
        BracketType::AngleBrackets,
        BracketType::Floor,
        BracketType::None,
    ];

    /// Opening and closing glyphs for this bracket in the given script
    pub fn glyphs(&self, script: ScriptMode) -> (&'static str, &'static str) {
        match (script, self) {
            (ScriptMode::Nemeth, BracketType::Parentheses) => (",(", ",)"),
            (ScriptMode::Nemeth, BracketType::SquareBrackets) => (",@(", ",@)"),
            (ScriptMode::Nemeth, BracketType::CurlyBraces) => (",.(", ",.)"),
            (ScriptMode::Nemeth, BracketType::VerticalBars) => (",\\", ",\\"),
            (ScriptMode::Nemeth, BracketType::DoubleVerticalBars) => (",\\\\", ",\\\\"),
            (ScriptMode::Nemeth, BracketType::AngleBrackets) => (",.{", ",.o"),
            (ScriptMode::Nemeth, BracketType::Floor) => (",@{", ",@o"),
            (ScriptMode::Ueb, BracketType::Parentheses) => ("\"<", "\">"),
            (ScriptMode::Ueb, BracketType::SquareBrackets) => (".<", ".>"),
            (ScriptMode::Ueb, BracketType::CurlyBraces) => ("_<", "_>"),
            (ScriptMode::Ueb, BracketType::VerticalBars) => ("_\\", "_\\"),
            (ScriptMode::Ueb, BracketType::DoubleVerticalBars) => ("_\\_\\", "_\\_\\"),
            (ScriptMode::Ueb, BracketType::AngleBrackets) => ("@<", "@>"),
            (ScriptMode::Ueb, BracketType::Floor) => ("@.<", "@.>"),
            (_, BracketType::None) => ("", ""),
        }
    }
}

/// Passage framing applied around a whole page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassageMode {
    #[default]
    None,
    Numeric,
    Nemeth,
    Grade1,
}

impl PassageMode {
    /// Opening and closing indicators, if this mode frames the page
    pub fn indicators(&self) -> Option<(&'static str, &'static str)> {
        match self {
            PassageMode::None => None,
            PassageMode::Numeric => Some(("##", "#'")),
            PassageMode::Nemeth => Some(("_%", "_:")),
            PassageMode::Grade1 => Some((";;;", ";'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::cell_width;

    #[test]
    fn test_marker_glyphs_are_single_cells() {
        for table in [&NEMETH, &UEB] {
            for glyph in [
                table.line_fill,
                table.tick,
                table.segment_fill,
                table.filled_circle,
                table.hollow_circle,
            ] {
                assert_eq!(cell_width(glyph), 1, "{glyph:?}");
            }
        }
    }

    #[test]
    fn test_overflow_arrows_are_wider() {
        for script in [ScriptMode::Nemeth, ScriptMode::Ueb] {
            let g = script.glyphs();
            assert!(cell_width(g.begin_overflow_arrow) > cell_width(g.begin_arrow));
            assert!(cell_width(g.end_overflow_arrow) > cell_width(g.end_arrow));
        }
    }

    #[test]
    fn test_brackets_differ_by_script() {
        for bracket in BracketType::ALL {
            if bracket == BracketType::None {
                assert_eq!(bracket.glyphs(ScriptMode::Ueb), ("", ""));
                continue;
            }
            assert_ne!(bracket.glyphs(ScriptMode::Nemeth), bracket.glyphs(ScriptMode::Ueb));
        }
    }

    #[test]
    fn test_passage_indicators() {
        assert!(PassageMode::None.indicators().is_none());
        assert_eq!(PassageMode::Nemeth.indicators(), Some(("_%", "_:")));
    }
}
