//! Passage framing around a composed page
//!
//! A passage announces that the enclosed page is written in a different
//! braille code. Single-row pages carry the indicators inline; multi-row
//! pages get an indicator line above and below.

use spatial_model::{Line, PassageMode};

/// Put `open` and a space in front of the first line
pub fn open_single_row(lines: &mut Vec<Line>, open: &str) {
    match lines.first_mut().filter(|line| !line.is_line_break()) {
        Some(first) => {
            let mut framed = Line::new();
            framed.push_text(open);
            framed.push_whitespace(1);
            framed.extend(first);
            *first = framed;
        }
        None => lines.insert(0, Line::from_text(open)),
    }
}

/// Put a space and `close` after the last line
pub fn close_single_row(lines: &mut Vec<Line>, close: &str) {
    match lines.last_mut().filter(|line| !line.is_line_break()) {
        Some(last) => {
            last.push_whitespace(1);
            last.push_text(close);
        }
        None => lines.push(Line::from_text(close)),
    }
}

pub fn open_multi_row(lines: &mut Vec<Line>, open: &str) {
    lines.insert(0, Line::from_text(open));
}

pub fn close_multi_row(lines: &mut Vec<Line>, close: &str) {
    lines.push(Line::from_text(close));
}

/// Frame `lines` for `mode`; a `None` passage leaves them untouched
pub fn wrap(lines: &mut Vec<Line>, mode: PassageMode, single_row: bool) {
    let Some((open, close)) = mode.indicators() else {
        return;
    };
    tracing::trace!("wrapping {:?} passage, single row: {}", mode, single_row);
    if single_row {
        open_single_row(lines, open);
        close_single_row(lines, close);
    } else {
        open_multi_row(lines, open);
        close_multi_row(lines, close);
    }
}
