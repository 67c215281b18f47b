use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::style::Palette;

/// Editable single-line buffer backing the search field.
#[derive(Clone, Default)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
}

impl TextField {
    /// Byte offset of the char boundary preceding the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }
    pub fn backspace(&mut self) {
        if let Some(i) = self.prev_boundary() {
            self.text.remove(i);
            self.cursor = i;
        }
    }
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }
    pub fn move_left(&mut self) {
        if let Some(i) = self.prev_boundary() {
            self.cursor = i;
        }
    }
    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }
    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

// Bash-style block cursor that covers the char (no shifting)
pub fn field_line<'a>(label: &str, field: &TextField, focused: bool, p: &Palette) -> Line<'a> {
    let label_s = format!("{label}: ");
    let text = field.text.as_str();
    let cur = field.cursor.min(text.len());
    let label_span = Span::styled(label_s, Style::default().fg(p.accent));

    if !focused {
        return Line::from(vec![label_span, Span::raw(text.to_string())]);
    }

    let (left, rest) = text.split_at(cur);
    let block = |s: &str| {
        Span::styled(
            s.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(p.selected)
                .add_modifier(Modifier::BOLD),
        )
    };

    if let Some(ch) = rest.chars().next() {
        let after = &rest[ch.len_utf8()..];
        Line::from(vec![
            label_span,
            Span::raw(left.to_string()),
            block(&ch.to_string()),
            Span::raw(after.to_string()),
        ])
    } else {
        Line::from(vec![label_span, Span::raw(left.to_string()), block(" ")])
    }
}

/// `Volume: [#######-----] 60%` style gauge line.
pub fn slider_line<'a>(label: &str, percent: u8, focused: bool, p: &Palette) -> Line<'a> {
    const CELLS: usize = 20;
    let filled = (percent as usize * CELLS) / 100;
    let bar: String = (0..CELLS)
        .map(|i| if i < filled { '#' } else { '-' })
        .collect();
    let style = if focused {
        Style::default().fg(p.selected).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.idle)
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(p.accent)),
        Span::styled(format!("[{bar}] {percent:>3}%"), style),
    ])
}

/// `[x] Label` / `[ ] Label` toggle row.
pub fn toggle_line<'a>(label: &str, on: bool, focused: bool, p: &Palette) -> Line<'a> {
    let mark = if on { "[x]" } else { "[ ]" };
    let style = if focused {
        Style::default().fg(p.selected).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.idle)
    };
    Line::from(vec![
        Span::styled(format!("{mark} "), style),
        Span::styled(label.to_string(), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::TextField;

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut field = TextField::default();
        for c in "café".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.text, "café");

        field.backspace();
        assert_eq!(field.text, "caf");
        assert_eq!(field.cursor, 3);

        field.insert_char('é');
        field.move_left();
        field.move_left();
        field.insert_char('ß');
        assert_eq!(field.text, "caßfé");

        field.move_right();
        field.delete();
        assert_eq!(field.text, "caßf");
        field.end();
        field.backspace();
        field.backspace();
        field.backspace();
        field.backspace();
        assert_eq!(field.text, "");
        assert_eq!(field.cursor, 0);
        // Empty field: further edits stay no-ops.
        field.backspace();
        field.move_left();
        assert_eq!(field.cursor, 0);
    }
}
