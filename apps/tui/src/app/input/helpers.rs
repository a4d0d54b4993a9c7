use crossterm::event::KeyCode;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Applies a typing key to a text buffer. Returns false for keys that are not typing.
pub fn edit_text(buffer: &mut String, key: KeyCode, accept: impl Fn(char) -> bool) -> bool {
    match key {
        KeyCode::Char(c) if accept(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_cycles() {
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(0, 0), 0);
    }

    #[test]
    fn edit_text_filters_characters() {
        let mut buffer = String::from("1");
        assert!(edit_text(&mut buffer, KeyCode::Char('2'), |c| c.is_ascii_digit()));
        assert!(!edit_text(&mut buffer, KeyCode::Char('x'), |c| c.is_ascii_digit()));
        assert!(edit_text(&mut buffer, KeyCode::Backspace, |_| true));
        assert_eq!(buffer, "1");
    }
}
