use crate::artifacts::diff::line_diff::DiffLine;

/// Cyclic cursor over the changed lines of one file diff
///
/// Owns the full aligned diff. The cursor starts with no selection and
/// wraps in both directions; with no changes, moving is a no-op.
#[derive(Debug, Clone)]
pub struct ChangeNavigator {
    lines: Vec<DiffLine>,
    changes: Vec<usize>,
    current: Option<usize>,
}

impl ChangeNavigator {
    pub fn new(lines: Vec<DiffLine>) -> Self {
        let changes = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_change())
            .map(|(position, _)| position)
            .collect();

        ChangeNavigator {
            lines,
            changes,
            current: None,
        }
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// Index into the changes, -1 before the first move
    pub fn current_index(&self) -> isize {
        self.current.map_or(-1, |index| index as isize)
    }

    pub fn current(&self) -> Option<&DiffLine> {
        self.current_position().map(|position| &self.lines[position])
    }

    /// Position of the selected change within [`ChangeNavigator::lines`]
    pub fn current_position(&self) -> Option<usize> {
        self.current.map(|index| self.changes[index])
    }

    pub fn next(&mut self) -> Option<&DiffLine> {
        let count = self.changes.len();
        if count == 0 {
            return None;
        }

        self.current = Some(match self.current {
            Some(index) if index + 1 < count => index + 1,
            _ => 0,
        });
        self.current()
    }

    pub fn previous(&mut self) -> Option<&DiffLine> {
        let count = self.changes.len();
        if count == 0 {
            return None;
        }

        self.current = Some(match self.current {
            Some(index) if index > 0 => index - 1,
            _ => count - 1,
        });
        self.current()
    }

    /// Move `steps` changes forward (negative: backward)
    ///
    /// Same result as calling `next`/`previous` that many times.
    pub fn advance(&mut self, steps: isize) -> Option<&DiffLine> {
        let count = self.changes.len() as isize;
        if count == 0 || steps == 0 {
            return self.current();
        }

        // before the first move, one step forward lands on 0 and one back on the last
        let start = match self.current {
            Some(index) => index as isize,
            None if steps > 0 => -1,
            None => 0,
        };
        let target = (start + steps.rem_euclid(count)).rem_euclid(count);

        self.current = Some(target as usize);
        self.current()
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
