//! Text notation renderer
//!
//! Draws a trial as one chord on a treble staff. Pitches above or below the
//! five lines get ledger lines, so low and high octave groups read the way
//! they would on paper. No note names are printed; reading them is the drill.

use notedrill_core::{NotationRenderer, Pitch, RenderRequest};
use std::collections::BTreeSet;

/// Diatonic index of the bottom staff line (E/4)
const BOTTOM_LINE: i32 = 4 * 7 + 2;
/// Diatonic index of the top staff line (F/5)
const TOP_LINE: i32 = 5 * 7 + 3;

pub struct TextStaffRenderer {
    width: usize,
}

impl TextStaffRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(8),
        }
    }

    fn note_column(&self) -> usize {
        self.width / 2 - 1
    }

    fn is_line(position: i32) -> bool {
        (position - BOTTOM_LINE).rem_euclid(2) == 0
    }

    /// Draw the rows of a chord from top to bottom
    pub fn draw(&self, pitches: &[Pitch], hollow: bool) -> Vec<String> {
        let positions: BTreeSet<i32> = pitches.iter().map(Pitch::diatonic_index).collect();
        let highest = positions.iter().next_back().copied().unwrap_or(TOP_LINE);
        let lowest = positions.iter().next().copied().unwrap_or(BOTTOM_LINE);
        let top = highest.max(TOP_LINE);
        let bottom = lowest.min(BOTTOM_LINE);

        let column = self.note_column();
        let head = if hollow { '○' } else { '●' };

        // A second above a head that sits in the main column shifts right
        let mut shifted = BTreeSet::new();
        for &position in &positions {
            if positions.contains(&(position - 1)) && !shifted.contains(&(position - 1)) {
                shifted.insert(position);
            }
        }

        (bottom..=top)
            .rev()
            .map(|position| {
                let in_staff = (BOTTOM_LINE..=TOP_LINE).contains(&position);
                let mut row = vec![' '; self.width];

                if Self::is_line(position) {
                    if in_staff {
                        row.iter_mut().for_each(|c| *c = '─');
                    } else if (position > TOP_LINE && position <= highest)
                        || (position < BOTTOM_LINE && position >= lowest)
                    {
                        let end = (column + 4).min(self.width);
                        row[column.saturating_sub(1)..end]
                            .iter_mut()
                            .for_each(|c| *c = '─');
                    }
                }

                if positions.contains(&position) {
                    let offset = if shifted.contains(&position) { 2 } else { 0 };
                    if let Some(cell) = row.get_mut(column + offset) {
                        *cell = head;
                    }
                }

                row.into_iter().collect::<String>().trim_end().to_string()
            })
            .collect()
    }
}

impl Default for TextStaffRenderer {
    fn default() -> Self {
        Self::new(24)
    }
}

impl NotationRenderer for TextStaffRenderer {
    type Output = String;

    fn render(&mut self, request: &RenderRequest) -> String {
        let pitches: Vec<Pitch> = request
            .pitches
            .iter()
            .filter_map(|p| p.parse().ok())
            .collect();

        let mut lines = vec![format!(
            "𝄞 4/4  {} note{}",
            request.duration,
            if pitches.len() == 1 { "" } else { "s" }
        )];
        lines.extend(self.draw(&pitches, request.duration.is_hollow()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notedrill_core::NoteDuration;

    fn pitches(list: &[&str]) -> Vec<Pitch> {
        list.iter().map(|p| p.parse().unwrap()).collect()
    }

    fn head_rows(rows: &[String]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| row.contains('●') || row.contains('○'))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_in_staff_note_draws_only_the_staff() {
        let renderer = TextStaffRenderer::new(20);
        let rows = renderer.draw(&pitches(&["B/4"]), false);
        // F5 down to E4
        assert_eq!(rows.len(), 9);
        assert_eq!(head_rows(&rows), vec![4]);
        assert_eq!(rows.iter().filter(|r| r.starts_with('─')).count(), 5);
    }

    #[test]
    fn test_middle_c_gets_one_ledger_line() {
        let renderer = TextStaffRenderer::new(20);
        let rows = renderer.draw(&pitches(&["C/4"]), false);
        assert_eq!(rows.len(), 11);
        let last = rows.last().unwrap();
        assert!(last.contains('●'));
        assert!(last.contains('─'));
        // D4 row between staff and ledger line is blank
        assert_eq!(rows[rows.len() - 2], "");
    }

    #[test]
    fn test_note_hanging_below_staff_has_no_ledger() {
        let renderer = TextStaffRenderer::new(20);
        let rows = renderer.draw(&pitches(&["D/4"]), true);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows.last().unwrap().trim(), "○");
    }

    #[test]
    fn test_high_notes_get_ledger_lines_above() {
        let renderer = TextStaffRenderer::new(20);
        // C6 sits on the second ledger line above the staff
        let rows = renderer.draw(&pitches(&["C/6"]), false);
        assert_eq!(head_rows(&rows), vec![0]);
        assert!(rows[0].contains('─'));
        assert!(rows[2].contains('─'));
        assert_eq!(rows[1], "");
    }

    #[test]
    fn test_seconds_are_offset() {
        let renderer = TextStaffRenderer::new(20);
        let rows = renderer.draw(&pitches(&["E/4", "F/4"]), false);
        let column = |row: &String| row.chars().position(|c| c == '●').unwrap();
        let f_row = &rows[rows.len() - 2];
        let e_row = &rows[rows.len() - 1];
        assert_eq!(column(f_row), column(e_row) + 2);
    }

    #[test]
    fn test_render_request_header() {
        let mut renderer = TextStaffRenderer::default();
        let request = RenderRequest {
            pitches: vec!["C/4".to_string(), "E/4".to_string()],
            duration: NoteDuration::Half,
        };
        let drawn = renderer.render(&request);
        assert!(drawn.starts_with("𝄞 4/4  half notes"));
        assert_eq!(drawn.matches('○').count(), 2);
        assert!(!drawn.contains("C/4"));
    }
}
