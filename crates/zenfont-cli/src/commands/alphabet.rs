//! Alphabet command implementation
//!
//! Prints the 28x8 glyph grid of a codepage in atlas order.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use zenfont_backend::{alphabet_for, COLUMNS, FIRST_PRINTABLE};
use zenfont_spec::Codepage;

/// Placeholder for slots whose character is a control code.
const CONTROL_MARK: char = '·';

/// Run the alphabet command
///
/// # Returns
/// Exit code: 0 success
pub fn run(codepage: Codepage) -> Result<ExitCode> {
    println!("{} {}", "Codepage:".cyan().bold(), codepage);
    for (row, line) in grid_rows(codepage).iter().enumerate() {
        let first = u32::from(FIRST_PRINTABLE) + row as u32 * COLUMNS;
        println!("  {} {}", format!("0x{:02X}", first).dimmed(), line);
    }
    Ok(ExitCode::SUCCESS)
}

/// Grid rows of the atlas alphabet, characters separated by a space.
pub fn grid_rows(codepage: Codepage) -> Vec<String> {
    alphabet_for(codepage)
        .chunks(COLUMNS as usize)
        .map(|row| {
            row.iter()
                .map(|&c| if c.is_control() { CONTROL_MARK } else { c })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn grid_has_eight_rows_of_28() {
        let rows = grid_rows(Codepage::Windows1252);
        assert_eq!(rows.len(), 8);
        // Row 0 opens with the space glyph itself.
        assert!(rows[0].starts_with("  ! \""));
        for row in &rows[1..] {
            assert_eq!(row.split(' ').count(), 28);
        }
    }

    #[test]
    fn control_codes_are_masked() {
        // 0x81 is undefined in windows-1252 and decodes to U+0081.
        let rows = grid_rows(Codepage::Windows1252);
        let row = &rows[(0x81 - 32) / 28];
        assert!(row.contains(CONTROL_MARK));
        assert!(!rows[0].contains(CONTROL_MARK));
    }

    #[test]
    fn cyrillic_row_order() {
        let rows = grid_rows(Codepage::Windows1251);
        // 0xC0 is index 160: row 5, column 20.
        let cells: Vec<&str> = rows[5].split(' ').collect();
        assert_eq!(cells[20], "А");
    }
}
