//! Terminal output for a generated level

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use delve_core::{Level, Tile};

/// Foreground, background and bold flag for a tile
fn palette(tile: Tile) -> (Color, Color, bool) {
    match tile {
        Tile::Floor => (Color::Reset, Color::Reset, false),
        Tile::Wall => (Color::Reset, Color::AnsiValue(0x10), false),
        Tile::Outside => (Color::Reset, Color::White, false),
        Tile::Box => (Color::Yellow, Color::Reset, true),
        Tile::Chest { open: false } => (Color::Green, Color::Reset, true),
        Tile::Chest { open: true } => (Color::DarkGreen, Color::Reset, false),
        Tile::Trapdoor => (Color::AnsiValue(0x0d), Color::Reset, false),
        Tile::Merchant => (Color::Cyan, Color::Reset, true),
    }
}

/// Plain two-characters-per-cell dump
pub fn print_ascii(out: &mut impl Write, level: &Level) -> io::Result<()> {
    for row in level.rows() {
        let line: String = row.iter().map(|t| t.symbol()).collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Coloured dump using terminal styling
pub fn print_styled(out: &mut impl Write, level: &Level) -> io::Result<()> {
    for row in level.rows() {
        for &tile in row {
            let (fg, bg, bold) = palette(tile);
            queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
            if bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(tile.symbol()), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
