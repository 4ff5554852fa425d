use std::fmt;
use colored::Colorize;

use super::{
    board::{Board, Piece},
    loc::Loc,
    side::Side,
};

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..self.map.width() {
            write!(f, " {}", x)?;
        }
        writeln!(f)?;

        for y in 0..self.map.height() {
            // Stagger rows to suggest the hex layout
            write!(f, "{}{}", y, " ".repeat(y))?;

            for x in 0..self.map.width() {
                let loc = Loc::new(x as i32, y as i32);
                if let Some(piece) = self.piece_at(&loc) {
                    write!(f, " {}", piece)?;
                } else {
                    let terrain = self.map.get(loc).unwrap();
                    write!(f, " {}", terrain.to_char())?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.to_char().to_string();

        let colored_symbol = match self.side {
            Side::S0 => symbol.bright_blue(),
            Side::S1 => symbol.bright_red(),
        };

        write!(f, "{}", colored_symbol)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::S0 => write!(f, "{}", "Blue".bright_blue()),
            Side::S1 => write!(f, "{}", "Red".bright_red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::core::{Board, Loc, Map, Piece, Side, UnitLabel};

    #[test]
    fn test_board_render() {
        colored::control::set_override(false);

        let mut board = Board::new(Map::parse(&["ggv", "gfg"]).unwrap());
        board.add_piece(Piece::new(UnitLabel::Spearman, Side::S0, Loc::new(0, 0)));
        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, Loc::new(2, 1)));

        let expected = indoc! {"
               0 1 2
            0 S g v
            1  g f W
        "};
        assert_eq!(board.to_string(), expected);

        colored::control::unset_override();
    }
}
