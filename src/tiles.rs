use std::fmt;

/// One terrain tile of a generated layout.
///
/// `Path` and `Goal` are the walkable kinds; everything else blocks movement.
/// `Undergrowth` and `Water` are decorative variants of `Wall` scattered over
/// the solid areas after carving.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Tile {
    Wall,
    Path,
    Goal,
    Undergrowth,
    Water,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        match self {
            Tile::Path | Tile::Goal => true,
            _ => false,
        }
    }

    /// The character this tile serializes to.
    pub fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Path => '.',
            Tile::Goal => 'H',
            Tile::Undergrowth => ';',
            Tile::Water => '~',
        }
    }

    /// Inverse of `to_char`, for consumers parsing a rendered layout back
    /// into their own representation.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Path),
            'H' => Some(Tile::Goal),
            ';' => Some(Tile::Undergrowth),
            '~' => Some(Tile::Water),
            _ => None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn walkability() {
        assert!(Tile::Path.is_walkable());
        assert!(Tile::Goal.is_walkable());
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::Undergrowth.is_walkable());
        assert!(!Tile::Water.is_walkable());
    }

    #[test]
    fn alphabet() {
        let all = [Tile::Wall, Tile::Path, Tile::Goal, Tile::Undergrowth, Tile::Water];
        let chars: Vec<char> = all.iter().map(|t| t.to_char()).collect();
        assert_eq!(chars, vec!['#', '.', 'H', ';', '~']);

        for tile in &all {
            assert_eq!(Tile::from_char(tile.to_char()), Some(*tile));
        }
        assert_eq!(Tile::from_char(' '), None);
        assert_eq!(Tile::from_char('x'), None);
    }
}
