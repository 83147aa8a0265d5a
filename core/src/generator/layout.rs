use super::*;

/// Letters written so far while a round is being built. Blank cells are `None` until the filler pass.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    letters: Array2<Option<char>>,
    owners: Array2<Option<WordIndex>>,
    size: Coord,
}

impl Layout {
    pub fn new(size: Coord) -> Self {
        let dim = (size, size).to_nd_index();
        Self {
            letters: Array2::from_elem(dim, None),
            owners: Array2::from_elem(dim, None),
            size,
        }
    }

    pub fn set_letter(&mut self, pos: Pos, letter: char) {
        self.letters[pos.to_nd_index()] = Some(letter);
    }

    /// Checks that the run stays in bounds and that every cell on it is blank or already holds the needed letter.
    pub fn fits(&self, letters: &[char], start: Pos, direction: Direction) -> Option<Placement> {
        let placement = Placement::new(start, direction, letters.len(), self.size)?;
        placement
            .cells()
            .zip(letters)
            .all(|(pos, &letter)| match self.letters[pos.to_nd_index()] {
                None => true,
                Some(existing) => existing == letter,
            })
            .then_some(placement)
    }

    /// First run spelling `letters`, scanning start cells in row order and trying each direction.
    pub fn find(&self, letters: &[char]) -> Option<Placement> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .flat_map(|start| Direction::ALL.map(|direction| (start, direction)))
            .find_map(|(start, direction)| self.fits(letters, start, direction))
    }

    pub fn write(&mut self, word: WordIndex, letters: &[char], placement: Placement) {
        for (pos, &letter) in placement.cells().zip(letters) {
            self.letters[pos.to_nd_index()] = Some(letter);
            self.owners[pos.to_nd_index()] = Some(word);
        }
    }

    pub fn blank_count(&self) -> usize {
        self.letters.iter().filter(|letter| letter.is_none()).count()
    }

    /// Turns the layout into the final grid, drawing a filler letter for each blank cell in row order.
    pub fn fill(self, mut filler: impl FnMut() -> char) -> Array2<Cell> {
        let Layout {
            letters, owners, ..
        } = self;
        let mut grid: Array2<Cell> = Array2::default(letters.dim());

        for ((index, letter), owner) in letters.indexed_iter().zip(owners.iter()) {
            grid[index] = match (letter, owner) {
                (Some(letter), Some(word)) => Cell::placed(*letter, *word),
                (Some(letter), None) => Cell::filler(*letter),
                (None, _) => Cell::filler(filler()),
            };
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    #[test]
    fn crossing_words_may_share_matching_letters() {
        let mut layout = Layout::new(5);
        let haus = chars("HAUS");
        let baum = chars("BAUM");

        let first = layout.fits(&haus, (1, 0), Direction::Horizontal).unwrap();
        layout.write(0, &haus, first);

        // the A of BAUM lands on the A of HAUS
        assert!(layout.fits(&baum, (0, 1), Direction::Vertical).is_some());
        // the A of BAUM would land on the U of HAUS
        assert!(layout.fits(&baum, (0, 2), Direction::Vertical).is_none());
        assert!(layout.fits(&baum, (1, 0), Direction::Horizontal).is_none());
    }

    #[test]
    fn fits_rejects_out_of_bounds_runs() {
        let layout = Layout::new(4);

        assert!(layout.fits(&chars("HAUS"), (0, 0), Direction::Horizontal).is_some());
        assert!(layout.fits(&chars("HAUS"), (0, 1), Direction::Horizontal).is_none());
        assert!(layout.fits(&chars("HAUS"), (0, 0), Direction::DiagonalUp).is_none());
        assert!(layout.fits(&chars("WASSER"), (0, 0), Direction::Vertical).is_none());
    }

    #[test]
    fn fill_only_touches_blank_cells() {
        let mut layout = Layout::new(3);
        let word = chars("ZEI");
        let placement = layout.fits(&word, (2, 0), Direction::Horizontal).unwrap();
        layout.write(3, &word, placement);
        assert_eq!(layout.blank_count(), 6);

        let mut drawn = 0;
        let grid = layout.fill(|| {
            drawn += 1;
            'Q'
        });

        assert_eq!(drawn, 6);
        assert_eq!(grid[[2, 1]], Cell::placed('E', 3));
        assert_eq!(grid[[0, 0]], Cell::filler('Q'));
        assert!(grid.iter().all(|cell| cell.letter != ' '));
    }
}
