/// Symbol used for platform cells in shipped levels.
pub const PLATFORM: char = '=';
/// Symbol used for empty cells when rasterizing.
pub const BLANK: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows were supplied.
    Empty,
    /// Rows exist but have zero columns.
    ZeroWidth,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "invalid grid: no rows"),
            Self::ZeroWidth => write!(f, "invalid grid: rows have no columns"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "invalid grid: row {row} has {found} cells, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular level layout, one `char` per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width in cells.
    width: u32,
    /// Height in cells.
    height: u32,
    /// Cell data stored row-major (y * width + x).
    cells: Vec<char>,
}

impl Grid {
    /// Build a grid from a matrix of characters. Fails on empty or ragged input.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        if expected == 0 {
            return Err(GridError::ZeroWidth);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            if line.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: line.len(),
                });
            }
            cells.extend_from_slice(line);
        }

        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Build a grid from string rows. Row length is counted in `char`s, not bytes.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        Self::new(rows.iter().map(|r| r.as_ref().chars().collect()).collect())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[self.index(x, y)])
    }

    /// Whether the cell at `(x, y)` equals `symbol`. Out-of-bounds is never a match.
    pub fn is(&self, x: u32, y: u32, symbol: char) -> bool {
        self.get(x, y) == Some(symbol)
    }

    /// Number of cells equal to `symbol`.
    pub fn count(&self, symbol: char) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }

    /// Row `y` rendered back to a string.
    pub fn row(&self, y: u32) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(self.cells[start..start + self.width as usize].iter().collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width as usize)
            .map(|chunk| chunk.iter().collect())
    }

    /// Positions of every cell equal to `symbol`, in row-major order.
    pub fn positions(&self, symbol: char) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == symbol)
            .map(move |(i, _)| (i as u32 % width, i as u32 / width))
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
