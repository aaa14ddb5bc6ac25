// ============================================================================
// Field Grid
// Fixed-size character grid holding the initial field layout
// ============================================================================

use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows in the default field layout
pub const DEFAULT_ROWS: usize = 36;

/// Columns in the default field layout
pub const DEFAULT_COLS: usize = 84;

/// Grid size of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDimensions {
    pub rows: usize,
    pub cols: usize,
}

impl FieldDimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells, or `None` if `rows * cols` overflows.
    pub const fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl fmt::Display for FieldDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Errors from loading a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field file could not be read
    Io { path: PathBuf, message: String },
    /// A line is wider than the grid
    RowTooLong { row: usize, length: usize, max: usize },
    /// The grid has more cells than `usize` can count
    TooLarge { dimensions: FieldDimensions },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Io { path, message } => {
                write!(f, "cannot read field '{}': {}", path.display(), message)
            },
            FieldError::RowTooLong { row, length, max } => write!(
                f,
                "field row {} has {} characters, at most {} allowed",
                row, length, max
            ),
            FieldError::TooLarge { dimensions } => {
                write!(f, "field of {} cells does not fit in memory", dimensions)
            },
        }
    }
}

impl std::error::Error for FieldError {}

/// Initial field layout as a rows × cols character grid.
///
/// The content is opaque to dispatch and handed unchanged to the
/// simulation. Short lines and missing rows are padded with spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    dimensions: FieldDimensions,
    cells: Vec<u8>,
}

impl Field {
    /// Padding byte for cells not present in the input
    pub const BLANK: u8 = b' ';

    /// An all-blank grid.
    ///
    /// # Panics
    /// If `rows * cols` overflows `usize`; use [`Field::try_blank`] for
    /// dimensions that come from user input.
    pub fn blank(dimensions: FieldDimensions) -> Self {
        match Self::try_blank(dimensions) {
            Ok(field) => field,
            Err(e) => panic!("{}", e),
        }
    }

    /// An all-blank grid, or `TooLarge` if the cell count overflows.
    pub fn try_blank(dimensions: FieldDimensions) -> Result<Self, FieldError> {
        let cells = dimensions
            .cell_count()
            .ok_or(FieldError::TooLarge { dimensions })?;
        Ok(Self {
            dimensions,
            cells: vec![Self::BLANK; cells],
        })
    }

    /// Parse a grid from text. Same rules as [`Field::parse_bytes`].
    pub fn parse(text: &str, dimensions: FieldDimensions) -> Result<Self, FieldError> {
        Self::parse_bytes(text.as_bytes(), dimensions)
    }

    /// Parse a grid from raw bytes.
    ///
    /// Lines end at `\n`, with one trailing `\r` dropped. Other bytes are
    /// copied unchanged, whatever their encoding. At most `dimensions.rows`
    /// lines are read; later lines are ignored.
    ///
    /// # Errors
    /// Returns `TooLarge` if the grid cannot be allocated, or `RowTooLong`
    /// if a read line exceeds `dimensions.cols` bytes.
    pub fn parse_bytes(input: &[u8], dimensions: FieldDimensions) -> Result<Self, FieldError> {
        let mut field = Self::try_blank(dimensions)?;

        let body = input.strip_suffix(b"\n").unwrap_or(input);
        let lines = body.split(|&b| b == b'\n').filter(|_| !input.is_empty());

        for (row, line) in lines.take(dimensions.rows).enumerate() {
            let bytes = line.strip_suffix(b"\r").unwrap_or(line);
            if bytes.len() > dimensions.cols {
                return Err(FieldError::RowTooLong {
                    row,
                    length: bytes.len(),
                    max: dimensions.cols,
                });
            }
            let start = row * dimensions.cols;
            field.cells[start..start + bytes.len()].copy_from_slice(bytes);
        }

        Ok(field)
    }

    /// Read and parse a field file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, or `RowTooLong` as for [`Field::parse`].
    pub fn load(path: impl AsRef<Path>, dimensions: FieldDimensions) -> Result<Self, FieldError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| FieldError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!("Loaded field file {} ({} bytes)", path.display(), bytes.len());
        Self::parse_bytes(&bytes, dimensions)
    }

    #[inline]
    pub fn dimensions(&self) -> FieldDimensions {
        self.dimensions
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dimensions.cols
    }

    /// Cell at (row, col), if in range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows() && col < self.cols() {
            Some(self.cells[row * self.cols() + col])
        } else {
            None
        }
    }

    /// One row of the grid, if in range.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row < self.rows() {
            let start = row * self.cols();
            Some(&self.cells[start..start + self.cols()])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols().max(1)) {
            writeln!(f, "{}", String::from_utf8_lossy(row).trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_dimensions() {
        let dims = FieldDimensions::default();
        assert_eq!(dims, FieldDimensions::new(36, 84));
        assert_eq!(dims.cell_count(), Some(36 * 84));
        assert_eq!(dims.to_string(), "36x84");
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let field = Field::parse("###\n# #\n", FieldDimensions::new(3, 4)).unwrap();
        assert_eq!(field.row(0), Some(&b"### "[..]));
        assert_eq!(field.row(1), Some(&b"# # "[..]));
        assert_eq!(field.row(2), Some(&b"    "[..]));
        assert_eq!(field.get(1, 1), Some(b' '));
        assert_eq!(field.get(1, 2), Some(b'#'));
        assert_eq!(field.get(3, 0), None);
        assert_eq!(field.get(0, 4), None);
    }

    #[test]
    fn test_parse_ignores_extra_rows() {
        let field = Field::parse("ab\ncd\nef\n", FieldDimensions::new(2, 2)).unwrap();
        assert_eq!(field.as_bytes(), b"abcd");
    }

    #[test]
    fn test_parse_rejects_wide_rows() {
        let result = Field::parse("ok\ntoo wide\n", FieldDimensions::new(2, 4));
        assert_eq!(
            result,
            Err(FieldError::RowTooLong {
                row: 1,
                length: 8,
                max: 4
            })
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#####").unwrap();
        writeln!(file, "#.  #").unwrap();
        writeln!(file, "#####").unwrap();

        let field = Field::load(file.path(), FieldDimensions::new(3, 5)).unwrap();
        assert_eq!(field.get(1, 1), Some(b'.'));
        assert_eq!(field.to_string(), "#####\n#.  #\n#####\n");
    }

    #[test]
    fn test_parse_bytes_handles_line_endings() {
        let field = Field::parse_bytes(b"ab\r\ncd\n\nef", FieldDimensions::new(4, 2)).unwrap();
        assert_eq!(field.as_bytes(), b"abcd  ef");

        let field = Field::parse_bytes(b"", FieldDimensions::new(1, 2)).unwrap();
        assert_eq!(field.as_bytes(), b"  ");
    }

    #[test]
    fn test_load_keeps_non_utf8_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"#\xe9#\n###\n").unwrap();

        let field = Field::load(file.path(), FieldDimensions::new(2, 3)).unwrap();
        assert_eq!(field.get(0, 1), Some(0xE9));
        assert_eq!(field.as_bytes(), b"#\xe9####");
    }

    #[test]
    fn test_overflowing_dimensions() {
        let dims = FieldDimensions::new(usize::MAX / 2 + 1, 2);
        assert_eq!(dims.cell_count(), None);
        assert_eq!(
            Field::try_blank(dims),
            Err(FieldError::TooLarge { dimensions: dims })
        );
        assert_eq!(
            Field::parse("#\n", dims),
            Err(FieldError::TooLarge { dimensions: dims })
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = Field::load("/nonexistent/field.txt", FieldDimensions::default());
        assert!(matches!(result, Err(FieldError::Io { .. })));
    }
}
