//! Grid Module
//!
//! 意味付け前の生のセルグリッドを提供するモジュール。
//! すべてのセルはトリム済みの文字列で、nullは空文字列に正規化されます。

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// テキストセルのグリッド（行 × 列）
///
/// 読み込み後は不変です。行0・列0にも位置以上の意味はありません。
/// テキスト形式から読み込んだグリッドは行ごとに列数が異なる場合があります。
///
/// # 使用例
///
/// ```rust
/// use shiftgrid::Grid;
///
/// let grid = Grid::from_rows(vec![
///     vec!["", "PLANTILLA"],
///     vec!["", ""],
///     vec![" Alice ", "M", "T"],
/// ]);
///
/// assert_eq!(grid.row_count(), 3);
/// assert_eq!(grid.cell(2, 0), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    /// グリッドデータ（行 × 列）
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// 行のリストからグリッドを構築（各セルはトリムされる）
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.as_ref().trim().to_string())
                    .collect()
            })
            .collect();

        Self { rows }
    }

    /// スパースなセルデータから稠密な矩形グリッドを構築
    ///
    /// グリッドはA1セルを原点とします。先頭の空行・空列も保持されるため、
    /// 行インデックスはシート上の絶対位置と一致します。
    pub(crate) fn from_sparse(cells: Vec<(CellCoord, String)>) -> Self {
        if cells.is_empty() {
            return Self::default();
        }

        // 1. グリッドサイズの決定
        let (rows, cols) = Self::determine_grid_size(&cells);

        // 2. 空のグリッドを初期化
        let mut grid_cells = vec![vec![String::new(); cols]; rows];

        // 3. セルデータを配置
        for (coord, content) in cells {
            grid_cells[coord.row as usize][coord.col as usize] = content.trim().to_string();
        }

        Self { rows: grid_cells }
    }

    /// すべてのセル座標から最大行・列を算出
    fn determine_grid_size(cells: &[(CellCoord, String)]) -> (usize, usize) {
        let mut max_row = 0;
        let mut max_col = 0;

        for (coord, _) in cells {
            max_row = max_row.max(coord.row);
            max_col = max_col.max(coord.col);
        }

        ((max_row + 1) as usize, (max_col + 1) as usize)
    }

    /// すべての行
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 指定行（範囲外なら`None`）
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// 指定セル（範囲外なら`None`）
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 最も長い行の列数
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// 行が1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
