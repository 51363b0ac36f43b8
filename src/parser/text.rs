//! Text Loader
//!
//! 行ベースのテキスト形式をグリッドに変換します。
//! 列はタブ、`|`、または2つ以上連続する空白で区切られます。
//! タブと`|`は1つごとに1列を区切るため、空セルの位置も保たれます。

use regex::Regex;
use std::io::Read;
use std::sync::LazyLock;

use crate::grid::Grid;

static COLUMN_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t|\s*\|\s*| {2,}").expect("static regex must compile"));

/// テキストを行単位で読み込む
///
/// 不正なUTF-8は置換文字に変換されます。空行も位置を保つために空文字列として残し、
/// 行末の`\r`は取り除きます。
pub fn read_text_lines<R: Read>(mut reader: R) -> std::io::Result<Vec<String>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let text = String::from_utf8_lossy(&buffer);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    Ok(text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

/// 行のリストをグリッドに変換
///
/// 各行は列区切りで分割されます。行ごとの列数は揃えません。
///
/// ```rust
/// use shiftgrid::lines_to_grid;
///
/// let grid = lines_to_grid(["PLANTILLA", "", "Alice Bob\tM\tT"]);
/// assert_eq!(grid.row(2).unwrap(), &["Alice Bob", "M", "T"]);
/// ```
pub fn lines_to_grid<I, S>(lines: I) -> Grid
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Grid::from_rows(lines.into_iter().map(|line| split_columns(line.as_ref())))
}

/// 1行を列に分割
fn split_columns(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    COLUMN_BREAK_RE
        .split(line)
        .map(|cell| cell.trim().to_string())
        .collect()
}
