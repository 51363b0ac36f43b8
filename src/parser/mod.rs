//! Parser Module
//!
//! 入力ソースを`Grid`に変換するローダー群。
//! ワークブック（calamine）と行ベースのテキスト形式の2種類を提供します。

mod text;
mod workbook;

pub use text::{lines_to_grid, read_text_lines};
pub(crate) use workbook::WorkbookLoader;
