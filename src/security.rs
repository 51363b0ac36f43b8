//! Security Module
//!
//! 入力サイズの上限、アップロードファイル名の無害化、拡張子の許可リストを提供するモジュール。

use std::io::Read;

use crate::api::InputFormat;
use crate::error::ShiftGridError;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 16MB (16_777_216 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 16_777_216, // 16MB
        }
    }
}

impl SecurityConfig {
    /// 入力をサイズ上限付きでメモリに読み込む
    ///
    /// 上限を1バイトでも超えた時点で読み込みを打ち切り、
    /// `ShiftGridError::SecurityViolation`を返します。
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, ShiftGridError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(ShiftGridError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}

/// アップロードされたファイル名から入力形式を判定
///
/// 拡張子が許可リスト（`xlsx`, `txt`）にない場合は`UnsupportedFormat`を返します。
pub fn check_extension(file_name: &str) -> Result<InputFormat, ShiftGridError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();

    InputFormat::from_extension(ext)
        .ok_or_else(|| ShiftGridError::UnsupportedFormat(file_name.to_string()))
}

/// 無害化後のファイル名の本体部分の最大長
const MAX_STEM_LEN: usize = 100;

/// 無害化後の拡張子の最大長
const MAX_EXTENSION_LEN: usize = 16;

/// アップロードされたファイル名を無害化
///
/// パス区切りを除去し、ASCII英数字と`.`・`-`・`_`以外の文字を落とし、
/// 空白を`_`で連結します。先頭の`.`と`_`は取り除きます。
/// 本体部分は100文字、拡張子は16文字までに切り詰めます。
/// 結果が空になった場合は`upload`を返します。
pub fn sanitize_filename(file_name: &str) -> String {
    let flattened: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let mut sanitized = truncate_name(filtered.trim_start_matches(['.', '_']));

    // `..`を含む名前は残さない
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}

/// 本体部分と拡張子をそれぞれ最大長までに切り詰める
fn truncate_name(name: &str) -> String {
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let stem: String = stem.chars().take(MAX_STEM_LEN).collect();
    match extension {
        Some(ext) => {
            let ext: String = ext.chars().take(MAX_EXTENSION_LEN).collect();
            format!("{}.{}", stem, ext)
        }
        None => stem,
    }
}
