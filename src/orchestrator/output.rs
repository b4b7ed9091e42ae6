//! 输出文件命名
//!
//! 第一个序列直接使用用户给出的路径，之后的序列在扩展名前插入从 1 开始的序号，
//! 例如 `sheet.pdf`、`sheet_2.pdf`、`sheet_3.pdf`。

use std::path::{Path, PathBuf};

/// 第 `index` 个序列（从 0 开始）的输出路径
pub fn output_file_name(index: usize, base: &Path) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    numbered_sibling(base, &(index + 1).to_string())
}

/// 为 `count` 个序列生成全部输出路径
pub fn output_file_names(base: &Path, count: usize) -> Vec<PathBuf> {
    (0..count).map(|index| output_file_name(index, base)).collect()
}

/// 在扩展名前插入后缀：`dir/deck.pdf` + `2` → `dir/deck_2.pdf`
pub(crate) fn numbered_sibling(base: &Path, suffix: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}_{}", stem, suffix),
    };
    base.with_file_name(file_name)
}
