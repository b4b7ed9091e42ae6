use crate::error::{AppError, AppResult, DecklistError, FileError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

/// 卡表文本中的一行（尚未查询卡图）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecklistLine {
    pub line_no: usize,
    pub count: u32,
    pub name: String,
    pub set: Option<String>,
    pub collector_number: Option<String>,
}

/// 分区标题，例如 Arena 导出中的 "Deck" / "Sideboard"
const SECTION_HEADERS: &[&str] = &[
    "deck",
    "sideboard",
    "commander",
    "companion",
    "maybeboard",
    "about",
];

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<count>\d+)x?\s+(?P<name>.+?)(?:\s+\((?P<set>[A-Za-z0-9]+)\)(?:\s+(?P<number>[^\s*]\S*))?)?(?:\s+\*[A-Za-z]+\*)*\s*$",
        )
        .expect("卡表正则无效")
    })
}

/// 解析文本 / Arena 格式的卡表
///
/// 每行格式为 `数量[x] 卡名 [(系列) [编号]]`，行尾的 `*F*` 之类标记会被忽略。
/// 空行、`//` 或 `#` 开头的注释以及分区标题会被跳过，
/// `SB:` 前缀会被去掉。
pub fn parse_decklist_text(text: &str) -> AppResult<Vec<DecklistLine>> {
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut line = raw.trim();

        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }
        if is_section_header(line) {
            continue;
        }
        if let Some(rest) = line.strip_prefix("SB:") {
            line = rest.trim_start();
        }

        let caps = line_regex()
            .captures(line)
            .ok_or_else(|| DecklistError::InvalidLine {
                line_no,
                line: line.to_string(),
            })?;

        let count: u32 = caps["count"].parse().map_err(|_| DecklistError::InvalidLine {
            line_no,
            line: line.to_string(),
        })?;
        if count == 0 {
            return Err(DecklistError::InvalidCount { line_no }.into());
        }

        lines.push(DecklistLine {
            line_no,
            count,
            name: caps["name"].trim().to_string(),
            set: caps.name("set").map(|m| m.as_str().to_lowercase()),
            collector_number: caps.name("number").map(|m| m.as_str().to_string()),
        });
    }

    Ok(lines)
}

fn is_section_header(line: &str) -> bool {
    let lowered = line.trim_end_matches(':').to_lowercase();
    SECTION_HEADERS.contains(&lowered.as_str())
}

/// 读取卡表文件并解析
pub async fn load_decklist_file(path: &Path) -> AppResult<Vec<DecklistLine>> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let lines = parse_decklist_text(&content)?;
    tracing::info!(
        "正在加载卡表: {} ({} 行有效条目)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        lines.len()
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arena_line_with_print() {
        let lines = parse_decklist_text("4 Lightning Bolt (M10) 146").unwrap();
        assert_eq!(
            lines,
            vec![DecklistLine {
                line_no: 1,
                count: 4,
                name: "Lightning Bolt".to_string(),
                set: Some("m10".to_string()),
                collector_number: Some("146".to_string()),
            }]
        );
    }

    #[test]
    fn parses_plain_line_and_x_suffix() {
        let lines = parse_decklist_text("2x Delver of Secrets // Insectile Aberration").unwrap();
        assert_eq!(lines[0].count, 2);
        assert_eq!(lines[0].name, "Delver of Secrets // Insectile Aberration");
        assert_eq!(lines[0].set, None);
        assert_eq!(lines[0].collector_number, None);
    }

    #[test]
    fn set_without_number() {
        let lines = parse_decklist_text("1 Island (UNH)").unwrap();
        assert_eq!(lines[0].set.as_deref(), Some("unh"));
        assert_eq!(lines[0].collector_number, None);
    }

    #[test]
    fn trailing_markers_are_ignored() {
        let lines = parse_decklist_text(
            "4 Lightning Bolt (M10) 146 *F*\n1 Island (UNH) *E*\n2 Brainstorm *F*",
        )
        .unwrap();

        assert_eq!(lines[0].name, "Lightning Bolt");
        assert_eq!(lines[0].set.as_deref(), Some("m10"));
        assert_eq!(lines[0].collector_number.as_deref(), Some("146"));
        assert_eq!(lines[1].name, "Island");
        assert_eq!(lines[1].set.as_deref(), Some("unh"));
        assert_eq!(lines[1].collector_number, None);
        assert_eq!(lines[2].name, "Brainstorm");
        assert_eq!(lines[2].set, None);
    }
}
