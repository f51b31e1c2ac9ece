//! キーワード照合
//!
//! キーワードを単語境界つき・大文字小文字無視の正規表現に変換する。
//! 末尾に複数形の "s" / "es" を許容する（"apple" は "Apples" に一致し、"pineapple" には一致しない）。
//!
//! キーワードはエスケープせずにパターンへ埋め込むため、正規表現として
//! 不正なキーワードがありうる。その場合は `None` を返し、呼び出し側で不一致として扱う。

use regex::Regex;

/// キーワードから照合パターン文字列を生成
///
/// 既に "s" で終わるキーワードには "es" のみを許容する（"oats" → "oatss" にはしない）。
pub fn keyword_pattern(keyword: &str) -> String {
    let keyword = keyword.trim().to_lowercase();
    let plural = if keyword.ends_with('s') { "(es)?" } else { "(s|es)?" };
    format!(r"(?i)\b{}{}\b", keyword, plural)
}

/// キーワードをコンパイル（不正なパターンは `Err` にメッセージを入れて返す）
///
/// 空白のみのキーワードは `\b(s|es)?\b` となり任意の品目名に一致してしまうため不正扱い。
pub fn compile_keyword(keyword: &str) -> Result<Regex, String> {
    if keyword.trim().is_empty() {
        return Err("empty keyword".to_string());
    }
    Regex::new(&keyword_pattern(keyword)).map_err(|e| e.to_string())
}

/// 単一キーワードが品目名に一致するか
///
/// 不正なキーワードは常に不一致。
pub fn keyword_matches(keyword: &str, item_name: &str) -> bool {
    match compile_keyword(keyword) {
        Ok(re) => re.is_match(&item_name.to_lowercase()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_shape() {
        assert_eq!(keyword_pattern("Apple"), r"(?i)\bapple(s|es)?\b");
        assert_eq!(keyword_pattern("oats"), r"(?i)\boats(es)?\b");
    }

    #[test]
    fn test_word_boundary() {
        assert!(keyword_matches("egg", "Egg"));
        assert!(keyword_matches("egg", "Free Range Eggs"));
        assert!(!keyword_matches("egg", "Eggplant"));
        assert!(!keyword_matches("egg", "scrambledeggmix"));
        assert!(!keyword_matches("apple", "Applesauce"));
        assert!(!keyword_matches("apple", "Pineapple"));
    }

    #[test]
    fn test_hyphen_is_boundary() {
        assert!(keyword_matches("egg", "scrambled-egg-mix"));
    }

    #[test]
    fn test_plural_suffix() {
        assert!(keyword_matches("tomato", "Tomato"));
        assert!(keyword_matches("tomato", "Tomatoes"));
        assert!(keyword_matches("tomato", "tomatos"));
        assert!(!keyword_matches("tomato", "tomatoess"));
    }

    #[test]
    fn test_keyword_ending_in_s() {
        assert!(keyword_matches("oats", "Rolled Oats"));
        assert!(!keyword_matches("oats", "oatss"));
        assert!(keyword_matches("glass", "Wine Glasses"));
    }

    #[test]
    fn test_multi_word_keyword() {
        assert!(keyword_matches("peanut butter", "Crunchy Peanut Butter"));
        assert!(!keyword_matches("peanut butter", "Peanut"));
        assert!(keyword_matches("ice cream", "Vanilla Ice Creams"));
    }

    #[test]
    fn test_invalid_keyword_never_matches() {
        assert!(compile_keyword("choc(").is_err());
        assert!(!keyword_matches("choc(", "choc( chip"));
        assert!(!keyword_matches("[", "["));
    }

    #[test]
    fn test_blank_keyword_never_matches() {
        assert_eq!(compile_keyword("").unwrap_err(), "empty keyword");
        assert!(compile_keyword("   ").is_err());
        assert!(!keyword_matches("  ", "Milk"));
    }

    #[test]
    fn test_unicode_word_boundary() {
        // 境界判定は Unicode の単語文字基準（"é" も単語文字）
        assert!(!keyword_matches("caf", "Café"));
        assert!(keyword_matches("café", "Café Latte"));
        assert!(keyword_matches("jalapeño", "Sliced Jalapeños"));
    }
}
