use crate::reply::lines::{classify_line, is_fence, LineKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_up_to_four_levels() {
        assert_eq!(
            classify_line("## Cells"),
            LineKind::Heading {
                level: 2,
                text: "Cells"
            }
        );
        assert_eq!(
            classify_line("#### Deep"),
            LineKind::Heading {
                level: 4,
                text: "Deep"
            }
        );
        assert_eq!(classify_line("##### Too deep"), LineKind::Text("##### Too deep"));
        assert_eq!(classify_line("#hashtag"), LineKind::Text("#hashtag"));
    }

    #[test]
    fn lists_quotes_and_rules() {
        assert_eq!(classify_line("- apple"), LineKind::Bullet("apple"));
        assert_eq!(classify_line("* pear"), LineKind::Bullet("pear"));
        assert_eq!(classify_line("12. twelfth"), LineKind::Numbered("twelfth"));
        assert_eq!(classify_line("> quoted"), LineKind::Quote("quoted"));
        assert_eq!(classify_line("---"), LineKind::Rule);
        assert_eq!(classify_line("***"), LineKind::Rule);
        assert_eq!(classify_line("----"), LineKind::Text("----"));
    }

    #[test]
    fn rule_wins_over_bullet_for_stars() {
        assert_eq!(classify_line("  ***  "), LineKind::Rule);
    }

    #[test]
    fn lines_are_trimmed_before_matching() {
        assert_eq!(classify_line("   - indented"), LineKind::Bullet("indented"));
        assert_eq!(classify_line("  plain  "), LineKind::Text("plain"));
        assert_eq!(classify_line(" \t "), LineKind::Blank);
    }

    #[test]
    fn fence_lines_carry_language() {
        assert_eq!(classify_line("```python"), LineKind::Fence { language: "python" });
        assert_eq!(classify_line("```"), LineKind::Fence { language: "" });
        assert!(is_fence("  ```"));
        assert!(!is_fence("code ```"));
    }
}
