#[cfg(test)]
mod tests {
    use crate::markdown::*;
    use crate::state::*;

    // ─── Disclosure Tests ────────────────────────────────────

    #[test]
    fn test_disclosure_starts_collapsed() {
        let state = UiState::new();
        assert!(!state.trace_disclosure.is_expanded());
    }

    #[test]
    fn test_disclosure_body_click_expands_when_collapsed() {
        let mut disclosure = Disclosure::Collapsed;
        disclosure.on_body_click();
        assert!(disclosure.is_expanded());
    }

    #[test]
    fn test_disclosure_body_click_does_not_collapse_when_expanded() {
        let mut disclosure = Disclosure::Expanded;
        disclosure.on_body_click();
        assert!(disclosure.is_expanded());
    }

    #[test]
    fn test_disclosure_toggle_flips_both_ways() {
        let mut disclosure = Disclosure::Collapsed;
        disclosure.on_toggle();
        assert!(disclosure.is_expanded());
        disclosure.on_toggle();
        assert!(!disclosure.is_expanded());
    }

    #[test]
    fn test_ui_state_reset() {
        let mut state = UiState::new();
        state.topic_input = "half typed".to_string();
        state.feedback_input = "draft".to_string();
        state.show_feedback_dialog = true;
        state.trace_disclosure = Disclosure::Expanded;

        state.reset();
        assert!(state.topic_input.is_empty());
        assert!(state.feedback_input.is_empty());
        assert!(!state.show_feedback_dialog);
        assert!(!state.trace_disclosure.is_expanded());
    }

    // ─── Report Cache Tests ──────────────────────────────────

    #[test]
    fn test_report_cache_tracks_source_changes() {
        let mut state = UiState::new();
        assert_eq!(state.report_blocks("# One").len(), 1);
        // same source → same parse
        assert_eq!(state.report_blocks("# One").len(), 1);
        // changed source → fresh parse
        let blocks = state.report_blocks("# One\n\ntext");
        assert_eq!(blocks.len(), 2);
    }

    // ─── Markdown Parsing Tests ──────────────────────────────

    #[test]
    fn test_markdown_empty_input_renders_nothing() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("   \n\t\n").is_empty());
    }

    #[test]
    fn test_markdown_heading() {
        let blocks = parse_markdown("# Summary");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Heading { level, spans } => {
                assert_eq!(*level, 1);
                assert_eq!(spans[0].text, "Summary");
            }
            other => panic!("Wrong block: {:?}", other),
        }
    }

    #[test]
    fn test_markdown_heading_levels() {
        let blocks = parse_markdown("## Two\n\n### Three");
        assert!(matches!(blocks[0], Block::Heading { level: 2, .. }));
        assert!(matches!(blocks[1], Block::Heading { level: 3, .. }));
    }

    #[test]
    fn test_markdown_paragraph_with_inline_styles() {
        let blocks = parse_markdown("plain **bold** and *italic* and `code`");
        assert_eq!(blocks.len(), 1);
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("Expected paragraph");
        };
        assert!(spans.iter().any(|s| s.strong && s.text == "bold"));
        assert!(spans.iter().any(|s| s.emphasis && s.text == "italic"));
        assert!(spans.iter().any(|s| s.code && s.text == "code"));
        assert!(spans.iter().any(|s| !s.strong && !s.emphasis && !s.code));
    }

    #[test]
    fn test_markdown_unordered_list() {
        let blocks = parse_markdown("- alpha\n- beta\n- gamma");
        let Block::List { ordered, items } = &blocks[0] else {
            panic!("Expected list");
        };
        assert!(!*ordered);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1][0].text, "beta");
    }

    #[test]
    fn test_markdown_ordered_list() {
        let blocks = parse_markdown("1. first\n2. second");
        let Block::List { ordered, items } = &blocks[0] else {
            panic!("Expected list");
        };
        assert!(*ordered);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_markdown_nested_list_flattens() {
        let blocks = parse_markdown("- outer\n  - inner\n- next");
        assert_eq!(blocks.len(), 1);
        let Block::List { items, .. } = &blocks[0] else {
            panic!("Expected list");
        };
        let texts: Vec<&str> = items.iter().map(|i| i[0].text.as_str()).collect();
        assert!(texts.contains(&"outer"));
        assert!(texts.contains(&"inner"));
        assert!(texts.contains(&"next"));
    }

    #[test]
    fn test_markdown_table_extension() {
        let source = "| Col A | Col B |\n| --- | --- |\n| a1 | b1 |\n| a2 | b2 |";
        let blocks = parse_markdown(source);
        assert_eq!(blocks.len(), 1);
        let Block::Table { header, rows } = &blocks[0] else {
            panic!("Expected table");
        };
        assert_eq!(header.len(), 2);
        assert_eq!(header[0][0].text, "Col A");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1][0].text, "b1");
        assert_eq!(rows[1][0][0].text, "a2");
    }

    #[test]
    fn test_markdown_code_block() {
        let blocks = parse_markdown("```rust\nfn main() {}\n```");
        let Block::CodeBlock { language, code } = &blocks[0] else {
            panic!("Expected code block");
        };
        assert_eq!(language, "rust");
        assert_eq!(code, "fn main() {}");
    }

    #[test]
    fn test_markdown_rule() {
        let blocks = parse_markdown("before\n\n---\n\nafter");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::Rule));
    }

    #[test]
    fn test_markdown_strikethrough_extension() {
        let blocks = parse_markdown("~~gone~~");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("Expected paragraph");
        };
        assert!(spans[0].strikethrough);
        assert_eq!(spans[0].text, "gone");
    }

    #[test]
    fn test_markdown_soft_breaks_become_spaces() {
        let blocks = parse_markdown("line one\nline two");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("Expected paragraph");
        };
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "line one line two");
    }

    #[test]
    fn test_markdown_malformed_input_does_not_panic() {
        // broken table, unclosed fence, stray emphasis
        let blocks = parse_markdown("| a |\n|---\n\n```\nunclosed\n\n**stray");
        assert!(!blocks.is_empty());
    }

    #[test]
    fn test_markdown_report_shape() {
        let source = "# Summary\n\nKey findings below.\n\n| Metric | Value |\n| --- | --- |\n| Cells | 42 |\n\n- point one\n- point two";
        let blocks = parse_markdown(source);
        assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
        assert!(matches!(blocks[2], Block::Table { .. }));
        assert!(matches!(blocks[3], Block::List { .. }));
    }

    #[test]
    fn test_markdown_consecutive_same_style_spans_merge() {
        let blocks = parse_markdown("one two three");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("Expected paragraph");
        };
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "one two three");
    }
}
