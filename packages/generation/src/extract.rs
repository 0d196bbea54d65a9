//! Pulling markup out of a chatty model response

use crate::GenerationError;
use regex::Regex;
use std::sync::OnceLock;

const CODE_BLOCK: &str = r"```(?:jsx|html|react|tsx)?\s*([\s\S]*?)```";
const CLOSING_TAG: &str = r"</[^>]+>";

fn pattern(cell: &'static OnceLock<Result<Regex, regex::Error>>, source: &str) -> Result<&'static Regex, GenerationError> {
    cell.get_or_init(|| Regex::new(source))
        .as_ref()
        .map_err(|e| GenerationError::Pattern(e.clone()))
}

/// Extract markup from a model response.
///
/// Fenced code blocks (optionally tagged `jsx`, `html`, `react` or `tsx`)
/// win and are joined by a blank line. Otherwise the text from the first
/// `<` through the end of the last closing tag is kept.
pub fn extract_code_from_markdown(markdown: &str) -> Result<String, GenerationError> {
    static CODE_BLOCK_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    static CLOSING_TAG_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    let blocks: Vec<&str> = pattern(&CODE_BLOCK_RE, CODE_BLOCK)?
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect();
    if !blocks.is_empty() {
        return Ok(blocks.join("\n\n"));
    }

    let Some(start) = markdown.find('<') else {
        return Ok(markdown.trim().to_string());
    };
    let mut markup = &markdown[start..];
    if let Some(last) = pattern(&CLOSING_TAG_RE, CLOSING_TAG)?.find_iter(markup).last() {
        markup = &markup[..last.end()];
    }
    Ok(markup.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_blocks_are_joined() {
        let response = "Here you go:\n```html\n<div>one</div>\n```\nand\n```\n<p>two</p>\n```\nEnjoy!";
        assert_eq!(
            extract_code_from_markdown(response).unwrap(),
            "<div>one</div>\n\n<p>two</p>"
        );
    }

    #[test]
    fn test_unfenced_markup_is_trimmed_to_tags() {
        let response = "Sure! <div style=\"position: relative\"><p>Hi</p></div> Hope this helps.";
        assert_eq!(
            extract_code_from_markdown(response).unwrap(),
            "<div style=\"position: relative\"><p>Hi</p></div>"
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(extract_code_from_markdown("  no markup here \n").unwrap(), "no markup here");
    }

    #[test]
    fn test_no_closing_tag_keeps_tail() {
        assert_eq!(extract_code_from_markdown("x <img src=a.png> ").unwrap(), "<img src=a.png>");
    }
}
