//! Inline styles as a stylesheet

use liveedit_markup::{parse, raw_declarations};

/// Turn every element carrying a `style` attribute into a `.element-<i>`
/// rule, in document order. `i` counts every such element, including those
/// whose attribute is empty and therefore produce no rule.
pub fn export_css(markup: &str) -> String {
    let tree = parse(markup);
    let mut css = String::new();

    let styled = tree
        .descendants(tree.root())
        .filter_map(|node| tree.element(node)?.attribute("style"));

    for (index, style) in styled.enumerate() {
        if style.is_empty() {
            continue;
        }
        css.push_str(&format!(".element-{} {{\n", index));
        for decl in raw_declarations(&style) {
            css.push_str("  ");
            css.push_str(decl);
            css.push_str(";\n");
        }
        css.push_str("}\n\n");
    }

    css
}
