use console::Style;
use lokale_template::{
    parse, render_str, render_template, ComponentMap, Element, Node, NodeWriter, TagTransform,
};
use std::collections::HashMap;

fn test_styles() -> HashMap<String, Style> {
    let mut styles = HashMap::new();
    styles.insert("a".to_string(), Style::new().blue().force_styling(true));
    styles.insert("strong".to_string(), Style::new().bold().force_styling(true));
    styles
}

fn leaves(node: &Node) -> Vec<String> {
    let mut out = Vec::new();
    node.walk(&mut |n| {
        if let Some(el) = n.as_element() {
            if el.is_leaf() {
                out.push(n.text_content());
            }
        }
    });
    out
}

#[test]
fn literal_template_roundtrips_through_leaves() {
    let input = "Nothing to see here, move along.";
    let node = render_template(&parse(input), &ComponentMap::new());
    assert_eq!(leaves(&node).concat(), input);
}

#[test]
fn output_modes() {
    let components = ComponentMap::new()
        .with("link", Element::new("a").attr("href", "#"))
        .with("em", Element::new("strong"));
    let node = render_str("[em:Warning]: see [link:details]", &components);

    let plain = NodeWriter::new(test_styles(), TagTransform::Remove);
    assert_eq!(plain.write(&node), "Warning: see details");

    let debug = NodeWriter::new(test_styles(), TagTransform::Keep);
    assert_eq!(
        debug.write(&node),
        "[strong][span]Warning[/span][/strong][span]: see [/span][a][span]details[/span][/a]"
    );

    let term = NodeWriter::new(test_styles(), TagTransform::Apply);
    let output = term.write(&node);
    assert!(output.contains("\x1b[34m")); // blue
    assert!(output.contains("\x1b[1m")); // bold
    assert_eq!(console::strip_ansi_codes(&output), "Warning: see details");
}

#[test]
fn html_output_for_nested_template() {
    let components = ComponentMap::new()
        .with("outer", Element::new("div"))
        .with("inner", Element::new("b"));
    let node = render_str("[outer:a [inner:b] c]", &components);
    assert_eq!(
        node.to_html(),
        "<div><span>a </span><b><span>b</span></b><span> c</span></div>"
    );
}

#[test]
fn unterminated_group_still_renders_its_text() {
    let components = ComponentMap::new().with("link", Element::new("a"));
    let node = render_str("Open [link:settings", &components);
    assert_eq!(node.text_content(), "Open settings");
    assert_eq!(node.to_html(), "<span>Open </span><a><span>settings</span></a>");
}

#[test]
fn partial_mapping_renders_visible_text() {
    let components = ComponentMap::new().with("a", Element::new("em"));
    let node = render_str("[a:one] [b:two]", &components);
    assert_eq!(node.text_content(), "one two");
    assert_eq!(node.to_html(), "<em><span>one</span></em><span> </span><span>two</span>");
}
