use html_escape::encode_text;

use crate::model::Step;

/// Render steps as a nested ordered list whose nesting mirrors the step tree.
/// A group without substeps renders like a leaf.
pub fn render_steps(steps: &[Step]) -> String {
    let mut html = String::from(r#"<ol class="step-list">"#);
    for step in steps {
        html.push_str("<li>");
        html.push_str(&encode_text(step.text()));
        if let Step::Group { substeps, .. } = step {
            if !substeps.is_empty() {
                html.push_str(r#"<div class="substeps">"#);
                html.push_str(&render_steps(substeps));
                html.push_str("</div>");
            }
        }
        html.push_str("</li>");
    }
    html.push_str("</ol>");
    html
}

/// Render steps as numbered, indented lines for a terminal
pub fn render_steps_text(steps: &[Step]) -> Vec<String> {
    let mut lines = Vec::new();
    push_step_lines(steps, 0, &mut lines);
    lines
}

fn push_step_lines(steps: &[Step], depth: usize, lines: &mut Vec<String>) {
    for (index, step) in steps.iter().enumerate() {
        lines.push(format!("{}{}. {}", "   ".repeat(depth), index + 1, step.text()));
        if let Step::Group { substeps, .. } = step {
            push_step_lines(substeps, depth + 1, lines);
        }
    }
}
