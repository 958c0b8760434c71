/// Directive lines inside an example: meaningful to the renderer only.
pub struct Directive;

impl Directive {
    pub fn is_directive(line: &str, marker: &str) -> bool {
        !marker.is_empty() && line.starts_with(marker)
    }

    /// Replaces the leading `marker` with the renderer's own directive syntax.
    pub fn translate(line: &str, marker: &str, renderer: &str) -> Option<String> {
        if marker.is_empty() {
            return None;
        }
        line.strip_prefix(marker).map(|rest| format!("{renderer}{rest}"))
    }
}
